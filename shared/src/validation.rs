pub const MAX_ID_LENGTH: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty id")]
    EmptyId,
    #[error("Id exceeds maximum length of {MAX_ID_LENGTH}")]
    IdTooLong,
    #[error("Invalid character {0:?} in id")]
    InvalidCharacter(char),
}

/// Checks a caller-supplied user or song id before it is used to build a
/// store key. Ids are opaque tokens (UUIDs in practice): ASCII alphanumeric
/// plus `-` and `_`, at most [`MAX_ID_LENGTH`] bytes.
pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(ValidationError::IdTooLong);
    }
    if let Some(c) = id
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
    {
        return Err(ValidationError::InvalidCharacter(c));
    }
    Ok(())
}
