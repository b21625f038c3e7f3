pub mod models;
pub mod validation;

pub use models::*;
pub use validation::{validate_id, ValidationError, MAX_ID_LENGTH};

#[cfg(test)]
mod tests;
