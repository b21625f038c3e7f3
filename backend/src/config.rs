use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub redis_host: String,
    pub redis_port: u16,
    pub redis_db: u8,
    pub top_n: i64,
}

impl Config {
    pub fn load() -> Self {
        Self {
            redis_host: try_load("REDIS_HOST", "127.0.0.1"),
            redis_port: try_load("REDIS_PORT", "6379"),
            redis_db: try_load("REDIS_DB", "0"),
            top_n: try_load("TOP_N", "10"),
        }
    }

    pub fn redis_url(&self) -> String {
        format!(
            "redis://{}:{}/{}",
            self.redis_host, self.redis_port, self.redis_db
        )
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
