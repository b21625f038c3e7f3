use std::sync::Arc;

use backend::api::LeaderboardApi;
use backend::config::Config;
use backend::directory::{RedisSongCatalog, RedisUserDirectory};
use backend::leaderboard::Leaderboard;
use backend::store::{connect, RedisScoreStore};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Dumps the current standings as JSON. Doubles as a wiring reference for
/// callers embedding the engine: one connection manager built at startup,
/// handles cloned into each adapter.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();
    info!("Connecting to {}", config.redis_url());
    let connection = connect(&config.redis_url()).await?;

    let board = Leaderboard::new(
        Arc::new(RedisScoreStore::new(connection.clone())),
        Arc::new(RedisUserDirectory::new(connection.clone())),
        Arc::new(RedisSongCatalog::new(connection)),
    );
    let api = LeaderboardApi::new(board);

    let standings = api.top_songs(Some(config.top_n)).await?;
    println!("{}", serde_json::to_string_pretty(&standings)?);

    Ok(())
}
