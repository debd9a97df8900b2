//! Workspace task tracker server.
//!
//! Serves the REST surface over a Redis-compatible key-value backend.
//! Configuration comes from flags or the environment:
//!
//! ```text
//! quintetd --bind 127.0.0.1:8080 --redis-url redis://127.0.0.1:6379
//! ```
//!
//! `REDIS_URL` and `CRON_SECRET` are read from the environment when the
//! flags are omitted. The scheduled daily-reset trigger is exposed at
//! `GET /api/cron/daily-reset`; point the cron delivery service of your
//! choice at it, with `Authorization: Bearer <CRON_SECRET>` when a secret
//! is configured.

use clap::Parser;
use mockable::DefaultClock;
use quintet::http::{ApiState, router};
use quintet::task::adapters::{KvTaskRepository, RedisKeyValueStore};
use quintet::task::ports::KeyValueStoreError;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "quintetd", about = "Workspace task tracker server")]
struct Options {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Redis-compatible backend URL.
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    redis_url: String,

    /// Shared secret required by the cron trigger endpoint; the check is
    /// disabled when unset.
    #[arg(long, env = "CRON_SECRET")]
    cron_secret: Option<String>,
}

/// Errors that abort server startup.
#[derive(Debug, Error)]
enum ServerError {
    #[error("key-value backend connection failed: {0}")]
    Backend(#[from] KeyValueStoreError),
    #[error("server io failure: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = Options::parse();
    let store = RedisKeyValueStore::connect(&options.redis_url).await?;
    let repository = Arc::new(KvTaskRepository::new(Arc::new(store)));
    let state = Arc::new(ApiState::new(
        repository,
        Arc::new(DefaultClock),
        options.cron_secret,
    ));

    let listener = TcpListener::bind(options.bind).await?;
    info!(addr = %options.bind, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
