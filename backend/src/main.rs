//! Binary entry-point: configuration, logging, seeding, and the server loop.

use std::sync::Arc;

use mockable::DefaultEnv;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use slotbook::outbound::persistence::InMemoryStore;
use slotbook::server::{self, AppConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env(&DefaultEnv::default())
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let store = Arc::new(InMemoryStore::new());
    if config.seed_demo_data {
        store
            .seed_demo_data()
            .await
            .map_err(|err| std::io::Error::other(format!("demo seed failed: {err}")))?;
    }

    server::run(config, store).await
}
