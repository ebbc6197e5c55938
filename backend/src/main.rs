//! Backend entry-point: configuration, migrations, and server start-up.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use actix_web::web;
use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use url::Url;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{IdentityProviderSettings, ServerConfig, create_server};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 5;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let mut config = ServerConfig::new(bind_addr);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        run_migrations(database_url.clone()).await?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|e| std::io::Error::other(format!("database pool failed: {e}")))?;
        config = config.with_db_pool(pool);
    } else {
        warn!("DATABASE_URL not set; persistence runs on fixtures");
    }

    match env::var("IDENTITY_PROVIDER_URL") {
        Ok(raw) => {
            let base_url = Url::parse(&raw)
                .map_err(|e| std::io::Error::other(format!("invalid IDENTITY_PROVIDER_URL: {e}")))?;
            let request_timeout = provider_timeout()?;
            config = config.with_identity_provider(IdentityProviderSettings {
                base_url,
                request_timeout,
            });
        }
        Err(_) => warn!("IDENTITY_PROVIDER_URL not set; identity runs on fixtures"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %bind_addr, "starting server");
    let server = create_server(health_state, config)?;
    server.await
}

fn provider_timeout() -> std::io::Result<Duration> {
    match env::var("IDENTITY_PROVIDER_TIMEOUT_SECS") {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| std::io::Error::other(format!("invalid IDENTITY_PROVIDER_TIMEOUT_SECS: {e}"))),
        Err(_) => Ok(Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS)),
    }
}

/// Apply pending migrations on a blocking connection before serving.
async fn run_migrations(database_url: String) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url)
            .map_err(|e| std::io::Error::other(format!("database connection failed: {e}")))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
        Ok(())
    })
    .await
    .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))?
}
