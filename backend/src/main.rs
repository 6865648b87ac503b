//! Studio backend entry-point: configuration, migrations, adapters, listener.

mod server;

use std::ffi::OsString;
use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{BuildMode, ServerConfig, ServerSettings, create_server, identity_settings_from_env};
use studio_backend::inbound::http::health::HealthState;
use studio_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use studio_backend::outbound::storage::LocalDiskAssetStorage;

fn startup_error(stage: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("{stage}: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args: Vec<OsString> = std::env::args_os().collect();
    let settings =
        ServerSettings::load_from_iter(args).map_err(|err| startup_error("configuration", err))?;
    let env = DefaultEnv::new();
    let identity = identity_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(|err| startup_error("identity configuration", err))?;

    run_pending_migrations(settings.database_url.clone())
        .await
        .map_err(|err| startup_error("migrations", err))?;

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url.clone())
            .with_max_size(settings.db_max_connections()),
    )
    .await
    .map_err(|err| startup_error("database pool", err))?;

    let uploads_dir = settings.uploads_dir();
    let storage = LocalDiskAssetStorage::open(uploads_dir.clone())
        .map_err(|err| startup_error("uploads directory", err))?;
    info!(path = %uploads_dir.display(), "serving uploads");

    let config = ServerConfig::from_adapters(&settings, &identity, &pool, storage)?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
