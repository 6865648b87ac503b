//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{BuildMode, IdentitySettings, ServerSettings, identity_settings_from_env};

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use actix_files::Files;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use studio_backend::Trace;
#[cfg(debug_assertions)]
use studio_backend::doc::ApiDoc;
use studio_backend::inbound::http::configure_api;
use studio_backend::inbound::http::health::{HealthState, live, ready};
use studio_backend::inbound::http::state::HttpState;
use studio_backend::outbound::persistence::DbPool;
use studio_backend::outbound::storage::{LocalDiskAssetStorage, UPLOADS_URL_PREFIX};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use state_builders::build_http_state;

/// Everything the listener needs once adapters are ready.
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub http_state: web::Data<HttpState>,
    /// Directory served read-only under `/uploads`.
    pub uploads_dir: PathBuf,
}

impl ServerConfig {
    /// Wire PostgreSQL repositories and disk storage into a config.
    ///
    /// # Errors
    /// Fails when the bind address is invalid or the token verifier cannot be
    /// built.
    pub fn from_adapters(
        settings: &ServerSettings,
        identity: &IdentitySettings,
        pool: &DbPool,
        storage: LocalDiskAssetStorage,
    ) -> std::io::Result<Self> {
        let bind_addr = settings
            .socket_addr()
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
        let uploads_dir = storage.root_path().to_path_buf();
        let http_state = build_http_state(
            pool,
            Arc::new(storage),
            identity,
            settings.max_upload_bytes(),
        )?;
        Ok(Self {
            bind_addr,
            http_state,
            uploads_dir,
        })
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    uploads_dir: PathBuf,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        uploads_dir,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(Files::new(UPLOADS_URL_PREFIX, uploads_dir))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and flip readiness.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        http_state,
        uploads_dir,
    } = config;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        uploads_dir,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests;
