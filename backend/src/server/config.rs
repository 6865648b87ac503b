//! Startup configuration.
//!
//! Two sources, both read once:
//! - [`ServerSettings`] via OrthoConfig (`STUDIO_*` variables or CLI flags).
//! - [`IdentitySettings`] from `GOOGLE_CLIENT_ID` and `ADMIN_EMAILS`.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use studio_backend::domain::AdminAllowList;

pub(crate) const GOOGLE_CLIENT_ID_ENV: &str = "GOOGLE_CLIENT_ID";
pub(crate) const ADMIN_EMAILS_ENV: &str = "ADMIN_EMAILS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Listener, database and uploads settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDIO")]
pub struct ServerSettings {
    pub bind_addr: Option<String>,
    pub port: Option<u16>,
    /// PostgreSQL connection URL. Required.
    pub database_url: String,
    /// Root of the uploads tree; relative paths resolve against the working directory.
    pub uploads_dir: Option<PathBuf>,
    pub db_max_connections: Option<u32>,
    pub max_upload_bytes: Option<usize>,
}

/// Errors raised while assembling startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address '{value}'")]
    BindAddr { value: String },
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
}

impl ServerSettings {
    /// Socket the listener binds.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        let ip: IpAddr = raw.parse().map_err(|_| ConfigError::BindAddr {
            value: raw.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.uploads_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR))
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

/// Build mode deciding how strictly identity settings are enforced.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Identity provider audience and the system admin allow-list.
#[derive(Debug, Clone)]
pub struct IdentitySettings {
    /// `None` only in debug builds; every token is then rejected.
    pub google_client_id: Option<String>,
    pub admins: AdminAllowList,
}

/// Read identity settings from the environment.
///
/// Malformed `ADMIN_EMAILS` entries are skipped with a warning.
pub fn identity_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<IdentitySettings, ConfigError> {
    let google_client_id = env
        .string(GOOGLE_CLIENT_ID_ENV)
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty());
    if google_client_id.is_none() {
        match mode {
            BuildMode::Release => {
                return Err(ConfigError::MissingEnv {
                    name: GOOGLE_CLIENT_ID_ENV,
                });
            }
            BuildMode::Debug => {
                warn!("GOOGLE_CLIENT_ID not set; every bearer token will be rejected");
            }
        }
    }

    let raw_admins = env.string(ADMIN_EMAILS_ENV).unwrap_or_default();
    let (admins, rejected) = AdminAllowList::parse(&raw_admins);
    for entry in rejected {
        warn!(entry = %entry, "ignoring malformed ADMIN_EMAILS entry");
    }
    if admins.is_empty() {
        warn!("ADMIN_EMAILS is empty; no caller can manage game masters");
    }

    Ok(IdentitySettings {
        google_client_id,
        admins,
    })
}
