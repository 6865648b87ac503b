//! Port for the anonymous client users that own history and favorites.
//!
//! Users have no profile; a row exists so history and favorites can
//! reference it, and it is created on first use.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ClientUserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Insert failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert `id` with `first_seen` unless it already exists.
    async fn ensure(
        &self,
        id: &ClientUserId,
        first_seen: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError>;
}
