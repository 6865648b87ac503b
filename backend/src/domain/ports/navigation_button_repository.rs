//! Port for the previous/next navigation button rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NavigationButton, NavigationButtonType};

use super::define_port_error;

define_port_error! {
    /// Errors raised by navigation button repository adapters.
    pub enum NavigationButtonRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "navigation button repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "navigation button repository query failed: {message}",
        /// The seeded row is missing.
        Missing { button_type: String } => "navigation button row missing: {button_type}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NavigationButtonRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<NavigationButton>, NavigationButtonRepositoryError>;

    async fn find(
        &self,
        button_type: NavigationButtonType,
    ) -> Result<NavigationButton, NavigationButtonRepositoryError>;

    /// Replace the custom image path, returning the updated row.
    async fn set_image(
        &self,
        button_type: NavigationButtonType,
        image_path: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<NavigationButton, NavigationButtonRepositoryError>;
}
