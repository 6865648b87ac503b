//! Port for costume favorites.

use async_trait::async_trait;

use crate::domain::{AssetId, ClientUserId, Favorite};

use super::define_port_error;

define_port_error! {
    /// Errors raised by favorite repository adapters.
    pub enum FavoriteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "favorite repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "favorite repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Favorites owned by `user_id`, newest first.
    async fn list(&self, user_id: &ClientUserId) -> Result<Vec<Favorite>, FavoriteRepositoryError>;

    /// Insert the pair unless present; either way return the stored row.
    async fn insert_if_absent(
        &self,
        user_id: &ClientUserId,
        costume_id: AssetId,
    ) -> Result<Favorite, FavoriteRepositoryError>;

    /// Remove the pair; `false` when it did not exist.
    async fn delete(
        &self,
        user_id: &ClientUserId,
        costume_id: AssetId,
    ) -> Result<bool, FavoriteRepositoryError>;
}
