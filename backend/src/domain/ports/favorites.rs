//! Driving port for costume favorites.

use async_trait::async_trait;

use crate::domain::{AssetId, ClientUserId, Error, Favorite};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Favorites: Send + Sync {
    async fn list(&self, user_id: &ClientUserId) -> Result<Vec<Favorite>, Error>;

    /// Add a favorite; adding an existing pair returns the stored row.
    async fn add(&self, user_id: &ClientUserId, costume_id: AssetId) -> Result<Favorite, Error>;

    /// Remove a favorite; `false` when it did not exist.
    async fn remove(&self, user_id: &ClientUserId, costume_id: AssetId) -> Result<bool, Error>;
}
