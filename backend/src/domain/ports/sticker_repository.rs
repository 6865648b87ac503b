//! Port for sticker catalogue persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AssetId, NewSticker, Sticker};

use super::define_port_error;

define_port_error! {
    /// Errors raised by sticker repository adapters.
    pub enum StickerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "sticker repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "sticker repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StickerRepository: Send + Sync {
    /// Visible stickers in id order.
    async fn list_visible(&self) -> Result<Vec<Sticker>, StickerRepositoryError>;

    async fn find_visible(&self, id: AssetId) -> Result<Option<Sticker>, StickerRepositoryError>;

    async fn insert(&self, sticker: &NewSticker) -> Result<Sticker, StickerRepositoryError>;

    /// Flag a visible sticker as deleted; `false` when none matched.
    async fn mark_deleted(
        &self,
        id: AssetId,
        at: DateTime<Utc>,
    ) -> Result<bool, StickerRepositoryError>;
}
