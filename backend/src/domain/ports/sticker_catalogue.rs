//! Driving port for the sticker catalogue.

use async_trait::async_trait;

use crate::domain::{AssetId, Caller, Error, Sticker, UploadedFile};

/// Raw multipart fields of a sticker upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StickerUploadRequest {
    pub name: Option<String>,
    pub file: Option<UploadedFile>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StickerCatalogue: Send + Sync {
    async fn list(&self) -> Result<Vec<Sticker>, Error>;

    async fn upload(&self, caller: &Caller, request: StickerUploadRequest)
    -> Result<Sticker, Error>;

    async fn soft_delete(&self, caller: &Caller, id: AssetId) -> Result<(), Error>;
}
