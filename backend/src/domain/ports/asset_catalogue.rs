//! Driving port for the slot catalogues.
//!
//! Inbound adapters hand over raw form values; the domain owns every
//! validation rule so all five kinds behave identically.

use async_trait::async_trait;

use crate::domain::{AssetId, AssetItem, AssetKind, Caller, Error, MoveDirection, UploadedFile};

/// Raw multipart fields of an asset upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetUploadRequest {
    pub name: Option<String>,
    pub file: Option<UploadedFile>,
    pub offset_x: Option<String>,
    pub offset_y: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

/// Result of a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// Ranks were exchanged with the neighbour.
    Moved,
    /// The item already sat at the requested edge; nothing changed.
    AtEdge,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetCatalogue: Send + Sync {
    /// Visible items of `kind` in rank order.
    async fn list(&self, kind: AssetKind) -> Result<Vec<AssetItem>, Error>;

    /// A single visible item; not found when absent or soft-deleted.
    async fn get(&self, kind: AssetKind, id: AssetId) -> Result<AssetItem, Error>;

    /// Store the file and append a row ranked after every existing one.
    async fn upload(
        &self,
        caller: &Caller,
        kind: AssetKind,
        request: AssetUploadRequest,
    ) -> Result<AssetItem, Error>;

    /// Hide an item and best-effort remove its file.
    async fn soft_delete(&self, caller: &Caller, kind: AssetKind, id: AssetId)
    -> Result<(), Error>;

    /// Swap an item's rank with its visible neighbour.
    async fn reorder(
        &self,
        caller: &Caller,
        kind: AssetKind,
        id: AssetId,
        direction: MoveDirection,
    ) -> Result<ReorderOutcome, Error>;
}
