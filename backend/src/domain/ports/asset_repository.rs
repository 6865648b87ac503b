//! Port for the five slot catalogues' persistence.
//!
//! One trait serves every [`AssetKind`]; adapters dispatch on the kind to
//! reach the matching table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AssetId, AssetItem, AssetKind, NewAsset, RankChange};

use super::define_port_error;

define_port_error! {
    /// Errors raised by asset repository adapters.
    pub enum AssetRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "asset repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "asset repository query failed: {message}",
        /// A reorder observed a rank that has since changed.
        RankConflict { id: i32 } => "rank of asset {id} changed during reorder",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Visible rows of `kind` ordered by `(sort_order, id)`.
    async fn list_visible(&self, kind: AssetKind) -> Result<Vec<AssetItem>, AssetRepositoryError>;

    /// Fetch a row if it exists and is not soft-deleted.
    async fn find_visible(
        &self,
        kind: AssetKind,
        id: AssetId,
    ) -> Result<Option<AssetItem>, AssetRepositoryError>;

    /// Highest rank ever assigned for `kind`, deleted rows included.
    async fn max_sort_order(&self, kind: AssetKind) -> Result<Option<i32>, AssetRepositoryError>;

    /// Insert a new row and return it with its assigned id.
    async fn insert(&self, asset: &NewAsset) -> Result<AssetItem, AssetRepositoryError>;

    /// Flag a visible row as deleted.
    ///
    /// Returns `false` when no visible row matched, leaving storage untouched.
    async fn mark_deleted(
        &self,
        kind: AssetKind,
        id: AssetId,
        at: DateTime<Utc>,
    ) -> Result<bool, AssetRepositoryError>;

    /// Apply every rank change atomically.
    ///
    /// Each row is updated only while it is visible and still holds its
    /// observed rank; otherwise nothing changes and
    /// [`AssetRepositoryError::RankConflict`] is returned.
    async fn apply_ranks(
        &self,
        kind: AssetKind,
        changes: Vec<RankChange>,
    ) -> Result<(), AssetRepositoryError>;
}
