//! Sticker catalogue entities.
//!
//! Stickers are free-floating decorations. They share the soft-delete
//! lifecycle of the slot catalogues but carry no rank or placement and list
//! in id order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AssetId, AssetName};

/// Directory under the uploads root holding sticker images.
pub const STICKER_DIRECTORY: &str = "sticker";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sticker {
    pub id: AssetId,
    pub name: String,
    pub asset_path: String,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSticker {
    pub name: AssetName,
    pub asset_path: String,
    pub created_at: DateTime<Utc>,
}
