//! Costume favorites owned by anonymous users.

use serde::{Deserialize, Serialize};

use crate::domain::{AssetId, ClientUserId};

/// A user's bookmark on a costume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i32,
    pub user_id: ClientUserId,
    pub costume_id: AssetId,
}
