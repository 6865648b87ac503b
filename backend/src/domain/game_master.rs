//! Database-backed game master roster.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Email;

/// Maximum stored length of a game master's display name.
pub const GAME_MASTER_NAME_MAX: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMaster {
    pub id: i32,
    pub email: Email,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Email>,
}

/// Insert payload for a new game master.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGameMaster {
    pub email: Email,
    pub name: Option<String>,
    pub created_by: Option<Email>,
    pub created_at: DateTime<Utc>,
}
