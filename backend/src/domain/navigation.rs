//! Custom images for the composition screen's previous/next buttons.
//!
//! Exactly two rows exist, seeded by migration. A row without an image path
//! renders the built-in glyph.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directory under the uploads root holding button images.
pub const NAVIGATION_BUTTON_DIRECTORY: &str = "navigation-buttons";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationButtonType {
    Prev,
    Next,
}

impl NavigationButtonType {
    pub const ALL: [NavigationButtonType; 2] = [Self::Prev, Self::Next];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }
}

impl fmt::Display for NavigationButtonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised button type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("button type must be prev or next, got {0}")]
pub struct UnknownButtonType(pub String);

impl FromStr for NavigationButtonType {
    type Err = UnknownButtonType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prev" => Ok(Self::Prev),
            "next" => Ok(Self::Next),
            other => Err(UnknownButtonType(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationButton {
    pub button_type: NavigationButtonType,
    pub image_path: Option<String>,
    pub updated_at: DateTime<Utc>,
}
