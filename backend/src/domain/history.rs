//! Generation history ledger entities.
//!
//! Each export of a composed photo appends one record naming the asset picked
//! for every slot plus the final scale and drag offset. Records are never
//! updated; only their owner may delete them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AssetId, ClientUserId};

/// Most records returned by a single history listing.
pub const HISTORY_LIMIT: i64 = 100;

/// Asset picked for each composition slot, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSelection {
    pub face_id: Option<AssetId>,
    pub front_hair_id: Option<AssetId>,
    pub back_hair_id: Option<AssetId>,
    pub costume_id: Option<AssetId>,
    pub background_id: Option<AssetId>,
}

/// Validation failures for recorded transform values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HistoryValidationError {
    #[error("scale must be a finite number greater than zero")]
    InvalidScale { value: f64 },
    #[error("{field} must be a finite number")]
    InvalidDrag { field: &'static str, value: f64 },
}

impl HistoryValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidScale { .. } => "scale",
            Self::InvalidDrag { field, .. } => field,
        }
    }
}

/// Scale and drag offset applied to the composed character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionTransform {
    pub scale: f64,
    pub drag_x: f64,
    pub drag_y: f64,
}

impl CompositionTransform {
    pub const IDENTITY: CompositionTransform = CompositionTransform {
        scale: 1.0,
        drag_x: 0.0,
        drag_y: 0.0,
    };

    /// Validate optional transform values, defaulting missing ones.
    ///
    /// # Examples
    /// ```
    /// use studio_backend::domain::CompositionTransform;
    ///
    /// let t = CompositionTransform::new(None, Some(12.5), None).expect("valid");
    /// assert_eq!((t.scale, t.drag_x, t.drag_y), (1.0, 12.5, 0.0));
    /// assert!(CompositionTransform::new(Some(0.0), None, None).is_err());
    /// ```
    pub fn new(
        scale: Option<f64>,
        drag_x: Option<f64>,
        drag_y: Option<f64>,
    ) -> Result<Self, HistoryValidationError> {
        let scale = scale.unwrap_or(Self::IDENTITY.scale);
        if !scale.is_finite() || scale <= 0.0 {
            return Err(HistoryValidationError::InvalidScale { value: scale });
        }
        let drag = |field: &'static str, value: Option<f64>| {
            let value = value.unwrap_or(0.0);
            if value.is_finite() {
                Ok(value)
            } else {
                Err(HistoryValidationError::InvalidDrag { field, value })
            }
        };
        Ok(Self {
            scale,
            drag_x: drag("dragX", drag_x)?,
            drag_y: drag("dragY", drag_y)?,
        })
    }
}

impl Default for CompositionTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Stored history record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    pub id: i32,
    pub user_id: ClientUserId,
    #[serde(flatten)]
    pub selection: SlotSelection,
    #[serde(flatten)]
    pub transform: CompositionTransform,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a history record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGenerationRecord {
    pub user_id: ClientUserId,
    pub selection: SlotSelection,
    pub transform: CompositionTransform,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
