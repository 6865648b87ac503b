//! Asset catalogue data model.
//!
//! Five parallel kinds (face, front hair, back hair, costume, background)
//! share one lifecycle: rows are created by an upload, re-ranked by the
//! ordering engine and hidden by a soft delete. Nothing is ever hard-deleted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the character-composition slots backed by its own catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    Face,
    FrontHair,
    BackHair,
    Costume,
    Background,
}

impl AssetKind {
    /// Every kind, in composition layer order.
    pub const ALL: [AssetKind; 5] = [
        AssetKind::Background,
        AssetKind::BackHair,
        AssetKind::Costume,
        AssetKind::Face,
        AssetKind::FrontHair,
    ];

    /// Route and storage slug, e.g. `front-hair`.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Face => "face",
            Self::FrontHair => "front-hair",
            Self::BackHair => "back-hair",
            Self::Costume => "costume",
            Self::Background => "background",
        }
    }

    /// Human label used in error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Face => "face",
            Self::FrontHair => "front hair",
            Self::BackHair => "back hair",
            Self::Costume => "costume",
            Self::Background => "background",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when a slug does not name an asset kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown asset kind: {0}")]
pub struct UnknownAssetKind(pub String);

impl FromStr for AssetKind {
    type Err = UnknownAssetKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| UnknownAssetKind(s.to_owned()))
    }
}

/// Database identifier of a catalogue row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(i32);

impl AssetId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for AssetId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Validation failures for asset names and placement geometry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("{field} must be an integer")]
    NotAnInteger {
        field: PlacementField,
        value: String,
    },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: PlacementField,
        value: i32,
        min: i32,
        max: i32,
    },
}

impl AssetValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::NotAnInteger { field, .. } | Self::OutOfRange { field, .. } => field.wire_name(),
        }
    }

    /// Stable machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::NotAnInteger { .. } => "not_an_integer",
            Self::OutOfRange { .. } => "out_of_range",
        }
    }
}

/// Maximum stored length of a display name.
pub const ASSET_NAME_MAX: usize = 255;

/// Trimmed, non-empty display name of an uploaded asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetName(String);

impl AssetName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AssetValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AssetValidationError::EmptyName);
        }
        if trimmed.chars().count() > ASSET_NAME_MAX {
            return Err(AssetValidationError::NameTooLong {
                max: ASSET_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for AssetName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<AssetName> for String {
    fn from(value: AssetName) -> Self {
        value.0
    }
}

impl TryFrom<String> for AssetName {
    type Error = AssetValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Geometry fields accepted alongside an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementField {
    OffsetX,
    OffsetY,
    Width,
    Height,
}

impl PlacementField {
    pub const ALL: [PlacementField; 4] = [Self::OffsetX, Self::OffsetY, Self::Width, Self::Height];

    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::OffsetX => "offsetX",
            Self::OffsetY => "offsetY",
            Self::Width => "width",
            Self::Height => "height",
        }
    }

    const fn bounds(self) -> (i32, i32) {
        match self {
            Self::OffsetX | Self::OffsetY => (OFFSET_MIN, OFFSET_MAX),
            Self::Width | Self::Height => (SIZE_MIN, SIZE_MAX),
        }
    }

    /// Parse and range-check a raw form value for this field.
    ///
    /// # Examples
    /// ```
    /// use studio_backend::domain::PlacementField;
    ///
    /// assert_eq!(PlacementField::Width.parse(" 100 "), Ok(100));
    /// assert!(PlacementField::Width.parse("0").is_err());
    /// assert!(PlacementField::OffsetX.parse("10.5").is_err());
    /// ```
    pub fn parse(self, raw: &str) -> Result<i32, AssetValidationError> {
        let value = raw
            .trim()
            .parse::<i32>()
            .map_err(|_| AssetValidationError::NotAnInteger {
                field: self,
                value: raw.to_owned(),
            })?;
        self.check(value)
    }

    fn check(self, value: i32) -> Result<i32, AssetValidationError> {
        let (min, max) = self.bounds();
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(AssetValidationError::OutOfRange {
                field: self,
                value,
                min,
                max,
            })
        }
    }
}

impl fmt::Display for PlacementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

pub const OFFSET_MIN: i32 = -1000;
pub const OFFSET_MAX: i32 = 1000;
pub const SIZE_MIN: i32 = 1;
pub const SIZE_MAX: i32 = 2000;

/// Pixel placement of an asset inside the composition frame.
///
/// ## Invariants
/// - offsets lie in `[-1000, 1000]`.
/// - width and height lie in `[1, 2000]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub offset_x: i32,
    pub offset_y: i32,
    pub width: i32,
    pub height: i32,
}

impl Placement {
    /// Geometry applied when an upload omits a field.
    pub const DEFAULT: Placement = Placement {
        offset_x: 0,
        offset_y: 0,
        width: 240,
        height: 320,
    };

    /// Build a placement from optional already-parsed fields.
    ///
    /// Missing fields fall back to [`Placement::DEFAULT`]; present fields are
    /// range-checked.
    pub fn from_parts(
        offset_x: Option<i32>,
        offset_y: Option<i32>,
        width: Option<i32>,
        height: Option<i32>,
    ) -> Result<Self, AssetValidationError> {
        let pick = |field: PlacementField, value: Option<i32>, fallback: i32| {
            value.map_or(Ok(fallback), |v| field.check(v))
        };
        Ok(Self {
            offset_x: pick(PlacementField::OffsetX, offset_x, Self::DEFAULT.offset_x)?,
            offset_y: pick(PlacementField::OffsetY, offset_y, Self::DEFAULT.offset_y)?,
            width: pick(PlacementField::Width, width, Self::DEFAULT.width)?,
            height: pick(PlacementField::Height, height, Self::DEFAULT.height)?,
        })
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A catalogue row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetItem {
    pub id: AssetId,
    pub kind: AssetKind,
    pub name: String,
    pub asset_path: String,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub sort_order: i32,
    #[serde(flatten)]
    pub placement: Placement,
    pub created_at: DateTime<Utc>,
}

impl AssetItem {
    /// Whether listings and selection may surface this row.
    pub fn is_visible(&self) -> bool {
        !self.deleted
    }
}

/// Insert payload produced by the upload pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
    pub kind: AssetKind,
    pub name: AssetName,
    pub asset_path: String,
    pub sort_order: i32,
    pub placement: Placement,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("face", AssetKind::Face)]
    #[case("front-hair", AssetKind::FrontHair)]
    #[case("back-hair", AssetKind::BackHair)]
    #[case("costume", AssetKind::Costume)]
    #[case("background", AssetKind::Background)]
    fn slugs_parse_back_to_kinds(#[case] slug: &str, #[case] kind: AssetKind) {
        assert_eq!(slug.parse::<AssetKind>(), Ok(kind));
        assert_eq!(kind.slug(), slug);
    }

    #[rstest]
    fn unknown_slug_is_rejected() {
        assert_eq!(
            "sticker".parse::<AssetKind>(),
            Err(UnknownAssetKind("sticker".to_owned()))
        );
    }

    #[rstest]
    fn name_is_trimmed() {
        let name = AssetName::new("  smile ").expect("valid name");
        assert_eq!(name.as_str(), "smile");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_names_are_rejected(#[case] raw: &str) {
        assert_eq!(AssetName::new(raw), Err(AssetValidationError::EmptyName));
    }

    #[rstest]
    fn overlong_names_are_rejected() {
        let raw = "x".repeat(ASSET_NAME_MAX + 1);
        assert!(matches!(
            AssetName::new(raw),
            Err(AssetValidationError::NameTooLong { .. })
        ));
    }

    #[rstest]
    #[case(PlacementField::OffsetX, "-1000", -1000)]
    #[case(PlacementField::OffsetY, "1000", 1000)]
    #[case(PlacementField::Width, "1", 1)]
    #[case(PlacementField::Height, "2000", 2000)]
    fn bounds_are_inclusive(#[case] field: PlacementField, #[case] raw: &str, #[case] want: i32) {
        assert_eq!(field.parse(raw), Ok(want));
    }

    #[rstest]
    #[case(PlacementField::OffsetX, "1001")]
    #[case(PlacementField::OffsetY, "-1001")]
    #[case(PlacementField::Width, "0")]
    #[case(PlacementField::Height, "2001")]
    fn out_of_range_values_are_rejected(#[case] field: PlacementField, #[case] raw: &str) {
        let err = field.parse(raw).expect_err("value is out of range");
        assert_eq!(err.reason(), "out_of_range");
        assert_eq!(err.field(), field.wire_name());
    }

    #[rstest]
    #[case("abc")]
    #[case("12.5")]
    #[case("")]
    fn non_integers_are_rejected(#[case] raw: &str) {
        let err = PlacementField::Width
            .parse(raw)
            .expect_err("value is not an integer");
        assert_eq!(err.reason(), "not_an_integer");
    }

    #[rstest]
    fn missing_parts_take_defaults() {
        let placement = Placement::from_parts(None, None, None, None).expect("defaults valid");
        assert_eq!(placement, Placement::DEFAULT);
        assert_eq!(
            (
                placement.offset_x,
                placement.offset_y,
                placement.width,
                placement.height
            ),
            (0, 0, 240, 320)
        );
    }

    #[rstest]
    fn explicit_parts_are_kept() {
        let placement =
            Placement::from_parts(Some(10), Some(20), Some(100), Some(150)).expect("valid parts");
        assert_eq!(
            placement,
            Placement {
                offset_x: 10,
                offset_y: 20,
                width: 100,
                height: 150,
            }
        );
    }
}
