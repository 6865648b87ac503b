//! OpenAPI wrappers for the studio's wire types.
//!
//! The domain structs carry serde derives only. Each wrapper here mirrors the
//! JSON a handler emits and registers itself under the domain type's name via
//! `#[schema(as = ...)]`, so handler annotations refer to the wrapper while
//! the document shows `crate.domain.*` components.

#![expect(
    dead_code,
    reason = "Schema wrappers exist only for OpenAPI generation via utoipa"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request raced another change or duplicates existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency such as the database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and the
/// human-readable `error` string shown by the admin UI.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(rename = "error", example = "width must be between 1 and 2000")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details such as the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::AssetItem`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AssetItem, rename_all = "camelCase")]
pub struct AssetItemSchema {
    #[schema(example = 1)]
    id: i32,
    /// Catalogue slug.
    #[schema(example = "front-hair")]
    kind: String,
    #[schema(example = "smile")]
    name: String,
    /// Public path of the stored image.
    #[schema(example = "/uploads/face/1767225600000.png")]
    asset_path: String,
    deleted: bool,
    #[schema(value_type = Option<String>, format = DateTime)]
    deleted_at: Option<String>,
    /// Display rank; lower comes first.
    #[schema(example = 1)]
    sort_order: i32,
    #[schema(example = 0)]
    offset_x: i32,
    #[schema(example = 0)]
    offset_y: i32,
    #[schema(example = 240)]
    width: i32,
    #[schema(example = 320)]
    height: i32,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::Sticker`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Sticker, rename_all = "camelCase")]
pub struct StickerSchema {
    id: i32,
    name: String,
    #[schema(example = "/uploads/sticker/1767225600000.png")]
    asset_path: String,
    deleted: bool,
    #[schema(value_type = Option<String>, format = DateTime)]
    deleted_at: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::GameMaster`].
#[derive(ToSchema)]
#[schema(as = crate::domain::GameMaster, rename_all = "camelCase")]
pub struct GameMasterSchema {
    id: i32,
    #[schema(example = "gm@example.com")]
    email: String,
    name: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    /// System admin who granted the role.
    created_by: Option<String>,
}

/// OpenAPI schema for [`crate::domain::GenerationRecord`].
#[derive(ToSchema)]
#[schema(as = crate::domain::GenerationRecord, rename_all = "camelCase")]
pub struct GenerationRecordSchema {
    id: i32,
    user_id: String,
    face_id: Option<i32>,
    front_hair_id: Option<i32>,
    back_hair_id: Option<i32>,
    costume_id: Option<i32>,
    background_id: Option<i32>,
    #[schema(example = 1.0)]
    scale: f64,
    #[schema(example = 0.0)]
    drag_x: f64,
    #[schema(example = 0.0)]
    drag_y: f64,
    image_url: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::Favorite`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Favorite, rename_all = "camelCase")]
pub struct FavoriteSchema {
    id: i32,
    user_id: String,
    costume_id: i32,
}

/// OpenAPI schema for [`crate::domain::NavigationButton`].
#[derive(ToSchema)]
#[schema(as = crate::domain::NavigationButton, rename_all = "camelCase")]
pub struct NavigationButtonSchema {
    #[schema(example = "prev")]
    button_type: String,
    /// Custom image; `null` means the built-in glyph.
    image_path: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}
