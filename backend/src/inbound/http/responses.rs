//! Acknowledgement payloads shared by mutation endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{ "success": true }` acknowledgement, optionally with a note.
///
/// # Examples
/// ```
/// use studio_backend::inbound::http::responses::SuccessResponse;
///
/// let body = serde_json::to_value(SuccessResponse::ok()).expect("serialise");
/// assert_eq!(body, serde_json::json!({ "success": true }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse {
    pub success: bool,
    /// Informational note, e.g. when a reorder was a no-op.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Whether a delete matched a row; present on owner-scoped deletes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            deleted: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok()
        }
    }

    pub fn deleted(deleted: bool) -> Self {
        Self {
            deleted: Some(deleted),
            ..Self::ok()
        }
    }
}
