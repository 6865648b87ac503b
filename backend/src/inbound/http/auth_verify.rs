//! Token verification endpoint used by the admin screen at sign-in.
//!
//! ```text
//! POST /api/auth/verify {"token": "<google id token>"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Caller, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

/// Request body carrying the identity-provider token.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct VerifyRequest {
    pub token: Option<String>,
}

/// Public profile extracted from the token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifiedUser {
    #[schema(example = "gm@example.com")]
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Verification outcome with the resolved role.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub user: VerifiedUser,
    #[schema(value_type = String, example = "game_master")]
    pub role: Role,
    pub is_admin: bool,
    pub is_system_admin: bool,
}

impl From<Caller> for VerifyResponse {
    fn from(caller: Caller) -> Self {
        let is_admin = caller.is_admin();
        let is_system_admin = caller.is_system_admin();
        Self {
            user: VerifiedUser {
                email: caller.identity.email.to_string(),
                name: caller.identity.name,
                picture: caller.identity.picture,
            },
            role: caller.role,
            is_admin,
            is_system_admin,
        }
    }
}

/// Verify a token and report the caller's role.
#[utoipa::path(
    post,
    path = "/api/auth/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Token verified", body = VerifyResponse),
        (status = 400, description = "Token missing", body = ErrorSchema),
        (status = 401, description = "Token rejected", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "verifyToken",
    security([])
)]
#[post("/api/auth/verify")]
pub async fn verify_token(
    state: web::Data<HttpState>,
    payload: web::Json<VerifyRequest>,
) -> ApiResult<web::Json<VerifyResponse>> {
    let token = payload
        .into_inner()
        .token
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| missing_field_error(FieldName::new("token")))?;
    let caller = state.callers.resolve(&token).await?;
    Ok(web::Json(VerifyResponse::from(caller)))
}
