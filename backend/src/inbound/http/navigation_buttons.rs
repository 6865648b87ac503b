//! Navigation button image handlers.
//!
//! ```text
//! GET  /api/navigation-buttons
//! POST /api/navigation-buttons/{type}/upload   (multipart `image`)
//! POST /api/navigation-buttons/{type}/reset
//! ```

use actix_multipart::Multipart;
use actix_web::{get, post, web};

use crate::domain::{NAVIGATION_IMAGE_FIELD, NavigationButton, RoleRequirement};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::multipart::UploadForm;
use crate::inbound::http::schemas::{ErrorSchema, NavigationButtonSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_button_type;

/// Both buttons, `prev` first.
#[utoipa::path(
    get,
    path = "/api/navigation-buttons",
    responses(
        (status = 200, description = "Navigation buttons", body = [NavigationButtonSchema])
    ),
    tags = ["navigation-buttons"],
    operation_id = "listNavigationButtons",
    security([])
)]
#[get("/api/navigation-buttons")]
pub async fn list_navigation_buttons(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<NavigationButton>>> {
    let buttons = state.navigation_buttons.list().await?;
    Ok(web::Json(buttons))
}

/// Replace a button's image.
#[utoipa::path(
    post,
    path = "/api/navigation-buttons/{type}/upload",
    params(("type" = String, Path, description = "prev or next")),
    request_body(content_type = "multipart/form-data", description = "image file"),
    responses(
        (status = 200, description = "Updated button", body = NavigationButtonSchema),
        (status = 400, description = "Unknown type or missing image", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema)
    ),
    tags = ["navigation-buttons"],
    operation_id = "uploadNavigationButton"
)]
#[post("/api/navigation-buttons/{type}/upload")]
pub async fn upload_navigation_button(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<String>,
    payload: Multipart,
) -> ApiResult<web::Json<NavigationButton>> {
    let button_type = parse_button_type(&path)?;
    caller.require(RoleRequirement::Admin)?;

    let mut form =
        UploadForm::read(payload, &[NAVIGATION_IMAGE_FIELD], state.max_upload_bytes).await?;
    let button = state
        .navigation_buttons
        .upload(&caller, button_type, form.take_file(NAVIGATION_IMAGE_FIELD))
        .await?;
    Ok(web::Json(button))
}

/// Restore the built-in glyph.
#[utoipa::path(
    post,
    path = "/api/navigation-buttons/{type}/reset",
    params(("type" = String, Path, description = "prev or next")),
    responses(
        (status = 200, description = "Updated button", body = NavigationButtonSchema),
        (status = 400, description = "Unknown type", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema)
    ),
    tags = ["navigation-buttons"],
    operation_id = "resetNavigationButton"
)]
#[post("/api/navigation-buttons/{type}/reset")]
pub async fn reset_navigation_button(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<String>,
) -> ApiResult<web::Json<NavigationButton>> {
    let button_type = parse_button_type(&path)?;
    let button = state.navigation_buttons.reset(&caller, button_type).await?;
    Ok(web::Json(button))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_navigation_buttons)
        .service(upload_navigation_button)
        .service(reset_navigation_button);
}
