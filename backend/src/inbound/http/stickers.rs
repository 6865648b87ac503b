//! Sticker catalogue handlers.
//!
//! ```text
//! GET    /api/sticker
//! POST   /api/sticker/upload   (multipart `asset` + `name`)
//! DELETE /api/sticker/{id}
//! ```

use actix_multipart::Multipart;
use actix_web::{delete, get, post, web};

use crate::domain::ports::StickerUploadRequest;
use crate::domain::{AssetId, RoleRequirement, STICKER_FILE_FIELD, Sticker};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::multipart::UploadForm;
use crate::inbound::http::responses::SuccessResponse;
use crate::inbound::http::schemas::{ErrorSchema, StickerSchema};
use crate::inbound::http::state::HttpState;

/// Live stickers in upload order.
#[utoipa::path(
    get,
    path = "/api/sticker",
    responses((status = 200, description = "Stickers", body = [StickerSchema])),
    tags = ["stickers"],
    operation_id = "listStickers",
    security([])
)]
#[get("/api/sticker")]
pub async fn list_stickers(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Sticker>>> {
    let stickers = state.stickers.list().await?;
    Ok(web::Json(stickers))
}

#[utoipa::path(
    post,
    path = "/api/sticker/upload",
    request_body(content_type = "multipart/form-data", description = "asset file and name"),
    responses(
        (status = 200, description = "Created sticker", body = StickerSchema),
        (status = 400, description = "Missing name or file", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema)
    ),
    tags = ["stickers"],
    operation_id = "uploadSticker"
)]
#[post("/api/sticker/upload")]
pub async fn upload_sticker(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: Multipart,
) -> ApiResult<web::Json<Sticker>> {
    caller.require(RoleRequirement::Admin)?;

    let mut form = UploadForm::read(payload, &[STICKER_FILE_FIELD], state.max_upload_bytes).await?;
    let request = StickerUploadRequest {
        name: form.take_text("name"),
        file: form.take_file(STICKER_FILE_FIELD),
    };
    let sticker = state.stickers.upload(&caller, request).await?;
    Ok(web::Json(sticker))
}

#[utoipa::path(
    delete,
    path = "/api/sticker/{id}",
    params(("id" = i32, Path, description = "Sticker identifier")),
    responses(
        (status = 200, description = "Deleted", body = SuccessResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "Absent or already deleted", body = ErrorSchema)
    ),
    tags = ["stickers"],
    operation_id = "deleteSticker"
)]
#[delete("/api/sticker/{id:\\d+}")]
pub async fn delete_sticker(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<i32>,
) -> ApiResult<web::Json<SuccessResponse>> {
    state
        .stickers
        .soft_delete(&caller, AssetId::new(path.into_inner()))
        .await?;
    Ok(web::Json(SuccessResponse::ok()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_stickers)
        .service(upload_sticker)
        .service(delete_sticker);
}
