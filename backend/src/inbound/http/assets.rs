//! Slot catalogue HTTP handlers, shared by all five kinds.
//!
//! ```text
//! GET    /api/{kind}
//! GET    /api/{kind}/{id}
//! POST   /api/{kind}/upload
//! DELETE /api/{kind}/{id}
//! PUT    /api/{kind}/{id}/order
//! ```
//!
//! `{kind}` is one of `face`, `front-hair`, `back-hair`, `costume` or
//! `background`; anything else does not route.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{AssetUploadRequest, ReorderOutcome};
use crate::domain::{
    ASSET_FILE_FIELD, AssetId, AssetItem, AssetKind, MoveDirection, PlacementField,
    RoleRequirement,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::multipart::UploadForm;
use crate::inbound::http::responses::SuccessResponse;
use crate::inbound::http::schemas::{AssetItemSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_direction, parse_kind};

/// `{kind}` path segment.
#[derive(Debug, Deserialize)]
pub struct KindPath {
    kind: String,
}

/// `{kind}/{id}` path segments.
#[derive(Debug, Deserialize)]
pub struct ItemPath {
    kind: String,
    id: i32,
}

impl ItemPath {
    fn parse(self) -> ApiResult<(AssetKind, AssetId)> {
        Ok((parse_kind(&self.kind)?, AssetId::new(self.id)))
    }
}

/// Reorder request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ReorderRequest {
    /// `up` moves towards the front of the list, `down` towards the back.
    #[schema(example = "down")]
    pub direction: Option<String>,
}

fn edge_message(kind: AssetKind, direction: MoveDirection) -> String {
    let edge = match direction {
        MoveDirection::Up => "top",
        MoveDirection::Down => "bottom",
    };
    format!("{} is already at the {edge}", kind.label())
}

/// List visible items of a kind in rank order.
#[utoipa::path(
    get,
    path = "/api/{kind}",
    params(("kind" = String, Path, description = "Catalogue slug")),
    responses(
        (status = 200, description = "Visible items in rank order", body = [AssetItemSchema]),
        (status = 404, description = "Unknown kind", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "listAssets",
    security([])
)]
#[get("/api/{kind:face|front-hair|back-hair|costume|background}")]
pub async fn list_assets(
    state: web::Data<HttpState>,
    path: web::Path<KindPath>,
) -> ApiResult<web::Json<Vec<AssetItem>>> {
    let kind = parse_kind(&path.kind)?;
    let items = state.assets.list(kind).await?;
    Ok(web::Json(items))
}

/// Fetch one visible item.
#[utoipa::path(
    get,
    path = "/api/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "Catalogue slug"),
        ("id" = i32, Path, description = "Item identifier")
    ),
    responses(
        (status = 200, description = "Item", body = AssetItemSchema),
        (status = 404, description = "Absent or soft-deleted", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "getAsset",
    security([])
)]
#[get("/api/{kind:face|front-hair|back-hair|costume|background}/{id:\\d+}")]
pub async fn get_asset(
    state: web::Data<HttpState>,
    path: web::Path<ItemPath>,
) -> ApiResult<web::Json<AssetItem>> {
    let (kind, id) = path.into_inner().parse()?;
    let item = state.assets.get(kind, id).await?;
    Ok(web::Json(item))
}

/// Upload a new item; it is ranked after every existing one.
///
/// Multipart fields: `asset` (file), `name`, and optional `offsetX`,
/// `offsetY`, `width`, `height`.
#[utoipa::path(
    post,
    path = "/api/{kind}/upload",
    params(("kind" = String, Path, description = "Catalogue slug")),
    request_body(content_type = "multipart/form-data", description = "asset file plus name and optional geometry"),
    responses(
        (status = 200, description = "Created item", body = AssetItemSchema),
        (status = 400, description = "Missing file or invalid geometry", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "uploadAsset"
)]
#[post("/api/{kind:face|front-hair|back-hair|costume|background}/upload")]
pub async fn upload_asset(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<KindPath>,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let kind = parse_kind(&path.kind)?;
    // Reject before buffering the body; the service re-checks.
    caller.require(RoleRequirement::Admin)?;

    let mut form = UploadForm::read(payload, &[ASSET_FILE_FIELD], state.max_upload_bytes).await?;
    let request = AssetUploadRequest {
        name: form.take_text("name"),
        file: form.take_file(ASSET_FILE_FIELD),
        offset_x: form.take_text(PlacementField::OffsetX.wire_name()),
        offset_y: form.take_text(PlacementField::OffsetY.wire_name()),
        width: form.take_text(PlacementField::Width.wire_name()),
        height: form.take_text(PlacementField::Height.wire_name()),
    };
    let item = state.assets.upload(&caller, kind, request).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Soft-delete an item.
#[utoipa::path(
    delete,
    path = "/api/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "Catalogue slug"),
        ("id" = i32, Path, description = "Item identifier")
    ),
    responses(
        (status = 200, description = "Deleted", body = SuccessResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "Absent or already deleted", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "deleteAsset"
)]
#[delete("/api/{kind:face|front-hair|back-hair|costume|background}/{id:\\d+}")]
pub async fn delete_asset(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<ItemPath>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let (kind, id) = path.into_inner().parse()?;
    state.assets.soft_delete(&caller, kind, id).await?;
    Ok(web::Json(SuccessResponse::ok()))
}

/// Move an item one place up or down.
#[utoipa::path(
    put,
    path = "/api/{kind}/{id}/order",
    params(
        ("kind" = String, Path, description = "Catalogue slug"),
        ("id" = i32, Path, description = "Item identifier")
    ),
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Moved, or already at the edge", body = SuccessResponse),
        (status = 400, description = "Invalid direction", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "Absent or deleted", body = ErrorSchema),
        (status = 409, description = "A concurrent reorder changed the ranks", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "reorderAsset"
)]
#[put("/api/{kind:face|front-hair|back-hair|costume|background}/{id:\\d+}/order")]
pub async fn reorder_asset(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<ItemPath>,
    payload: web::Json<ReorderRequest>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let (kind, id) = path.into_inner().parse()?;
    let direction = parse_direction(payload.into_inner().direction)?;
    let response = match state.assets.reorder(&caller, kind, id, direction).await? {
        ReorderOutcome::Moved => SuccessResponse::ok(),
        ReorderOutcome::AtEdge => SuccessResponse::with_message(edge_message(kind, direction)),
    };
    Ok(web::Json(response))
}

/// Register every catalogue route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_assets)
        .service(get_asset)
        .service(upload_asset)
        .service(delete_asset)
        .service(reorder_asset);
}
