//! Generation history HTTP handlers.
//!
//! ```text
//! GET    /api/generation-history?userId=...
//! POST   /api/generation-history
//! DELETE /api/generation-history/{id}?userId=...
//! ```
//!
//! The `userId` is an opaque identifier minted by the browser; these routes
//! carry no bearer credential.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::RecordGenerationRequest;
use crate::domain::{AssetId, GenerationRecord, SlotSelection};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::SuccessResponse;
use crate::inbound::http::schemas::{ErrorSchema, GenerationRecordSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

/// `?userId=` query string.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Client-generated user identifier.
    pub user_id: Option<String>,
}

/// Body of a new history record.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordGenerationBody {
    pub user_id: Option<String>,
    pub face_id: Option<i32>,
    pub front_hair_id: Option<i32>,
    pub back_hair_id: Option<i32>,
    pub costume_id: Option<i32>,
    pub background_id: Option<i32>,
    /// Defaults to 1.0; must be finite and positive.
    pub scale: Option<f64>,
    /// Defaults to 0.
    pub drag_x: Option<f64>,
    /// Defaults to 0.
    pub drag_y: Option<f64>,
    pub image_url: Option<String>,
}

impl RecordGenerationBody {
    fn into_request(self) -> ApiResult<RecordGenerationRequest> {
        Ok(RecordGenerationRequest {
            user_id: parse_user_id(self.user_id)?,
            selection: SlotSelection {
                face_id: self.face_id.map(AssetId::new),
                front_hair_id: self.front_hair_id.map(AssetId::new),
                back_hair_id: self.back_hair_id.map(AssetId::new),
                costume_id: self.costume_id.map(AssetId::new),
                background_id: self.background_id.map(AssetId::new),
            },
            scale: self.scale,
            drag_x: self.drag_x,
            drag_y: self.drag_y,
            image_url: self.image_url,
        })
    }
}

/// Most recent records for a user, newest first.
#[utoipa::path(
    get,
    path = "/api/generation-history",
    params(UserQuery),
    responses(
        (status = 200, description = "Up to 100 records, newest first", body = [GenerationRecordSchema]),
        (status = 400, description = "Missing or invalid userId", body = ErrorSchema)
    ),
    tags = ["history"],
    operation_id = "listGenerationHistory",
    security([])
)]
#[get("/api/generation-history")]
pub async fn list_history(
    state: web::Data<HttpState>,
    query: web::Query<UserQuery>,
) -> ApiResult<web::Json<Vec<GenerationRecord>>> {
    let user_id = parse_user_id(query.into_inner().user_id)?;
    let records = state.history.list(&user_id).await?;
    Ok(web::Json(records))
}

/// Append a record.
#[utoipa::path(
    post,
    path = "/api/generation-history",
    request_body = RecordGenerationBody,
    responses(
        (status = 201, description = "Recorded", body = GenerationRecordSchema),
        (status = 400, description = "Invalid userId or transform", body = ErrorSchema)
    ),
    tags = ["history"],
    operation_id = "recordGeneration",
    security([])
)]
#[post("/api/generation-history")]
pub async fn record_history(
    state: web::Data<HttpState>,
    payload: web::Json<RecordGenerationBody>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner().into_request()?;
    let record = state.history.record(request).await?;
    Ok(HttpResponse::Created().json(record))
}

/// Delete one of the caller's own records.
///
/// A record owned by someone else is left untouched and the response
/// reports `deleted: false`.
#[utoipa::path(
    delete,
    path = "/api/generation-history/{id}",
    params(
        ("id" = i32, Path, description = "Record identifier"),
        UserQuery
    ),
    responses(
        (status = 200, description = "Processed", body = SuccessResponse),
        (status = 400, description = "Missing or invalid userId", body = ErrorSchema)
    ),
    tags = ["history"],
    operation_id = "deleteGeneration",
    security([])
)]
#[delete("/api/generation-history/{id:\\d+}")]
pub async fn delete_history(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<UserQuery>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let user_id = parse_user_id(query.into_inner().user_id)?;
    let deleted = state.history.delete(&user_id, path.into_inner()).await?;
    Ok(web::Json(SuccessResponse::deleted(deleted)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_history)
        .service(record_history)
        .service(delete_history);
}
