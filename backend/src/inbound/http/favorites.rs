//! Favorite costume HTTP handlers.
//!
//! ```text
//! GET    /api/favorite?userId=...
//! POST   /api/favorite {"userId": "...", "costumeId": 3}
//! DELETE /api/favorite {"userId": "...", "costumeId": 3}
//! ```

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AssetId, ClientUserId, Favorite};
use crate::inbound::http::ApiResult;
use crate::inbound::http::history::UserQuery;
use crate::inbound::http::responses::SuccessResponse;
use crate::inbound::http::schemas::{ErrorSchema, FavoriteSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_user_id};

/// Body naming a user and a costume.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteBody {
    pub user_id: Option<String>,
    pub costume_id: Option<i32>,
}

impl FavoriteBody {
    fn parse(self) -> ApiResult<(ClientUserId, AssetId)> {
        let user_id = parse_user_id(self.user_id)?;
        let costume_id = self
            .costume_id
            .map(AssetId::new)
            .ok_or_else(|| missing_field_error(FieldName::new("costumeId")))?;
        Ok((user_id, costume_id))
    }
}

/// A user's favorites, newest first.
#[utoipa::path(
    get,
    path = "/api/favorite",
    params(UserQuery),
    responses(
        (status = 200, description = "Favorites", body = [FavoriteSchema]),
        (status = 400, description = "Missing or invalid userId", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "listFavorites",
    security([])
)]
#[get("/api/favorite")]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    query: web::Query<UserQuery>,
) -> ApiResult<web::Json<Vec<Favorite>>> {
    let user_id = parse_user_id(query.into_inner().user_id)?;
    let favorites = state.favorites.list(&user_id).await?;
    Ok(web::Json(favorites))
}

/// Mark a costume as a favorite. Repeating the call returns the same row.
#[utoipa::path(
    post,
    path = "/api/favorite",
    request_body = FavoriteBody,
    responses(
        (status = 200, description = "Favorite row", body = FavoriteSchema),
        (status = 400, description = "Missing fields", body = ErrorSchema),
        (status = 404, description = "Costume absent or deleted", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "addFavorite",
    security([])
)]
#[post("/api/favorite")]
pub async fn add_favorite(
    state: web::Data<HttpState>,
    payload: web::Json<FavoriteBody>,
) -> ApiResult<web::Json<Favorite>> {
    let (user_id, costume_id) = payload.into_inner().parse()?;
    let favorite = state.favorites.add(&user_id, costume_id).await?;
    Ok(web::Json(favorite))
}

/// Remove a favorite.
#[utoipa::path(
    delete,
    path = "/api/favorite",
    request_body = FavoriteBody,
    responses(
        (status = 200, description = "Processed", body = SuccessResponse),
        (status = 400, description = "Missing fields", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "removeFavorite",
    security([])
)]
#[delete("/api/favorite")]
pub async fn remove_favorite(
    state: web::Data<HttpState>,
    payload: web::Json<FavoriteBody>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let (user_id, costume_id) = payload.into_inner().parse()?;
    let deleted = state.favorites.remove(&user_id, costume_id).await?;
    Ok(web::Json(SuccessResponse::deleted(deleted)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_favorites)
        .service(add_favorite)
        .service(remove_favorite);
}
