//! Game master roster administration. System admins only.
//!
//! ```text
//! GET    /api/game-masters
//! POST   /api/game-masters {"email": "...", "name": "..."}
//! DELETE /api/game-masters/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::GameMaster;
use crate::domain::ports::AddGameMasterRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::responses::SuccessResponse;
use crate::inbound::http::schemas::{ErrorSchema, GameMasterSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

/// Request body for granting the game master role.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddGameMasterBody {
    #[schema(example = "new.gm@example.com")]
    pub email: Option<String>,
    pub name: Option<String>,
}

/// List the roster, newest first.
#[utoipa::path(
    get,
    path = "/api/game-masters",
    responses(
        (status = 200, description = "Game masters", body = [GameMasterSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "System admin required", body = ErrorSchema)
    ),
    tags = ["game-masters"],
    operation_id = "listGameMasters"
)]
#[get("/api/game-masters")]
pub async fn list_game_masters(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
) -> ApiResult<web::Json<Vec<GameMaster>>> {
    let roster = state.game_masters.list(&caller).await?;
    Ok(web::Json(roster))
}

/// Grant the game master role to an email.
#[utoipa::path(
    post,
    path = "/api/game-masters",
    request_body = AddGameMasterBody,
    responses(
        (status = 201, description = "Added", body = GameMasterSchema),
        (status = 400, description = "Invalid email", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "System admin required", body = ErrorSchema),
        (status = 409, description = "Already a game master", body = ErrorSchema)
    ),
    tags = ["game-masters"],
    operation_id = "addGameMaster"
)]
#[post("/api/game-masters")]
pub async fn add_game_master(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: web::Json<AddGameMasterBody>,
) -> ApiResult<HttpResponse> {
    let AddGameMasterBody { email, name } = payload.into_inner();
    let email = email.ok_or_else(|| missing_field_error(FieldName::new("email")))?;
    let created = state
        .game_masters
        .add(&caller, AddGameMasterRequest { email, name })
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// Revoke the game master role.
#[utoipa::path(
    delete,
    path = "/api/game-masters/{id}",
    params(("id" = i32, Path, description = "Roster entry identifier")),
    responses(
        (status = 200, description = "Removed", body = SuccessResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "System admin required", body = ErrorSchema),
        (status = 404, description = "No such entry", body = ErrorSchema)
    ),
    tags = ["game-masters"],
    operation_id = "removeGameMaster"
)]
#[delete("/api/game-masters/{id:\\d+}")]
pub async fn remove_game_master(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<i32>,
) -> ApiResult<web::Json<SuccessResponse>> {
    state
        .game_masters
        .remove(&caller, path.into_inner())
        .await?;
    Ok(web::Json(SuccessResponse::ok()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_game_masters)
        .service(add_game_master)
        .service(remove_game_master);
}
