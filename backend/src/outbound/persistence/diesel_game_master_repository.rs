//! PostgreSQL-backed `GameMasterRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{GameMasterRepository, GameMasterRepositoryError};
use crate::domain::{Email, GameMaster, NewGameMaster};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{GameMasterRow, NewGameMasterRow};
use super::pool::DbPool;
use super::schema::game_masters;

#[derive(Clone)]
pub struct DieselGameMasterRepository {
    pool: DbPool,
}

impl DieselGameMasterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_game_master(row: GameMasterRow) -> Result<GameMaster, GameMasterRepositoryError> {
    let email = Email::new(&row.email).map_err(|err| {
        GameMasterRepositoryError::query(format!("stored email {} is invalid: {err}", row.email))
    })?;
    // A malformed creator is audit data only; drop it rather than fail the row.
    let created_by = row.created_by.and_then(|raw| match Email::new(&raw) {
        Ok(email) => Some(email),
        Err(err) => {
            warn!(id = row.id, value = %raw, %err, "ignoring malformed created_by");
            None
        }
    });
    Ok(GameMaster {
        id: row.id,
        email,
        name: row.name,
        created_at: row.created_at,
        created_by,
    })
}

#[async_trait]
impl GameMasterRepository for DieselGameMasterRepository {
    async fn list(&self) -> Result<Vec<GameMaster>, GameMasterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GameMasterRow> = game_masters::table
            .order((game_masters::created_at.desc(), game_masters::id.desc()))
            .select(GameMasterRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_game_master).collect()
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, GameMasterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            game_masters::table.filter(game_masters::email.eq(email.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn insert(
        &self,
        game_master: &NewGameMaster,
    ) -> Result<GameMaster, GameMasterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewGameMasterRow {
            email: game_master.email.as_str(),
            name: game_master.name.as_deref(),
            created_at: game_master.created_at,
            created_by: game_master.created_by.as_ref().map(Email::as_str),
        };
        let stored = diesel::insert_into(game_masters::table)
            .values(&row)
            .returning(GameMasterRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    GameMasterRepositoryError::duplicate(game_master.email.to_string())
                } else {
                    map_diesel_error(err)
                }
            })?;
        row_to_game_master(stored)
    }

    async fn delete(&self, id: i32) -> Result<bool, GameMasterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(game_masters::table.filter(game_masters::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed == 1)
    }
}
