//! PostgreSQL-backed `FavoriteRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FavoriteRepository, FavoriteRepositoryError};
use crate::domain::{AssetId, ClientUserId, Favorite};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::FavoriteRow;
use super::pool::DbPool;
use super::schema::favorites;

#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_favorite(row: FavoriteRow) -> Result<Favorite, FavoriteRepositoryError> {
    let user_id = ClientUserId::new(&row.user_id)
        .map_err(|err| FavoriteRepositoryError::query(format!("stored user id invalid: {err}")))?;
    Ok(Favorite {
        id: row.id,
        user_id,
        costume_id: AssetId::new(row.costume_id),
    })
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn list(&self, user_id: &ClientUserId) -> Result<Vec<Favorite>, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FavoriteRow> = favorites::table
            .filter(favorites::user_id.eq(user_id.as_str()))
            .order(favorites::id.desc())
            .select(FavoriteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_favorite).collect()
    }

    async fn insert_if_absent(
        &self,
        user_id: &ClientUserId,
        costume_id: AssetId,
    ) -> Result<Favorite, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(favorites::table)
            .values((
                favorites::user_id.eq(user_id.as_str()),
                favorites::costume_id.eq(costume_id.get()),
            ))
            .on_conflict((favorites::user_id, favorites::costume_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let row: FavoriteRow = favorites::table
            .filter(favorites::user_id.eq(user_id.as_str()))
            .filter(favorites::costume_id.eq(costume_id.get()))
            .select(FavoriteRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_favorite(row)
    }

    async fn delete(
        &self,
        user_id: &ClientUserId,
        costume_id: AssetId,
    ) -> Result<bool, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(user_id.as_str()))
                .filter(favorites::costume_id.eq(costume_id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
