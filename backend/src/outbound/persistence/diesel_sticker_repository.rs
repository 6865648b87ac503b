//! PostgreSQL-backed `StickerRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StickerRepository, StickerRepositoryError};
use crate::domain::{AssetId, NewSticker, Sticker};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewStickerRow, StickerRow};
use super::pool::DbPool;
use super::schema::stickers;

#[derive(Clone)]
pub struct DieselStickerRepository {
    pool: DbPool,
}

impl DieselStickerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_sticker(row: StickerRow) -> Sticker {
    Sticker {
        id: AssetId::new(row.id),
        name: row.name,
        asset_path: row.asset_path,
        deleted: row.deleted,
        deleted_at: row.deleted_at,
        created_at: row.created_at,
    }
}

#[async_trait]
impl StickerRepository for DieselStickerRepository {
    async fn list_visible(&self) -> Result<Vec<Sticker>, StickerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<StickerRow> = stickers::table
            .filter(stickers::deleted.eq(false))
            .order(stickers::id.asc())
            .select(StickerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_sticker).collect())
    }

    async fn find_visible(&self, id: AssetId) -> Result<Option<Sticker>, StickerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<StickerRow> = stickers::table
            .filter(stickers::id.eq(id.get()))
            .filter(stickers::deleted.eq(false))
            .select(StickerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_sticker))
    }

    async fn insert(&self, sticker: &NewSticker) -> Result<Sticker, StickerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewStickerRow {
            name: sticker.name.as_str(),
            asset_path: &sticker.asset_path,
            created_at: sticker.created_at,
        };
        diesel::insert_into(stickers::table)
            .values(&row)
            .returning(StickerRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_sticker)
            .map_err(map_diesel_error)
    }

    async fn mark_deleted(
        &self,
        id: AssetId,
        at: DateTime<Utc>,
    ) -> Result<bool, StickerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            stickers::table
                .filter(stickers::id.eq(id.get()))
                .filter(stickers::deleted.eq(false)),
        )
        .set((stickers::deleted.eq(true), stickers::deleted_at.eq(Some(at))))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(updated == 1)
    }
}
