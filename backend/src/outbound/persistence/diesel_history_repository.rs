//! PostgreSQL-backed `HistoryRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{HistoryRepository, HistoryRepositoryError};
use crate::domain::{
    AssetId, ClientUserId, CompositionTransform, GenerationRecord, NewGenerationRecord,
    SlotSelection,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{HistoryRow, NewHistoryRow};
use super::pool::DbPool;
use super::schema::generation_history;

#[derive(Clone)]
pub struct DieselHistoryRepository {
    pool: DbPool,
}

impl DieselHistoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: HistoryRow) -> Result<GenerationRecord, HistoryRepositoryError> {
    let user_id = ClientUserId::new(&row.user_id)
        .map_err(|err| HistoryRepositoryError::query(format!("stored user id invalid: {err}")))?;
    Ok(GenerationRecord {
        id: row.id,
        user_id,
        selection: SlotSelection {
            face_id: row.face_id.map(AssetId::new),
            front_hair_id: row.front_hair_id.map(AssetId::new),
            back_hair_id: row.back_hair_id.map(AssetId::new),
            costume_id: row.costume_id.map(AssetId::new),
            background_id: row.background_id.map(AssetId::new),
        },
        transform: CompositionTransform {
            scale: row.scale,
            drag_x: row.drag_x,
            drag_y: row.drag_y,
        },
        image_url: row.image_url,
        created_at: row.created_at,
    })
}

#[async_trait]
impl HistoryRepository for DieselHistoryRepository {
    async fn list_recent(
        &self,
        user_id: &ClientUserId,
        limit: i64,
    ) -> Result<Vec<GenerationRecord>, HistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<HistoryRow> = generation_history::table
            .filter(generation_history::user_id.eq(user_id.as_str()))
            .order((
                generation_history::created_at.desc(),
                generation_history::id.desc(),
            ))
            .limit(limit)
            .select(HistoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_record).collect()
    }

    async fn insert(
        &self,
        record: &NewGenerationRecord,
    ) -> Result<GenerationRecord, HistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let selection = record.selection;
        let row = NewHistoryRow {
            user_id: record.user_id.as_str(),
            face_id: selection.face_id.map(AssetId::get),
            front_hair_id: selection.front_hair_id.map(AssetId::get),
            back_hair_id: selection.back_hair_id.map(AssetId::get),
            costume_id: selection.costume_id.map(AssetId::get),
            background_id: selection.background_id.map(AssetId::get),
            scale: record.transform.scale,
            drag_x: record.transform.drag_x,
            drag_y: record.transform.drag_y,
            image_url: record.image_url.as_deref(),
            created_at: record.created_at,
        };
        let stored = diesel::insert_into(generation_history::table)
            .values(&row)
            .returning(HistoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_record(stored)
    }

    async fn delete_owned(
        &self,
        id: i32,
        user_id: &ClientUserId,
    ) -> Result<bool, HistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            generation_history::table
                .filter(generation_history::id.eq(id))
                .filter(generation_history::user_id.eq(user_id.as_str())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
