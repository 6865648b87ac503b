//! PostgreSQL-backed `AssetRepository` serving all five slot catalogues.
//!
//! The five tables share one shape, so every query is written once and
//! dispatched on [`AssetKind`] by `with_asset_table!`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{AssetRepository, AssetRepositoryError};
use crate::domain::{AssetId, AssetItem, AssetKind, NewAsset, Placement, RankChange};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::AssetRow;
use super::pool::DbPool;

/// Column tuple matching [`AssetRow`] field order.
macro_rules! asset_columns {
    ($table:ident) => {
        (
            $table::id,
            $table::name,
            $table::asset_path,
            $table::deleted,
            $table::deleted_at,
            $table::sort_order,
            $table::offset_x,
            $table::offset_y,
            $table::width,
            $table::height,
            $table::created_at,
        )
    };
}

/// Evaluate `$body` with `$table` bound to the schema module for `$kind`.
macro_rules! with_asset_table {
    ($kind:expr, |$table:ident| $body:expr) => {
        match $kind {
            AssetKind::Face => {
                use super::schema::faces as $table;
                $body
            }
            AssetKind::FrontHair => {
                use super::schema::front_hairs as $table;
                $body
            }
            AssetKind::BackHair => {
                use super::schema::back_hairs as $table;
                $body
            }
            AssetKind::Costume => {
                use super::schema::costumes as $table;
                $body
            }
            AssetKind::Background => {
                use super::schema::backgrounds as $table;
                $body
            }
        }
    };
}

/// Diesel-backed implementation of the `AssetRepository` port.
#[derive(Clone)]
pub struct DieselAssetRepository {
    pool: DbPool,
}

impl DieselAssetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside the rank swap transaction.
#[derive(Debug)]
enum SwapError {
    Diesel(DieselError),
    /// The row no longer holds the observed rank, or is no longer visible.
    Stale(AssetId),
}

impl From<DieselError> for SwapError {
    fn from(value: DieselError) -> Self {
        Self::Diesel(value)
    }
}

fn map_swap_error(error: SwapError) -> AssetRepositoryError {
    match error {
        SwapError::Diesel(inner) => map_diesel_error(inner),
        SwapError::Stale(id) => AssetRepositoryError::rank_conflict(id.get()),
    }
}

fn row_to_item(kind: AssetKind, row: AssetRow) -> AssetItem {
    AssetItem {
        id: AssetId::new(row.id),
        kind,
        name: row.name,
        asset_path: row.asset_path,
        deleted: row.deleted,
        deleted_at: row.deleted_at,
        sort_order: row.sort_order,
        placement: Placement {
            offset_x: row.offset_x,
            offset_y: row.offset_y,
            width: row.width,
            height: row.height,
        },
        created_at: row.created_at,
    }
}

#[async_trait]
impl AssetRepository for DieselAssetRepository {
    async fn list_visible(&self, kind: AssetKind) -> Result<Vec<AssetItem>, AssetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AssetRow> = with_asset_table!(kind, |t| {
            t::table
                .filter(t::deleted.eq(false))
                .order((t::sort_order.asc(), t::id.asc()))
                .select(asset_columns!(t))
                .load(&mut conn)
                .await
        })
        .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(|row| row_to_item(kind, row)).collect())
    }

    async fn find_visible(
        &self,
        kind: AssetKind,
        id: AssetId,
    ) -> Result<Option<AssetItem>, AssetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AssetRow> = with_asset_table!(kind, |t| {
            t::table
                .filter(t::id.eq(id.get()))
                .filter(t::deleted.eq(false))
                .select(asset_columns!(t))
                .first(&mut conn)
                .await
                .optional()
        })
        .map_err(map_diesel_error)?;
        Ok(row.map(|row| row_to_item(kind, row)))
    }

    async fn max_sort_order(&self, kind: AssetKind) -> Result<Option<i32>, AssetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        with_asset_table!(kind, |t| {
            t::table
                .select(diesel::dsl::max(t::sort_order))
                .first::<Option<i32>>(&mut conn)
                .await
        })
        .map_err(map_diesel_error)
    }

    async fn insert(&self, asset: &NewAsset) -> Result<AssetItem, AssetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: AssetRow = with_asset_table!(asset.kind, |t| {
            diesel::insert_into(t::table)
                .values((
                    t::name.eq(asset.name.as_str()),
                    t::asset_path.eq(asset.asset_path.as_str()),
                    t::sort_order.eq(asset.sort_order),
                    t::offset_x.eq(asset.placement.offset_x),
                    t::offset_y.eq(asset.placement.offset_y),
                    t::width.eq(asset.placement.width),
                    t::height.eq(asset.placement.height),
                    t::created_at.eq(asset.created_at),
                ))
                .returning(asset_columns!(t))
                .get_result(&mut conn)
                .await
        })
        .map_err(map_diesel_error)?;
        Ok(row_to_item(asset.kind, row))
    }

    async fn mark_deleted(
        &self,
        kind: AssetKind,
        id: AssetId,
        at: DateTime<Utc>,
    ) -> Result<bool, AssetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = with_asset_table!(kind, |t| {
            diesel::update(t::table.filter(t::id.eq(id.get())).filter(t::deleted.eq(false)))
                .set((t::deleted.eq(true), t::deleted_at.eq(Some(at))))
                .execute(&mut conn)
                .await
        })
        .map_err(map_diesel_error)?;
        Ok(updated == 1)
    }

    async fn apply_ranks(
        &self,
        kind: AssetKind,
        changes: Vec<RankChange>,
    ) -> Result<(), AssetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let outcome = with_asset_table!(kind, |t| {
            conn.transaction::<(), SwapError, _>(|conn| {
                async move {
                    // Each update is guarded by the rank observed when the
                    // move was planned, so a concurrent reorder rolls us back.
                    for change in changes {
                        let slot = change.observed;
                        let updated = diesel::update(
                            t::table
                                .filter(t::id.eq(slot.id.get()))
                                .filter(t::sort_order.eq(slot.sort_order))
                                .filter(t::deleted.eq(false)),
                        )
                        .set(t::sort_order.eq(change.new_rank))
                        .execute(conn)
                        .await?;
                        if updated != 1 {
                            return Err(SwapError::Stale(slot.id));
                        }
                    }
                    Ok(())
                }
                .scope_boxed()
            })
            .await
        });
        if let Err(SwapError::Stale(id)) = &outcome {
            debug!(%kind, id = id.get(), "rank guard missed; rolled back");
        }
        outcome.map_err(map_swap_error)
    }
}
