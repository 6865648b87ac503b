//! Ordered, soft-deletable catalogue shared by the five slot kinds.
//!
//! One service instance serves every [`AssetKind`]; the kind selects the
//! table and the upload directory while validation stays uniform.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    AssetCatalogue, AssetRepository, AssetRepositoryError, AssetStorage, AssetUploadRequest,
    ReorderOutcome,
};
use crate::domain::upload_support::{
    discard_stored_file, map_asset_validation_error, map_storage_error, map_upload_error,
    required_file, required_name,
};
use crate::domain::{
    AssetId, AssetItem, AssetKind, Caller, Error, MoveDirection, NewAsset, Placement,
    PlacementField, RankedSlot, ReorderPlan, RoleRequirement, next_rank, plan_move,
};

/// Multipart field carrying the image.
pub const ASSET_FILE_FIELD: &str = "asset";

/// Catalogue service implementing [`AssetCatalogue`].
#[derive(Clone)]
pub struct AssetCatalogueService<R, S> {
    repository: Arc<R>,
    storage: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<R, S> AssetCatalogueService<R, S> {
    pub fn new(repository: Arc<R>, storage: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            storage,
            clock,
        }
    }
}

fn map_repository_error(error: AssetRepositoryError) -> Error {
    match error {
        AssetRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("asset repository unavailable: {message}"))
        }
        AssetRepositoryError::Query { message } => {
            Error::internal(format!("asset repository error: {message}"))
        }
        AssetRepositoryError::RankConflict { id } => {
            Error::conflict("catalogue order changed concurrently; reload and retry")
                .with_details(serde_json::json!({ "id": id, "code": "rank_conflict" }))
        }
    }
}

fn not_found(kind: AssetKind, id: AssetId) -> Error {
    Error::not_found(format!("{} {id} not found", kind.label()))
}

/// Parse the optional geometry fields; blank values count as absent.
fn parse_placement(request: &AssetUploadRequest) -> Result<Placement, Error> {
    let parse = |field: PlacementField, raw: &Option<String>| {
        raw.as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(|value| field.parse(value))
            .transpose()
            .map_err(map_asset_validation_error)
    };
    Placement::from_parts(
        parse(PlacementField::OffsetX, &request.offset_x)?,
        parse(PlacementField::OffsetY, &request.offset_y)?,
        parse(PlacementField::Width, &request.width)?,
        parse(PlacementField::Height, &request.height)?,
    )
    .map_err(map_asset_validation_error)
}

impl<R, S> AssetCatalogueService<R, S>
where
    R: AssetRepository,
    S: AssetStorage,
{
    async fn find_visible(&self, kind: AssetKind, id: AssetId) -> Result<AssetItem, Error> {
        self.repository
            .find_visible(kind, id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(kind, id))
    }
}

#[async_trait]
impl<R, S> AssetCatalogue for AssetCatalogueService<R, S>
where
    R: AssetRepository,
    S: AssetStorage,
{
    async fn list(&self, kind: AssetKind) -> Result<Vec<AssetItem>, Error> {
        self.repository
            .list_visible(kind)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, kind: AssetKind, id: AssetId) -> Result<AssetItem, Error> {
        self.find_visible(kind, id).await
    }

    async fn upload(
        &self,
        caller: &Caller,
        kind: AssetKind,
        request: AssetUploadRequest,
    ) -> Result<AssetItem, Error> {
        caller.require(RoleRequirement::Admin)?;

        let placement = parse_placement(&request)?;
        let name = required_name(request.name)?;
        let file = required_file(request.file, ASSET_FILE_FIELD)?;
        let now = self.clock.utc();
        let file_name = file
            .stored_name(now)
            .map_err(|err| map_upload_error(err, ASSET_FILE_FIELD))?;

        let max = self
            .repository
            .max_sort_order(kind)
            .await
            .map_err(map_repository_error)?;

        let asset_path = self
            .storage
            .store(kind.slug(), &file_name, &file.bytes)
            .await
            .map_err(map_storage_error)?;

        let draft = NewAsset {
            kind,
            name,
            asset_path: asset_path.clone(),
            sort_order: next_rank(max),
            placement,
            created_at: now,
        };
        let item = match self.repository.insert(&draft).await {
            Ok(item) => item,
            Err(error) => {
                discard_stored_file(self.storage.as_ref(), &asset_path).await;
                return Err(map_repository_error(error));
            }
        };

        info!(
            kind = %kind,
            id = %item.id,
            sort_order = item.sort_order,
            uploaded_by = %caller.email(),
            "asset uploaded"
        );
        Ok(item)
    }

    async fn soft_delete(
        &self,
        caller: &Caller,
        kind: AssetKind,
        id: AssetId,
    ) -> Result<(), Error> {
        caller.require(RoleRequirement::Admin)?;

        let item = self.find_visible(kind, id).await?;
        let changed = self
            .repository
            .mark_deleted(kind, id, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        if !changed {
            return Err(not_found(kind, id));
        }

        discard_stored_file(self.storage.as_ref(), &item.asset_path).await;
        info!(kind = %kind, id = %id, deleted_by = %caller.email(), "asset soft-deleted");
        Ok(())
    }

    async fn reorder(
        &self,
        caller: &Caller,
        kind: AssetKind,
        id: AssetId,
        direction: MoveDirection,
    ) -> Result<ReorderOutcome, Error> {
        caller.require(RoleRequirement::Admin)?;

        self.find_visible(kind, id).await?;
        let visible: Vec<RankedSlot> = self
            .repository
            .list_visible(kind)
            .await
            .map_err(map_repository_error)?
            .iter()
            .map(|item| RankedSlot::new(item.id, item.sort_order))
            .collect();

        match plan_move(&visible, id, direction) {
            None => Err(not_found(kind, id)),
            Some(ReorderPlan::AtEdge) => Ok(ReorderOutcome::AtEdge),
            Some(ReorderPlan::Move { neighbour, changes }) => {
                let renumbered = changes.len();
                if let Err(error) = self.repository.apply_ranks(kind, changes).await {
                    warn!(%error, kind = %kind, id = %id, "rank update failed");
                    return Err(map_repository_error(error));
                }
                info!(
                    kind = %kind,
                    id = %id,
                    neighbour = %neighbour.id,
                    direction = %direction,
                    renumbered,
                    "asset reordered"
                );
                Ok(ReorderOutcome::Moved)
            }
        }
    }
}

#[cfg(test)]
#[path = "asset_catalogue_service_tests.rs"]
mod tests;
