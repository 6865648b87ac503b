//! Sticker catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AssetStorage, StickerCatalogue, StickerRepository, StickerRepositoryError,
    StickerUploadRequest,
};
use crate::domain::upload_support::{
    discard_stored_file, map_storage_error, map_upload_error, required_file, required_name,
};
use crate::domain::{
    AssetId, Caller, Error, NewSticker, RoleRequirement, STICKER_DIRECTORY, Sticker,
};

/// Multipart field carrying the sticker image.
pub const STICKER_FILE_FIELD: &str = "asset";

/// Service implementing [`StickerCatalogue`].
#[derive(Clone)]
pub struct StickerService<R, S> {
    repository: Arc<R>,
    storage: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<R, S> StickerService<R, S> {
    pub fn new(repository: Arc<R>, storage: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            storage,
            clock,
        }
    }
}

fn map_repository_error(error: StickerRepositoryError) -> Error {
    match error {
        StickerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("sticker repository unavailable: {message}"))
        }
        StickerRepositoryError::Query { message } => {
            Error::internal(format!("sticker repository error: {message}"))
        }
    }
}

fn not_found(id: AssetId) -> Error {
    Error::not_found(format!("sticker {id} not found"))
}

#[async_trait]
impl<R, S> StickerCatalogue for StickerService<R, S>
where
    R: StickerRepository,
    S: AssetStorage,
{
    async fn list(&self) -> Result<Vec<Sticker>, Error> {
        self.repository
            .list_visible()
            .await
            .map_err(map_repository_error)
    }

    async fn upload(
        &self,
        caller: &Caller,
        request: StickerUploadRequest,
    ) -> Result<Sticker, Error> {
        caller.require(RoleRequirement::Admin)?;

        let name = required_name(request.name)?;
        let file = required_file(request.file, STICKER_FILE_FIELD)?;
        let now = self.clock.utc();
        let file_name = file
            .stored_name(now)
            .map_err(|err| map_upload_error(err, STICKER_FILE_FIELD))?;

        let asset_path = self
            .storage
            .store(STICKER_DIRECTORY, &file_name, &file.bytes)
            .await
            .map_err(map_storage_error)?;

        let draft = NewSticker {
            name,
            asset_path: asset_path.clone(),
            created_at: now,
        };
        match self.repository.insert(&draft).await {
            Ok(sticker) => {
                info!(id = %sticker.id, uploaded_by = %caller.email(), "sticker uploaded");
                Ok(sticker)
            }
            Err(error) => {
                discard_stored_file(self.storage.as_ref(), &asset_path).await;
                Err(map_repository_error(error))
            }
        }
    }

    async fn soft_delete(&self, caller: &Caller, id: AssetId) -> Result<(), Error> {
        caller.require(RoleRequirement::Admin)?;

        let sticker = self
            .repository
            .find_visible(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))?;
        let changed = self
            .repository
            .mark_deleted(id, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        if !changed {
            return Err(not_found(id));
        }

        discard_stored_file(self.storage.as_ref(), &sticker.asset_path).await;
        info!(id = %id, deleted_by = %caller.email(), "sticker soft-deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockAssetStorage, MockStickerRepository};
    use crate::domain::test_fixtures::{caller, fixture_clock, fixture_timestamp};
    use crate::domain::{ErrorCode, Role, UploadedFile};

    fn service(
        repo: MockStickerRepository,
        storage: MockAssetStorage,
    ) -> StickerService<MockStickerRepository, MockAssetStorage> {
        StickerService::new(Arc::new(repo), Arc::new(storage), fixture_clock())
    }

    fn sticker(id: i32) -> Sticker {
        Sticker {
            id: AssetId::new(id),
            name: "star".to_owned(),
            asset_path: format!("/uploads/sticker/{id}.png"),
            deleted: false,
            deleted_at: None,
            created_at: fixture_timestamp(),
        }
    }

    #[tokio::test]
    async fn upload_stores_under_sticker_directory() {
        let mut repo = MockStickerRepository::new();
        let mut storage = MockAssetStorage::new();
        storage
            .expect_store()
            .withf(|dir, _, _| dir == STICKER_DIRECTORY)
            .returning(|dir, name, _| Ok(format!("/uploads/{dir}/{name}")));
        repo.expect_insert().returning(|draft| {
            Ok(Sticker {
                asset_path: draft.asset_path.clone(),
                ..sticker(1)
            })
        });

        let request = StickerUploadRequest {
            name: Some("star".to_owned()),
            file: Some(UploadedFile::new(Some("star.webp".to_owned()), vec![1, 2])),
        };
        let created = service(repo, storage)
            .upload(&caller(Role::GameMaster), request)
            .await
            .expect("upload succeeds");

        assert!(created.asset_path.starts_with("/uploads/sticker/"));
        assert!(created.asset_path.ends_with(".webp"));
    }

    #[tokio::test]
    async fn upload_requires_admin() {
        let err = service(MockStickerRepository::new(), MockAssetStorage::new())
            .upload(&caller(Role::User), StickerUploadRequest::default())
            .await
            .expect_err("forbidden");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn soft_delete_hides_visible_sticker() {
        let mut repo = MockStickerRepository::new();
        let mut storage = MockAssetStorage::new();
        repo.expect_find_visible()
            .return_once(|id| Ok(Some(sticker(id.get()))));
        repo.expect_mark_deleted()
            .times(1)
            .return_once(|_, _| Ok(true));
        storage.expect_remove().times(1).return_once(|_| Ok(()));

        service(repo, storage)
            .soft_delete(&caller(Role::SystemAdmin), AssetId::new(5))
            .await
            .expect("delete succeeds");
    }

    #[tokio::test]
    async fn soft_delete_of_deleted_sticker_is_not_found() {
        let mut repo = MockStickerRepository::new();
        repo.expect_find_visible().return_once(|_| Ok(None));

        let err = service(repo, MockAssetStorage::new())
            .soft_delete(&caller(Role::GameMaster), AssetId::new(5))
            .await
            .expect_err("already deleted");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
