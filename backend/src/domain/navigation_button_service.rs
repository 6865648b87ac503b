//! Custom images for the previous/next navigation buttons.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AssetStorage, NavigationButtonRepository, NavigationButtonRepositoryError, NavigationButtons,
};
use crate::domain::upload_support::{
    discard_stored_file, map_storage_error, map_upload_error, required_file,
};
use crate::domain::{
    Caller, Error, NAVIGATION_BUTTON_DIRECTORY, NavigationButton, NavigationButtonType,
    RoleRequirement, UploadedFile,
};

/// Multipart field carrying the button image.
pub const NAVIGATION_IMAGE_FIELD: &str = "image";

/// Service implementing [`NavigationButtons`].
#[derive(Clone)]
pub struct NavigationButtonService<N, S> {
    repository: Arc<N>,
    storage: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<N, S> NavigationButtonService<N, S> {
    pub fn new(repository: Arc<N>, storage: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            storage,
            clock,
        }
    }
}

fn map_repository_error(error: NavigationButtonRepositoryError) -> Error {
    match error {
        NavigationButtonRepositoryError::Connection { message } => Error::service_unavailable(
            format!("navigation button repository unavailable: {message}"),
        ),
        NavigationButtonRepositoryError::Query { message } => {
            Error::internal(format!("navigation button repository error: {message}"))
        }
        NavigationButtonRepositoryError::Missing { button_type } => {
            Error::internal(format!("navigation button {button_type} is not seeded"))
        }
    }
}

impl<N, S> NavigationButtonService<N, S>
where
    N: NavigationButtonRepository,
    S: AssetStorage,
{
    async fn replace_image(
        &self,
        button_type: NavigationButtonType,
        image_path: Option<String>,
    ) -> Result<NavigationButton, Error> {
        let previous = self
            .repository
            .find(button_type)
            .await
            .map_err(map_repository_error)?;
        let updated = self
            .repository
            .set_image(button_type, image_path, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        if let Some(old) = previous.image_path {
            if updated.image_path.as_deref() != Some(old.as_str()) {
                discard_stored_file(self.storage.as_ref(), &old).await;
            }
        }
        Ok(updated)
    }
}

#[async_trait]
impl<N, S> NavigationButtons for NavigationButtonService<N, S>
where
    N: NavigationButtonRepository,
    S: AssetStorage,
{
    async fn list(&self) -> Result<Vec<NavigationButton>, Error> {
        self.repository.list().await.map_err(map_repository_error)
    }

    async fn upload(
        &self,
        caller: &Caller,
        button_type: NavigationButtonType,
        file: Option<UploadedFile>,
    ) -> Result<NavigationButton, Error> {
        caller.require(RoleRequirement::Admin)?;

        let file = required_file(file, NAVIGATION_IMAGE_FIELD)?;
        let file_name = file
            .stored_name(self.clock.utc())
            .map_err(|err| map_upload_error(err, NAVIGATION_IMAGE_FIELD))?;
        let stored = self
            .storage
            .store(NAVIGATION_BUTTON_DIRECTORY, &file_name, &file.bytes)
            .await
            .map_err(map_storage_error)?;

        match self.replace_image(button_type, Some(stored.clone())).await {
            Ok(button) => {
                info!(%button_type, updated_by = %caller.email(), "navigation button replaced");
                Ok(button)
            }
            Err(error) => {
                discard_stored_file(self.storage.as_ref(), &stored).await;
                Err(error)
            }
        }
    }

    async fn reset(
        &self,
        caller: &Caller,
        button_type: NavigationButtonType,
    ) -> Result<NavigationButton, Error> {
        caller.require(RoleRequirement::Admin)?;
        let button = self.replace_image(button_type, None).await?;
        info!(%button_type, reset_by = %caller.email(), "navigation button reset");
        Ok(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockAssetStorage, MockNavigationButtonRepository};
    use crate::domain::test_fixtures::{caller, fixture_clock, fixture_timestamp};
    use crate::domain::{ErrorCode, Role};

    fn service(
        repo: MockNavigationButtonRepository,
        storage: MockAssetStorage,
    ) -> NavigationButtonService<MockNavigationButtonRepository, MockAssetStorage> {
        NavigationButtonService::new(Arc::new(repo), Arc::new(storage), fixture_clock())
    }

    fn button(button_type: NavigationButtonType, image_path: Option<&str>) -> NavigationButton {
        NavigationButton {
            button_type,
            image_path: image_path.map(str::to_owned),
            updated_at: fixture_timestamp(),
        }
    }

    fn echoing_set_image(repo: &mut MockNavigationButtonRepository) {
        repo.expect_set_image()
            .times(1)
            .returning(|button_type, image_path, at| {
                Ok(NavigationButton {
                    button_type,
                    image_path,
                    updated_at: at,
                })
            });
    }

    #[tokio::test]
    async fn upload_replaces_and_discards_previous_file() {
        let mut repo = MockNavigationButtonRepository::new();
        repo.expect_find().return_once(|button_type| {
            Ok(button(button_type, Some("/uploads/navigation-buttons/old.png")))
        });
        echoing_set_image(&mut repo);
        let mut storage = MockAssetStorage::new();
        storage
            .expect_store()
            .withf(|dir, _, _| dir == NAVIGATION_BUTTON_DIRECTORY)
            .returning(|dir, name, _| Ok(format!("/uploads/{dir}/{name}")));
        storage
            .expect_remove()
            .withf(|path| path == "/uploads/navigation-buttons/old.png")
            .times(1)
            .return_once(|_| Ok(()));

        let updated = service(repo, storage)
            .upload(
                &caller(Role::GameMaster),
                NavigationButtonType::Next,
                Some(UploadedFile::new(Some("arrow.png".to_owned()), vec![7])),
            )
            .await
            .expect("upload succeeds");

        assert_eq!(updated.button_type, NavigationButtonType::Next);
        assert!(
            updated
                .image_path
                .as_deref()
                .is_some_and(|p| p.starts_with("/uploads/navigation-buttons/"))
        );
    }

    #[tokio::test]
    async fn reset_clears_custom_image() {
        let mut repo = MockNavigationButtonRepository::new();
        repo.expect_find()
            .return_once(|button_type| Ok(button(button_type, Some("/uploads/x.png"))));
        echoing_set_image(&mut repo);
        let mut storage = MockAssetStorage::new();
        storage.expect_remove().times(1).return_once(|_| Ok(()));

        let updated = service(repo, storage)
            .reset(&caller(Role::SystemAdmin), NavigationButtonType::Prev)
            .await
            .expect("reset succeeds");

        assert_eq!(updated.image_path, None);
    }

    #[tokio::test]
    async fn reset_without_custom_image_touches_no_files() {
        let mut repo = MockNavigationButtonRepository::new();
        repo.expect_find()
            .return_once(|button_type| Ok(button(button_type, None)));
        echoing_set_image(&mut repo);

        service(repo, MockAssetStorage::new())
            .reset(&caller(Role::GameMaster), NavigationButtonType::Prev)
            .await
            .expect("reset succeeds");
    }

    #[tokio::test]
    async fn upload_without_file_is_invalid() {
        let err = service(
            MockNavigationButtonRepository::new(),
            MockAssetStorage::new(),
        )
        .upload(&caller(Role::GameMaster), NavigationButtonType::Prev, None)
        .await
        .expect_err("missing file");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn plain_users_cannot_change_buttons() {
        let err = service(
            MockNavigationButtonRepository::new(),
            MockAssetStorage::new(),
        )
        .reset(&caller(Role::User), NavigationButtonType::Next)
        .await
        .expect_err("forbidden");

        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
