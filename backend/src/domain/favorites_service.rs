//! Costume favorites for anonymous users.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::history_service::map_user_error;
use crate::domain::ports::{
    AssetRepository, AssetRepositoryError, FavoriteRepository, FavoriteRepositoryError, Favorites,
    UserRepository,
};
use crate::domain::{AssetId, AssetKind, ClientUserId, Error, Favorite};

/// Service implementing [`Favorites`].
#[derive(Clone)]
pub struct FavoritesService<F, U, A> {
    favorites: Arc<F>,
    users: Arc<U>,
    assets: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<F, U, A> FavoritesService<F, U, A> {
    pub fn new(favorites: Arc<F>, users: Arc<U>, assets: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            favorites,
            users,
            assets,
            clock,
        }
    }
}

fn map_favorite_error(error: FavoriteRepositoryError) -> Error {
    match error {
        FavoriteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("favorite repository unavailable: {message}"))
        }
        FavoriteRepositoryError::Query { message } => {
            Error::internal(format!("favorite repository error: {message}"))
        }
    }
}

fn map_asset_error(error: AssetRepositoryError) -> Error {
    match error {
        AssetRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("asset repository unavailable: {message}"))
        }
        other => Error::internal(format!("costume lookup failed: {other}")),
    }
}

#[async_trait]
impl<F, U, A> Favorites for FavoritesService<F, U, A>
where
    F: FavoriteRepository,
    U: UserRepository,
    A: AssetRepository,
{
    async fn list(&self, user_id: &ClientUserId) -> Result<Vec<Favorite>, Error> {
        self.users
            .ensure(user_id, self.clock.utc())
            .await
            .map_err(map_user_error)?;
        self.favorites
            .list(user_id)
            .await
            .map_err(map_favorite_error)
    }

    async fn add(&self, user_id: &ClientUserId, costume_id: AssetId) -> Result<Favorite, Error> {
        let costume = self
            .assets
            .find_visible(AssetKind::Costume, costume_id)
            .await
            .map_err(map_asset_error)?;
        if costume.is_none() {
            return Err(Error::not_found(format!("costume {costume_id} not found")));
        }

        self.users
            .ensure(user_id, self.clock.utc())
            .await
            .map_err(map_user_error)?;
        self.favorites
            .insert_if_absent(user_id, costume_id)
            .await
            .map_err(map_favorite_error)
    }

    async fn remove(&self, user_id: &ClientUserId, costume_id: AssetId) -> Result<bool, Error> {
        self.favorites
            .delete(user_id, costume_id)
            .await
            .map_err(map_favorite_error)
    }
}
