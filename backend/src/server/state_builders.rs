//! Wiring of adapters into domain services and the shared HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use studio_backend::domain::ports::{
    AssetRepository, AssetStorage, CallerResolver, FavoriteRepository, GameMasterRepository,
    HistoryRepository, IdTokenVerifier, NavigationButtonRepository, StickerRepository,
    UnconfiguredIdTokenVerifier, UserRepository,
};
use studio_backend::domain::{
    AccessService, AssetCatalogueService, FavoritesService, GameMasterService, HistoryService,
    NavigationButtonService, StickerService,
};
use studio_backend::inbound::http::state::{HttpState, HttpStatePorts};
use studio_backend::outbound::identity::{GoogleIdTokenVerifier, GoogleVerifierConfig};
use studio_backend::outbound::persistence::{
    DbPool, DieselAssetRepository, DieselFavoriteRepository, DieselGameMasterRepository,
    DieselHistoryRepository, DieselNavigationButtonRepository, DieselStickerRepository,
    DieselUserRepository,
};

use super::config::IdentitySettings;

/// Driven adapters the services are built from.
pub(crate) struct Adapters<A, St, N, G, H, F, U, S> {
    pub assets: Arc<A>,
    pub stickers: Arc<St>,
    pub navigation_buttons: Arc<N>,
    pub game_masters: Arc<G>,
    pub history: Arc<H>,
    pub favorites: Arc<F>,
    pub users: Arc<U>,
    pub storage: Arc<S>,
}

type DieselAdapters<S> = Adapters<
    DieselAssetRepository,
    DieselStickerRepository,
    DieselNavigationButtonRepository,
    DieselGameMasterRepository,
    DieselHistoryRepository,
    DieselFavoriteRepository,
    DieselUserRepository,
    S,
>;

/// PostgreSQL repositories sharing one pool.
pub(crate) fn diesel_adapters<S>(pool: &DbPool, storage: Arc<S>) -> DieselAdapters<S> {
    Adapters {
        assets: Arc::new(DieselAssetRepository::new(pool.clone())),
        stickers: Arc::new(DieselStickerRepository::new(pool.clone())),
        navigation_buttons: Arc::new(DieselNavigationButtonRepository::new(pool.clone())),
        game_masters: Arc::new(DieselGameMasterRepository::new(pool.clone())),
        history: Arc::new(DieselHistoryRepository::new(pool.clone())),
        favorites: Arc::new(DieselFavoriteRepository::new(pool.clone())),
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        storage,
    }
}

fn resolver_with<V, G>(
    verifier: Arc<V>,
    game_masters: Arc<G>,
    identity: &IdentitySettings,
) -> Arc<dyn CallerResolver>
where
    V: IdTokenVerifier + 'static,
    G: GameMasterRepository + 'static,
{
    Arc::new(AccessService::new(
        verifier,
        game_masters,
        Arc::new(identity.admins.clone()),
    ))
}

/// Google verification when a client id is configured, otherwise a verifier
/// that rejects everything.
pub(crate) fn build_caller_resolver<G>(
    identity: &IdentitySettings,
    game_masters: Arc<G>,
    clock: Arc<dyn Clock>,
) -> std::io::Result<Arc<dyn CallerResolver>>
where
    G: GameMasterRepository + 'static,
{
    match &identity.google_client_id {
        Some(client_id) => {
            let verifier = GoogleIdTokenVerifier::new(GoogleVerifierConfig::new(client_id), clock)
                .map_err(|err| std::io::Error::other(format!("token verifier: {err}")))?;
            Ok(resolver_with(Arc::new(verifier), game_masters, identity))
        }
        None => {
            warn!("token verification disabled");
            Ok(resolver_with(
                Arc::new(UnconfiguredIdTokenVerifier),
                game_masters,
                identity,
            ))
        }
    }
}

/// Build every driving port from the adapters.
pub(crate) fn build_ports<A, St, N, G, H, F, U, S>(
    adapters: Adapters<A, St, N, G, H, F, U, S>,
    callers: Arc<dyn CallerResolver>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts
where
    A: AssetRepository + 'static,
    St: StickerRepository + 'static,
    N: NavigationButtonRepository + 'static,
    G: GameMasterRepository + 'static,
    H: HistoryRepository + 'static,
    F: FavoriteRepository + 'static,
    U: UserRepository + 'static,
    S: AssetStorage + 'static,
{
    let Adapters {
        assets,
        stickers,
        navigation_buttons,
        game_masters,
        history,
        favorites,
        users,
        storage,
    } = adapters;

    HttpStatePorts {
        callers,
        assets: Arc::new(AssetCatalogueService::new(
            assets.clone(),
            storage.clone(),
            clock.clone(),
        )),
        stickers: Arc::new(StickerService::new(stickers, storage.clone(), clock.clone())),
        navigation_buttons: Arc::new(NavigationButtonService::new(
            navigation_buttons,
            storage,
            clock.clone(),
        )),
        game_masters: Arc::new(GameMasterService::new(game_masters, clock.clone())),
        history: Arc::new(HistoryService::new(history, users.clone(), clock.clone())),
        favorites: Arc::new(FavoritesService::new(favorites, users, assets, clock)),
    }
}

/// Production state: Diesel repositories, the given storage, Google tokens.
pub(super) fn build_http_state<S>(
    pool: &DbPool,
    storage: Arc<S>,
    identity: &IdentitySettings,
    max_upload_bytes: usize,
) -> std::io::Result<web::Data<HttpState>>
where
    S: AssetStorage + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let adapters = diesel_adapters(pool, storage);
    let callers = build_caller_resolver(identity, adapters.game_masters.clone(), clock.clone())?;
    let ports = build_ports(adapters, callers, clock);
    Ok(web::Data::new(HttpState::new(ports, max_upload_bytes)))
}
