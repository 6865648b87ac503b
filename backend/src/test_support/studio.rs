//! A fully wired studio over in-memory adapters.
//!
//! ```ignore
//! let studio = InMemoryStudio::new();
//! let app = actix_web::test::init_service(
//!     App::new()
//!         .app_data(web::Data::new(studio.state()))
//!         .configure(configure_api),
//! )
//! .await;
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::ports::{CallerResolver, GameMasterRepository};
use crate::domain::{
    AccessService, AdminAllowList, AssetCatalogueService, Email, FavoritesService,
    GameMasterService, HistoryService, NavigationButtonService, NewGameMaster, StickerService,
};
use crate::inbound::http::state::{DEFAULT_MAX_UPLOAD_BYTES, HttpState, HttpStatePorts};

use super::clock::SteppingClock;
use super::memory::{
    InMemoryAssetRepository, InMemoryAssetStorage, InMemoryFavoriteRepository,
    InMemoryGameMasterRepository, InMemoryHistoryRepository, InMemoryNavigationButtonRepository,
    InMemoryStickerRepository, InMemoryUserRepository, StaticTokenVerifier,
};

pub const SYSTEM_ADMIN_TOKEN: &str = "token-root";
pub const SYSTEM_ADMIN_EMAIL: &str = "root@example.com";
pub const GAME_MASTER_TOKEN: &str = "token-gm";
pub const GAME_MASTER_EMAIL: &str = "gm@example.com";
pub const PLAYER_TOKEN: &str = "token-player";
pub const PLAYER_EMAIL: &str = "player@example.com";

/// Adapters plus the clock; every field is shared with the built services.
pub struct InMemoryStudio {
    pub clock: Arc<SteppingClock>,
    pub assets: Arc<InMemoryAssetRepository>,
    pub stickers: Arc<InMemoryStickerRepository>,
    pub navigation_buttons: Arc<InMemoryNavigationButtonRepository>,
    pub game_masters: Arc<InMemoryGameMasterRepository>,
    pub history: Arc<InMemoryHistoryRepository>,
    pub favorites: Arc<InMemoryFavoriteRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub storage: Arc<InMemoryAssetStorage>,
    pub verifier: Arc<StaticTokenVerifier>,
    pub admins: Arc<AdminAllowList>,
}

impl Default for InMemoryStudio {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStudio {
    /// Three known tokens; only `root@example.com` is on the allow-list and
    /// nobody is on the game master roster yet.
    pub fn new() -> Self {
        let clock = Arc::new(SteppingClock::fixed());
        let seeded_at = clock.peek();
        let admins = AdminAllowList::parse(SYSTEM_ADMIN_EMAIL).0;
        Self {
            navigation_buttons: Arc::new(InMemoryNavigationButtonRepository::seeded(seeded_at)),
            clock,
            assets: Arc::default(),
            stickers: Arc::default(),
            game_masters: Arc::default(),
            history: Arc::default(),
            favorites: Arc::default(),
            users: Arc::default(),
            storage: Arc::default(),
            verifier: Arc::new(
                StaticTokenVerifier::default()
                    .with_identity(SYSTEM_ADMIN_TOKEN, SYSTEM_ADMIN_EMAIL)
                    .with_identity(GAME_MASTER_TOKEN, GAME_MASTER_EMAIL)
                    .with_identity(PLAYER_TOKEN, PLAYER_EMAIL),
            ),
            admins: Arc::new(admins),
        }
    }

    /// Put `gm@example.com` on the roster directly.
    ///
    /// # Panics
    ///
    /// Panics if the roster already holds that email.
    pub async fn seed_game_master(&self) {
        let email = match Email::new(GAME_MASTER_EMAIL) {
            Ok(email) => email,
            Err(err) => panic!("fixture email: {err}"),
        };
        let now: DateTime<Utc> = self.clock.utc();
        if let Err(err) = self
            .game_masters
            .insert(&NewGameMaster {
                email,
                name: Some("Fixture GM".to_owned()),
                created_by: None,
                created_at: now,
            })
            .await
        {
            panic!("seed game master: {err}");
        }
    }

    pub fn caller_resolver(&self) -> Arc<dyn CallerResolver> {
        Arc::new(AccessService::new(
            self.verifier.clone(),
            self.game_masters.clone(),
            self.admins.clone(),
        ))
    }

    /// Services over the shared adapters.
    pub fn ports(&self) -> HttpStatePorts {
        let clock: Arc<dyn Clock> = self.clock.clone();
        HttpStatePorts {
            callers: self.caller_resolver(),
            assets: Arc::new(AssetCatalogueService::new(
                self.assets.clone(),
                self.storage.clone(),
                clock.clone(),
            )),
            stickers: Arc::new(StickerService::new(
                self.stickers.clone(),
                self.storage.clone(),
                clock.clone(),
            )),
            navigation_buttons: Arc::new(NavigationButtonService::new(
                self.navigation_buttons.clone(),
                self.storage.clone(),
                clock.clone(),
            )),
            game_masters: Arc::new(GameMasterService::new(
                self.game_masters.clone(),
                clock.clone(),
            )),
            history: Arc::new(HistoryService::new(
                self.history.clone(),
                self.users.clone(),
                clock.clone(),
            )),
            favorites: Arc::new(FavoritesService::new(
                self.favorites.clone(),
                self.users.clone(),
                self.assets.clone(),
                clock,
            )),
        }
    }

    pub fn state(&self) -> HttpState {
        self.state_with_limit(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn state_with_limit(&self, max_upload_bytes: usize) -> HttpState {
        HttpState::new(self.ports(), max_upload_bytes)
    }
}
