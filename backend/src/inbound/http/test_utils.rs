//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    MockAssetCatalogue, MockCallerResolver, MockFavorites, MockGameMasterAdmin,
    MockHistoryLedger, MockNavigationButtons, MockStickerCatalogue,
};
use crate::domain::{Caller, Email, Error, Role, VerifiedIdentity};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Token accepted by [`resolver_for`].
pub(crate) const GOOD_TOKEN: &str = "good-token";

/// Upload cap used by handler tests.
pub(crate) const TEST_MAX_UPLOAD_BYTES: usize = 1024;

/// Mocks for every driving port; unset expectations panic when called.
#[derive(Default)]
pub(crate) struct TestPorts {
    pub(crate) callers: MockCallerResolver,
    pub(crate) assets: MockAssetCatalogue,
    pub(crate) stickers: MockStickerCatalogue,
    pub(crate) game_masters: MockGameMasterAdmin,
    pub(crate) history: MockHistoryLedger,
    pub(crate) favorites: MockFavorites,
    pub(crate) navigation_buttons: MockNavigationButtons,
}

impl TestPorts {
    pub(crate) fn into_state(self) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                callers: Arc::new(self.callers),
                assets: Arc::new(self.assets),
                stickers: Arc::new(self.stickers),
                game_masters: Arc::new(self.game_masters),
                history: Arc::new(self.history),
                favorites: Arc::new(self.favorites),
                navigation_buttons: Arc::new(self.navigation_buttons),
            },
            TEST_MAX_UPLOAD_BYTES,
        )
    }
}

pub(crate) fn caller(role: Role) -> Caller {
    let email = match role {
        Role::User => "player@example.com",
        Role::GameMaster => "gm@example.com",
        Role::SystemAdmin => "root@example.com",
    };
    Caller {
        identity: VerifiedIdentity {
            email: Email::new(email).expect("valid fixture email"),
            name: Some("Fixture".to_owned()),
            picture: None,
        },
        role,
    }
}

/// Resolver accepting [`GOOD_TOKEN`] as a caller with `role`.
pub(crate) fn resolver_for(role: Role) -> MockCallerResolver {
    let mut resolver = MockCallerResolver::new();
    resolver.expect_resolve().returning(move |token| {
        if token == GOOD_TOKEN {
            Ok(caller(role))
        } else {
            Err(Error::unauthorized("invalid or expired token"))
        }
    });
    resolver
}

pub(crate) fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {GOOD_TOKEN}"))
}
