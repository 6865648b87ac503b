//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`AssetStorage`], [`IdTokenVerifier`]) are
//! implemented by outbound adapters. Driving ports ([`AssetCatalogue`],
//! [`CallerResolver`] and friends) are implemented by domain services and
//! consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod asset_catalogue;
mod asset_repository;
mod asset_storage;
mod caller_resolver;
mod favorite_repository;
mod favorites;
mod game_master_admin;
mod game_master_repository;
mod history_ledger;
mod history_repository;
mod id_token_verifier;
mod navigation_button_repository;
mod navigation_buttons;
mod sticker_catalogue;
mod sticker_repository;
mod user_repository;

#[cfg(test)]
pub use asset_catalogue::MockAssetCatalogue;
pub use asset_catalogue::{AssetCatalogue, AssetUploadRequest, ReorderOutcome};
#[cfg(test)]
pub use asset_repository::MockAssetRepository;
pub use asset_repository::{AssetRepository, AssetRepositoryError};
#[cfg(test)]
pub use asset_storage::MockAssetStorage;
pub use asset_storage::{AssetStorage, AssetStorageError};
#[cfg(test)]
pub use caller_resolver::MockCallerResolver;
pub use caller_resolver::CallerResolver;
#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
pub use favorite_repository::{FavoriteRepository, FavoriteRepositoryError};
#[cfg(test)]
pub use favorites::MockFavorites;
pub use favorites::Favorites;
#[cfg(test)]
pub use game_master_admin::MockGameMasterAdmin;
pub use game_master_admin::{AddGameMasterRequest, GameMasterAdmin};
#[cfg(test)]
pub use game_master_repository::MockGameMasterRepository;
pub use game_master_repository::{GameMasterRepository, GameMasterRepositoryError};
#[cfg(test)]
pub use history_ledger::MockHistoryLedger;
pub use history_ledger::{HistoryLedger, RecordGenerationRequest};
#[cfg(test)]
pub use history_repository::MockHistoryRepository;
pub use history_repository::{HistoryRepository, HistoryRepositoryError};
#[cfg(test)]
pub use id_token_verifier::MockIdTokenVerifier;
pub use id_token_verifier::{IdTokenError, IdTokenVerifier, UnconfiguredIdTokenVerifier};
#[cfg(test)]
pub use navigation_button_repository::MockNavigationButtonRepository;
pub use navigation_button_repository::{
    NavigationButtonRepository, NavigationButtonRepositoryError,
};
#[cfg(test)]
pub use navigation_buttons::MockNavigationButtons;
pub use navigation_buttons::NavigationButtons;
#[cfg(test)]
pub use sticker_catalogue::MockStickerCatalogue;
pub use sticker_catalogue::{StickerCatalogue, StickerUploadRequest};
#[cfg(test)]
pub use sticker_repository::MockStickerRepository;
pub use sticker_repository::{StickerRepository, StickerRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepositoryError, UserRepository};
