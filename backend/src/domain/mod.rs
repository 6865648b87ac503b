//! Domain primitives, services, and ports.
//!
//! Purpose: hold the character-studio model (asset catalogue, stickers,
//! history, favorites, roles) independent of HTTP and storage. Adapters
//! live in `inbound` and `outbound` and meet the domain only through the
//! traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload shared by every service.
//! - AssetKind, AssetItem, Placement: the five layered catalogues.
//! - Caller, Role, RoleRequirement: authenticated callers and gates.
//! - Services implementing the driving ports.

pub mod access_service;
pub mod asset;
pub mod asset_catalogue_service;
pub mod error;
pub mod favorite;
pub mod favorites_service;
pub mod game_master;
pub mod game_master_service;
pub mod history;
pub mod history_service;
pub mod identity;
pub mod navigation;
pub mod navigation_button_service;
pub mod ordering;
pub mod ports;
pub mod sticker;
pub mod sticker_service;
pub mod trace_id;
pub mod upload;
pub(crate) mod upload_support;
pub mod user;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::access_service::AccessService;
pub use self::asset::{
    ASSET_NAME_MAX, AssetId, AssetItem, AssetKind, AssetName, AssetValidationError, NewAsset,
    Placement, PlacementField, UnknownAssetKind,
};
pub use self::asset_catalogue_service::{ASSET_FILE_FIELD, AssetCatalogueService};
pub use self::error::{Error, ErrorCode, field_error};
pub use self::favorite::Favorite;
pub use self::favorites_service::FavoritesService;
pub use self::game_master::{GAME_MASTER_NAME_MAX, GameMaster, NewGameMaster};
pub use self::game_master_service::GameMasterService;
pub use self::history::{
    CompositionTransform, GenerationRecord, HISTORY_LIMIT, HistoryValidationError,
    NewGenerationRecord, SlotSelection,
};
pub use self::history_service::HistoryService;
pub use self::identity::{
    AdminAllowList, Caller, EMAIL_MAX, Email, EmailValidationError, Role, RoleRequirement,
    VerifiedIdentity,
};
pub use self::navigation::{
    NAVIGATION_BUTTON_DIRECTORY, NavigationButton, NavigationButtonType, UnknownButtonType,
};
pub use self::navigation_button_service::{NAVIGATION_IMAGE_FIELD, NavigationButtonService};
pub use self::ordering::{
    MoveDirection, RankChange, RankedSlot, ReorderPlan, next_rank, plan_move,
};
pub use self::sticker::{NewSticker, STICKER_DIRECTORY, Sticker};
pub use self::sticker_service::{STICKER_FILE_FIELD, StickerService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::upload::{IMAGE_EXTENSIONS, UploadValidationError, UploadedFile};
pub use self::user::{CLIENT_USER_ID_MAX, ClientUserId, User, UserValidationError};
