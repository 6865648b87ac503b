//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin: they translate between internal row structs
//! (`models.rs`, `schema.rs`) and domain types, and map every pool or Diesel
//! failure onto the matching port error. Connections come from a `bb8` pool
//! through `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use studio_backend::outbound::persistence::{DbPool, DieselAssetRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/studio")).await?;
//! let assets = DieselAssetRepository::new(pool);
//! ```

mod diesel_asset_repository;
mod diesel_error_mapping;
mod diesel_favorite_repository;
mod diesel_game_master_repository;
mod diesel_history_repository;
mod diesel_navigation_button_repository;
mod diesel_sticker_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_asset_repository::DieselAssetRepository;
pub use diesel_favorite_repository::DieselFavoriteRepository;
pub use diesel_game_master_repository::DieselGameMasterRepository;
pub use diesel_history_repository::DieselHistoryRepository;
pub use diesel_navigation_button_repository::DieselNavigationButtonRepository;
pub use diesel_sticker_repository::DieselStickerRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
