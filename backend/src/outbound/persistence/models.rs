//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{favorites, game_masters, generation_history, navigation_buttons, stickers};

/// Row shared by the five slot catalogue tables.
///
/// Loaded positionally through `asset_columns!`, so field order must match
/// that column tuple.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct AssetRow {
    pub id: i32,
    pub name: String,
    pub asset_path: String,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub sort_order: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub width: i32,
    pub height: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = stickers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StickerRow {
    pub id: i32,
    pub name: String,
    pub asset_path: String,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stickers)]
pub(crate) struct NewStickerRow<'a> {
    pub name: &'a str,
    pub asset_path: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = game_masters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GameMasterRow {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = game_masters)]
pub(crate) struct NewGameMasterRow<'a> {
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = generation_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HistoryRow {
    pub id: i32,
    pub user_id: String,
    pub face_id: Option<i32>,
    pub front_hair_id: Option<i32>,
    pub back_hair_id: Option<i32>,
    pub costume_id: Option<i32>,
    pub background_id: Option<i32>,
    pub scale: f64,
    pub drag_x: f64,
    pub drag_y: f64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = generation_history)]
pub(crate) struct NewHistoryRow<'a> {
    pub user_id: &'a str,
    pub face_id: Option<i32>,
    pub front_hair_id: Option<i32>,
    pub back_hair_id: Option<i32>,
    pub costume_id: Option<i32>,
    pub background_id: Option<i32>,
    pub scale: f64,
    pub drag_x: f64,
    pub drag_y: f64,
    pub image_url: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FavoriteRow {
    pub id: i32,
    pub user_id: String,
    pub costume_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = navigation_buttons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NavigationButtonRow {
    pub button_type: String,
    pub image_path: Option<String>,
    pub updated_at: DateTime<Utc>,
}
