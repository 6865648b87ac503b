//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. Regenerate with `diesel print-schema` after a schema change.

diesel::table! {
    /// Face slot catalogue.
    faces (id) {
        id -> Int4,
        name -> Varchar,
        asset_path -> Varchar,
        deleted -> Bool,
        deleted_at -> Nullable<Timestamptz>,
        sort_order -> Int4,
        offset_x -> Int4,
        offset_y -> Int4,
        width -> Int4,
        height -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Front hair slot catalogue.
    front_hairs (id) {
        id -> Int4,
        name -> Varchar,
        asset_path -> Varchar,
        deleted -> Bool,
        deleted_at -> Nullable<Timestamptz>,
        sort_order -> Int4,
        offset_x -> Int4,
        offset_y -> Int4,
        width -> Int4,
        height -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Back hair slot catalogue.
    back_hairs (id) {
        id -> Int4,
        name -> Varchar,
        asset_path -> Varchar,
        deleted -> Bool,
        deleted_at -> Nullable<Timestamptz>,
        sort_order -> Int4,
        offset_x -> Int4,
        offset_y -> Int4,
        width -> Int4,
        height -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Costume slot catalogue.
    costumes (id) {
        id -> Int4,
        name -> Varchar,
        asset_path -> Varchar,
        deleted -> Bool,
        deleted_at -> Nullable<Timestamptz>,
        sort_order -> Int4,
        offset_x -> Int4,
        offset_y -> Int4,
        width -> Int4,
        height -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Background slot catalogue.
    backgrounds (id) {
        id -> Int4,
        name -> Varchar,
        asset_path -> Varchar,
        deleted -> Bool,
        deleted_at -> Nullable<Timestamptz>,
        sort_order -> Int4,
        offset_x -> Int4,
        offset_y -> Int4,
        width -> Int4,
        height -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Free-floating decoration images.
    stickers (id) {
        id -> Int4,
        name -> Varchar,
        asset_path -> Varchar,
        deleted -> Bool,
        deleted_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Database-backed game master roster; `email` is unique.
    game_masters (id) {
        id -> Int4,
        email -> Varchar,
        name -> Nullable<Varchar>,
        created_at -> Timestamptz,
        created_by -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Anonymous end users keyed by a client-generated id.
    users (id) {
        id -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only ledger of composed photos.
    generation_history (id) {
        id -> Int4,
        user_id -> Varchar,
        face_id -> Nullable<Int4>,
        front_hair_id -> Nullable<Int4>,
        back_hair_id -> Nullable<Int4>,
        costume_id -> Nullable<Int4>,
        background_id -> Nullable<Int4>,
        scale -> Float8,
        drag_x -> Float8,
        drag_y -> Float8,
        image_url -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Costume bookmarks; `(user_id, costume_id)` is unique.
    favorites (id) {
        id -> Int4,
        user_id -> Varchar,
        costume_id -> Int4,
    }
}

diesel::table! {
    /// The two seeded previous/next button rows.
    navigation_buttons (button_type) {
        button_type -> Varchar,
        image_path -> Nullable<Varchar>,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(favorites -> users (user_id));
diesel::joinable!(favorites -> costumes (costume_id));
diesel::joinable!(generation_history -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    backgrounds,
    back_hairs,
    costumes,
    faces,
    favorites,
    front_hairs,
    game_masters,
    generation_history,
    navigation_buttons,
    stickers,
    users,
);
