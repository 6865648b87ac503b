//! HTTP inbound adapter exposing the studio REST API.

pub mod assets;
pub mod auth;
pub mod auth_verify;
pub mod error;
pub mod favorites;
pub mod game_masters;
pub mod health;
pub mod history;
pub mod multipart;
pub mod navigation_buttons;
pub mod responses;
pub mod schemas;
pub mod state;
pub mod stickers;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api` route plus the extractor error configs.
///
/// The catalogue routes go last: their `{kind}` segment is constrained to the
/// five slot slugs, but registering the fixed paths first keeps matching
/// unambiguous.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .app_data(error::path_config())
        .service(auth_verify::verify_token);
    game_masters::configure(cfg);
    history::configure(cfg);
    favorites::configure(cfg);
    stickers::configure(cfg);
    navigation_buttons::configure(cfg);
    assets::configure(cfg);
}
