//! OpenAPI document for the studio API.
//!
//! Served by Swagger UI at `/docs` in debug builds. Protected operations use
//! the `BearerAuth` scheme: a Google ID token in the `Authorization` header.
//! Public operations opt out with `security([])`.

use crate::inbound::http::auth_verify::{VerifiedUser, VerifyRequest, VerifyResponse};
use crate::inbound::http::assets::ReorderRequest;
use crate::inbound::http::favorites::FavoriteBody;
use crate::inbound::http::game_masters::AddGameMasterBody;
use crate::inbound::http::history::RecordGenerationBody;
use crate::inbound::http::responses::SuccessResponse;
use crate::inbound::http::schemas::{
    AssetItemSchema, ErrorCodeSchema, ErrorSchema, FavoriteSchema, GameMasterSchema,
    GenerationRecordSchema, NavigationButtonSchema, StickerSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme.
pub const BEARER_SCHEME: &str = "BearerAuth";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Google ID token obtained by the admin screen."))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Character studio backend API",
        description = "Asset catalogue, sticker and navigation button management, game master administration, generation history and favorites."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::auth_verify::verify_token,
        crate::inbound::http::assets::list_assets,
        crate::inbound::http::assets::get_asset,
        crate::inbound::http::assets::upload_asset,
        crate::inbound::http::assets::delete_asset,
        crate::inbound::http::assets::reorder_asset,
        crate::inbound::http::stickers::list_stickers,
        crate::inbound::http::stickers::upload_sticker,
        crate::inbound::http::stickers::delete_sticker,
        crate::inbound::http::navigation_buttons::list_navigation_buttons,
        crate::inbound::http::navigation_buttons::upload_navigation_button,
        crate::inbound::http::navigation_buttons::reset_navigation_button,
        crate::inbound::http::game_masters::list_game_masters,
        crate::inbound::http::game_masters::add_game_master,
        crate::inbound::http::game_masters::remove_game_master,
        crate::inbound::http::history::list_history,
        crate::inbound::http::history::record_history,
        crate::inbound::http::history::delete_history,
        crate::inbound::http::favorites::list_favorites,
        crate::inbound::http::favorites::add_favorite,
        crate::inbound::http::favorites::remove_favorite,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        AssetItemSchema,
        StickerSchema,
        NavigationButtonSchema,
        GameMasterSchema,
        GenerationRecordSchema,
        FavoriteSchema,
        SuccessResponse,
        ReorderRequest,
        VerifyRequest,
        VerifyResponse,
        VerifiedUser,
        AddGameMasterBody,
        RecordGenerationBody,
        FavoriteBody,
    )),
    tags(
        (name = "auth", description = "Token verification"),
        (name = "assets", description = "Face, hair, costume and background catalogues"),
        (name = "stickers", description = "Decorative stickers"),
        (name = "navigation-buttons", description = "Carousel arrow images"),
        (name = "game-masters", description = "Game master roster"),
        (name = "history", description = "Per-browser generation history"),
        (name = "favorites", description = "Per-browser favorite costumes"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn property_names(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).unwrap_or_else(|| panic!("{name} registered")) {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("{name} should be an object schema"),
        }
    }

    #[rstest]
    #[case("/api/{kind}")]
    #[case("/api/{kind}/{id}/order")]
    #[case("/api/sticker/upload")]
    #[case("/api/navigation-buttons/{type}/reset")]
    #[case("/api/game-masters/{id}")]
    #[case("/api/generation-history")]
    #[case("/api/favorite")]
    #[case("/api/auth/verify")]
    fn documents_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn error_schema_uses_error_field() {
        let fields = property_names("crate.domain.Error");
        assert!(fields.iter().any(|f| f == "error"));
        assert!(fields.iter().any(|f| f == "code"));
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
