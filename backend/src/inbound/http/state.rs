//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AssetCatalogue, CallerResolver, Favorites, GameMasterAdmin, HistoryLedger, NavigationButtons,
    StickerCatalogue,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub callers: Arc<dyn CallerResolver>,
    pub assets: Arc<dyn AssetCatalogue>,
    pub stickers: Arc<dyn StickerCatalogue>,
    pub game_masters: Arc<dyn GameMasterAdmin>,
    pub history: Arc<dyn HistoryLedger>,
    pub favorites: Arc<dyn Favorites>,
    pub navigation_buttons: Arc<dyn NavigationButtons>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub callers: Arc<dyn CallerResolver>,
    pub assets: Arc<dyn AssetCatalogue>,
    pub stickers: Arc<dyn StickerCatalogue>,
    pub game_masters: Arc<dyn GameMasterAdmin>,
    pub history: Arc<dyn HistoryLedger>,
    pub favorites: Arc<dyn Favorites>,
    pub navigation_buttons: Arc<dyn NavigationButtons>,
    /// Largest accepted multipart file part, in bytes.
    pub max_upload_bytes: usize,
}

/// Default multipart file limit: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports, DEFAULT_MAX_UPLOAD_BYTES)
    }
}

impl HttpState {
    /// Construct state from port implementations and the upload size cap.
    ///
    /// # Examples
    /// ```ignore
    /// use studio_backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(ports, 5 * 1024 * 1024);
    /// assert_eq!(state.max_upload_bytes, 5 * 1024 * 1024);
    /// ```
    pub fn new(ports: HttpStatePorts, max_upload_bytes: usize) -> Self {
        let HttpStatePorts {
            callers,
            assets,
            stickers,
            game_masters,
            history,
            favorites,
            navigation_buttons,
        } = ports;
        Self {
            callers,
            assets,
            stickers,
            game_masters,
            history,
            favorites,
            navigation_buttons,
            max_upload_bytes,
        }
    }
}
