//! Driving port for navigation button images.

use async_trait::async_trait;

use crate::domain::{Caller, Error, NavigationButton, NavigationButtonType, UploadedFile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NavigationButtons: Send + Sync {
    async fn list(&self) -> Result<Vec<NavigationButton>, Error>;

    /// Replace the button image, discarding any previous custom file.
    async fn upload(
        &self,
        caller: &Caller,
        button_type: NavigationButtonType,
        file: Option<UploadedFile>,
    ) -> Result<NavigationButton, Error>;

    /// Restore the built-in glyph.
    async fn reset(
        &self,
        caller: &Caller,
        button_type: NavigationButtonType,
    ) -> Result<NavigationButton, Error>;
}
