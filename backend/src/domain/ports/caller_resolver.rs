//! Driving port turning a bearer token into an authorised caller.

use async_trait::async_trait;

use crate::domain::{Caller, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallerResolver: Send + Sync {
    /// Verify `token` and classify its subject.
    ///
    /// Verification failures surface as unauthorised errors.
    async fn resolve(&self, token: &str) -> Result<Caller, Error>;
}
