//! Port for identity-provider token verification.

use async_trait::async_trait;

use crate::domain::VerifiedIdentity;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token verifier adapters.
    pub enum IdTokenError {
        /// The token failed signature or claim checks.
        Invalid { message: String } => "id token rejected: {message}",
        /// The provider's signing keys could not be fetched.
        Unavailable { message: String } => "identity provider unavailable: {message}",
        /// No client id is configured, so no token can be accepted.
        NotConfigured => "identity verification is not configured",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdTokenVerifier: Send + Sync {
    /// Verify `token` and extract the subject's profile.
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdTokenError>;
}

/// Verifier used when no client id is configured; rejects every token.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredIdTokenVerifier;

#[async_trait]
impl IdTokenVerifier for UnconfiguredIdTokenVerifier {
    async fn verify(&self, _token: &str) -> Result<VerifiedIdentity, IdTokenError> {
        Err(IdTokenError::not_configured())
    }
}
