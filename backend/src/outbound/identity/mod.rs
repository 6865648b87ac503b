//! Identity-provider adapters.

mod google_id_token;

pub use google_id_token::{GOOGLE_JWKS_URL, GoogleIdTokenVerifier, GoogleVerifierConfig};
