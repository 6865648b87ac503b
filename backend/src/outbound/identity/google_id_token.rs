//! Google ID token verification against Google's published signing keys.
//!
//! Keys are fetched from the JWKS endpoint with reqwest and cached for a
//! TTL. A token signed with an unknown `kid` forces one refresh before it is
//! rejected, which covers Google's key rotation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Header, Validation, decode, decode_header};
use mockable::Clock;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::ports::{IdTokenError, IdTokenVerifier};
use crate::domain::{Email, VerifiedIdentity};

/// Google's JWKS endpoint.
pub const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Settings for [`GoogleIdTokenVerifier`].
#[derive(Debug, Clone)]
pub struct GoogleVerifierConfig {
    pub client_id: String,
    pub jwks_url: String,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl GoogleVerifierConfig {
    /// Defaults: Google's endpoint, one hour key cache, five second timeout.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            jwks_url: GOOGLE_JWKS_URL.to_owned(),
            cache_ttl: Duration::from_secs(60 * 60),
            request_timeout: Duration::from_secs(5),
        }
    }
}

struct CachedKeys {
    fetched_at: DateTime<Utc>,
    keys: JwkSet,
}

/// `IdTokenVerifier` for Google-issued ID tokens.
pub struct GoogleIdTokenVerifier {
    client: Client,
    config: GoogleVerifierConfig,
    clock: Arc<dyn Clock>,
    cache: RwLock<Option<CachedKeys>>,
}

impl GoogleIdTokenVerifier {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: GoogleVerifierConfig, clock: Arc<dyn Clock>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            config,
            clock,
            cache: RwLock::new(None),
        })
    }

    fn is_fresh(&self, fetched_at: DateTime<Utc>) -> bool {
        let age = self.clock.utc().signed_duration_since(fetched_at);
        age.to_std()
            .map(|elapsed| elapsed < self.config.cache_ttl)
            .unwrap_or(true)
    }

    async fn fetch_keys(&self) -> Result<JwkSet, IdTokenError> {
        let response = self
            .client
            .get(self.config.jwks_url.as_str())
            .send()
            .await
            .map_err(|err| IdTokenError::unavailable(format!("jwks request failed: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(IdTokenError::unavailable(format!(
                "jwks endpoint returned {status}"
            )));
        }
        response
            .json::<JwkSet>()
            .await
            .map_err(|err| IdTokenError::unavailable(format!("invalid jwks payload: {err}")))
    }

    /// Cached keys if fresh, otherwise a fresh fetch stored in the cache.
    async fn keys(&self, force_refresh: bool) -> Result<JwkSet, IdTokenError> {
        if !force_refresh {
            let guard = self.cache.read().await;
            if let Some(cached) = guard.as_ref().filter(|c| self.is_fresh(c.fetched_at)) {
                return Ok(cached.keys.clone());
            }
        }
        let keys = self.fetch_keys().await?;
        info!(count = keys.keys.len(), "refreshed identity provider signing keys");
        *self.cache.write().await = Some(CachedKeys {
            fetched_at: self.clock.utc(),
            keys: keys.clone(),
        });
        Ok(keys)
    }
}

#[derive(Debug, Deserialize)]
struct GoogleClaims {
    email: Option<String>,
    email_verified: Option<bool>,
    name: Option<String>,
    picture: Option<String>,
}

fn invalid(message: impl Into<String>) -> IdTokenError {
    IdTokenError::invalid(message)
}

fn token_header(token: &str) -> Result<Header, IdTokenError> {
    let header = decode_header(token).map_err(|err| invalid(format!("malformed token: {err}")))?;
    if header.alg != Algorithm::RS256 {
        return Err(invalid(format!("unexpected algorithm {:?}", header.alg)));
    }
    Ok(header)
}

fn validation(client_id: &str) -> Validation {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[client_id]);
    validation.set_issuer(&GOOGLE_ISSUERS);
    validation.set_required_spec_claims(&["exp", "aud", "iss"]);
    validation
}

fn identity_from_claims(claims: GoogleClaims) -> Result<VerifiedIdentity, IdTokenError> {
    if claims.email_verified == Some(false) {
        return Err(invalid("email is not verified"));
    }
    let raw = claims
        .email
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(|| invalid("token carries no email"))?;
    let email = Email::new(&raw).map_err(|err| invalid(format!("token email invalid: {err}")))?;
    Ok(VerifiedIdentity {
        email,
        name: claims.name,
        picture: claims.picture,
    })
}

fn verify_with_keys(
    token: &str,
    header: &Header,
    keys: &JwkSet,
    client_id: &str,
) -> Option<Result<VerifiedIdentity, IdTokenError>> {
    let jwk = match header.kid.as_deref() {
        Some(kid) => keys.find(kid)?,
        None => return Some(Err(invalid("token header has no kid"))),
    };
    let outcome = DecodingKey::from_jwk(jwk)
        .map_err(|err| invalid(format!("unusable signing key: {err}")))
        .and_then(|key| {
            decode::<GoogleClaims>(token, &key, &validation(client_id))
                .map_err(|err| invalid(err.to_string()))
        })
        .and_then(|data| identity_from_claims(data.claims));
    Some(outcome)
}

#[async_trait]
impl IdTokenVerifier for GoogleIdTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdTokenError> {
        let header = token_header(token)?;
        let client_id = self.config.client_id.as_str();

        let cached = self.keys(false).await?;
        if let Some(outcome) = verify_with_keys(token, &header, &cached, client_id) {
            return outcome;
        }

        debug!(kid = ?header.kid, "unknown signing key; refreshing");
        let refreshed = self.keys(true).await?;
        verify_with_keys(token, &header, &refreshed, client_id)
            .unwrap_or_else(|| Err(invalid("token signed with an unknown key")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, encode};
    use rstest::rstest;
    use serde_json::json;

    fn hs256_token() -> String {
        let header = Header {
            kid: Some("k1".to_owned()),
            ..Header::new(Algorithm::HS256)
        };
        encode(
            &header,
            &json!({ "email": "a@b.c", "exp": 4_000_000_000_u64 }),
            &EncodingKey::from_secret(b"secret"),
        )
        .expect("token encodes")
    }

    #[rstest]
    fn garbage_is_malformed() {
        let err = token_header("not-a-jwt").expect_err("malformed");
        assert!(matches!(err, IdTokenError::Invalid { .. }));
    }

    #[rstest]
    fn symmetric_tokens_are_rejected() {
        let err = token_header(&hs256_token()).expect_err("wrong algorithm");
        assert!(matches!(err, IdTokenError::Invalid { .. }));
    }

    #[rstest]
    fn unknown_kid_asks_for_refresh() {
        let header = Header {
            kid: Some("rotated".to_owned()),
            ..Header::new(Algorithm::RS256)
        };
        let empty = JwkSet { keys: Vec::new() };
        assert!(verify_with_keys("ignored", &header, &empty, "client").is_none());
    }

    #[rstest]
    #[case(Some("Player@Example.com"), None, true)]
    #[case(Some("player@example.com"), Some(true), true)]
    #[case(Some("player@example.com"), Some(false), false)]
    #[case(None, Some(true), false)]
    #[case(Some("  "), None, false)]
    fn claims_need_a_usable_email(
        #[case] email: Option<&str>,
        #[case] email_verified: Option<bool>,
        #[case] accepted: bool,
    ) {
        let claims = GoogleClaims {
            email: email.map(str::to_owned),
            email_verified,
            name: Some("Player".to_owned()),
            picture: None,
        };
        let outcome = identity_from_claims(claims);
        assert_eq!(outcome.is_ok(), accepted);
        if let Ok(identity) = outcome {
            assert_eq!(identity.email.as_str(), "player@example.com");
        }
    }
}
