//! Bearer-token authorisation for HTTP handlers.
//!
//! The pipeline is authenticate (pull the `Authorization: Bearer` header),
//! resolve (verify the token and classify the caller through
//! [`CallerResolver`](crate::domain::ports::CallerResolver)), then require
//! (handlers or services call [`Caller::require`]). No session is kept; every
//! request re-verifies its credential.

use std::ops::Deref;

use actix_web::http::header::{self, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Caller, Error};
use crate::inbound::http::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Extract the raw bearer credential from request headers.
///
/// # Examples
/// ```
/// use actix_web::http::header::{AUTHORIZATION, HeaderMap, HeaderValue};
/// use studio_backend::inbound::http::auth::bearer_token;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
/// assert_eq!(bearer_token(&headers).expect("token"), "abc.def");
/// ```
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?
        .to_str()
        .map_err(|_| Error::unauthorized("authorization header is not valid text"))?;
    let (scheme, token) = raw
        .trim()
        .split_once(char::is_whitespace)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(Error::unauthorized("authorization scheme must be Bearer"));
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::unauthorized("missing bearer token"));
    }
    Ok(token)
}

/// An authenticated caller extracted from the bearer credential.
///
/// Extraction fails with `401` when the header is missing or the token does
/// not verify. Role checks stay with the domain services.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(Caller);

impl AuthenticatedCaller {
    pub fn into_inner(self) -> Caller {
        self.0
    }
}

impl Deref for AuthenticatedCaller {
    type Target = Caller;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedCaller {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = bearer_token(req.headers()).map(str::to_owned);
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let token = token?;
            let caller = state.callers.resolve(&token).await?;
            Ok(Self(caller))
        })
    }
}
