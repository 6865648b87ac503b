//! The one error type services return.
//!
//! Nothing here knows about HTTP. `inbound::http::error` owns the mapping to
//! status codes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::TraceId;

/// Failure category carried by every [`Error`].
///
/// Serialised in `snake_case`; the HTTP adapter derives the status from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequest,
    /// Missing, unknown or unverifiable credentials.
    Unauthorized,
    /// The caller is known but lacks the role.
    Forbidden,
    NotFound,
    /// Duplicate roster entry or a lost reorder race.
    Conflict,
    /// Database or upload directory unreachable.
    ServiceUnavailable,
    InternalError,
}

/// Error payload shared by every adapter.
///
/// The human-readable message serialises under `error`, which is the field
/// the admin screens render inline.
///
/// # Examples
/// ```
/// use studio_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("face 7 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "face 7 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    #[serde(rename = "error")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

macro_rules! shorthand {
    ($($name:ident => $code:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Shorthand for [`ErrorCode::", stringify!($code), "`].")]
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ErrorCode::$code, message)
            }
        )+
    };
}

impl Error {
    /// Build an error stamped with the trace id in scope, if any.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    shorthand! {
        invalid_request => InvalidRequest,
        unauthorized => Unauthorized,
        forbidden => Forbidden,
        not_found => NotFound,
        conflict => Conflict,
        service_unavailable => ServiceUnavailable,
        internal => InternalError,
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Replace the captured trace id.
    pub fn with_trace_id(self, id: impl Into<String>) -> Self {
        Self {
            trace_id: Some(id.into()),
            ..self
        }
    }

    /// Attach a JSON object for clients, e.g. the offending field.
    ///
    /// ```
    /// use studio_backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("width out of range")
    ///     .with_details(json!({ "field": "width", "code": "out_of_range" }));
    /// assert_eq!(err.details(), Some(&json!({ "field": "width", "code": "out_of_range" })));
    /// ```
    pub fn with_details(self, details: Value) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }
}

/// Build an invalid-request error naming the offending field.
///
/// # Examples
/// ```
/// use studio_backend::domain::{ErrorCode, field_error};
///
/// let err = field_error("name is required", "name", "missing_field");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.details().and_then(|d| d.get("field")).and_then(|f| f.as_str()), Some("name"));
/// ```
pub fn field_error(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(serde_json::json!({
        "field": field,
        "code": code,
    }))
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
