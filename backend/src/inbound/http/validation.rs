//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{
    AssetKind, ClientUserId, Error, MoveDirection, NavigationButtonType,
    UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUserId,
    InvalidDirection,
    InvalidButtonType,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUserId => "invalid_user_id",
            ErrorCode::InvalidDirection => "invalid_direction",
            ErrorCode::InvalidButtonType => "invalid_button_type",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const USER_ID_FIELD: FieldName = FieldName::new("userId");

fn rejected(field: FieldName, message: String, code: ErrorCode, value: Option<&str>) -> Error {
    let details = match value {
        Some(value) => json!({ "field": field.as_str(), "value": value, "code": code.as_str() }),
        None => json!({ "field": field.as_str(), "code": code.as_str() }),
    };
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    rejected(
        field,
        format!("{name} is required"),
        ErrorCode::MissingField,
        None,
    )
}

/// Parse the anonymous client identifier sent as `userId`.
pub(crate) fn parse_user_id(raw: Option<String>) -> Result<ClientUserId, Error> {
    let raw = raw.ok_or_else(|| missing_field_error(USER_ID_FIELD))?;
    ClientUserId::new(&raw).map_err(|err| match err {
        UserValidationError::EmptyId => missing_field_error(USER_ID_FIELD),
        other => rejected(
            USER_ID_FIELD,
            other.to_string(),
            ErrorCode::InvalidUserId,
            None,
        ),
    })
}

/// Resolve the `{kind}` path segment; unknown kinds are not routes.
pub(crate) fn parse_kind(raw: &str) -> Result<AssetKind, Error> {
    AssetKind::from_str(raw).map_err(|_| Error::not_found(format!("unknown asset kind: {raw}")))
}

pub(crate) fn parse_direction(raw: Option<String>) -> Result<MoveDirection, Error> {
    const FIELD: FieldName = FieldName::new("direction");
    let raw = raw.ok_or_else(|| missing_field_error(FIELD))?;
    MoveDirection::from_str(raw.trim()).map_err(|_| {
        rejected(
            FIELD,
            "direction must be up or down".to_owned(),
            ErrorCode::InvalidDirection,
            Some(&raw),
        )
    })
}

pub(crate) fn parse_button_type(raw: &str) -> Result<NavigationButtonType, Error> {
    NavigationButtonType::from_str(raw).map_err(|_| {
        rejected(
            FieldName::new("type"),
            "button type must be prev or next".to_owned(),
            ErrorCode::InvalidButtonType,
            Some(raw),
        )
    })
}
