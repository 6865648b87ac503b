//! Helpers shared by the services that accept image uploads.

use serde_json::json;
use tracing::warn;

use crate::domain::ports::{AssetStorage, AssetStorageError};
use crate::domain::{
    AssetName, AssetValidationError, Error, UploadValidationError, UploadedFile, field_error,
};

pub(crate) fn map_asset_validation_error(error: AssetValidationError) -> Error {
    let details = match &error {
        AssetValidationError::NotAnInteger { field, value } => json!({
            "field": field.wire_name(),
            "code": error.reason(),
            "value": value,
        }),
        AssetValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        } => json!({
            "field": field.wire_name(),
            "code": error.reason(),
            "value": value,
            "min": min,
            "max": max,
        }),
        AssetValidationError::EmptyName | AssetValidationError::NameTooLong { .. } => json!({
            "field": error.field(),
            "code": error.reason(),
        }),
    };
    Error::invalid_request(error.to_string()).with_details(details)
}

pub(crate) fn map_upload_error(error: UploadValidationError, field: &str) -> Error {
    let code = match error {
        UploadValidationError::EmptyFile => "empty_file",
        UploadValidationError::MissingExtension => "missing_extension",
        UploadValidationError::UnsupportedExtension { .. } => "unsupported_extension",
    };
    field_error(error.to_string(), field, code)
}

pub(crate) fn map_storage_error(error: AssetStorageError) -> Error {
    Error::internal(format!("failed to store upload: {error}"))
}

pub(crate) fn required_name(name: Option<String>) -> Result<AssetName, Error> {
    let raw = name.ok_or_else(|| field_error("name is required", "name", "missing_field"))?;
    AssetName::new(raw).map_err(map_asset_validation_error)
}

pub(crate) fn required_file(
    file: Option<UploadedFile>,
    field: &str,
) -> Result<UploadedFile, Error> {
    file.ok_or_else(|| field_error(format!("{field} file is required"), field, "missing_file"))
}

/// Remove a stored file, logging instead of failing.
///
/// Storage hygiene never outranks a logical state change that has already
/// been committed.
pub(crate) async fn discard_stored_file<S>(storage: &S, public_path: &str)
where
    S: AssetStorage + ?Sized,
{
    if let Err(error) = storage.remove(public_path).await {
        warn!(%error, path = public_path, "failed to remove stored file");
    }
}
