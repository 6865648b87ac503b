//! Uploaded image files and their stored names.
//!
//! Stored files are named `<upload time in ms>.<original extension>`. Two
//! uploads to the same directory within one millisecond share a name and the
//! later write wins; each still gets its own database row.

use chrono::{DateTime, Utc};

/// Extensions accepted for uploaded images, lower-case.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// A file received from a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadValidationError {
    #[error("uploaded file is empty")]
    EmptyFile,
    #[error("uploaded file has no extension")]
    MissingExtension,
    #[error("unsupported image type: {extension}")]
    UnsupportedExtension { extension: String },
}

impl UploadedFile {
    pub fn new(file_name: Option<String>, bytes: Vec<u8>) -> Self {
        Self { file_name, bytes }
    }

    /// Lower-cased extension of the client-supplied file name.
    ///
    /// # Examples
    /// ```
    /// use studio_backend::domain::UploadedFile;
    ///
    /// let file = UploadedFile::new(Some("Smile.PNG".to_owned()), vec![1]);
    /// assert_eq!(file.extension().as_deref(), Ok("png"));
    /// ```
    pub fn extension(&self) -> Result<String, UploadValidationError> {
        let name = self
            .file_name
            .as_deref()
            .ok_or(UploadValidationError::MissingExtension)?;
        let (stem, ext) = name
            .rsplit_once('.')
            .ok_or(UploadValidationError::MissingExtension)?;
        if stem.is_empty() && ext.is_empty() {
            return Err(UploadValidationError::MissingExtension);
        }
        let ext = ext.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Ok(ext)
        } else {
            Err(UploadValidationError::UnsupportedExtension { extension: ext })
        }
    }

    /// Validate the file and derive the name it is stored under.
    pub fn stored_name(&self, at: DateTime<Utc>) -> Result<String, UploadValidationError> {
        if self.bytes.is_empty() {
            return Err(UploadValidationError::EmptyFile);
        }
        let ext = self.extension()?;
        Ok(format!("{}.{ext}", at.timestamp_millis()))
    }
}
