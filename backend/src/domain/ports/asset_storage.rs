//! Port for persisting uploaded image files.
//!
//! Stored files are addressed by their public path, `/uploads/<dir>/<name>`,
//! which is also what catalogue rows record.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by asset storage adapters.
    pub enum AssetStorageError {
        /// Writing or removing a file failed.
        Io { message: String } => "asset storage i/o failed: {message}",
        /// The path does not address a file inside the uploads tree.
        OutsideRoot { path: String } => "path is outside the uploads tree: {path}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Write `bytes` as `directory/file_name`, creating the directory on
    /// demand, and return the public path.
    async fn store(
        &self,
        directory: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String, AssetStorageError>;

    /// Remove the file behind a public path. A missing file is not an error.
    async fn remove(&self, public_path: &str) -> Result<(), AssetStorageError>;
}
