//! Uploads tree on local disk, accessed through a capability handle.
//!
//! All file operations go through a `cap_std::fs::Dir` opened on the uploads
//! root, so a crafted path can never reach outside it.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::ports::{AssetStorage, AssetStorageError};

/// URL prefix under which the uploads root is served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// `AssetStorage` writing beneath a single root directory.
#[derive(Clone)]
pub struct LocalDiskAssetStorage {
    root: Arc<Dir>,
    root_path: PathBuf,
}

impl LocalDiskAssetStorage {
    /// Open (creating if needed) the uploads root.
    ///
    /// # Errors
    ///
    /// Returns [`AssetStorageError::Io`] when the directory cannot be created
    /// or opened.
    pub fn open(root_path: impl Into<PathBuf>) -> Result<Self, AssetStorageError> {
        let root_path = root_path.into();
        Dir::create_ambient_dir_all(&root_path, ambient_authority())
            .map_err(|err| io_error(&root_path, &err))?;
        let root = Dir::open_ambient_dir(&root_path, ambient_authority())
            .map_err(|err| io_error(&root_path, &err))?;
        Ok(Self {
            root: Arc::new(root),
            root_path,
        })
    }

    /// Filesystem location of the uploads root, for static serving.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

fn io_error(path: &Path, err: &io::Error) -> AssetStorageError {
    AssetStorageError::io(format!("{}: {err}", path.display()))
}

/// Accept only plain relative paths made of normal components.
fn relative_inside_root(raw: &str) -> Option<PathBuf> {
    let path = Path::new(raw);
    let mut components = path.components().peekable();
    components.peek()?;
    components
        .all(|component| matches!(component, Component::Normal(_)))
        .then(|| path.to_path_buf())
}

/// Map a public path such as `/uploads/face/1.png` to `face/1.png`.
fn public_to_relative(public_path: &str) -> Option<PathBuf> {
    let rest = public_path.strip_prefix(UPLOADS_URL_PREFIX)?;
    let rest = rest.strip_prefix('/')?;
    relative_inside_root(rest)
}

async fn run_blocking<T, F>(task: F) -> Result<T, AssetStorageError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AssetStorageError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| AssetStorageError::io(format!("storage task failed: {err}")))?
}

#[async_trait]
impl AssetStorage for LocalDiskAssetStorage {
    async fn store(
        &self,
        directory: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String, AssetStorageError> {
        let relative_dir = relative_inside_root(directory)
            .ok_or_else(|| AssetStorageError::outside_root(directory))?;
        let joined = format!("{directory}/{file_name}");
        let relative_file = relative_inside_root(&joined)
            .filter(|path| path.parent() == Some(relative_dir.as_path()))
            .ok_or_else(|| AssetStorageError::outside_root(joined.as_str()))?;

        let root = Arc::clone(&self.root);
        let root_path = self.root_path.clone();
        let bytes = bytes.to_vec();
        run_blocking(move || {
            root.create_dir_all(&relative_dir)
                .map_err(|err| io_error(&root_path.join(&relative_dir), &err))?;
            root.write(&relative_file, &bytes)
                .map_err(|err| io_error(&root_path.join(&relative_file), &err))
        })
        .await?;

        Ok(format!("{UPLOADS_URL_PREFIX}/{joined}"))
    }

    async fn remove(&self, public_path: &str) -> Result<(), AssetStorageError> {
        let relative = public_to_relative(public_path)
            .ok_or_else(|| AssetStorageError::outside_root(public_path))?;
        let root = Arc::clone(&self.root);
        let root_path = self.root_path.clone();
        run_blocking(move || match root.remove_file(&relative) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %relative.display(), "stored file already absent");
                Ok(())
            }
            Err(err) => Err(io_error(&root_path.join(&relative), &err)),
        })
        .await
    }
}
