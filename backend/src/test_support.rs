//! Test doubles shared by unit tests, the binary's tests and `tests/`.
//!
//! Compiled only with the `test-support` feature. Everything here is
//! in-memory apart from [`uploads`], which backs the real disk adapter with a
//! temporary directory.

pub mod clock;
pub mod memory;
pub mod studio;

pub mod uploads {
    //! Disk storage rooted in a throwaway directory.

    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};
    use tempfile::TempDir;

    use crate::outbound::storage::LocalDiskAssetStorage;

    /// Keeps the directory alive for as long as the storage is in use.
    pub struct TempUploads {
        _dir: TempDir,
        storage: LocalDiskAssetStorage,
    }

    impl TempUploads {
        /// # Errors
        ///
        /// Fails when the temporary directory cannot be created.
        pub fn new() -> io::Result<Self> {
            let dir = tempfile::tempdir()?;
            let storage = LocalDiskAssetStorage::open(dir.path().join("uploads"))
                .map_err(|err| io::Error::other(err.to_string()))?;
            Ok(Self { _dir: dir, storage })
        }

        pub fn storage(&self) -> &LocalDiskAssetStorage {
            &self.storage
        }

        /// Whether the public path `/uploads/...` names a file on disk.
        pub fn contains(&self, public_path: &str) -> bool {
            let Some(relative) = public_path.strip_prefix("/uploads/") else {
                return false;
            };
            Dir::open_ambient_dir(self.storage.root_path(), ambient_authority())
                .is_ok_and(|root| root.is_file(Path::new(relative)))
        }
    }
}
