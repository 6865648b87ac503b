//! File storage adapters for uploaded images.

mod local_disk;

pub use local_disk::{LocalDiskAssetStorage, UPLOADS_URL_PREFIX};
