//! Persistence for generated slots.
//!
//! The whole collection lives as one JSON blob under a single key of a
//! [`BlobStore`]. [`SlotRepository`] layers the read-modify-write operations
//! the CLI needs on top of any [`SlotStore`].

pub mod blob;
pub mod repositories;
pub mod schema;
pub mod store;

pub mod mock;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use repositories::SlotRepository;
pub use schema::{Decoded, PersistedShape, SLOTS_KEY};
pub use store::{BlobSlotStore, MigrationReport, SlotStore};

use std::path::PathBuf;

use eyre::Result;

/// Open the file-backed slot repository rooted at `dir`.
pub fn open_repository(dir: impl Into<PathBuf>) -> Result<SlotRepository<BlobSlotStore<FileBlobStore>>> {
    let blobs = FileBlobStore::open(dir)?;
    Ok(SlotRepository::new(BlobSlotStore::new(blobs)))
}
