use eyre::Result;
use slotwise_core::GenerationBatch;
use tracing::{debug, info};

use crate::blob::BlobStore;
use crate::schema::{self, Decoded, PersistedShape, SLOTS_KEY};

/// Whole-collection persistence for slot batches.
///
/// Callers read the full collection, change it in memory and write it back.
/// There is no locking, so only one writer should hold a store at a time.
pub trait SlotStore {
    fn load(&self) -> Result<GenerationBatch>;

    fn save(&mut self, slots: &GenerationBatch) -> Result<()>;
}

/// Outcome of [`BlobSlotStore::migrate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub shape: PersistedShape,
    pub batches: usize,
    pub slots: usize,
    pub skipped: usize,
    pub rewritten: bool,
}

/// [`SlotStore`] keeping the whole collection as one JSON blob under
/// [`SLOTS_KEY`].
#[derive(Debug, Clone)]
pub struct BlobSlotStore<B> {
    blobs: B,
}

impl<B: BlobStore> BlobSlotStore<B> {
    pub fn new(blobs: B) -> Self {
        Self { blobs }
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    pub fn into_inner(self) -> B {
        self.blobs
    }

    /// Load with the details of what was found on disk.
    pub fn load_decoded(&self) -> Result<Decoded> {
        let raw = self.blobs.get(SLOTS_KEY)?;
        schema::decode(raw.as_deref())
    }

    /// Rewrite the stored collection in the canonical shape.
    ///
    /// Legacy lists are regrouped and malformed records dropped for good.
    /// A blob that is already canonical and clean is left untouched.
    pub fn migrate(&mut self) -> Result<MigrationReport> {
        let decoded = self.load_decoded()?;
        let rewritten = decoded.needs_rewrite();

        if rewritten {
            self.save(&decoded.slots)?;
            info!(
                "Migrated stored slots from {:?}: {} batches, {} dropped records",
                decoded.shape,
                decoded.slots.len(),
                decoded.skipped.len()
            );
        } else {
            debug!("Stored slots already canonical, nothing to migrate");
        }

        Ok(MigrationReport {
            shape: decoded.shape,
            batches: decoded.slots.len(),
            slots: decoded.slots.slot_count(),
            skipped: decoded.skipped.len(),
            rewritten,
        })
    }
}

impl<B: BlobStore> SlotStore for BlobSlotStore<B> {
    fn load(&self) -> Result<GenerationBatch> {
        Ok(self.load_decoded()?.slots)
    }

    fn save(&mut self, slots: &GenerationBatch) -> Result<()> {
        let encoded = schema::encode(slots)?;
        self.blobs.set(SLOTS_KEY, &encoded)?;
        debug!(
            "Saved {} batches with {} slots",
            slots.len(),
            slots.slot_count()
        );
        Ok(())
    }
}
