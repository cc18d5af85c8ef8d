use eyre::Result;
use slotwise_core::{BatchId, GenerationBatch, Slot, SlotError};
use tracing::debug;
use uuid::Uuid;

use crate::store::SlotStore;

/// Read-modify-write operations on the persisted slot collection.
///
/// Every call loads the full collection, applies one change and saves it
/// back. The repository keeps no state of its own between calls.
#[derive(Debug)]
pub struct SlotRepository<S> {
    store: S,
}

impl<S: SlotStore> SlotRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn slots(&self) -> Result<GenerationBatch> {
        self.store.load()
    }

    /// Merge a freshly generated batch into the stored collection.
    ///
    /// Keys already present are overwritten by the incoming buckets.
    pub fn add_generated(&mut self, batch: GenerationBatch) -> Result<GenerationBatch> {
        let mut slots = self.store.load()?;
        debug!(
            "Merging {} new batches into {} stored",
            batch.len(),
            slots.len()
        );
        slots.merge(batch);
        self.store.save(&slots)?;
        Ok(slots)
    }

    /// Store a single slot in a bucket of its own.
    pub fn add_slot(&mut self, slot: Slot) -> Result<BatchId> {
        let mut slots = self.store.load()?;
        let batch_id = BatchId::new();
        debug!("Adding slot {} under batch {}", slot.id, batch_id);
        slots.push(batch_id, slot);
        self.store.save(&slots)?;
        Ok(batch_id)
    }

    /// Replace the stored slot carrying the same id.
    ///
    /// # Errors
    ///
    /// [`SlotError::NotFound`] when no stored slot has that id.
    pub fn edit_slot(&mut self, slot: Slot) -> Result<Slot> {
        let mut slots = self.store.load()?;
        let id = slot.id;
        let previous = slots
            .replace_slot(slot)
            .ok_or_else(|| SlotError::NotFound(id.to_string()))?;
        self.store.save(&slots)?;
        debug!("Edited slot {}", id);
        Ok(previous)
    }

    /// Remove a slot by id, dropping its bucket when it becomes empty.
    ///
    /// Returns `None` and leaves the store untouched when the id is unknown.
    pub fn delete_slot(&mut self, id: Uuid) -> Result<Option<Slot>> {
        let mut slots = self.store.load()?;
        let removed = slots.remove_slot(id);
        match &removed {
            Some(_) => {
                self.store.save(&slots)?;
                debug!("Deleted slot {}", id);
            }
            None => debug!("Slot {} not stored, nothing to delete", id),
        }
        Ok(removed)
    }
}
