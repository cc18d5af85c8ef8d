use mockall::mock;
use slotwise_core::GenerationBatch;

use crate::blob::BlobStore;
use crate::store::SlotStore;

// Mock stores for testing code that sits on top of persistence
mock! {
    pub Slots {}

    impl SlotStore for Slots {
        fn load(&self) -> eyre::Result<GenerationBatch>;

        fn save(&mut self, slots: &GenerationBatch) -> eyre::Result<()>;
    }
}

mock! {
    pub Blobs {}

    impl BlobStore for Blobs {
        fn get(&self, key: &str) -> eyre::Result<Option<String>>;

        fn set(&mut self, key: &str, value: &str) -> eyre::Result<()>;

        fn remove(&mut self, key: &str) -> eyre::Result<()>;
    }
}
