use super::mem_backend::MemBackend;
use super::records::RecordStore;

pub type InMemoryStore = RecordStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        RecordStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{StoredPhoto, Wine, WineBase};

    pub fn sample_wine(name: &str) -> WineBase {
        WineBase::new(name, "red", "Piedmont", 8).with_vintage(2019)
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_wines(self, count: usize) -> Self {
            for i in 0..count {
                self.store
                    .create(sample_wine(&format!("Test Wine {}", i + 1)))
                    .unwrap();
            }
            self
        }

        pub fn with_photographed_wine(self, name: &str) -> (Self, Wine, StoredPhoto) {
            let photo = self.store.blobs().store(b"label", "label.png").unwrap();
            let wine = self
                .store
                .create(sample_wine(name).with_photo(photo.url.clone()))
                .unwrap();
            (self, wine, photo)
        }

        pub fn with_orphan_photo(self) -> (Self, StoredPhoto) {
            let photo = self.store.blobs().store(b"orphan", "orphan.jpg").unwrap();
            (self, photo)
        }
    }
}
