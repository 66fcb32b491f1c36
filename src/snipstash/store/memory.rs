use super::DataStore;
use crate::collection::Collection;
use crate::error::{Result, StashError};

/// In-memory storage for testing. Serializes through JSON like the file
/// store so round-trip behavior matches production.
#[derive(Default)]
pub struct InMemoryStore {
    data: Option<String>,
    /// When set, every `save` fails; the session must warn and carry on.
    pub fail_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load the store with raw bytes, e.g. garbage to exercise the
    /// seed-fallback path.
    pub fn with_raw(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            fail_writes: false,
        }
    }
}

impl DataStore for InMemoryStore {
    fn load(&self) -> Result<Option<Collection>> {
        match &self.data {
            None => Ok(None),
            Some(raw) => {
                let collection = serde_json::from_str(raw).map_err(StashError::Serialization)?;
                Ok(Some(collection))
            }
        }
    }

    fn save(&mut self, collection: &Collection) -> Result<()> {
        if self.fail_writes {
            return Err(StashError::Store("simulated write failure".to_string()));
        }
        self.data = Some(serde_json::to_string(collection).map_err(StashError::Serialization)?);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Language, Snippet};

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

        pub fn with_snippets(mut self, count: usize) -> Self {
            let mut collection = Collection::new();
            for i in 0..count {
                let snippet = Snippet::new(
                    format!("snippet-{}", i + 1),
                    format!("// body {}", i + 1),
                    Language::Rust,
                    "fixture".to_string(),
                );
                collection.snippets.push(snippet);
            }
            collection.active = collection.snippets.first().map(|s| s.id);
            self.store.save(&collection).unwrap();
            self
        }
    }
}
