use super::DataStore;
use crate::collection::Collection;
use crate::error::{Result, StashError};
use std::fs;
use std::path::{Path, PathBuf};

const COLLECTION_FILENAME: &str = "collection.json";

/// File-based storage: one pretty-printed JSON document per vault.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn collection_path(&self) -> PathBuf {
        self.root.join(COLLECTION_FILENAME)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(StashError::Io)?;
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load(&self) -> Result<Option<Collection>> {
        let path = self.collection_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(StashError::Io)?;
        let collection = serde_json::from_str(&content).map_err(StashError::Serialization)?;
        Ok(Some(collection))
    }

    fn save(&mut self, collection: &Collection) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let content = serde_json::to_string_pretty(collection).map_err(StashError::Serialization)?;
        fs::write(self.collection_path(), content).map_err(StashError::Io)?;
        Ok(())
    }
}
