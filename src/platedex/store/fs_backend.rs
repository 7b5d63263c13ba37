use super::backend::StorageBackend;
use super::Membership;
use crate::error::Result;
use crate::model::{Collection, Item};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const ITEMS_FILE: &str = "items.json";
const COLLECTIONS_FILE: &str = "collections.json";
const MEMBERSHIPS_FILE: &str = "memberships.json";

/// JSON tables in a single data directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn load_table<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path)?;
        let table = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded table");
        Ok(table)
    }

    fn save_table<T: Serialize + ?Sized>(&self, name: &str, table: &T) -> Result<()> {
        self.ensure_dir()?;

        let path = self.root.join(name);
        let content = serde_json::to_string_pretty(table)?;

        // Atomic write
        let tmp_file = self.root.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        fs::write(&tmp_file, content)?;
        fs::rename(&tmp_file, &path)?;

        tracing::debug!(path = %path.display(), "saved table");
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_items(&self) -> Result<HashMap<Uuid, Item>> {
        self.load_table(ITEMS_FILE)
    }

    fn save_items(&self, items: &HashMap<Uuid, Item>) -> Result<()> {
        self.save_table(ITEMS_FILE, items)
    }

    fn load_collections(&self) -> Result<Vec<Collection>> {
        self.load_table(COLLECTIONS_FILE)
    }

    fn save_collections(&self, collections: &[Collection]) -> Result<()> {
        self.save_table(COLLECTIONS_FILE, collections)
    }

    fn load_memberships(&self) -> Result<BTreeSet<Membership>> {
        self.load_table(MEMBERSHIPS_FILE)
    }

    fn save_memberships(&self, memberships: &BTreeSet<Membership>) -> Result<()> {
        self.save_table(MEMBERSHIPS_FILE, memberships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemKind;

    #[test]
    fn missing_files_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("nested"));

        assert!(backend.load_items().unwrap().is_empty());
        assert!(backend.load_collections().unwrap().is_empty());
        assert!(backend.load_memberships().unwrap().is_empty());
    }

    #[test]
    fn tables_round_trip_and_create_dir() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("data"));

        let item = Item::new(ItemKind::Owned, "ABC-123");
        let mut items = HashMap::new();
        items.insert(item.id(), item.clone());
        backend.save_items(&items).unwrap();

        assert!(backend.root().join(ITEMS_FILE).exists());
        let loaded = backend.load_items().unwrap();
        assert_eq!(loaded.get(&item.id()), Some(&item));
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().to_path_buf());
        backend
            .save_collections(&[Collection::new("Nordics")])
            .unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec![COLLECTIONS_FILE.to_string()]);
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ITEMS_FILE), "not json").unwrap();
        let backend = FsBackend::new(dir.path().to_path_buf());

        assert!(matches!(
            backend.load_items(),
            Err(crate::error::PlatedexError::Serialization(_))
        ));
    }
}
