//! # JSON File Backend
//!
//! The whole collection lives in one pretty-printed JSON array. Saves go
//! through a sibling temp file and a rename so a concurrent reader sees
//! either the old document or the new one, never a torn write.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::backend::ItemStore;
use super::errors::{StoreError, StoreResult};
use crate::catalog::Item;

/// File name of the backing document inside the data directory
pub const ITEMS_FILE: &str = "items.json";

/// Item store backed by a single JSON document on disk
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for an explicit document path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a store for `<data_dir>/items.json`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(ITEMS_FILE))
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| ITEMS_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ItemStore for JsonFileStore {
    fn load(&self) -> StoreResult<Vec<Item>> {
        let raw = fs::read(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::Missing(self.path.display().to_string())
            } else {
                StoreError::Io(e.to_string())
            }
        })?;

        serde_json::from_slice(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    fn save(&self, items: &[Item]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
            }
        }

        let body =
            serde_json::to_vec_pretty(items).map_err(|e| StoreError::Internal(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, body).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&temp, &self.path).map_err(|e| StoreError::Io(e.to_string()))
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn item(id: i64, name: &str, category: &str, price: f64) -> Item {
        Item {
            id,
            name: name.to_string(),
            category: category.to_string(),
            price,
        }
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(temp.path());

        let items = vec![
            item(1, "Laptop Pro", "Electronics", 2499.0),
            item(2, "Standing Desk", "Furniture", 1199.0),
        ];
        store.save(&items).unwrap();

        assert_eq!(store.load().unwrap(), items);
    }

    #[test]
    fn test_save_creates_data_dir() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(&temp.path().join("nested/data"));

        store.save(&[]).unwrap();
        assert!(store.path().exists());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(temp.path());

        store.save(&[item(1, "Chair", "Furniture", 10.0)]).unwrap();
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_document_is_pretty_printed() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(temp.path());

        store.save(&[item(1, "Chair", "Furniture", 10.0)]).unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("[\n  {\n    \"id\": 1,"));
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(temp.path());

        assert!(matches!(store.load(), Err(StoreError::Missing(_))));
    }

    #[test]
    fn test_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(temp.path());
        fs::write(store.path(), b"{ not json").unwrap();

        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_reads_integer_prices() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(temp.path());
        fs::write(
            store.path(),
            br#"[{"id": 4, "name": "Ergonomic Chair", "category": "Furniture", "price": 799}]"#,
        )
        .unwrap();

        let items = store.load().unwrap();
        assert_eq!(items[0].price, 799.0);
    }
}
