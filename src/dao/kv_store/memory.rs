use dashmap::DashMap;

use crate::dao::{kv_store::KeyValueStore, storage::StorageResult};

/// In-process store backed by a concurrent map.
///
/// Wrap it in an `Arc` to let several gameshow instances share the same data.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("gameshowState").unwrap(), None);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let store = MemoryStore::new();
        store.set("myLastCheck", "1").unwrap();
        store.set("myLastCheck", "2").unwrap();
        assert_eq!(store.get("myLastCheck").unwrap().as_deref(), Some("2"));
    }
}
