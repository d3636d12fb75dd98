//! Typed access to the persisted snapshot and the sync markers.

use std::sync::Arc;

use crate::{
    dao::{
        kv_store::KeyValueStore,
        storage::{LAST_CHECK_KEY, LAST_UPDATE_KEY, STATE_KEY, StorageError, StorageResult},
    },
    state::game::GameshowSnapshot,
};

/// Data Access Object for the persisted snapshot and the sync markers.
#[derive(Clone)]
pub struct SnapshotRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SnapshotRepository {
    /// Wrap a key-value store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted snapshot, or an empty one when nothing was saved yet.
    pub fn load(&self) -> StorageResult<GameshowSnapshot> {
        match self.store.get(STATE_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|source| StorageError::corrupt(STATE_KEY, source)),
            None => Ok(GameshowSnapshot::default()),
        }
    }

    /// Overwrite the persisted snapshot and stamp the last-update marker with `now_ms`.
    pub fn save(&self, snapshot: &GameshowSnapshot, now_ms: i64) -> StorageResult<()> {
        let raw = serde_json::to_string(snapshot)
            .map_err(|source| StorageError::encode(STATE_KEY, source))?;
        self.store.set(STATE_KEY, &raw)?;
        self.store.set(LAST_UPDATE_KEY, &now_ms.to_string())
    }

    /// Timestamp of the last persisted mutation by any writer.
    pub fn last_update(&self) -> StorageResult<Option<i64>> {
        read_marker(self.store.as_ref(), LAST_UPDATE_KEY)
    }

    /// Timestamp of this process' last reconcile.
    pub fn last_check(&self) -> StorageResult<Option<i64>> {
        read_marker(self.store.as_ref(), LAST_CHECK_KEY)
    }

    /// Record that this process reconciled at `now_ms`.
    pub fn mark_checked(&self, now_ms: i64) -> StorageResult<()> {
        self.store.set(LAST_CHECK_KEY, &now_ms.to_string())
    }
}

fn read_marker(store: &dyn KeyValueStore, key: &str) -> StorageResult<Option<i64>> {
    store
        .get(key)?
        .map(|raw| {
            raw.trim()
                .parse::<i64>()
                .map_err(|source| StorageError::corrupt(key, source))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::kv_store::memory::MemoryStore;

    fn repository() -> (Arc<MemoryStore>, SnapshotRepository) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), SnapshotRepository::new(store))
    }

    #[test]
    fn empty_store_loads_default_snapshot() {
        let (_, repo) = repository();
        assert_eq!(repo.load().unwrap(), GameshowSnapshot::default());
        assert_eq!(repo.last_update().unwrap(), None);
    }

    #[test]
    fn save_stamps_last_update() {
        let (_, repo) = repository();
        repo.save(&GameshowSnapshot::default(), 42).unwrap();
        assert_eq!(repo.last_update().unwrap(), Some(42));
        assert_eq!(repo.last_check().unwrap(), None);
    }

    #[test]
    fn garbage_snapshot_is_reported_as_corrupt() {
        let (store, repo) = repository();
        store.set(STATE_KEY, "{not json").unwrap();
        assert!(matches!(repo.load(), Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn garbage_marker_is_reported_as_corrupt() {
        let (store, repo) = repository();
        store.set(LAST_CHECK_KEY, "yesterday").unwrap();
        assert!(matches!(repo.last_check(), Err(StorageError::Corrupt { .. })));
    }
}
