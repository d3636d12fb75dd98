/// Directory-backed store, one file per key.
#[cfg(feature = "file-store")]
pub mod file;
/// In-process store for tests and embedding.
pub mod memory;

use crate::dao::storage::StorageResult;

/// String-keyed, string-valued persistence medium shared by every gameshow process.
///
/// Writes overwrite unconditionally: the last writer wins.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` when nothing was written yet.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Overwrite the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}
