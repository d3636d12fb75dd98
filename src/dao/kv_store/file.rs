use std::{
    fs,
    io::{self, ErrorKind},
    path::PathBuf,
};

use crate::dao::{
    kv_store::KeyValueStore,
    storage::{StorageError, StorageResult},
};

/// Directory-backed store keeping one file per key.
///
/// Values are written to a sibling temp file then renamed into place, so readers in other
/// processes never observe a half-written snapshot.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) the store directory.
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| {
            StorageError::unavailable(
                format!("cannot create store directory `{}`", root.display()),
                source,
            )
        })?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::unavailable(
                format!("invalid storage key `{key}`"),
                io::Error::from(ErrorKind::InvalidInput),
            ));
        }
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::unavailable(
                format!("failed to read `{}`", path.display()),
                err,
            )),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)
            .and_then(|()| fs::rename(&tmp, &path))
            .map_err(|err| {
                StorageError::unavailable(format!("failed to write `{}`", path.display()), err)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("gameshow-store-{}", Uuid::new_v4()))
    }

    #[test]
    fn values_survive_reopen() {
        let dir = scratch_dir();
        let store = FileStore::open(&dir).unwrap();
        store.set("gameshowLastUpdate", "1700000000000").unwrap();

        let reopened = FileStore::open(&dir).unwrap();
        assert_eq!(
            reopened.get("gameshowLastUpdate").unwrap().as_deref(),
            Some("1700000000000")
        );
        assert_eq!(reopened.get("myLastCheck").unwrap(), None);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn rejects_keys_that_escape_the_directory() {
        let dir = scratch_dir();
        let store = FileStore::open(&dir).unwrap();
        assert!(store.set("../outside", "x").is_err());
        assert!(store.get("").is_err());
        fs::remove_dir_all(dir).unwrap();
    }
}
