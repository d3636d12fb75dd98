//! Storage keys and the error type shared by every key-value backend.

use std::error::Error;
use thiserror::Error;

/// Key holding the JSON-serialized root snapshot.
pub const STATE_KEY: &str = "gameshowState";
/// Key holding the epoch-millisecond timestamp of the last persisted mutation.
pub const LAST_UPDATE_KEY: &str = "gameshowLastUpdate";
/// Key holding the epoch-millisecond timestamp of this process' last reconcile.
pub const LAST_CHECK_KEY: &str = "myLastCheck";

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The medium could not be read or written.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// What was being attempted.
        message: String,
        /// Backend failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A stored value could not be decoded.
    #[error("stored value under `{key}` is corrupt")]
    Corrupt {
        /// Key holding the value.
        key: String,
        /// Decoding failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// An in-memory value could not be encoded for storage; nothing was written.
    #[error("cannot encode value for `{key}`")]
    Encode {
        /// Key the value was meant for.
        key: String,
        /// Encoding failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a corruption error for a value that could not be decoded.
    pub fn corrupt(key: &str, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Corrupt {
            key: key.to_owned(),
            source: Box::new(source),
        }
    }

    /// Construct an encoding error for a value that could not be serialized.
    pub fn encode(key: &str, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Encode {
            key: key.to_owned(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_failure_is_not_reported_as_corruption() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = StorageError::encode(STATE_KEY, source);
        assert!(matches!(&err, StorageError::Encode { key, .. } if key == STATE_KEY));
        assert_eq!(err.to_string(), "cannot encode value for `gameshowState`");
    }
}
