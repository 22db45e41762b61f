use thiserror::Error;

/// Failures raised by a [`KeyValueStore`](crate::store::KeyValueStore).
///
/// `UserData` never returns these to its callers; they are logged and
/// treated as "no data" on reads and dropped on writes.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid stored value for key {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn io(key: &str, source: std::io::Error) -> Self {
        StoreError::Io {
            key: key.to_string(),
            source,
        }
    }

    pub fn serialization(key: &str, source: serde_json::Error) -> Self {
        StoreError::Serialization {
            key: key.to_string(),
            source,
        }
    }
}
