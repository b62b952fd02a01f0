use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No fixup record for act '{act}' at {}", path.display())]
    MissingRecord { act: String, path: PathBuf },

    #[error("Malformed fixup record {}: {source}", path.display())]
    MalformedRecord {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write fixup record {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid act identifier: {0:?}")]
    InvalidActId(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(String),
}
