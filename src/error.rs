use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain storage for a [`HeapArray`](crate::heap_array::HeapArray).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    #[error("requested element count overflows the maximum allocation size")]
    CapacityOverflow,

    #[error("allocator could not provide {bytes} bytes")]
    OutOfMemory { bytes: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Anything a lesson can fail with.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Alloc(#[from] AllocError),
}
