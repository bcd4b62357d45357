//! Standards load errors
//!
//! These never reach a validation caller: `StandardsTable::load` absorbs them
//! into an empty table.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StandardsError {
    #[error("Failed to read standards file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse standards file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse { path: path.into(), source }
    }
}
