use std::path::PathBuf;

use thiserror::Error;

use crate::types::ComposerId;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog directory {0} does not exist")]
    MissingRoot(PathBuf),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid record in {path}: {reason}")]
    InvalidRecord { path: PathBuf, reason: String },

    #[error("unknown composer id {0}")]
    UnknownComposer(ComposerId),

    #[error("unknown piece id {0}")]
    UnknownPiece(String),
}
