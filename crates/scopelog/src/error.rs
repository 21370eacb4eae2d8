use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScopelogError {
    #[error("Failed to read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unknown log format: {0}")]
    UnknownFormat(String),

    #[error("Unknown field representation: {0}")]
    UnknownFieldRepresentation(String),
}

pub type Result<T> = std::result::Result<T, ScopelogError>;
