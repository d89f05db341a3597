//! Error types for lugsite

use std::path::PathBuf;

/// Domain errors raised by the library
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown content type '{0}' (expected one of: events, people, projects, pages, news)")]
    UnknownContentType(String),

    #[error("failed to parse config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("file already exists: {0:?}")]
    AlreadyExists(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
