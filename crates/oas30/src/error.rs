//! Error types for loading and saving documents

use std::path::PathBuf;

use crate::expression::ExpressionError;

/// Result type alias for document operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error reading, writing or interpreting a document
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed JSON, or JSON that does not have the shape of a document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML, or YAML that does not have the shape of a document
    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML requested without the `yaml` feature
    #[error("YAML support is not enabled")]
    YamlDisabled,

    /// Reading or writing a file failed
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The format could not be told from the file name
    #[error("cannot determine document format of {}", .0.display())]
    UnknownFormat(PathBuf),

    /// Invalid runtime expression
    #[error("runtime expression error: {0}")]
    Expression(#[from] ExpressionError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
