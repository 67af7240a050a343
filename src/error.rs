use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocToolError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing start tag [{0}]")]
    TagNotFound(String),

    #[error("missing end tag [{tag}] opened at line {start_line}")]
    UnterminatedTag { tag: String, start_line: usize },

    #[error("invalid tag name: {0:?}")]
    InvalidTag(String),
}

impl DocToolError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocToolError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocToolError>;
