use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum DumperError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Summarization failed: {0}")]
    ExternalService(String),
}
impl DumperError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DumperError::Io {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn config(message: impl Into<String>) -> Self {
        DumperError::Configuration(message.into())
    }
    pub(crate) fn service(message: impl Into<String>) -> Self {
        DumperError::ExternalService(message.into())
    }
}
