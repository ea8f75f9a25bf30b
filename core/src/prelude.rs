use crate::record::InputRecord;
use std::path::PathBuf;

/// Common error type for model loading and prediction.
#[derive(thiserror::Error, Debug)]
pub enum SelectorError {
    #[error("failed to read model artifact {path}")]
    ModelIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed model artifact: {0}")]
    ModelFormat(String),
    #[error("classifier returned unknown class index {0}")]
    UnknownClass(usize),
    #[error("failed to load config {path}: {message}")]
    Config { path: PathBuf, message: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type SelectorResult<T> = Result<T, SelectorError>;

/// Opaque decision function mapping one record to a class index.
///
/// Implementations are built once at startup and shared read-only.
pub trait Classifier: Send + Sync {
    fn predict(&self, record: &InputRecord) -> SelectorResult<usize>;
}
