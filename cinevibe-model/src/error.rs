use thiserror::Error;

/// Errors produced by model constructors and parsing routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown movie list category: {0}")]
    UnknownListType(String),

    #[error("unknown image size: {0}")]
    UnknownImageSize(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
