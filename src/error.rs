// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Decoded password is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} is required")]
    Validation(&'static str),
    #[error("An entry for site '{site}' and email '{email}' already exists")]
    Duplicate { site: String, email: String },
    #[error("No entry found with id {0}")]
    NotFound(u64),
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String), // from serde_json, either direction
    #[error("Password encoding error: {0}")]
    Codec(#[from] CodecError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Settings error: {0}")]
    Settings(String),
    #[error("CLI error: {0}")]
    Cli(String),
}

// Result type aliases for convenience
pub type CodecResult<T> = Result<T, CodecError>;
pub type StoreResult<T> = Result<T, StoreError>;
pub type AppResult<T> = Result<T, AppError>;
