//! Error types for icon-drift.
//!
//! The motion simulator itself never fails; these cover configuration loading,
//! icon artwork decoding and the preview window.

/// Result alias using [`DriftError`].
pub type Result<T> = std::result::Result<T, DriftError>;

#[derive(Debug, thiserror::Error)]
pub enum DriftError {
    /// Reading a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for [`crate::DriftConfig`]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config parsed but holds unusable values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Icon artwork could not be decoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Preview window failed to open or update
    #[error("Window error: {0}")]
    Window(#[from] minifb::Error),
}
