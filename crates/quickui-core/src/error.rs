//! Error types for the window toolkit

use alloc::string::String;
use thiserror_no_std::Error;

use crate::window::WindowId;

/// Errors raised while loading system resources
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    /// No resource with the requested name
    #[error("Resource not found: {name}")]
    NotFound {
        /// Name that was requested
        name: String,
    },

    /// The bundle bytes could not be decoded
    #[error("Malformed asset bundle")]
    Malformed,

    /// A font face that is not compiled in
    #[error("Unknown font face")]
    UnknownFontFace,

    /// Image data shorter than its header claims
    #[error("Image data truncated (expected {expected} bytes, got {actual})")]
    TruncatedImage {
        /// Bytes required by the width/height/format
        expected: usize,
        /// Bytes present
        actual: usize,
    },
}

/// Errors raised by window tree and coordinator operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UiError {
    /// The window id does not refer to a live window
    #[error("Unknown window: {0:?}")]
    UnknownWindow(WindowId),

    /// Operation not permitted on the root window
    #[error("Operation not permitted on the root window")]
    RootWindow,

    /// Timer table is full
    #[error("Timer capacity exceeded (max: {max})")]
    TimerCapacityExceeded {
        /// Maximum number of live timers
        max: usize,
    },

    /// Loading a system resource failed
    #[error("Asset error: {0}")]
    Asset(AssetError),
}

impl From<AssetError> for UiError {
    fn from(err: AssetError) -> Self {
        UiError::Asset(err)
    }
}

/// Result type for toolkit operations
pub type UiResult<T> = Result<T, UiError>;
