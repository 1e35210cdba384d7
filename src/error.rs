/// Errors reported by the editing session
///
/// Every public session operation returns one of these instead of
/// panicking, so the caller can react per call. A failed call leaves the
/// session state exactly as it was.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Invalid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Image of {width}x{height} would need {bytes} bytes, over the {limit} byte limit")]
    TooLarge {
        width: u32,
        height: u32,
        bytes: u64,
        limit: u64,
    },

    #[error("Failed to encode {}: {source}", path.display())]
    EncodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to decode {}: {source}", path.display())]
    DecodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Nothing to undo")]
    NothingToUndo,
}

pub type SessionResult<T> = Result<T, SessionError>;
