/// Imaging capability used by the session
///
/// This module handles:
/// - The PNG/JPEG/BMP allow-list and extension mapping (format.rs)
/// - Decoding and encoding files (codec.rs)
/// - Pixel transforms: median, grayscale, resize (filters.rs)

pub mod codec;
pub mod filters;
pub mod format;

pub use format::ImageKind;
