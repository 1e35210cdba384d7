use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The only encodings the editor reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImageKind {
    Png,
    Jpeg,
    Bmp,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Bmp => "BMP",
        }
    }

    /// Map a path's extension onto the allow-list (case-insensitive).
    /// Returns None for anything else, including a missing extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Output encoding for a save path. Unknown extensions fall back to JPEG.
    pub fn for_save_path(path: &Path) -> Self {
        Self::from_extension(path).unwrap_or(Self::Jpeg)
    }

    /// Identify the encoding from the file's magic bytes.
    /// Formats outside the allow-list are reported as None.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match image::guess_format(bytes).ok()? {
            image::ImageFormat::Png => Some(Self::Png),
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::Bmp => Some(Self::Bmp),
            _ => None,
        }
    }

    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Bmp => image::ImageFormat::Bmp,
        }
    }

    /// Extensions accepted by the load picker
    pub fn extensions() -> &'static [&'static str] {
        &["png", "jpg", "jpeg", "bmp"]
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
