/// Shared data structures for the editing session
///
/// These structs represent the image values that flow between
/// the session and whatever presentation layer drives it.

use image::{ColorType, DynamicImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::imaging::ImageKind;

/// Channel layout of an image (8 bits per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelMode {
    /// Single luminance channel
    L,
    /// Luminance + alpha
    #[serde(rename = "LA")]
    La,
    /// Truecolor
    #[serde(rename = "RGB")]
    Rgb,
    /// Truecolor + alpha
    #[serde(rename = "RGBA")]
    Rgba,
}

impl PixelMode {
    /// Channel layout of a decoded bitmap
    pub fn of(pixels: &DynamicImage) -> Self {
        match pixels.color() {
            ColorType::L8 | ColorType::L16 => Self::L,
            ColorType::La8 | ColorType::La16 => Self::La,
            ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => Self::Rgb,
            _ => Self::Rgba,
        }
    }

    pub fn channel_count(&self) -> u8 {
        match self {
            Self::L => 1,
            Self::La => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L => "L",
            Self::La => "LA",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
        }
    }
}

impl fmt::Display for PixelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable bitmap held by the session
///
/// Cloning shares the pixels. A wrapped bitmap is never written to;
/// transforms build a new one.
#[derive(Clone)]
pub struct Image {
    pixels: Arc<DynamicImage>,
    /// Encoding the pixels were decoded from (None once transformed)
    source: Option<ImageKind>,
}

impl Image {
    /// Wrap pixels decoded from a file of the given encoding
    pub fn decoded(pixels: DynamicImage, source: ImageKind) -> Self {
        Self {
            pixels: Arc::new(pixels),
            source: Some(source),
        }
    }

    /// Wrap pixels produced by a transform
    pub fn derived(pixels: DynamicImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
            source: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn mode(&self) -> PixelMode {
        PixelMode::of(&self.pixels)
    }

    /// Read-only access to the bitmap
    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    /// True if both values share the same bitmap
    pub fn same_pixels(&self, other: &Image) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// Snapshot of the image metadata
    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            width: self.width(),
            height: self.height(),
            format: self.source,
            mode: self.mode(),
        }
    }
}

// Avoid dumping the pixel buffer in debug output
impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("mode", &self.mode())
            .field("source", &self.source)
            .finish()
    }
}

/// Read-only snapshot returned by `Session::get_info`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Source encoding, None for images produced by a transform
    pub format: Option<ImageKind>,
    pub mode: PixelMode,
}

impl ImageInfo {
    /// "WIDTHxHEIGHT"
    pub fn size(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Format name for display, "Unknown" when the image was transformed
    pub fn format_name(&self) -> &'static str {
        self.format.map(|f| f.as_str()).unwrap_or("Unknown")
    }
}
