/// The image editing session
///
/// Holds three image slots:
/// - `current`: what every transform reads and replaces
/// - `previous`: single-slot undo buffer, valid for one `undo` call
/// - `original`: the image as loaded from disk, kept for `reset_to_original`
///
/// The session is not synchronized; callers sharing it across threads
/// must serialize access themselves.

use serde_json::{json, Map, Value};
use std::path::Path;

use super::action_log::{ActionLog, ActionRecord, Operation};
use super::data::{Image, ImageInfo};
use crate::error::{SessionError, SessionResult};
use crate::imaging::{codec, filters, ImageKind};

/// Smallest and largest median window accepted by `apply_denoise`
pub const MIN_DENOISE_STRENGTH: i32 = 1;
pub const MAX_DENOISE_STRENGTH: i32 = 7;

pub struct Session<L: ActionLog> {
    current: Option<Image>,
    previous: Option<Image>,
    original: Option<Image>,
    log: L,
}

impl<L: ActionLog> Session<L> {
    /// Create an empty session writing to `log`
    pub fn new(log: L) -> Self {
        Self {
            current: None,
            previous: None,
            original: None,
            log,
        }
    }

    /// Decode `path` and make it both the current and the original image
    ///
    /// Clears the undo buffer. On failure nothing changes.
    pub fn load(&mut self, path: impl AsRef<Path>) -> SessionResult<()> {
        let path = path.as_ref();
        let (pixels, kind) = codec::decode(path).inspect_err(|e| {
            log::error!("Load failed: {}", e);
        })?;

        let image = Image::decoded(pixels, kind);
        self.original = Some(image.clone());
        self.current = Some(image);
        self.previous = None;

        log::info!("Image loaded: {} ({})", path.display(), kind);
        self.record(
            Operation::LoadImage,
            json!({ "path": path.display().to_string() }),
        );
        Ok(())
    }

    /// Median-filter the current image
    ///
    /// `strength` is clamped to 1..=7 and bumped to the next odd value if
    /// even; the result is the filter window size.
    pub fn apply_denoise(&mut self, strength: i32) -> SessionResult<()> {
        let current = self.require_current("Denoise")?;
        let window = denoise_window(strength);

        let filtered = filters::median(current.pixels(), window as u32);
        self.commit(Image::derived(filtered));

        log::info!("Denoise applied: strength={}", window);
        self.record(Operation::ApplyDenoise, json!({ "strength": window }));
        Ok(())
    }

    /// Replace the current image with its luminance, as three equal channels
    pub fn convert_to_grayscale(&mut self) -> SessionResult<()> {
        let current = self.require_current("Grayscale")?;

        let gray = filters::grayscale(current.pixels());
        self.commit(Image::derived(gray));

        log::info!("Image converted to grayscale");
        self.record(Operation::ConvertToGrayscale, json!({}));
        Ok(())
    }

    /// Resample the current image to exactly `width` x `height`
    pub fn resize(&mut self, width: i64, height: i64) -> SessionResult<()> {
        let current = self.require_current("Resize")?;

        let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => {
                let err = SessionError::InvalidDimensions { width, height };
                log::error!("Resize failed: {}", err);
                return Err(err);
            }
        };

        let limit = filters::max_output_bytes();
        match filters::buffer_bytes(w, h, current.mode().channel_count()) {
            Some(bytes) if bytes <= limit => {}
            bytes => {
                let err = SessionError::TooLarge {
                    width: w,
                    height: h,
                    bytes: bytes.unwrap_or(u64::MAX),
                    limit,
                };
                log::error!("Resize failed: {}", err);
                return Err(err);
            }
        }

        let resized = filters::resize(current.pixels(), w, h);
        self.commit(Image::derived(resized));

        log::info!("Image resized: {}x{}", w, h);
        self.record(Operation::Resize, json!({ "width": w, "height": h }));
        Ok(())
    }

    /// Encode the current image to `path`
    ///
    /// The encoding follows the extension (.jpg/.jpeg, .png, .bmp);
    /// anything else is written as JPEG. Session state is untouched.
    pub fn save(&mut self, path: impl AsRef<Path>) -> SessionResult<()> {
        let path = path.as_ref();
        let current = self.require_current("Save")?;
        let kind = ImageKind::for_save_path(path);

        codec::encode(current.pixels(), path, kind).inspect_err(|e| {
            log::error!("Save failed: {}", e);
        })?;

        log::info!("Image saved: {} ({})", path.display(), kind);
        self.record(
            Operation::SaveImage,
            json!({ "path": path.display().to_string(), "format": kind.as_str() }),
        );
        Ok(())
    }

    /// Restore the image that preceded the last transform
    ///
    /// Single use: the undo buffer is emptied, so a second call fails
    /// until another transform runs.
    pub fn undo(&mut self) -> SessionResult<()> {
        let previous = self.previous.take().ok_or(SessionError::NothingToUndo)?;
        self.current = Some(previous);

        log::info!("Last action undone");
        self.record(Operation::Undo, json!({}));
        Ok(())
    }

    /// Restore the image as it was loaded and empty the undo buffer
    pub fn reset_to_original(&mut self) -> SessionResult<()> {
        let original = self.original.clone().ok_or(SessionError::NoImageLoaded)?;
        self.current = Some(original);
        self.previous = None;

        log::info!("Reset to original image");
        self.record(Operation::ResetToOriginal, json!({}));
        Ok(())
    }

    /// Metadata of the current image, None before the first load
    pub fn get_info(&self) -> Option<ImageInfo> {
        self.current.as_ref().map(Image::info)
    }

    pub fn current(&self) -> Option<&Image> {
        self.current.as_ref()
    }

    pub fn original(&self) -> Option<&Image> {
        self.original.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.previous.is_some()
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    fn require_current(&self, action: &str) -> SessionResult<Image> {
        self.current.clone().ok_or_else(|| {
            log::error!("{} failed: no image loaded", action);
            SessionError::NoImageLoaded
        })
    }

    /// Install a transform result, keeping the replaced image for undo
    fn commit(&mut self, next: Image) {
        self.previous = self.current.replace(next);
    }

    fn record(&mut self, operation: Operation, parameters: Value) {
        let parameters = match parameters {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        if let Err(e) = self.log.record(ActionRecord::now(operation, parameters)) {
            log::warn!("Failed to record {}: {}", operation.as_str(), e);
        }
    }
}

/// Median window for a requested denoise strength
pub fn denoise_window(strength: i32) -> i32 {
    let size = strength.clamp(MIN_DENOISE_STRENGTH, MAX_DENOISE_STRENGTH);
    if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}
