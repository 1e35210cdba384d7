/// On-screen previews of the original and current image
use image::imageops::FilterType;
use iced::widget::image::Handle;

use image_processor::Image;

/// Bounding box of each preview pane
const PREVIEW_WIDTH: u32 = 400;
const PREVIEW_HEIGHT: u32 = 300;

/// Size that fits `width` x `height` inside the preview box, keeping the
/// aspect ratio. Images already inside the box are not enlarged.
pub fn fit_within(width: u32, height: u32) -> (u32, u32) {
    if width <= PREVIEW_WIDTH && height <= PREVIEW_HEIGHT {
        return (width, height);
    }

    let scale = f64::min(
        PREVIEW_WIDTH as f64 / width as f64,
        PREVIEW_HEIGHT as f64 / height as f64,
    );
    let w = ((width as f64 * scale).round() as u32).max(1);
    let h = ((height as f64 * scale).round() as u32).max(1);
    (w, h)
}

/// Build a display handle for an image, downscaled with Lanczos
pub fn handle(image: &Image) -> Handle {
    let (width, height) = fit_within(image.width(), image.height());
    let rgba = if (width, height) == (image.width(), image.height()) {
        image.pixels().to_rgba8()
    } else {
        image
            .pixels()
            .resize_exact(width, height, FilterType::Lanczos3)
            .to_rgba8()
    };

    Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw())
}
