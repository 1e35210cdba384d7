use image::imageops::FilterType;
use image::{DynamicImage, Limits};
use imageproc::filter::median_filter;

/// Resampling kernel used for every resize
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Neighborhood median over an odd `window` (1, 3, 5, 7, ...)
///
/// Each channel is filtered independently and the pixel layout is kept.
/// A window of 1 leaves the pixels unchanged.
pub fn median(pixels: &DynamicImage, window: u32) -> DynamicImage {
    let radius = window.saturating_sub(1) / 2;
    if radius == 0 {
        return pixels.clone();
    }

    match pixels {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(median_filter(buf, radius, radius)),
        DynamicImage::ImageLumaA8(buf) => {
            DynamicImage::ImageLumaA8(median_filter(buf, radius, radius))
        }
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(median_filter(buf, radius, radius)),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(median_filter(buf, radius, radius)),
        // Loaded images are always 8-bit; anything else goes through RGBA
        other => DynamicImage::ImageRgba8(median_filter(&other.to_rgba8(), radius, radius)),
    }
}

/// Luminance conversion re-expanded to three equal channels
pub fn grayscale(pixels: &DynamicImage) -> DynamicImage {
    let luma = DynamicImage::ImageLuma8(pixels.to_luma8());
    DynamicImage::ImageRgb8(luma.to_rgb8())
}

/// Largest output buffer a transform may allocate, in bytes
///
/// Same ceiling the decoders apply by default.
pub fn max_output_bytes() -> u64 {
    Limits::default().max_alloc.unwrap_or(u64::MAX)
}

/// Bytes needed for a `width` x `height` buffer with `channels` 8-bit
/// samples per pixel, None on overflow
pub fn buffer_bytes(width: u32, height: u32, channels: u8) -> Option<u64> {
    u64::from(width)
        .checked_mul(u64::from(height))?
        .checked_mul(u64::from(channels))
}

/// Resample to exactly `width` x `height` (aspect ratio is not kept)
pub fn resize(pixels: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    pixels.resize_exact(width, height, RESIZE_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_median_removes_isolated_spike() {
        let mut img = GrayImage::from_pixel(9, 9, Luma([128]));
        img.put_pixel(4, 4, Luma([255]));
        img.put_pixel(6, 2, Luma([0]));

        let filtered = median(&DynamicImage::ImageLuma8(img), 3).to_luma8();

        assert_eq!(filtered.get_pixel(4, 4), &Luma([128]));
        assert_eq!(filtered.get_pixel(6, 2), &Luma([128]));
    }

    #[test]
    fn test_median_keeps_layout() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 6, Rgba([1, 2, 3, 4])));
        for window in [1, 3, 5, 7] {
            let filtered = median(&rgba, window);
            assert_eq!(filtered.dimensions(), (10, 6));
            assert_eq!(filtered.color(), rgba.color());
        }
    }

    #[test]
    fn test_median_window_one_is_identity() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(5, 5, |x, y| {
            Rgb([(x * 40) as u8, (y * 40) as u8, 7])
        }));
        assert_eq!(median(&img, 1), img);
    }

    #[test]
    fn test_grayscale_channels_equal() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(8, 5, |x, y| {
            Rgba([(x * 30) as u8, (y * 50) as u8, 200, 90])
        }));

        let gray = grayscale(&img);
        assert_eq!(gray.dimensions(), (8, 5));

        let rgb = gray.as_rgb8().expect("grayscale output is RGB");
        for pixel in rgb.pixels() {
            let [r, g, b] = pixel.0;
            assert!(r == g && g == b, "unequal channels: {:?}", pixel);
        }
    }

    #[test]
    fn test_buffer_bytes() {
        assert_eq!(buffer_bytes(150, 200, 3), Some(90_000));
        assert_eq!(buffer_bytes(100_000, 100_000, 3), Some(30_000_000_000));
        assert_eq!(
            buffer_bytes(u32::MAX, u32::MAX, 4),
            Some(u64::from(u32::MAX).pow(2) * 4)
        );
        assert!(buffer_bytes(100_000, 100_000, 3).unwrap() > max_output_bytes());
        assert!(buffer_bytes(1920, 1080, 4).unwrap() <= max_output_bytes());
    }

    #[test]
    fn test_resize_exact_dimensions() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(150, 200));

        assert_eq!(resize(&img, 50, 50).dimensions(), (50, 50));
        assert_eq!(resize(&img, 300, 10).dimensions(), (300, 10));
        assert_eq!(resize(&img, 1, 1).dimensions(), (1, 1));
    }
}
