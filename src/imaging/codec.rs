/// File decoding and encoding
///
/// Load checks run in a fixed order: the path must be a readable regular
/// file, its extension must be on the allow-list, and its magic bytes must
/// identify an allowed encoding. The content (not the extension) picks the
/// decoder.

use image::{ColorType, DynamicImage};
use std::path::Path;

use super::format::ImageKind;
use crate::error::{SessionError, SessionResult};

/// Decode an image file into an 8-bit bitmap
///
/// # Returns
/// * `Ok((pixels, kind))` - Decoded bitmap and the encoding found in the file
/// * `Err(NotFound)` - Path is missing, a directory, or unreadable
/// * `Err(UnsupportedFormat)` - Extension or content outside PNG/JPEG/BMP
/// * `Err(DecodeFailure)` - Recognized encoding but corrupt data
pub fn decode(path: &Path) -> SessionResult<(DynamicImage, ImageKind)> {
    if !path.is_file() {
        return Err(SessionError::NotFound(path.to_path_buf()));
    }

    if ImageKind::from_extension(path).is_none() {
        return Err(SessionError::UnsupportedFormat(path.display().to_string()));
    }

    let bytes = std::fs::read(path).map_err(|_| SessionError::NotFound(path.to_path_buf()))?;

    let kind = ImageKind::sniff(&bytes).ok_or_else(|| {
        SessionError::UnsupportedFormat(format!(
            "{} (content is not PNG, JPEG or BMP)",
            path.display()
        ))
    })?;

    let pixels = image::load_from_memory_with_format(&bytes, kind.to_image_format())
        .map_err(|source| SessionError::DecodeFailure {
            path: path.to_path_buf(),
            source,
        })?;

    Ok((normalize_depth(pixels), kind))
}

/// Encode a bitmap to `path` as `kind`
///
/// JPEG has no alpha channel, so alpha is dropped for JPEG output.
pub fn encode(pixels: &DynamicImage, path: &Path, kind: ImageKind) -> SessionResult<()> {
    let result = match (kind, pixels.color().has_alpha()) {
        (ImageKind::Jpeg, true) => {
            let flattened = if pixels.color().has_color() {
                DynamicImage::ImageRgb8(pixels.to_rgb8())
            } else {
                DynamicImage::ImageLuma8(pixels.to_luma8())
            };
            flattened.save_with_format(path, kind.to_image_format())
        }
        _ => pixels.save_with_format(path, kind.to_image_format()),
    };

    result.map_err(|source| SessionError::EncodeFailure {
        path: path.to_path_buf(),
        source,
    })
}

/// Reduce 16-bit and float samples to 8 bits, keeping the channel layout
fn normalize_depth(pixels: DynamicImage) -> DynamicImage {
    match pixels.color() {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => pixels,
        ColorType::L16 => DynamicImage::ImageLuma8(pixels.to_luma8()),
        ColorType::La16 => DynamicImage::ImageLumaA8(pixels.to_luma_alpha8()),
        ColorType::Rgb16 | ColorType::Rgb32F => DynamicImage::ImageRgb8(pixels.to_rgb8()),
        _ => DynamicImage::ImageRgba8(pixels.to_rgba8()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    fn sample_rgb(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 100])
        }))
    }

    #[test]
    fn test_decode_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = decode(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[test]
    fn test_decode_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = decode(dir.path());
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[test]
    fn test_decode_rejects_extension_even_with_image_content() {
        let dir = tempfile::tempdir().unwrap();
        let png_path = dir.path().join("real.png");
        sample_rgb(8, 8).save(&png_path).unwrap();

        let txt_path = dir.path().join("disguised.txt");
        std::fs::copy(&png_path, &txt_path).unwrap();

        let result = decode(&txt_path);
        assert!(matches!(result, Err(SessionError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_decode_rejects_non_image_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.jpg");
        std::fs::write(&path, b"not an image").unwrap();

        let result = decode(&path);
        assert!(matches!(result, Err(SessionError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_decode_corrupt_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0u8; 32]);
        std::fs::write(&path, bytes).unwrap();

        let result = decode(&path);
        assert!(matches!(result, Err(SessionError::DecodeFailure { .. })));
    }

    #[test]
    fn test_content_selects_decoder() {
        // PNG bytes behind a .jpg name still decode, reported as PNG
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mislabelled.jpg");
        sample_rgb(12, 9)
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();

        let (pixels, kind) = decode(&path).unwrap();
        assert_eq!(kind, ImageKind::Png);
        assert_eq!((pixels.width(), pixels.height()), (12, 9));
    }

    #[test]
    fn test_sixteen_bit_png_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep.png");
        let deep: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_fn(6, 4, |x, _| Luma([(x * 10_000) as u16]));
        DynamicImage::ImageLuma16(deep).save(&path).unwrap();

        let (pixels, _) = decode(&path).unwrap();
        assert_eq!(pixels.color(), ColorType::L8);
    }

    #[test]
    fn test_encode_round_trip_all_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let pixels = sample_rgb(31, 17);

        for (name, kind) in [
            ("out.png", ImageKind::Png),
            ("out.jpg", ImageKind::Jpeg),
            ("out.bmp", ImageKind::Bmp),
        ] {
            let path = dir.path().join(name);
            encode(&pixels, &path, kind).unwrap();

            let (decoded, found) = decode(&path).unwrap();
            assert_eq!(found, kind);
            assert_eq!((decoded.width(), decoded.height()), (31, 17));
        }
    }

    #[test]
    fn test_encode_jpeg_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.jpg");
        let pixels = DynamicImage::ImageRgba8(RgbaImage::from_pixel(5, 5, Rgba([10, 20, 30, 128])));

        encode(&pixels, &path, ImageKind::Jpeg).unwrap();

        let (decoded, kind) = decode(&path).unwrap();
        assert_eq!(kind, ImageKind::Jpeg);
        assert_eq!(decoded.color(), ColorType::Rgb8);
    }

    #[test]
    fn test_encode_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.png");

        let result = encode(&sample_rgb(4, 4), &path, ImageKind::Png);
        assert!(matches!(result, Err(SessionError::EncodeFailure { .. })));
    }
}
