use image_processor::ImageInfo;

/// Text shown in the image information panel
pub fn info_text(info: Option<&ImageInfo>) -> String {
    match info {
        Some(info) => format!(
            "=== IMAGE INFO ===\n\n\
             Width: {} px\n\
             Height: {} px\n\
             Size: {}\n\
             Format: {}\n\
             Mode: {}",
            info.width,
            info.height,
            info.size(),
            info.format_name(),
            info.mode
        ),
        None => "Load an image to see its details".to_string(),
    }
}
