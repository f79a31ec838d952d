//! Local image files: naming, saving with format conversion, and cleanup.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BotError;
use crate::params::format_extension;

/// Path the image for `number` is saved under, e.g. `images/417.jpg`.
#[must_use]
pub fn image_path(dir: &Path, number: i64, format: &str) -> PathBuf {
    dir.join(format!("{number}.{}", format_extension(format)))
}

/// Save raw image bytes to a file, converting format if necessary.
///
/// Creates the parent directory if it does not exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written or format conversion fails.
pub fn save_image(
    data: &[u8],
    source_mime: &str,
    target_format: &str,
    output_path: &Path,
) -> Result<(), BotError> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    if mime_matches_format(source_mime, target_format) {
        std::fs::write(output_path, data).map_err(BotError::Io)
    } else {
        debug!(source_mime, target_format, "converting image");
        convert_and_save(data, target_format, output_path)
    }
}

/// Remove a saved image. A file that is already gone is not an error.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn remove_image(path: &Path) -> Result<(), BotError> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(BotError::Io(e)),
        _ => Ok(()),
    }
}

/// Check if a MIME type matches the requested output format.
fn mime_matches_format(mime: &str, format: &str) -> bool {
    matches!(
        (mime, format),
        ("image/jpeg" | "image/jpg", "jpeg") | ("image/png", "png") | ("image/webp", "webp")
    )
}

/// Convert image bytes to the target format and save.
fn convert_and_save(data: &[u8], target_format: &str, output_path: &Path) -> Result<(), BotError> {
    let img = image::load_from_memory(data)
        .map_err(|e| BotError::ImageConversion(format!("Failed to decode image: {e}")))?;

    let image_format = match target_format {
        "jpeg" => image::ImageFormat::Jpeg,
        "png" => image::ImageFormat::Png,
        "webp" => image::ImageFormat::WebP,
        other => {
            return Err(BotError::ImageConversion(format!("Unsupported format: {other}")));
        }
    };

    // JPEG has no alpha channel.
    let img = if image_format == image::ImageFormat::Jpeg {
        image::DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img
    };

    img.save_with_format(output_path, image_format)
        .map_err(|e| BotError::ImageConversion(format!("Failed to save as {target_format}: {e}")))
}
