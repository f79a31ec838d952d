//! Image format names, extensions and MIME types.

/// Validate the output image format.
///
/// # Errors
///
/// Returns an error if the format is not recognized.
pub fn validate_format(format: &str) -> Result<(), String> {
    match format {
        "jpeg" | "png" | "webp" => Ok(()),
        _ => Err(format!("Unsupported format '{format}'. Valid: jpeg, png, webp")),
    }
}

/// Get the file extension for an output format.
#[must_use]
pub fn format_extension(format: &str) -> &'static str {
    match format {
        "png" => "png",
        "webp" => "webp",
        // jpeg and any unknown format default to jpg
        _ => "jpg",
    }
}

/// MIME type for an output format.
#[must_use]
pub fn format_mime(format: &str) -> &'static str {
    match format {
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}

/// Guess a MIME type from a file extension, defaulting to JPEG.
#[must_use]
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_format_valid() {
        assert!(validate_format("jpeg").is_ok());
        assert!(validate_format("png").is_ok());
        assert!(validate_format("webp").is_ok());
    }

    #[test]
    fn validate_format_invalid() {
        assert!(validate_format("gif").is_err());
        assert!(validate_format("jpg").is_err());
    }

    #[test]
    fn format_extension_mapping() {
        assert_eq!(format_extension("jpeg"), "jpg");
        assert_eq!(format_extension("png"), "png");
        assert_eq!(format_extension("webp"), "webp");
    }

    #[test]
    fn mime_lookups() {
        assert_eq!(format_mime("jpeg"), "image/jpeg");
        assert_eq!(format_mime("webp"), "image/webp");
        assert_eq!(mime_for_extension("PNG"), "image/png");
        assert_eq!(mime_for_extension("jpg"), "image/jpeg");
        assert_eq!(mime_for_extension("unknown"), "image/jpeg");
    }
}
