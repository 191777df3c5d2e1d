use std::io::Cursor;

use image::{ImageFormat, ImageReader};

pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

pub const ALLOWED_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Validate an uploaded image: detect the format from magic bytes, check it
/// against the allowed formats, and decode it to make sure the payload is a
/// real image. Returns the content type on success.
pub fn validate_image(data: &[u8]) -> Result<String, String> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("Failed to read image: {}", e))?;

    let format = reader
        .format()
        .ok_or_else(|| "Could not detect image format".to_string())?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(format!(
            "Unsupported image format: {:?}. Allowed: JPEG, PNG, GIF, WebP",
            format
        ));
    }

    let content_type = format.to_mime_type().to_string();

    reader
        .decode()
        .map_err(|e| format!("Failed to decode image: {}", e))?;

    Ok(content_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn encode(format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::new(4, 4);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_png_accepted() {
        let data = encode(ImageFormat::Png);
        assert_eq!(validate_image(&data).unwrap(), "image/png");
    }

    #[test]
    fn test_jpeg_accepted() {
        let data = encode(ImageFormat::Jpeg);
        assert_eq!(validate_image(&data).unwrap(), "image/jpeg");
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(validate_image(b"definitely not an image").is_err());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(validate_image(&[]).is_err());
    }

    #[test]
    fn test_disallowed_format_rejected() {
        let data = encode(ImageFormat::Bmp);
        let err = validate_image(&data).unwrap_err();
        assert!(err.contains("Unsupported image format"));
    }

    #[test]
    fn test_truncated_image_rejected() {
        let mut data = encode(ImageFormat::Png);
        data.truncate(data.len() / 2);
        assert!(validate_image(&data).is_err());
    }
}
