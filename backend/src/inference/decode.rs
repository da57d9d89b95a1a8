use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::RgbImage;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64 image payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("undecodable image bytes: {0}")]
    Image(#[from] image::ImageError),
}

/// Decodes the request's base64 payload into an 8-bit, 3-channel RGB pixel
/// buffer. The container format is whatever the image crate recognizes from
/// the raw bytes (JPEG, PNG, WebP, ...).
pub fn decode_base64_image(encoded: &str) -> Result<RgbImage, DecodeError> {
    let bytes = STANDARD.decode(encoded)?;
    let image = image::load_from_memory(&bytes)?;
    Ok(image.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decodes_png_payload_to_rgb_buffer() {
        let encoded = STANDARD.encode(png_bytes(6, 4));
        let image = decode_base64_image(&encoded).unwrap();
        assert_eq!(image.dimensions(), (6, 4));
        assert_eq!(image.as_raw().len(), 6 * 4 * 3);
    }

    #[test]
    fn rejects_invalid_base64() {
        let err = decode_base64_image("definitely not base64!!!").unwrap_err();
        assert!(matches!(err, DecodeError::Base64(_)));
    }

    #[test]
    fn rejects_bytes_that_are_not_an_image() {
        let encoded = STANDARD.encode(b"just some text, not pixels");
        let err = decode_base64_image(&encoded).unwrap_err();
        assert!(matches!(err, DecodeError::Image(_)));
    }
}
