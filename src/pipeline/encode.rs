//! Canvas → PNG bytes.
//!
//! The drawing surface is RGBA so that bands and streaks can blend, but the
//! finished manuscript is always opaque. It is flattened to RGB8 before
//! encoding, which keeps files smaller and viewers from showing a checkerboard.

use crate::canvas::Canvas;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use tracing::debug;

/// PNG magic bytes.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Encode a finished canvas as an RGB PNG.
pub fn encode_png(canvas: Canvas) -> Result<Vec<u8>, image::ImageError> {
    let (width, height) = (canvas.width(), canvas.height());
    let img = DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas.into_image()).into_rgb8());

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;

    debug!("Encoded {}x{} canvas → {} bytes PNG", width, height, buf.len());
    Ok(buf)
}

/// Whether `bytes` starts with the PNG signature.
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BAND_GREEN, BLACK};

    #[test]
    fn encodes_opaque_rgb_png() {
        let mut canvas = Canvas::new(12, 7, BLACK);
        canvas.fill_rect(0, 0, 11, 2, BAND_GREEN);
        let bytes = encode_png(canvas).expect("encode should succeed");
        assert!(is_png(&bytes));

        let decoded = image::load_from_memory(&bytes).expect("valid png");
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
        let rgb = decoded.to_rgb8();
        assert!(rgb.get_pixel(0, 0)[1] > 0);
        assert_eq!(rgb.get_pixel(0, 6)[1], 0);
    }

    #[test]
    fn rejects_non_png_prefix() {
        assert!(!is_png(b"GIF89a"));
        assert!(!is_png(&[]));
    }
}
