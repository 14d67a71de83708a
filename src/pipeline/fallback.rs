//! Error manuscript returned when the normal pipeline fails.
//!
//! Building it must not fail in turn: every draw here is best-effort, and an
//! encoder failure yields [`LAST_RESORT_PNG`] rather than an error.

use crate::canvas::{Canvas, ALERT_RED, BLACK, BRIGHT_GREEN};
use crate::font::BitmapFont;
use crate::pipeline::encode::encode_png;
use tracing::error;

pub const ERROR_WIDTH: u32 = 800;
pub const ERROR_HEIGHT: u32 = 300;

const TITLE: &str = "Error generating H4X0R manuscript";
const HINT: &str = "Please try again with different content";
const LEFT: u32 = 20;
const SCALE: u32 = 2;

/// Pre-encoded 1×1 black grayscale PNG, returned when even the error image
/// cannot be encoded.
pub const LAST_RESORT_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
    0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
    0x08, 0x00, 0x00, 0x00, 0x00, 0x3A, 0x7E, 0x9B, 0x55, 0x00, 0x00, 0x00,
    0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x63, 0x60, 0x00, 0x00, 0x00,
    0x02, 0x00, 0x01, 0xE5, 0x27, 0xDE, 0xFC, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// HTML body for a failed render.
pub fn error_html(message: &str) -> String {
    format!(
        "<h1>Error generating manuscript</h1><p>{}</p>",
        escape_html(message)
    )
}

/// Build the `(html, png)` pair describing `message`.
pub fn error_manuscript(message: &str) -> (String, Vec<u8>) {
    (error_html(message), error_image(message))
}

/// 800×300 black PNG with the title and message in red and a hint in green.
pub fn error_image(message: &str) -> Vec<u8> {
    let mut canvas = Canvas::new(ERROR_WIDTH, ERROR_HEIGHT, BLACK);
    let face = BitmapFont::terminal();
    let single_line: String = message.lines().collect::<Vec<_>>().join(" ");

    for (y, text, color) in [
        (20, TITLE, ALERT_RED),
        (50, single_line.as_str(), ALERT_RED),
        (80, HINT, BRIGHT_GREEN),
    ] {
        // Origins are constant and inside the canvas; skipped glyphs stay blank.
        let _ = canvas.draw_text_lossy(LEFT, y, text, color, face, SCALE);
    }

    png_or_last_resort(encode_png(canvas))
}

fn png_or_last_resort(encoded: Result<Vec<u8>, image::ImageError>) -> Vec<u8> {
    match encoded {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Could not encode error image, using last-resort PNG: {e}");
            LAST_RESORT_PNG.to_vec()
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_names_the_failure() {
        let html = error_html("canvas too tall");
        assert_eq!(
            html,
            "<h1>Error generating manuscript</h1><p>canvas too tall</p>"
        );
    }

    #[test]
    fn message_is_escaped() {
        let html = error_html("<script>alert('x')</script> & co");
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn image_is_800_by_300_with_red_and_green_text() {
        let (_, png) = error_manuscript("boom");
        let img = image::load_from_memory(&png).expect("valid png").to_rgb8();
        assert_eq!(img.dimensions(), (ERROR_WIDTH, ERROR_HEIGHT));
        assert!(img.pixels().any(|p| p.0 == [255, 0, 0]));
        assert!(img.pixels().any(|p| p.0 == [0, 255, 0]));
        assert_eq!(img.get_pixel(799, 299).0, [0, 0, 0]);
    }

    #[test]
    fn unicode_and_empty_messages_never_fail() {
        let long = "x".repeat(10_000);
        for msg in ["", "ошибка 🔥", "multi\nline\nmessage", long.as_str()] {
            let (html, png) = error_manuscript(msg);
            assert!(html.starts_with("<h1>"));
            assert!(!png.is_empty());
        }
    }

    #[test]
    fn encoder_failure_yields_last_resort_png() {
        use image::error::{LimitError, LimitErrorKind};
        let err = image::ImageError::Limits(LimitError::from_kind(LimitErrorKind::InsufficientMemory));
        let png = png_or_last_resort(Err(err));
        assert_eq!(png, LAST_RESORT_PNG);

        let img = image::load_from_memory(&png).expect("valid png").to_rgb8();
        assert_eq!(img.dimensions(), (1, 1));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
    }
}
