//! In-memory RGBA drawing surface.
//!
//! A thin layer over [`image::RgbaImage`] providing exactly what the
//! manuscript needs: source-over rectangles, bitmap text and a gaussian
//! glow. Every primitive clips to the canvas; text draws report
//! [`DrawError`] so the caller can run its own fallback.

use crate::error::DrawError;
use crate::font::{BitmapFont, GLYPH_ADVANCE};
use image::{imageops, Rgba, RgbaImage};
use tracing::debug;

/// Pure terminal green used for manuscript text.
pub const BRIGHT_GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
/// Translucent dark green of the banner and footer bands.
pub const BAND_GREEN: Rgba<u8> = Rgba([0, 30, 0, 230]);
/// Error text red.
pub const ALERT_RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
/// Opaque black.
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A width×height RGBA pixel buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// A canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<&Rgba<u8>> {
        (x < self.width() && y < self.height()).then(|| self.pixels.get_pixel(x, y))
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Composite `color` over one pixel; out-of-range coordinates are ignored.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        let dst = self.pixels.get_pixel_mut(x, y);
        *dst = source_over(color, *dst);
    }

    /// Fill the inclusive rectangle `(x0, y0)..=(x1, y1)`, clipped to the canvas.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba<u8>) {
        if self.width() == 0 || self.height() == 0 {
            return;
        }
        let (x0, x1) = (x0.min(x1), x0.max(x1).min(self.width() - 1));
        let (y0, y1) = (y0.min(y1), y0.max(y1).min(self.height() - 1));
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Draw `text` with `font` at `(x, y)`, each font unit `scale` pixels wide.
    ///
    /// All-or-nothing: if any character is missing from the face, nothing is
    /// drawn and [`DrawError::MissingGlyph`] names the first offender.
    pub fn draw_text(
        &mut self,
        x: u32,
        y: u32,
        text: &str,
        color: Rgba<u8>,
        font: &BitmapFont,
        scale: u32,
    ) -> Result<(), DrawError> {
        self.check_origin(x, y)?;
        if let Some(ch) = font.first_missing(text) {
            return Err(DrawError::MissingGlyph {
                ch,
                face: font.name(),
            });
        }
        self.render_glyphs(x, y, text, color, font, scale);
        Ok(())
    }

    /// Draw whatever `font` can of `text`, leaving a blank cell for each
    /// missing character. Returns the number of characters skipped.
    pub fn draw_text_lossy(
        &mut self,
        x: u32,
        y: u32,
        text: &str,
        color: Rgba<u8>,
        font: &BitmapFont,
        scale: u32,
    ) -> Result<usize, DrawError> {
        self.check_origin(x, y)?;
        Ok(self.render_glyphs(x, y, text, color, font, scale))
    }

    /// Apply a gaussian blur in place. Returns `false` when the pass was skipped.
    pub fn blur(&mut self, sigma: f32) -> bool {
        if sigma.is_nan() || sigma <= 0.0 || self.width() == 0 || self.height() == 0 {
            debug!("Skipping blur (sigma={sigma}, {}x{})", self.width(), self.height());
            return false;
        }
        self.pixels = imageops::blur(&self.pixels, sigma);
        true
    }

    fn check_origin(&self, x: u32, y: u32) -> Result<(), DrawError> {
        if x >= self.width() || y >= self.height() {
            return Err(DrawError::OutOfBounds { x, y });
        }
        Ok(())
    }

    fn render_glyphs(
        &mut self,
        x: u32,
        y: u32,
        text: &str,
        color: Rgba<u8>,
        font: &BitmapFont,
        scale: u32,
    ) -> usize {
        let scale = scale.max(1);
        let mut skipped = 0;
        let mut pen_x = x;
        for ch in text.chars() {
            if pen_x >= self.width() {
                break;
            }
            match font.glyph(ch) {
                Some(glyph) => {
                    for (col, row) in glyph.cells() {
                        let px = pen_x.saturating_add(col * scale);
                        let py = y.saturating_add(row * scale);
                        for dy in 0..scale {
                            for dx in 0..scale {
                                self.blend_pixel(px.saturating_add(dx), py.saturating_add(dy), color);
                            }
                        }
                    }
                }
                None => skipped += 1,
            }
            pen_x = pen_x.saturating_add(GLYPH_ADVANCE * scale);
        }
        skipped
    }
}

/// Porter-Duff source-over on straight (non-premultiplied) RGBA.
fn source_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = u32::from(src[3]);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = u32::from(dst[3]);
    // Output alpha scaled by 255.
    let oa = sa * 255 + da * (255 - sa);
    if oa == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |s: u8, d: u8| -> u8 {
        let num = u32::from(s) * sa * 255 + u32::from(d) * da * (255 - sa);
        ((num + oa / 2) / oa) as u8
    };
    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        ((oa + 127) / 255) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_is_inclusive_and_clipped() {
        let mut c = Canvas::new(10, 10, BLACK);
        c.fill_rect(8, 8, 50, 50, BRIGHT_GREEN);
        assert_eq!(*c.pixel(8, 8).unwrap(), BRIGHT_GREEN);
        assert_eq!(*c.pixel(9, 9).unwrap(), BRIGHT_GREEN);
        assert_eq!(*c.pixel(7, 9).unwrap(), BLACK);
    }

    #[test]
    fn translucent_fill_blends_over_opaque() {
        let mut c = Canvas::new(2, 2, BLACK);
        c.fill_rect(0, 0, 1, 1, BAND_GREEN);
        let p = *c.pixel(0, 0).unwrap();
        assert_eq!(p[3], 255, "opaque stays opaque");
        assert_eq!(p[0], 0);
        assert!(p[1] > 20 && p[1] <= 30, "got {p:?}");
    }

    #[test]
    fn zero_alpha_is_noop() {
        let mut c = Canvas::new(1, 1, BLACK);
        c.blend_pixel(0, 0, Rgba([0, 255, 0, 0]));
        assert_eq!(*c.pixel(0, 0).unwrap(), BLACK);
    }

    #[test]
    fn draw_text_is_all_or_nothing() {
        let mut c = Canvas::new(100, 20, BLACK);
        let err = c
            .draw_text(0, 0, "abc ñ", BRIGHT_GREEN, BitmapFont::terminal(), 1)
            .unwrap_err();
        assert_eq!(
            err,
            DrawError::MissingGlyph {
                ch: 'ñ',
                face: "terminal"
            }
        );
        assert!(c.as_image().pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn draw_text_lights_pixels() {
        let mut c = Canvas::new(100, 20, BLACK);
        c.draw_text(2, 2, "H4X", BRIGHT_GREEN, BitmapFont::terminal(), 2)
            .unwrap();
        assert!(c.as_image().pixels().any(|p| *p == BRIGHT_GREEN));
    }

    #[test]
    fn lossy_draw_counts_skips() {
        let mut c = Canvas::new(200, 20, BLACK);
        let skipped = c
            .draw_text_lossy(0, 0, "🔐 L0pht 🔐", BRIGHT_GREEN, BitmapFont::terminal(), 1)
            .unwrap();
        assert_eq!(skipped, 2);
        assert!(c.as_image().pixels().any(|p| *p == BRIGHT_GREEN));
    }

    #[test]
    fn origin_outside_canvas_is_error() {
        let mut c = Canvas::new(10, 10, BLACK);
        let err = c
            .draw_text(10, 0, "a", BRIGHT_GREEN, BitmapFont::terminal(), 1)
            .unwrap_err();
        assert_eq!(err, DrawError::OutOfBounds { x: 10, y: 0 });
    }

    #[test]
    fn blur_keeps_dimensions_and_spreads_light() {
        let mut c = Canvas::new(9, 9, BLACK);
        c.blend_pixel(4, 4, BRIGHT_GREEN);
        assert!(c.blur(1.0));
        assert_eq!((c.width(), c.height()), (9, 9));
        assert!(c.pixel(4, 5).unwrap()[1] > 0);
        assert!(c.pixel(4, 4).unwrap()[1] < 255);
    }

    #[test]
    fn blur_skipped_for_zero_sigma() {
        let mut c = Canvas::new(4, 4, BLACK);
        assert!(!c.blur(0.0));
    }
}
