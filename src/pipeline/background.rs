//! Falling-code ("matrix") background.
//!
//! Columns sit every `pitch` pixels. Each column gets one streak: a random
//! length in `[5, height / 15]` and a random start row, with glyphs every
//! `pitch` pixels wrapping around the bottom edge. Glyph opacity fades
//! linearly from opaque at the head of the streak to transparent at its tail.
//! A light gaussian blur over the finished canvas gives the glow.

use crate::canvas::{Canvas, BLACK};
use crate::font::{BitmapFont, MATRIX_GLYPHS};
use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Side of the square drawn when no face can render a glyph.
pub const PLACEHOLDER_SIDE: u32 = 10;

static ALPHABET: Lazy<Vec<char>> = Lazy::new(|| MATRIX_GLYPHS.chars().collect());

/// The ten streak shades: `RGB(0, min(255, 40 + 20·i), 0)`.
pub fn green_shades() -> [[u8; 3]; 10] {
    std::array::from_fn(|i| [0, (40 + 20 * i).min(255) as u8, 0])
}

/// What happened while painting a background.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundStats {
    /// Glyph slots visited.
    pub glyphs: usize,
    /// Slots drawn with the fallback face.
    pub fallback_face: usize,
    /// Slots drawn as placeholder squares.
    pub placeholders: usize,
    /// Whether the glow pass ran.
    pub blurred: bool,
}

/// Painter for the falling-code background.
#[derive(Debug, Clone, Copy)]
pub struct MatrixBackground<'f> {
    pub pitch: u32,
    pub glyph_scale: u32,
    pub blur_sigma: f32,
    pub primary: &'f BitmapFont,
    pub fallback: &'f BitmapFont,
}

impl Default for MatrixBackground<'static> {
    fn default() -> Self {
        Self {
            pitch: 20,
            glyph_scale: 2,
            blur_sigma: 1.0,
            primary: BitmapFont::matrix(),
            fallback: BitmapFont::terminal(),
        }
    }
}

impl<'f> MatrixBackground<'f> {
    /// Paint a `width`×`height` opaque-black canvas with falling code.
    pub fn paint<R: Rng + ?Sized>(
        &self,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> (Canvas, BackgroundStats) {
        let mut canvas = Canvas::new(width, height, BLACK);
        let mut stats = BackgroundStats::default();
        if width == 0 || height == 0 {
            return (canvas, stats);
        }

        let shades = green_shades();
        let pitch = self.pitch.max(1);
        let max_len = (height / 15).max(1);
        let min_len = max_len.min(5);

        for x in (0..width).step_by(pitch as usize) {
            let length = rng.gen_range(min_len..=max_len);
            let offset = rng.gen_range(0..height);

            for slot in 0..length {
                let y = ((u64::from(offset) + u64::from(slot) * u64::from(pitch))
                    % u64::from(height)) as u32;
                let opacity = (255.0 * (1.0 - f64::from(slot) / f64::from(length))) as u8;
                let [r, g, b] = shades[rng.gen_range(0..shades.len())];
                let color = image::Rgba([r, g, b, opacity]);
                let glyph = ALPHABET[rng.gen_range(0..ALPHABET.len())];

                stats.glyphs += 1;
                self.draw_glyph(&mut canvas, x, y, glyph, color, &mut stats);
            }
        }

        stats.blurred = canvas.blur(self.blur_sigma);
        debug!(
            "Background {}x{}: {} glyphs, {} fallback, {} placeholders",
            width, height, stats.glyphs, stats.fallback_face, stats.placeholders
        );
        (canvas, stats)
    }

    fn draw_glyph(
        &self,
        canvas: &mut Canvas,
        x: u32,
        y: u32,
        glyph: char,
        color: image::Rgba<u8>,
        stats: &mut BackgroundStats,
    ) {
        let text = glyph.to_string();
        match canvas.draw_text(x, y, &text, color, self.primary, self.glyph_scale) {
            Ok(()) => return,
            Err(e) => debug!("Primary face failed at ({x}, {y}): {e}"),
        }

        match canvas.draw_text(x, y, &text, color, self.fallback, self.glyph_scale) {
            Ok(()) => stats.fallback_face += 1,
            Err(e) => {
                debug!("Fallback face failed at ({x}, {y}): {e}");
                canvas.fill_rect(
                    x,
                    y,
                    x.saturating_add(PLACEHOLDER_SIDE),
                    y.saturating_add(PLACEHOLDER_SIDE),
                    color,
                );
                stats.placeholders += 1;
            }
        }
    }
}

/// Paint a background with the default painter.
pub fn generate_background<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Canvas {
    let (canvas, stats) = MatrixBackground::default().paint(width, height, rng);
    if stats.placeholders > 0 {
        warn!("{} background glyphs drawn as placeholders", stats.placeholders);
    }
    canvas
}
