//! Banner, text lines and footer drawn over the background.
//!
//! Each element has its own failure path so that one bad glyph never costs
//! the whole image:
//!
//! | element | on missing glyph | on misplaced origin                  |
//! |---------|------------------|--------------------------------------|
//! | banner  | cell left blank  | band only                            |
//! | line    | cell left blank  | green bar `chars × 8` px, 5 px tall  |
//! | footer  | bar across band  | bar across band                      |

use crate::canvas::{Canvas, BAND_GREEN, BRIGHT_GREEN};
use crate::config::ManuscriptConfig;
use crate::font::BitmapFont;
use crate::theme::GroupTheme;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Decorative tokens prefixed to every non-blank line.
pub const LINE_PREFIXES: [&str; 6] = ["[+] ", ">>> ", "## ", "/*", "$> ", "h4x: "];

/// Inset of banner and footer text from the band's top-left corner.
const BAND_TEXT_LEFT: u32 = 10;
const BANNER_TEXT_TOP: u32 = 10;
const FOOTER_TEXT_TOP: u32 = 5;
/// Approximate pixel width per character of a placeholder bar.
const PLACEHOLDER_CHAR_WIDTH: u32 = 8;
const LINE_PLACEHOLDER_HEIGHT: u32 = 5;
const FOOTER_PLACEHOLDER_HEIGHT: u32 = 10;

/// How a banner or footer band came out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandOutcome {
    /// Text drawn in full.
    Drawn,
    /// Some glyphs could not be drawn and were left blank.
    Degraded,
    /// Text replaced by a placeholder bar (or nothing, if even that was off-canvas).
    Placeholder,
}

/// Counters for the text block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStats {
    pub drawn: usize,
    pub blank: usize,
    pub placeholders: usize,
    /// Characters left blank because the face has no glyph for them.
    pub skipped_glyphs: usize,
}

/// Fill the banner band and write `"<emoji> <name> | <era> | <emoji>"` in it.
pub fn draw_banner(canvas: &mut Canvas, theme: &GroupTheme, config: &ManuscriptConfig) -> BandOutcome {
    let width = canvas.width();
    canvas.fill_rect(0, 0, width, config.banner_height, BAND_GREEN);

    let text = theme.banner_text();
    let face = BitmapFont::terminal();
    let scale = config.text_scale;
    match canvas.draw_text(BAND_TEXT_LEFT, BANNER_TEXT_TOP, &text, BRIGHT_GREEN, face, scale) {
        Ok(()) => BandOutcome::Drawn,
        Err(e) => {
            debug!("Banner '{text}' needs best-effort placement: {e}");
            match canvas.draw_text_lossy(BAND_TEXT_LEFT, BANNER_TEXT_TOP, &text, BRIGHT_GREEN, face, scale) {
                Ok(skipped) => {
                    debug!("Banner drawn with {skipped} blank glyphs");
                    BandOutcome::Degraded
                }
                Err(e) => {
                    warn!("Banner text not drawn: {e}");
                    BandOutcome::Placeholder
                }
            }
        }
    }
}

/// Draw each line of `text` with a random decorative prefix.
///
/// Characters the terminal face lacks (emoji, accents) are left as blank
/// cells. A line whose origin cannot be placed on the canvas gets a
/// placeholder bar instead. Blank lines advance the cursor by
/// `blank_line_advance`; every other line advances by `line_height`.
pub fn draw_lines<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    text: &str,
    config: &ManuscriptConfig,
    rng: &mut R,
) -> LineStats {
    let mut stats = LineStats::default();
    let face = BitmapFont::terminal();
    let mut y = config.text_top;

    for line in text.split('\n') {
        if line.trim().is_empty() {
            y = y.saturating_add(config.blank_line_advance);
            stats.blank += 1;
            continue;
        }

        let prefix = LINE_PREFIXES[rng.gen_range(0..LINE_PREFIXES.len())];
        let decorated = format!("{prefix}{line}");

        match canvas.draw_text_lossy(config.text_left, y, &decorated, BRIGHT_GREEN, face, config.text_scale) {
            Ok(skipped) => {
                if skipped > 0 {
                    debug!("Line at y={y} drawn with {skipped} blank glyphs");
                }
                stats.skipped_glyphs += skipped;
                stats.drawn += 1;
            }
            Err(e) => {
                warn!("Line at y={y} replaced by placeholder: {e}");
                let chars = u32::try_from(decorated.chars().count()).unwrap_or(u32::MAX);
                let right = config
                    .text_left
                    .saturating_add(chars.saturating_mul(PLACEHOLDER_CHAR_WIDTH))
                    .min(canvas.width().saturating_sub(config.text_left));
                canvas.fill_rect(
                    config.text_left,
                    y,
                    right,
                    y.saturating_add(LINE_PLACEHOLDER_HEIGHT),
                    BRIGHT_GREEN,
                );
                stats.placeholders += 1;
            }
        }

        y = y.saturating_add(config.line_height);
    }

    stats
}

/// Fill the footer band and write the watermark in it.
pub fn draw_footer(canvas: &mut Canvas, config: &ManuscriptConfig) -> BandOutcome {
    let (width, height) = (canvas.width(), canvas.height());
    let top = height.saturating_sub(config.footer_height);
    canvas.fill_rect(0, top, width, height, BAND_GREEN);

    let text_y = top.saturating_add(FOOTER_TEXT_TOP);
    match canvas.draw_text(
        BAND_TEXT_LEFT,
        text_y,
        &config.watermark,
        BRIGHT_GREEN,
        BitmapFont::terminal(),
        config.text_scale,
    ) {
        Ok(()) => BandOutcome::Drawn,
        Err(e) => {
            warn!("Watermark replaced by placeholder: {e}");
            canvas.fill_rect(
                BAND_TEXT_LEFT,
                text_y,
                width.saturating_sub(BAND_TEXT_LEFT),
                text_y.saturating_add(FOOTER_PLACEHOLDER_HEIGHT),
                BRIGHT_GREEN,
            );
            BandOutcome::Placeholder
        }
    }
}
