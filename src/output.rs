//! Result types returned by composition.

use crate::pipeline::background::BackgroundStats;
use crate::pipeline::overlay::BandOutcome;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

/// A finished manuscript: the HTML body and its PNG rendition.
///
/// When generation failed, `html` and `image_bytes` hold the error pair and
/// `degraded` carries the failure message.
#[derive(Debug, Clone)]
pub struct RenderedManuscript {
    pub html: String,
    pub image_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub degraded: Option<String>,
    pub stats: ManuscriptStats,
}

/// What happened while drawing one manuscript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManuscriptStats {
    /// Non-blank lines drawn as text.
    pub lines_drawn: usize,
    /// Whitespace-only lines.
    pub blank_lines: usize,
    /// Lines replaced by a placeholder bar.
    pub placeholder_lines: usize,
    /// Characters in drawn lines left blank for lack of a glyph.
    pub skipped_glyphs: usize,
    pub background: BackgroundStats,
    /// `None` when no theme was applied.
    pub banner: Option<BandOutcome>,
    /// `None` only for the error manuscript.
    pub footer: Option<BandOutcome>,
}

impl RenderedManuscript {
    /// `true` when the normal pipeline produced this manuscript.
    pub fn is_ok(&self) -> bool {
        self.degraded.is_none()
    }

    /// The bare `(html, png)` pair.
    pub fn into_pair(self) -> (String, Vec<u8>) {
        (self.html, self.image_bytes)
    }

    /// JSON document with the PNG as base64.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "html": self.html,
            "image_png_base64": STANDARD.encode(&self.image_bytes),
            "width": self.width,
            "height": self.height,
            "degraded": self.degraded,
            "stats": self.stats,
        })
    }
}
