//! Error types for the h4x0r-manuscript library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ManuscriptError`]: **Fatal for one attempt**: the manuscript cannot
//!   be produced as requested (renderer failure, PNG encoding failure, a
//!   canvas larger than the configured cap). [`crate::Compositor::compose`]
//!   never returns it; it is turned into the fallback error pair instead.
//!   Only `Compositor::try_compose` and the file and registry helpers hand
//!   it back to callers.
//!
//! * [`DrawError`]: **Non-fatal**: one glyph, line or band could not be
//!   drawn. Every call site has a defined fallback (default face, placeholder
//!   rectangle) and generation carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors of the manuscript pipeline.
#[derive(Debug, Error)]
pub enum ManuscriptError {
    // ── Pipeline errors ───────────────────────────────────────────────────
    /// Markdown conversion failed.
    #[error("Markdown rendering failed: {0}")]
    Render(String),

    /// Final PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// Computed canvas height exceeds the configured cap.
    #[error("Canvas height {height}px exceeds the {max}px limit; shorten the text")]
    CanvasTooLarge { height: u32, max: u32 },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Theme registry JSON could not be read or parsed.
    #[error("Theme registry '{origin}' is invalid: {detail}")]
    ThemeRegistry { origin: String, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal failure of a single draw call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// The face has no glyph for this character.
    #[error("face '{face}' has no glyph for {ch:?}")]
    MissingGlyph { ch: char, face: &'static str },

    /// The draw origin lies entirely outside the canvas.
    #[error("draw origin ({x}, {y}) is outside the canvas")]
    OutOfBounds { x: u32, y: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_too_large_display() {
        let e = ManuscriptError::CanvasTooLarge {
            height: 30_200,
            max: 16_384,
        };
        let msg = e.to_string();
        assert!(msg.contains("30200px"), "got: {msg}");
        assert!(msg.contains("16384px"), "got: {msg}");
    }

    #[test]
    fn missing_glyph_display() {
        let e = DrawError::MissingGlyph {
            ch: 'ñ',
            face: "terminal",
        };
        assert!(e.to_string().contains("terminal"));
        assert!(e.to_string().contains("'ñ'"));
    }

    #[test]
    fn theme_registry_display() {
        let e = ManuscriptError::ThemeRegistry {
            origin: "themes.json".into(),
            detail: "expected value at line 1".into(),
        };
        assert!(e.to_string().contains("themes.json"));
        assert!(e.to_string().contains("line 1"));
    }
}
