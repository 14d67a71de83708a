//! # h4x0r-manuscript
//!
//! Turn markdown into a "hacker manuscript": the rendered HTML plus a PNG
//! showing the text in leet-speak over a falling-code background, with an
//! optional banner naming a historical hacker group.
//!
//! ## Pipeline Overview
//!
//! ```text
//! markdown
//!  │
//!  ├─ 1. Render      CommonMark → HTML (returned as-is)
//!  ├─ 2. Strip       HTML → plain text, one line per source line
//!  ├─ 3. Leet        randomised a→4, e→3, ck→x … substitutions
//!  ├─ 4. Background  matrix streaks on black, light blur
//!  ├─ 5. Overlay     group banner, prefixed text lines, watermark footer
//!  └─ 6. Encode      PNG bytes
//! ```
//!
//! Generation never fails: on any error the caller receives an error
//! manuscript (HTML notice plus an 800×300 black image with red text).
//!
//! ## Quick Start
//!
//! ```rust
//! use h4x0r_manuscript::{Compositor, ManuscriptConfig, ManuscriptRequest, ThemeRegistry};
//!
//! let config = ManuscriptConfig::builder().seed(1337).build().unwrap();
//! let compositor = Compositor::new(config, ThemeRegistry::builtin());
//!
//! let request = ManuscriptRequest::new("# L0pht\n\nWe could shut down the Internet").with_theme("L0PHT");
//! let manuscript = compositor.compose(&request);
//! assert!(manuscript.is_ok());
//! assert_eq!(manuscript.width, 800);
//! let (html, png) = manuscript.into_pair();
//! assert!(html.starts_with("<h1>"));
//! assert!(!png.is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `h4x0r` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! h4x0r-manuscript = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod canvas;
pub mod compose;
pub mod config;
pub mod error;
pub mod font;
pub mod output;
pub mod pipeline;
pub mod presets;
pub mod theme;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use compose::{compose, write_manuscript, Compositor, ManuscriptRequest};
pub use config::{ManuscriptConfig, ManuscriptConfigBuilder, DEFAULT_WATERMARK};
pub use error::{DrawError, ManuscriptError};
pub use output::{ManuscriptStats, RenderedManuscript};
pub use pipeline::overlay::BandOutcome;
pub use presets::{preset, PRESET_NAMES};
pub use theme::{GroupTheme, ThemeRegistry};
