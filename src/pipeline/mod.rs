//! Pipeline stages for manuscript composition.
//!
//! Each submodule implements one step and can be tested on its own.
//!
//! ## Data Flow
//!
//! ```text
//! markdown ──▶ strip ──▶ leet ──▶ background ──▶ overlay ──▶ encode
//!   (HTML)     (plain)   (4 3)    (matrix)       (bands)     (PNG)
//!                                                               │
//!                   any failure ───────────────────────▶ fallback
//! ```
//!
//! 1. [`markdown`]   render CommonMark to HTML and strip tags for drawing
//! 2. [`leet`]       per-call randomised character substitutions
//! 3. [`background`] falling-code canvas with a light glow
//! 4. [`overlay`]    banner, decorated lines and watermark footer
//! 5. [`encode`]     flatten to RGB and PNG-encode
//! 6. [`fallback`]   fixed error manuscript used when anything above fails

pub mod background;
pub mod encode;
pub mod fallback;
pub mod leet;
pub mod markdown;
pub mod overlay;
