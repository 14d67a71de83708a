//! Configuration for manuscript generation.
//!
//! Every geometric constant of the manuscript (canvas width, line pitch,
//! band heights, text origin) and every random knob lives in
//! [`ManuscriptConfig`], built via [`ManuscriptConfigBuilder`]. The defaults
//! reproduce the classic museum layout: an 800 px wide canvas, 25 px line
//! pitch, a 40 px theme banner and a 30 px watermark footer.

use crate::error::ManuscriptError;
use serde::{Deserialize, Serialize};

/// Watermark drawn in the footer band of every manuscript.
pub const DEFAULT_WATERMARK: &str = "0M3G4 H4X0R H1ST0R1C4L MU53UM // N30-M4TR1X";

/// Configuration for a manuscript generation.
///
/// Built via [`ManuscriptConfig::builder()`] or using
/// [`ManuscriptConfig::default()`].
///
/// # Example
/// ```rust
/// use h4x0r_manuscript::ManuscriptConfig;
///
/// let config = ManuscriptConfig::builder()
///     .seed(1337)
///     .substitution_probability(1.0)
///     .build()
///     .unwrap();
/// assert_eq!(config.width, 800);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManuscriptConfig {
    /// Canvas width in pixels. Default: 800.
    pub width: u32,

    /// Minimum canvas height in pixels. Default: 400.
    ///
    /// The height is `max(min_height, line_count * line_height + 200)`.
    pub min_height: u32,

    /// Optional cap on the computed canvas height. Default: `None`.
    ///
    /// When set, exceeding it is a [`ManuscriptError::CanvasTooLarge`],
    /// which the compositor turns into the fallback error manuscript.
    pub max_height: Option<u32>,

    /// Vertical advance after a drawn text line. Default: 25.
    pub line_height: u32,

    /// Vertical advance for a blank line. Default: 20.
    pub blank_line_advance: u32,

    /// Left edge of the text block. Default: 20.
    pub text_left: u32,

    /// Baseline cursor of the first text line. Default: 60.
    pub text_top: u32,

    /// Height of the theme banner band. Default: 40.
    pub banner_height: u32,

    /// Height of the watermark footer band. Default: 30.
    pub footer_height: u32,

    /// Grid pitch of the falling-code background, both between columns
    /// and between glyphs of one streak. Default: 20.
    pub column_step: u32,

    /// Pixel size of one font unit for text, banner and footer. Default: 2.
    pub text_scale: u32,

    /// Probability that one leet rule fires for a whole call. Default: 0.7.
    pub substitution_probability: f64,

    /// Gaussian blur sigma applied to the background. Default: 1.0.
    ///
    /// Zero disables the glow pass.
    pub blur_sigma: f32,

    /// Footer watermark text.
    pub watermark: String,

    /// Seed for the random source. `None` draws from OS entropy.
    pub seed: Option<u64>,

    /// Enable tables and strikethrough in the markdown renderer. Default: false.
    pub markdown_extensions: bool,
}

impl Default for ManuscriptConfig {
    fn default() -> Self {
        Self {
            width: 800,
            min_height: 400,
            max_height: None,
            line_height: 25,
            blank_line_advance: 20,
            text_left: 20,
            text_top: 60,
            banner_height: 40,
            footer_height: 30,
            column_step: 20,
            text_scale: 2,
            substitution_probability: 0.7,
            blur_sigma: 1.0,
            watermark: DEFAULT_WATERMARK.to_string(),
            seed: None,
            markdown_extensions: false,
        }
    }
}

impl ManuscriptConfig {
    /// Create a new builder for `ManuscriptConfig`.
    pub fn builder() -> ManuscriptConfigBuilder {
        ManuscriptConfigBuilder {
            config: Self::default(),
        }
    }

    /// Canvas height for a text of `line_count` newline-delimited lines.
    pub fn canvas_height(&self, line_count: usize) -> u32 {
        let lines = u32::try_from(line_count).unwrap_or(u32::MAX);
        lines
            .saturating_mul(self.line_height)
            .saturating_add(200)
            .max(self.min_height)
    }
}

/// Builder for [`ManuscriptConfig`].
#[derive(Debug)]
pub struct ManuscriptConfigBuilder {
    config: ManuscriptConfig,
}

impl ManuscriptConfigBuilder {
    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn min_height(mut self, px: u32) -> Self {
        self.config.min_height = px;
        self
    }

    pub fn max_height(mut self, px: u32) -> Self {
        self.config.max_height = Some(px);
        self
    }

    pub fn line_height(mut self, px: u32) -> Self {
        self.config.line_height = px.max(1);
        self
    }

    pub fn blank_line_advance(mut self, px: u32) -> Self {
        self.config.blank_line_advance = px;
        self
    }

    pub fn text_origin(mut self, left: u32, top: u32) -> Self {
        self.config.text_left = left;
        self.config.text_top = top;
        self
    }

    pub fn banner_height(mut self, px: u32) -> Self {
        self.config.banner_height = px;
        self
    }

    pub fn footer_height(mut self, px: u32) -> Self {
        self.config.footer_height = px;
        self
    }

    pub fn column_step(mut self, px: u32) -> Self {
        self.config.column_step = px.max(1);
        self
    }

    pub fn text_scale(mut self, scale: u32) -> Self {
        self.config.text_scale = scale.clamp(1, 4);
        self
    }

    pub fn substitution_probability(mut self, p: f64) -> Self {
        self.config.substitution_probability = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        self
    }

    pub fn blur_sigma(mut self, sigma: f32) -> Self {
        self.config.blur_sigma = sigma.max(0.0);
        self
    }

    pub fn watermark(mut self, text: impl Into<String>) -> Self {
        self.config.watermark = text.into();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn markdown_extensions(mut self, v: bool) -> Self {
        self.config.markdown_extensions = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ManuscriptConfig, ManuscriptError> {
        let c = &self.config;
        if c.width == 0 {
            return Err(ManuscriptError::InvalidConfig(
                "Canvas width must be ≥ 1".into(),
            ));
        }
        if c.min_height < c.banner_height.saturating_add(c.footer_height) {
            return Err(ManuscriptError::InvalidConfig(format!(
                "Minimum height {} cannot fit a {}px banner and a {}px footer",
                c.min_height, c.banner_height, c.footer_height
            )));
        }
        if let Some(max) = c.max_height {
            if max < c.min_height {
                return Err(ManuscriptError::InvalidConfig(format!(
                    "Maximum height {} is below minimum height {}",
                    max, c.min_height
                )));
            }
        }
        Ok(self.config)
    }
}
