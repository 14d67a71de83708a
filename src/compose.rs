//! Manuscript composition entry points.
//!
//! [`Compositor::compose`] runs the whole pipeline for one request and
//! **never fails**: any [`ManuscriptError`] along the way is logged and turned
//! into the error manuscript from [`crate::pipeline::fallback`]. Use
//! [`RenderedManuscript::degraded`] to tell the two apart.
//!
//! Random draws happen in a fixed order (leet coins, background streaks,
//! line prefixes) and never depend on the theme, so one seed gives the same
//! background and text whether or not a banner is drawn.

use crate::config::ManuscriptConfig;
use crate::error::ManuscriptError;
use crate::output::{ManuscriptStats, RenderedManuscript};
use crate::pipeline::background::MatrixBackground;
use crate::pipeline::fallback::{self, ERROR_HEIGHT, ERROR_WIDTH};
use crate::pipeline::{encode, leet, markdown, overlay};
use crate::theme::{GroupTheme, ThemeRegistry};
use futures::stream::{self, StreamExt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One manuscript to generate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManuscriptRequest {
    pub markdown: String,
    /// Key into the compositor's [`ThemeRegistry`]. Unknown keys mean no banner.
    pub theme: Option<String>,
}

impl ManuscriptRequest {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            theme: None,
        }
    }

    pub fn with_theme(mut self, key: impl Into<String>) -> Self {
        self.theme = Some(key.into());
        self
    }
}

/// Generates manuscripts from a fixed config and theme registry.
///
/// Cheap to clone; config and registry are shared behind [`Arc`].
#[derive(Debug, Clone)]
pub struct Compositor {
    config: Arc<ManuscriptConfig>,
    themes: Arc<ThemeRegistry>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(ManuscriptConfig::default(), ThemeRegistry::builtin())
    }
}

impl Compositor {
    pub fn new(config: ManuscriptConfig, themes: ThemeRegistry) -> Self {
        Self::with_shared(Arc::new(config), Arc::new(themes))
    }

    pub fn with_shared(config: Arc<ManuscriptConfig>, themes: Arc<ThemeRegistry>) -> Self {
        Self { config, themes }
    }

    pub fn config(&self) -> &ManuscriptConfig {
        &self.config
    }

    pub fn themes(&self) -> &ThemeRegistry {
        &self.themes
    }

    /// Compose one manuscript, seeding from `config.seed` or from entropy.
    pub fn compose(&self, request: &ManuscriptRequest) -> RenderedManuscript {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.compose_with_rng(request, &mut rng)
    }

    /// Compose one manuscript drawing randomness from `rng`.
    pub fn compose_with_rng<R: Rng + ?Sized>(
        &self,
        request: &ManuscriptRequest,
        rng: &mut R,
    ) -> RenderedManuscript {
        let theme = self.themes.resolve(request.theme.as_deref());
        if let (Some(key), None) = (request.theme.as_deref(), theme) {
            debug!("Unknown theme '{key}', composing without banner");
        }
        self.compose_themed(&request.markdown, theme, rng)
    }

    /// Compose with an explicit theme, bypassing the registry.
    pub fn compose_themed<R: Rng + ?Sized>(
        &self,
        markdown: &str,
        theme: Option<&GroupTheme>,
        rng: &mut R,
    ) -> RenderedManuscript {
        match self.try_compose(markdown, theme, rng) {
            Ok(manuscript) => manuscript,
            Err(e) => {
                warn!("Manuscript generation failed, returning error manuscript: {e}");
                error_manuscript(&e)
            }
        }
    }

    /// Run the pipeline, surfacing the first fatal error.
    pub fn try_compose<R: Rng + ?Sized>(
        &self,
        markdown: &str,
        theme: Option<&GroupTheme>,
        rng: &mut R,
    ) -> Result<RenderedManuscript, ManuscriptError> {
        let config = &*self.config;
        info!("Composing manuscript from {} bytes of markdown", markdown.len());

        // ── Step 1: Render and strip ─────────────────────────────────────
        let html = markdown::render_html(markdown, config.markdown_extensions)?;
        let plain = markdown::strip_tags(&html);

        // ── Step 2: Leet transform ───────────────────────────────────────
        let text = leet::transform(&plain, config.substitution_probability, rng);

        // ── Step 3: Size the canvas ──────────────────────────────────────
        let line_count = text.split('\n').count();
        let height = config.canvas_height(line_count);
        if let Some(max) = config.max_height.filter(|&max| height > max) {
            return Err(ManuscriptError::CanvasTooLarge { height, max });
        }
        debug!("{} lines → {}x{} canvas", line_count, config.width, height);

        // ── Step 4: Background ───────────────────────────────────────────
        let painter = MatrixBackground {
            pitch: config.column_step,
            glyph_scale: config.text_scale,
            blur_sigma: config.blur_sigma,
            ..MatrixBackground::default()
        };
        let (mut canvas, background) = painter.paint(config.width, height, rng);
        if background.placeholders > 0 {
            warn!("{} background glyphs drawn as placeholders", background.placeholders);
        }

        // ── Step 5: Overlays ─────────────────────────────────────────────
        let banner = theme.map(|t| overlay::draw_banner(&mut canvas, t, config));
        let lines = overlay::draw_lines(&mut canvas, &text, config, rng);
        let footer = overlay::draw_footer(&mut canvas, config);

        // ── Step 6: Encode ───────────────────────────────────────────────
        let (width, height) = (canvas.width(), canvas.height());
        let image_bytes = encode::encode_png(canvas)?;

        info!(
            "Manuscript {}x{}: {} lines drawn, {} placeholders, {} bytes PNG",
            width,
            height,
            lines.drawn,
            lines.placeholders,
            image_bytes.len()
        );

        Ok(RenderedManuscript {
            html,
            image_bytes,
            width,
            height,
            degraded: None,
            stats: ManuscriptStats {
                lines_drawn: lines.drawn,
                blank_lines: lines.blank,
                placeholder_lines: lines.placeholders,
                skipped_glyphs: lines.skipped_glyphs,
                background,
                banner,
                footer: Some(footer),
            },
        })
    }

    /// [`Compositor::compose`] on the blocking thread pool.
    pub async fn compose_async(&self, request: ManuscriptRequest) -> RenderedManuscript {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.compose(&request))
            .await
            .unwrap_or_else(|e| {
                let e = ManuscriptError::Internal(format!("Compose task panicked: {e}"));
                warn!("{e}");
                error_manuscript(&e)
            })
    }

    /// Compose many requests, at most `concurrency` at a time.
    ///
    /// Results come back in the order of `requests`.
    pub async fn compose_batch(
        &self,
        requests: Vec<ManuscriptRequest>,
        concurrency: usize,
    ) -> Vec<RenderedManuscript> {
        let total = requests.len();
        let mut results: Vec<(usize, RenderedManuscript)> =
            stream::iter(requests.into_iter().enumerate().map(|(idx, request)| {
                let this = self.clone();
                async move { (idx, this.compose_async(request).await) }
            }))
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        results.sort_by_key(|(idx, _)| *idx);
        let degraded = results.iter().filter(|(_, m)| !m.is_ok()).count();
        info!("Batch complete: {}/{} manuscripts ok", total - degraded, total);
        results.into_iter().map(|(_, m)| m).collect()
    }
}

/// Compose `markdown` with default settings and return the `(html, png)` pair.
///
/// Never fails; see the module docs.
pub fn compose(markdown: &str, theme: Option<&GroupTheme>) -> (String, Vec<u8>) {
    Compositor::default()
        .compose_themed(markdown, theme, &mut StdRng::from_entropy())
        .into_pair()
}

fn error_manuscript(e: &ManuscriptError) -> RenderedManuscript {
    let message = e.to_string();
    let (html, image_bytes) = fallback::error_manuscript(&message);
    RenderedManuscript {
        html,
        image_bytes,
        width: ERROR_WIDTH,
        height: ERROR_HEIGHT,
        degraded: Some(message),
        stats: ManuscriptStats::default(),
    }
}

/// Write `<stem>.html` and `<stem>.png` into `dir`, creating it if needed.
///
/// Each file is written to a temporary sibling first and then renamed, so a
/// reader never sees a partial file. Returns the two final paths.
pub async fn write_manuscript(
    manuscript: &RenderedManuscript,
    dir: impl AsRef<Path>,
    stem: &str,
) -> Result<(PathBuf, PathBuf), ManuscriptError> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ManuscriptError::OutputWriteFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;

    let html_path = dir.join(format!("{stem}.html"));
    let png_path = dir.join(format!("{stem}.png"));
    write_atomic(&html_path, manuscript.html.as_bytes()).await?;
    write_atomic(&png_path, &manuscript.image_bytes).await?;

    debug!("Wrote {} and {}", html_path.display(), png_path.display());
    Ok((html_path, png_path))
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ManuscriptError> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    tokio::fs::write(&tmp_path, bytes)
        .await
        .map_err(|e| ManuscriptError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| ManuscriptError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Compositor {
        let config = ManuscriptConfig::builder().seed(seed).build().unwrap();
        Compositor::new(config, ThemeRegistry::builtin())
    }

    #[test]
    fn stats_count_lines() {
        let m = seeded(1).compose(&ManuscriptRequest::new("# Title\n\nbody text"));
        assert!(m.is_ok());
        // "Title\nbody text\n" → two drawn lines and the trailing empty one.
        assert_eq!(m.stats.lines_drawn, 2);
        assert_eq!(m.stats.blank_lines, 1);
        assert_eq!(m.stats.placeholder_lines, 0);
        assert_eq!(m.stats.banner, None);
        assert_eq!(m.stats.footer, Some(overlay::BandOutcome::Drawn));
    }

    #[test]
    fn same_seed_same_bytes() {
        let req = ManuscriptRequest::new("hello *world*").with_theme("CDC");
        let a = seeded(42).compose(&req);
        let b = seeded(42).compose(&req);
        assert_eq!(a.image_bytes, b.image_bytes);
        assert_eq!(a.html, b.html);
    }

    #[test]
    fn unknown_theme_equals_no_theme() {
        let plain = seeded(9).compose(&ManuscriptRequest::new("text"));
        let unknown = seeded(9).compose(&ManuscriptRequest::new("text").with_theme("nope"));
        assert_eq!(plain.image_bytes, unknown.image_bytes);
        assert_eq!(unknown.stats.banner, None);
    }

    #[test]
    fn oversize_canvas_falls_back() {
        let config = ManuscriptConfig::builder()
            .max_height(500)
            .seed(0)
            .build()
            .unwrap();
        let compositor = Compositor::new(config, ThemeRegistry::builtin());
        let markdown = "line\n\n".repeat(50);
        let m = compositor.compose(&ManuscriptRequest::new(markdown));
        assert!(!m.is_ok());
        assert_eq!((m.width, m.height), (ERROR_WIDTH, ERROR_HEIGHT));
        assert!(m.html.starts_with("<h1>Error generating manuscript</h1>"));
        assert!(m.degraded.unwrap().contains("500px"));
    }

    #[test]
    fn free_compose_returns_pair() {
        let (html, png) = compose("# Hi", None);
        assert_eq!(html, "<h1>Hi</h1>\n");
        assert!(encode::is_png(&png));
    }
}
