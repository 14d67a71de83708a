//! Integration tests for manuscript composition.
//!
//! All tests are offline and seeded; output PNGs are decoded with `image`
//! and checked pixel by pixel where layout matters.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use h4x0r_manuscript::{
    compose, preset, write_manuscript, BandOutcome, Compositor, GroupTheme, ManuscriptConfig,
    ManuscriptRequest, ThemeRegistry, PRESET_NAMES,
};
use image::RgbImage;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn compositor(seed: u64) -> Compositor {
    let config = ManuscriptConfig::builder().seed(seed).build().unwrap();
    Compositor::new(config, ThemeRegistry::builtin())
}

fn decode(png: &[u8]) -> RgbImage {
    image::load_from_memory(png)
        .expect("output must be a decodable PNG")
        .to_rgb8()
}

/// Markdown whose stripped text has exactly `n` newline-delimited lines.
fn markdown_with_lines(n: usize) -> String {
    // One paragraph of n-1 lines; the closing `</p>\n` adds the last (empty) one.
    (1..n)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn rows_all_green(img: &RgbImage, rows: std::ops::Range<u32>) -> bool {
    rows.into_iter()
        .all(|y| (0..img.width()).all(|x| img.get_pixel(x, y)[1] >= 25))
}

// ── Canvas sizing ────────────────────────────────────────────────────────────

#[test]
fn three_lines_use_minimum_height() {
    let m = compositor(1).compose(&ManuscriptRequest::new(markdown_with_lines(3)));
    assert!(m.is_ok());
    assert_eq!((m.width, m.height), (800, 400));
    assert_eq!(decode(&m.image_bytes).dimensions(), (800, 400));
}

#[test]
fn twenty_lines_grow_the_canvas() {
    let m = compositor(1).compose(&ManuscriptRequest::new(markdown_with_lines(20)));
    assert_eq!(m.height, 700);
    assert_eq!(decode(&m.image_bytes).dimensions(), (800, 700));
    assert_eq!(m.stats.lines_drawn, 19);
}

#[test]
fn custom_width_is_honoured() {
    let config = ManuscriptConfig::builder().width(320).seed(4).build().unwrap();
    let m = Compositor::new(config, ThemeRegistry::builtin())
        .compose(&ManuscriptRequest::new("narrow"));
    assert_eq!(decode(&m.image_bytes).dimensions(), (320, 400));
}

// ── Bands ────────────────────────────────────────────────────────────────────

#[test]
fn banner_present_only_with_a_known_theme() {
    let themed = compositor(7).compose(&ManuscriptRequest::new("# MOD").with_theme("MOD"));
    let plain = compositor(7).compose(&ManuscriptRequest::new("# MOD"));

    assert!(rows_all_green(&decode(&themed.image_bytes), 0..41));
    assert!(!rows_all_green(&decode(&plain.image_bytes), 0..41));
    assert_eq!(themed.stats.banner, Some(BandOutcome::Degraded));
    assert_eq!(plain.stats.banner, None);
}

#[test]
fn unknown_theme_matches_no_theme_bytes() {
    let plain = compositor(3).compose(&ManuscriptRequest::new("text"));
    let unknown = compositor(3).compose(&ManuscriptRequest::new("text").with_theme("Anonymous"));
    assert_eq!(plain.image_bytes, unknown.image_bytes);
}

#[test]
fn ascii_theme_banner_is_fully_drawn() {
    let themes: ThemeRegistry = [(
        "2600".to_string(),
        GroupTheme::new("#", "2600 Magazine", "1984-"),
    )]
    .into_iter()
    .collect();
    let config = ManuscriptConfig::builder().seed(5).build().unwrap();
    let m = Compositor::new(config, themes)
        .compose(&ManuscriptRequest::new("hello").with_theme("2600"));
    assert_eq!(m.stats.banner, Some(BandOutcome::Drawn));
}

#[test]
fn footer_band_always_present() {
    for (seed, theme) in [(1, None), (2, Some("LOD")), (3, Some("nope"))] {
        let mut request = ManuscriptRequest::new(markdown_with_lines(12));
        if let Some(key) = theme {
            request = request.with_theme(key);
        }
        let m = compositor(seed).compose(&request);
        let img = decode(&m.image_bytes);
        let h = img.height();
        assert!(rows_all_green(&img, h - 30..h), "seed {seed}");
        assert_eq!(m.stats.footer, Some(BandOutcome::Drawn));
    }
}

// ── Never fails ──────────────────────────────────────────────────────────────

#[test]
fn malformed_input_always_yields_a_pair() {
    let long_line = "x".repeat(20_000);
    let inputs = [
        "",
        "<div><span><b>",
        "\0\0\0 null bytes",
        "   \n\t\n   ",
        "**unclosed *emphasis",
        "```\nunterminated fence",
        "[link](<broken",
        long_line.as_str(),
        "ñandú, żółw, 東京 🔐",
    ];
    for md in inputs {
        let (html, png) = compose(md, None);
        assert!(!png.is_empty(), "empty png for {md:?}");
        assert!(!html.is_empty() || md.trim().is_empty(), "empty html for {md:?}");
        decode(&png);
    }
}

#[test]
fn non_ascii_lines_keep_their_ascii_glyphs() {
    let m = compositor(2).compose(&ManuscriptRequest::new("żółw\n\nplain"));
    assert!(m.is_ok());
    assert_eq!(m.stats.placeholder_lines, 0);
    assert_eq!(m.stats.lines_drawn, 2);
    // ż ó ł; the leet pass only rewrites ASCII letters.
    assert_eq!(m.stats.skipped_glyphs, 3);
}

#[test]
fn accented_portuguese_is_drawn_not_barred() {
    let m = compositor(2).compose(&ManuscriptRequest::new("Operação Falcão Negro\n\nCafé — naïve"));
    assert!(m.is_ok());
    assert_eq!(m.stats.lines_drawn, 2);
    assert_eq!(m.stats.placeholder_lines, 0);
    // Six characters outside printable ASCII.
    assert_eq!(m.stats.skipped_glyphs, 6);
}

#[test]
fn long_text_grows_without_a_default_cap() {
    let m = compositor(0).compose(&ManuscriptRequest::new(markdown_with_lines(700)));
    assert!(m.is_ok(), "{:?}", m.degraded);
    assert_eq!((m.width, m.height), (800, 700 * 25 + 200));
    assert_eq!(decode(&m.image_bytes).dimensions(), (800, 17_700));
}

#[test]
fn oversized_text_returns_error_manuscript() {
    let config = ManuscriptConfig::builder()
        .seed(0)
        .max_height(16_384)
        .build()
        .unwrap();
    let m = Compositor::new(config, ThemeRegistry::builtin())
        .compose(&ManuscriptRequest::new(markdown_with_lines(700)));
    assert!(!m.is_ok());
    assert!(m.html.starts_with("<h1>Error generating manuscript</h1><p>"));
    assert!(m.html.contains("16384px"));

    let img = decode(&m.image_bytes);
    assert_eq!(img.dimensions(), (800, 300));
    assert!(img.pixels().any(|p| p.0 == [255, 0, 0]));
}

#[test]
fn every_preset_composes_cleanly() {
    for name in PRESET_NAMES {
        let markdown = preset(name).unwrap();
        let m = compositor(1998).compose(&ManuscriptRequest::new(markdown).with_theme("L0PHT"));
        assert!(m.is_ok(), "{name}: {:?}", m.degraded);
        assert!(m.html.contains("<h1>"), "{name}");
        assert_eq!(m.stats.placeholder_lines, 0, "{name}");
        assert!(m.stats.lines_drawn > 5, "{name}");
    }
}

// ── Determinism ──────────────────────────────────────────────────────────────

#[test]
fn explicit_rng_is_reproducible() {
    let c = Compositor::default();
    let theme = GroupTheme::new("*", "Legion of Doom", "1980s");
    let a = c.compose_themed("# LOD", Some(&theme), &mut StdRng::seed_from_u64(11));
    let b = c.compose_themed("# LOD", Some(&theme), &mut StdRng::seed_from_u64(11));
    assert_eq!(a.image_bytes, b.image_bytes);
}

// ── Async, batch and file output ─────────────────────────────────────────────

#[tokio::test]
async fn compose_async_matches_sync() {
    let c = compositor(21);
    let request = ManuscriptRequest::new("# async").with_theme("CDC");
    let sync = c.compose(&request);
    let async_ = c.compose_async(request).await;
    assert_eq!(sync.image_bytes, async_.image_bytes);
    assert_eq!(sync.html, async_.html);
}

#[tokio::test]
async fn batch_preserves_input_order() {
    let c = compositor(8);
    let requests: Vec<_> = (1..=6)
        .map(|n| ManuscriptRequest::new(markdown_with_lines(n * 5)))
        .collect();
    let results = c.compose_batch(requests.clone(), 3).await;

    assert_eq!(results.len(), requests.len());
    for (request, result) in requests.iter().zip(&results) {
        assert_eq!(result.image_bytes, c.compose(request).image_bytes);
    }
    let heights: Vec<u32> = results.iter().map(|m| m.height).collect();
    assert_eq!(heights, vec![400, 450, 575, 700, 825, 950]);
}

#[tokio::test]
async fn write_manuscript_creates_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/out");
    let m = compositor(2600).compose(&ManuscriptRequest::new("# files"));

    let (html_path, png_path) = write_manuscript(&m, &out, "exhibit").await.unwrap();
    assert_eq!(html_path, out.join("exhibit.html"));
    assert_eq!(png_path, out.join("exhibit.png"));
    assert_eq!(std::fs::read_to_string(&html_path).unwrap(), m.html);
    assert_eq!(std::fs::read(&png_path).unwrap(), m.image_bytes);

    let leftovers: Vec<_> = std::fs::read_dir(&out)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|x| x == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn json_round_trips_png() {
    let m = compositor(4).compose(&ManuscriptRequest::new("json"));
    let json = m.to_json();
    let png = STANDARD
        .decode(json["image_png_base64"].as_str().unwrap())
        .unwrap();
    assert_eq!(png, m.image_bytes);
    assert_eq!(json["height"], 400);
    assert_eq!(json["stats"]["footer"], "drawn");
}
