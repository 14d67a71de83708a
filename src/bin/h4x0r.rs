//! CLI binary for h4x0r-manuscript.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ManuscriptConfig`, composes one manuscript per input and either writes
//! `<stem>.html` / `<stem>.png` pairs or prints to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use h4x0r_manuscript::{
    preset, write_manuscript, Compositor, ManuscriptConfig, ManuscriptRequest, RenderedManuscript,
    ThemeRegistry, PRESET_NAMES,
};
use std::collections::HashSet;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r##"EXAMPLES:
  # Manuscript from a file, written to ./out/notes.html + ./out/notes.png
  h4x0r notes.md -o out

  # Inline text with the L0pht banner
  h4x0r --text "# We are the L0pht" --theme L0PHT -o out

  # A built-in exhibit, reproducible
  h4x0r --preset phreaking --seed 2600 -o out

  # Pipe markdown in, get JSON (HTML + base64 PNG) out
  cat notes.md | h4x0r - --json > manuscript.json

  # Custom group roster
  h4x0r --themes groups.json --list-themes

THEMES FILE FORMAT:
  A JSON object mapping keys to groups:
  { "2600": { "emoji": "☎", "name": "2600 Magazine", "era": "1984-" } }
  Optional per-group fields: "description", "members" (array of strings).

ENVIRONMENT VARIABLES:
  RUST_LOG              Override log filter (e.g. h4x0r_manuscript=debug)
  H4X0R_*               Every flag can also be set as H4X0R_<FLAG>
"##;

/// Render markdown as leet-speak hacker manuscripts (HTML + PNG).
#[derive(Parser, Debug)]
#[command(
    name = "h4x0r",
    version,
    about = "Render markdown as leet-speak hacker manuscripts (HTML + PNG)",
    long_about = "Render markdown into an HTML page and a PNG 'manuscript': the text in \
randomised leet-speak over a falling-code background, with an optional banner for a \
historical hacker group and the museum watermark.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown files to render; `-` reads stdin.
    inputs: Vec<PathBuf>,

    /// Render this markdown text.
    #[arg(long, env = "H4X0R_TEXT")]
    text: Option<String>,

    /// Render a built-in exhibit (see --list-presets).
    #[arg(long, env = "H4X0R_PRESET")]
    preset: Option<String>,

    /// Group banner to draw (see --list-themes). Unknown keys draw no banner.
    #[arg(long, env = "H4X0R_THEME")]
    theme: Option<String>,

    /// Load the group roster from a JSON file instead of the built-in one.
    #[arg(long, env = "H4X0R_THEMES")]
    themes: Option<PathBuf>,

    /// Seed for reproducible output.
    #[arg(long, env = "H4X0R_SEED")]
    seed: Option<u64>,

    /// Canvas width in pixels.
    #[arg(long, env = "H4X0R_WIDTH", default_value_t = 800,
          value_parser = clap::value_parser!(u32).range(1..=8192))]
    width: u32,

    /// Probability that each leet rule fires (0.0–1.0).
    #[arg(long, env = "H4X0R_PROBABILITY", default_value_t = 0.7)]
    probability: f64,

    /// Write `<stem>.html` and `<stem>.png` into this directory.
    #[arg(short, long, env = "H4X0R_OUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Print JSON (HTML, base64 PNG, stats) instead of HTML.
    #[arg(long, env = "H4X0R_JSON")]
    json: bool,

    /// List the available group themes and exit.
    #[arg(long)]
    list_themes: bool,

    /// List the built-in presets and exit.
    #[arg(long)]
    list_presets: bool,

    /// Number of manuscripts composed in parallel.
    #[arg(short, long, env = "H4X0R_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "H4X0R_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "H4X0R_QUIET")]
    quiet: bool,
}

/// One markdown source and the file stem its outputs get.
struct Source {
    stem: String,
    markdown: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Theme registry ───────────────────────────────────────────────────
    let themes = match cli.themes {
        Some(ref path) => ThemeRegistry::from_json_file(path)
            .with_context(|| format!("Failed to load themes from {}", path.display()))?,
        None => ThemeRegistry::builtin(),
    };

    // ── Listing modes ────────────────────────────────────────────────────
    if cli.list_themes || cli.list_presets {
        if cli.list_themes {
            for (key, theme) in themes.iter() {
                println!("{:<12} {}", bold(key), theme.banner_text());
                if !theme.description.is_empty() {
                    println!("{:<12} {}", "", dim(&theme.description));
                }
            }
        }
        if cli.list_presets {
            for name in PRESET_NAMES {
                println!("{name}");
            }
        }
        return Ok(());
    }

    if let Some(ref key) = cli.theme {
        if themes.get(key).is_none() && !cli.quiet {
            eprintln!(
                "{} unknown theme '{}', drawing no banner (known: {})",
                red("!"),
                key,
                themes.keys().collect::<Vec<_>>().join(", ")
            );
        }
    }

    // ── Gather sources ───────────────────────────────────────────────────
    let sources = gather_sources(&cli).await?;
    if sources.is_empty() {
        anyhow::bail!("Nothing to render: pass a file, `-`, --text or --preset");
    }

    // ── Build config and compose ─────────────────────────────────────────
    let config = build_config(&cli)?;
    let compositor = Compositor::new(config, themes);

    let requests = sources
        .iter()
        .map(|s| {
            let request = ManuscriptRequest::new(s.markdown.clone());
            match cli.theme {
                Some(ref key) => request.with_theme(key.clone()),
                None => request,
            }
        })
        .collect();
    let manuscripts = compositor.compose_batch(requests, cli.concurrency).await;

    // ── Output ───────────────────────────────────────────────────────────
    if let Some(ref dir) = cli.out_dir {
        for (source, manuscript) in sources.iter().zip(&manuscripts) {
            let (html_path, png_path) = write_manuscript(manuscript, dir, &source.stem)
                .await
                .with_context(|| format!("Failed to write manuscript '{}'", source.stem))?;
            if !cli.quiet {
                report(manuscript, &html_path, &png_path);
            }
        }
    }

    if cli.json {
        let docs: Vec<_> = sources
            .iter()
            .zip(&manuscripts)
            .map(|(source, m)| {
                let mut doc = m.to_json();
                doc["stem"] = serde_json::Value::String(source.stem.clone());
                doc
            })
            .collect();
        let json = if docs.len() == 1 {
            serde_json::to_string_pretty(&docs[0])
        } else {
            serde_json::to_string_pretty(&docs)
        }
        .context("Failed to serialise output")?;
        println!("{json}");
    } else if cli.out_dir.is_none() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        for m in &manuscripts {
            handle
                .write_all(m.html.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    let failed = manuscripts.iter().filter(|m| !m.is_ok()).count();
    if failed > 0 && !cli.quiet {
        eprintln!(
            "{} {}/{} manuscripts fell back to the error image",
            red("✘"),
            failed,
            manuscripts.len()
        );
    }

    Ok(())
}

/// Map CLI args to `ManuscriptConfig`.
fn build_config(cli: &Cli) -> Result<ManuscriptConfig> {
    let mut builder = ManuscriptConfig::builder()
        .width(cli.width)
        .substitution_probability(cli.probability);
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    builder.build().context("Invalid configuration")
}

/// Collect markdown from positional inputs, `--text` and `--preset`, in that order.
async fn gather_sources(cli: &Cli) -> Result<Vec<Source>> {
    let mut sources = Vec::new();
    let mut stems = HashSet::new();

    for input in &cli.inputs {
        let (stem, markdown) = if input.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read markdown from stdin")?;
            ("stdin".to_string(), buf)
        } else {
            let markdown = tokio::fs::read_to_string(input)
                .await
                .with_context(|| format!("Failed to read {}", input.display()))?;
            (file_stem(input), markdown)
        };
        sources.push(Source {
            stem: unique_stem(&mut stems, stem),
            markdown,
        });
    }

    if let Some(ref text) = cli.text {
        sources.push(Source {
            stem: unique_stem(&mut stems, "text".to_string()),
            markdown: text.clone(),
        });
    }

    if let Some(ref name) = cli.preset {
        let markdown = preset(name).with_context(|| {
            format!(
                "Unknown preset '{}' (available: {})",
                name,
                PRESET_NAMES.join(", ")
            )
        })?;
        sources.push(Source {
            stem: unique_stem(&mut stems, name.to_ascii_lowercase()),
            markdown: markdown.to_string(),
        });
    }

    Ok(sources)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "manuscript".to_string())
}

/// `stem`, or `stem-2`, `stem-3`, … if already taken.
fn unique_stem(taken: &mut HashSet<String>, stem: String) -> String {
    if taken.insert(stem.clone()) {
        return stem;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{stem}-{n}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn report(m: &RenderedManuscript, html_path: &Path, png_path: &Path) {
    let mark = if m.is_ok() { green("✔") } else { red("✘") };
    eprintln!(
        "{}  {}  {}  {}",
        mark,
        bold(&png_path.display().to_string()),
        dim(&format!("{}x{}", m.width, m.height)),
        dim(&html_path.display().to_string()),
    );
    if let Some(ref reason) = m.degraded {
        eprintln!("   {}", red(reason));
    }
}
