//! Markdown → HTML, and HTML → plain text for rasterisation.
//!
//! The tag strip is deliberately naive: `<.*?>` is removed line by line and
//! entities such as `&amp;` are left as-is. The image shows the same text a
//! reader would see in the page source, minus the markup.

use crate::error::ManuscriptError;
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};
use regex::Regex;
use tracing::debug;

/// Render `markdown` to HTML.
///
/// `extensions` turns on tables and strikethrough; by default only
/// CommonMark is recognised.
pub fn render_html(markdown: &str, extensions: bool) -> Result<String, ManuscriptError> {
    let mut options = Options::empty();
    if extensions {
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::write_html_fmt(&mut out, Parser::new_ext(markdown, options))
        .map_err(|e| ManuscriptError::Render(e.to_string()))?;

    debug!("Rendered {} bytes of markdown → {} bytes HTML", markdown.len(), out.len());
    Ok(out)
}

static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").unwrap());

/// Remove every `<...>` span that does not cross a line break.
pub fn strip_tags(html: &str) -> String {
    RE_TAG.replace_all(html, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_heading_and_paragraph() {
        let html = render_html("# Test\n\nSimple text for testing", false).unwrap();
        assert_eq!(html, "<h1>Test</h1>\n<p>Simple text for testing</p>\n");
    }

    #[test]
    fn strip_keeps_line_structure() {
        let html = render_html("# Test\n\n- one\n- two", false).unwrap();
        let plain = strip_tags(&html);
        assert_eq!(plain, "Test\n\none\ntwo\n\n");
    }

    #[test]
    fn entities_pass_through() {
        let html = render_html("Fish & chips", false).unwrap();
        assert_eq!(strip_tags(&html), "Fish &amp; chips\n");
    }

    #[test]
    fn strip_is_non_greedy_and_single_line() {
        assert_eq!(strip_tags("<b>a</b> < c <i>d</i>"), "a d");
        assert_eq!(strip_tags("<a\nhref=x>y</a>"), "<a\nhref=x>y");
    }

    #[test]
    fn tables_need_extensions() {
        let md = "| A | B |\n|---|---|\n| 1 | 2 |";
        assert!(!render_html(md, false).unwrap().contains("<table>"));
        assert!(render_html(md, true).unwrap().contains("<table>"));
    }

    #[test]
    fn malformed_input_still_renders() {
        for md in ["<div><span>", "\0\0\0", "   \n\t  ", "**unclosed", "```\nno fence end"] {
            assert!(render_html(md, false).is_ok(), "failed on {md:?}");
        }
    }
}
