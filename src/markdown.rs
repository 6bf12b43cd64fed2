//! Markdown rendering and HTML minification.

use once_cell::sync::Lazy;
use pulldown_cmark::html;
use pulldown_cmark::Event;
use pulldown_cmark::Options;
use pulldown_cmark::Parser;
use regex::Regex;

static BETWEEN_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r">\s+<").expect("Between-tags pattern is valid"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Whitespace pattern is valid"));

/// Render Markdown to HTML.
///
/// GitHub-flavored extensions are enabled, and every newline in a paragraph becomes a line break
/// rather than being folded into a space.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        event => event,
    });

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// Compact HTML for use as a form value: drop whitespace between tags, collapse all other runs of
/// whitespace to a single space, and trim the ends.
pub fn minify_html(html: &str) -> String {
    let html = BETWEEN_TAGS.replace_all(html, "><");
    WHITESPACE.replace_all(&html, " ").trim().to_owned()
}
