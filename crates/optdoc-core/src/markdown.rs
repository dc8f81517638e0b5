//! Markdown engine
//!
//! Renders markdown to HTML with pulldown-cmark and parses markdown into
//! a [`tree::Element`](crate::tree::Element) for the plain-text renderer.

use pulldown_cmark::{Options, Parser, html};
use serde::{Deserialize, Serialize};

use crate::tree::{self, Element};

/// Markdown syntax extensions
///
/// Everything is disabled by default, which gives plain CommonMark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// GitHub-style pipe tables
    pub tables: bool,
    /// `~~strikethrough~~`
    pub strikethrough: bool,
    /// `[^note]` footnotes
    pub footnotes: bool,
    /// `- [x]` task list items
    pub task_lists: bool,
    /// Curly quotes, dashes and ellipses
    pub smart_punctuation: bool,
}

impl MarkdownOptions {
    fn to_cmark(self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        options.set(Options::ENABLE_TASKLISTS, self.task_lists);
        options.set(Options::ENABLE_SMART_PUNCTUATION, self.smart_punctuation);
        options
    }
}

/// Render markdown source to an HTML fragment
///
/// Surrounding whitespace is trimmed from the result.
///
/// ```
/// use optdoc_core::{MarkdownOptions, render_html};
///
/// let html = render_html("*hi*", &MarkdownOptions::default());
/// assert_eq!(html, "<p><em>hi</em></p>");
/// ```
pub fn render_html(source: &str, options: &MarkdownOptions) -> String {
    let output = to_html(source, options);
    let trimmed = output.trim();
    if trimmed.len() == output.len() {
        output
    } else {
        trimmed.to_string()
    }
}

/// Parse markdown source into a document tree
///
/// Raw HTML embedded in the markdown (script and style blocks, comments)
/// becomes ordinary tree nodes.
pub fn parse_document(source: &str, options: &MarkdownOptions) -> Element {
    tree::from_html(&to_html(source, options))
}

fn to_html(source: &str, options: &MarkdownOptions) -> String {
    let parser = Parser::new_ext(source, options.to_cmark());
    let mut output = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}
