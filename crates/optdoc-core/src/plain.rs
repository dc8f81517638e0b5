//! Plain-text renderer
//!
//! Walks a document tree and keeps only the text a reader would see.
//! Comments, processing instructions and the content of `script` and
//! `style` elements are dropped; tail text is always kept.

use crate::markdown::{self, MarkdownOptions};
use crate::tree::{Element, NodeKind};

/// Serialize a document tree to plain text
///
/// ```
/// use optdoc_core::tree::Element;
/// use optdoc_core::to_plain_text;
///
/// let tree = Element::fragment()
///     .with_child(Element::tag("p").with_text("Hi ").with_child(
///         Element::tag("em").with_text("there").with_tail("!"),
///     ));
/// assert_eq!(to_plain_text(&tree), "Hi there!");
/// ```
pub fn to_plain_text(root: &Element) -> String {
    let mut output = String::new();
    write_plain_text(&mut output, root);
    output
}

fn write_plain_text(output: &mut String, element: &Element) {
    match &element.kind {
        NodeKind::Comment | NodeKind::ProcessingInstruction => {}
        NodeKind::Fragment => write_content(output, element, true),
        NodeKind::Tag(name) => write_content(output, element, !is_raw_text_element(name)),
    }

    if let Some(tail) = &element.tail {
        output.push_str(tail);
    }
}

fn write_content(output: &mut String, element: &Element, emit_text: bool) {
    if emit_text && let Some(text) = &element.text {
        output.push_str(text);
    }
    for child in &element.children {
        write_plain_text(output, child);
    }
}

fn is_raw_text_element(name: &str) -> bool {
    name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style")
}

/// Render markdown source to plain text
///
/// Surrounding whitespace is trimmed from the result.
///
/// ```
/// use optdoc_core::{MarkdownOptions, render_plain_text};
///
/// let text = render_plain_text("hello **world**", &MarkdownOptions::default());
/// assert_eq!(text, "hello world");
/// ```
pub fn render_plain_text(source: &str, options: &MarkdownOptions) -> String {
    let document = markdown::parse_document(source, options);
    to_plain_text(&document).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(source: &str) -> String {
        render_plain_text(source, &MarkdownOptions::default())
    }

    #[test]
    fn test_empty() {
        assert_eq!(plain(""), "");
        assert_eq!(to_plain_text(&Element::fragment()), "");
    }

    #[test]
    fn test_inline_markup_removed() {
        assert_eq!(plain("hello **world**"), "hello world");
        assert_eq!(plain("*hi*"), "hi");
        assert_eq!(plain("use `nix build` here"), "use nix build here");
        assert_eq!(plain("a [link](https://example.com) b"), "a link b");
    }

    #[test]
    fn test_plain_text_is_fixed_point() {
        for text in ["hello world", "Whether to enable the service.", "a & b, 1 < 2"] {
            let once = plain(text);
            assert_eq!(once, text);
            assert_eq!(plain(&once), once);
        }
    }

    #[test]
    fn test_script_and_style_dropped() {
        let out = plain("before\n\n<script>alert(1)</script>\n\nafter");
        assert!(!out.contains("alert"));
        assert!(out.contains("before"));
        assert!(out.contains("after"));

        let out = plain("<style>p { color: red }</style>\n\nvisible");
        assert_eq!(out, "visible");
    }

    #[test]
    fn test_comment_dropped_following_text_kept() {
        assert_eq!(plain("<!-- note -->\nafter"), "after");
    }

    #[test]
    fn test_blocks_keep_newlines() {
        assert_eq!(
            plain("# Title\n\nFirst paragraph.\n\n- one\n- two"),
            "Title\nFirst paragraph.\n\none\ntwo"
        );
    }

    #[test]
    fn test_comment_and_pi_emit_tail_only() {
        let tree = Element::fragment()
            .with_text("a")
            .with_child(Element::comment("hidden").with_tail("b"))
            .with_child(Element::processing_instruction("xml").with_tail("c"));
        assert_eq!(to_plain_text(&tree), "abc");
    }

    #[test]
    fn test_raw_text_suppression_is_case_insensitive() {
        let tree = Element::fragment()
            .with_child(Element::tag("SCRIPT").with_text("x()").with_tail("1"))
            .with_child(Element::tag("Style").with_text("p {}").with_tail("2"));
        assert_eq!(to_plain_text(&tree), "12");
    }

    #[test]
    fn test_raw_text_suppression_is_local() {
        // children of a script element are still walked
        let tree = Element::fragment().with_child(
            Element::tag("script")
                .with_text("hidden")
                .with_child(Element::tag("span").with_text("shown").with_tail("tail"))
                .with_tail("end"),
        );
        assert_eq!(to_plain_text(&tree), "showntailend");
    }

    #[test]
    fn test_script_nested_in_container() {
        let tree = Element::fragment().with_child(
            Element::tag("div")
                .with_text("a")
                .with_child(Element::tag("script").with_text("b").with_tail("c")),
        );
        assert_eq!(to_plain_text(&tree), "ac");
    }
}
