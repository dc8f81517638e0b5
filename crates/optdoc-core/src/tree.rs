//! Document tree used by the plain-text renderer
//!
//! Nodes follow an element/text/tail model: an element's `text` is the
//! character data before its first child, and a node's `tail` is the
//! character data between its end and the next sibling.

use scraper::{ElementRef, Html, Node as HtmlNode};

/// Kind of a tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Wrapper without a tag (the document root)
    Fragment,
    /// A tagged element
    Tag(String),
    /// `<!-- ... -->`
    Comment,
    /// `<? ... ?>`
    ProcessingInstruction,
}

/// A node of the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: NodeKind,
    pub text: Option<String>,
    pub tail: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            text: None,
            tail: None,
            children: Vec::new(),
        }
    }

    pub fn fragment() -> Self {
        Self::new(NodeKind::Fragment)
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Tag(name.into()))
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Comment).with_text(text)
    }

    pub fn processing_instruction(text: impl Into<String>) -> Self {
        Self::new(NodeKind::ProcessingInstruction).with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Tag name, or `None` for fragments, comments and processing instructions
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Tag(name) => Some(name),
            _ => None,
        }
    }

    /// Append character data at the current end of this node's content:
    /// to `text` while there are no children, otherwise to the last child's tail.
    fn push_data(&mut self, data: &str) {
        if data.is_empty() {
            return;
        }
        let slot = match self.children.last_mut() {
            Some(last) => &mut last.tail,
            None => &mut self.text,
        };
        slot.get_or_insert_with(String::new).push_str(data);
    }
}

/// Parse an HTML fragment into a document tree
///
/// The returned node is always a [`NodeKind::Fragment`] holding the
/// fragment's top-level nodes, so text outside any element is kept.
///
/// ```
/// use optdoc_core::tree::from_html;
///
/// let tree = from_html("<p>Hello <em>World</em>!</p>");
/// let p = &tree.children[0];
/// assert_eq!(p.tag_name(), Some("p"));
/// assert_eq!(p.text.as_deref(), Some("Hello "));
/// assert_eq!(p.children[0].tail.as_deref(), Some("!"));
/// ```
pub fn from_html(html: &str) -> Element {
    let document = Html::parse_fragment(html);
    let mut root = Element::fragment();
    // parse_fragment wraps the content in a synthetic <html> element
    append_children(&mut root, document.root_element());
    root
}

fn append_children(parent: &mut Element, element: ElementRef<'_>) {
    for child in element.children() {
        match child.value() {
            HtmlNode::Text(text) => parent.push_data(&text.text),
            HtmlNode::Element(el) => {
                let mut node = Element::tag(el.name());
                if let Some(child_element) = ElementRef::wrap(child) {
                    append_children(&mut node, child_element);
                }
                parent.children.push(node);
            }
            HtmlNode::Comment(comment) => {
                parent.children.push(Element::comment(&*comment.comment));
            }
            HtmlNode::ProcessingInstruction(pi) => {
                parent
                    .children
                    .push(Element::processing_instruction(&*pi.data));
            }
            _ => {}
        }
    }
}
