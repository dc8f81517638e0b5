//! optdoc-core: Core library for rendering option descriptions
//!
//! This crate provides:
//! - Markdown to HTML rendering
//! - A document tree with text/tail nodes parsed from markdown
//! - A plain-text renderer over that tree
//! - The per-record transform applied to option records

pub mod markdown;
pub mod plain;
pub mod record;
pub mod tree;

pub use markdown::{MarkdownOptions, parse_document, render_html};
pub use plain::{render_plain_text, to_plain_text};
pub use record::{DESCRIPTION, DESCRIPTION_HTML, OptionRecord, TransformError, transform, type_name};
pub use tree::{Element, NodeKind};
