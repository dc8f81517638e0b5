//! Option records and the per-record transform

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::markdown::{MarkdownOptions, render_html};
use crate::plain::render_plain_text;

/// Field holding the markdown source, replaced by plain text on transform
pub const DESCRIPTION: &str = "description";
/// Field added on transform, holding the rendered HTML
pub const DESCRIPTION_HTML: &str = "descriptionHTML";

/// Errors that can occur while transforming a record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("record has no `description` field")]
    MissingDescription,

    #[error("`description` must be a string, found {found}")]
    DescriptionNotString { found: &'static str },
}

/// One entry of the options list
///
/// Only `description` is interpreted; every other field is carried through
/// unchanged and in its original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionRecord {
    pub fields: Map<String, Value>,
}

impl OptionRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The markdown description of this record
    pub fn description(&self) -> Result<&str, TransformError> {
        match self.fields.get(DESCRIPTION) {
            None => Err(TransformError::MissingDescription),
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(TransformError::DescriptionNotString {
                found: type_name(other),
            }),
        }
    }

    /// Rendered HTML, present once the record has been transformed
    pub fn description_html(&self) -> Option<&str> {
        self.fields.get(DESCRIPTION_HTML).and_then(Value::as_str)
    }
}

/// Render a record's description to HTML and plain text
///
/// Both renderers read the original markdown; the record is only
/// modified after both have run.
///
/// ```
/// use optdoc_core::{MarkdownOptions, OptionRecord, transform};
/// use serde_json::json;
///
/// let record: OptionRecord =
///     serde_json::from_value(json!({"name": "x", "description": "*hi*"})).unwrap();
/// let out = transform(record, &MarkdownOptions::default()).unwrap();
/// assert_eq!(
///     serde_json::to_value(&out).unwrap(),
///     json!({"name": "x", "description": "hi", "descriptionHTML": "<p><em>hi</em></p>"})
/// );
/// ```
pub fn transform(
    mut record: OptionRecord,
    options: &MarkdownOptions,
) -> Result<OptionRecord, TransformError> {
    let (html, plain) = {
        let source = record.description()?;
        (
            render_html(source, options),
            render_plain_text(source, options),
        )
    };

    record
        .fields
        .insert(DESCRIPTION_HTML.to_string(), Value::String(html));
    record
        .fields
        .insert(DESCRIPTION.to_string(), Value::String(plain));

    Ok(record)
}

/// Name of a JSON value's type, as used in error messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> OptionRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_transform_example() {
        let out = transform(
            record(json!({"name": "x", "description": "*hi*"})),
            &MarkdownOptions::default(),
        )
        .unwrap();

        insta::assert_snapshot!(
            serde_json::to_string(&out).unwrap(),
            @r#"{"name":"x","description":"hi","descriptionHTML":"<p><em>hi</em></p>"}"#
        );
    }

    #[test]
    fn test_html_rendered_from_original_source() {
        let source = "Enable **this** <script>track()</script>";
        let out = transform(record(json!({ "description": source })), &MarkdownOptions::default())
            .unwrap();

        assert_eq!(
            out.description_html(),
            Some(render_html(source, &MarkdownOptions::default()).as_str())
        );
        assert!(out.description_html().unwrap().contains("<script>track()</script>"));
        assert_eq!(out.description().unwrap(), "Enable this");
    }

    #[test]
    fn test_other_fields_untouched() {
        let input = json!({
            "title": "services.foo.enable",
            "type": "boolean",
            "default": "false",
            "readOnly": false,
            "declarations": [{"name": "foo.nix", "url": "https://example.com/foo.nix"}],
            "description": "Whether to enable foo."
        });
        let out = transform(record(input.clone()), &MarkdownOptions::default()).unwrap();

        for key in ["title", "type", "default", "readOnly", "declarations"] {
            assert_eq!(out.fields.get(key), input.get(key), "field {key}");
        }
        assert_eq!(out.description().unwrap(), "Whether to enable foo.");
        assert_eq!(out.description_html(), Some("<p>Whether to enable foo.</p>"));
    }

    #[test]
    fn test_field_order_preserved() {
        let out = transform(
            record(json!({"b": 1, "description": "x", "a": 2})),
            &MarkdownOptions::default(),
        )
        .unwrap();
        let keys: Vec<_> = out.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "description", "a", "descriptionHTML"]);
    }

    #[test]
    fn test_empty_description() {
        let out = transform(record(json!({"description": ""})), &MarkdownOptions::default())
            .unwrap();
        assert_eq!(out.description().unwrap(), "");
        assert_eq!(out.description_html(), Some(""));
    }

    #[test]
    fn test_missing_description() {
        let err = transform(record(json!({"name": "x"})), &MarkdownOptions::default())
            .unwrap_err();
        assert_eq!(err, TransformError::MissingDescription);
    }

    #[test]
    fn test_non_string_description() {
        let err = transform(record(json!({"description": null})), &MarkdownOptions::default())
            .unwrap_err();
        assert_eq!(err, TransformError::DescriptionNotString { found: "null" });
        assert_eq!(err.to_string(), "`description` must be a string, found null");

        let err = transform(record(json!({"description": 3})), &MarkdownOptions::default())
            .unwrap_err();
        assert_eq!(err, TransformError::DescriptionNotString { found: "number" });
    }
}
