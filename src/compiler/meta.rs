//! Typed access to page metadata and the rendered metadata header.
//!
//! Front matter is heterogeneous: any key, any YAML shape. The map is
//! carried verbatim into the manifest for downstream consumers, but the
//! header formatter only ever reads concrete types through the accessors
//! below. Nothing outside this module pattern-matches on raw values.
//!
//! # Header shape
//!
//! | Field              | Element                        |
//! |--------------------|--------------------------------|
//! | `title`            | `<h1 class="page-title">`      |
//! | `date`             | `<time class="page-date">`     |
//! | `author`/`authors` | `<div class="page-authors">`   |
//!
//! Date and authors share one `<div class="page-metadata">` container and
//! are separated by a middle dot when both are present. Values land in the
//! fragment unescaped: content authors are trusted, same as raw HTML in
//! the Markdown body.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Front-matter key-value pairs for one page.
///
/// Never absent, only empty. Unrecognized keys ride along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw value lookup, for consumers with their own decoding.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value under `key`. Non-string values read as absent.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// String elements of a list under `key`. Non-string elements are
    /// skipped, non-list values read as empty.
    pub fn str_list_field(&self, key: &str) -> Vec<&str> {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Header formatting
// ============================================================================

/// Build the HTML fragment prepended to a page's rendered body.
///
/// Returns `None` when no recognized field carries a non-empty value, so
/// pages without header metadata stay byte-identical to their rendered
/// Markdown.
pub fn format_header(metadata: &Metadata) -> Option<String> {
    let title = metadata.str_field("title").filter(|t| !t.is_empty());
    let date = metadata.str_field("date").filter(|d| !d.is_empty());
    let authors = resolve_authors(metadata);

    let mut header = String::new();

    if let Some(title) = title {
        header.push_str(&format!(r#"<h1 class="page-title">{title}</h1>"#));
    }

    let mut parts = Vec::new();
    if let Some(date) = date {
        parts.push(format!(r#"<time class="page-date">{date}</time>"#));
    }
    if let Some(authors) = authors {
        parts.push(format!(r#"<div class="page-authors">{authors}</div>"#));
    }
    if !parts.is_empty() {
        header.push_str(&format!(
            r#"<div class="page-metadata">{}</div>"#,
            parts.join(" · ")
        ));
    }

    (!header.is_empty()).then_some(header)
}

/// Prefer the singular `author`; otherwise join the `authors` list.
fn resolve_authors(metadata: &Metadata) -> Option<String> {
    if let Some(author) = metadata.str_field("author").filter(|a| !a.is_empty()) {
        return Some(author.to_owned());
    }

    let authors = metadata.str_list_field("authors");
    (!authors.is_empty()).then(|| authors.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata_from(value: Value) -> Metadata {
        match value {
            Value::Object(map) => Metadata::from_map(map),
            _ => unreachable!("tests build objects"),
        }
    }

    #[test]
    fn test_str_field() {
        let metadata = metadata_from(json!({"title": "Hello", "count": 3}));

        assert_eq!(metadata.str_field("title"), Some("Hello"));
        // Non-string values read as absent.
        assert_eq!(metadata.str_field("count"), None);
        assert_eq!(metadata.str_field("missing"), None);
    }

    #[test]
    fn test_str_list_field() {
        let metadata = metadata_from(json!({
            "authors": ["Ada", 1, "Grace", null],
            "title": "not a list"
        }));

        assert_eq!(metadata.str_list_field("authors"), vec!["Ada", "Grace"]);
        assert!(metadata.str_list_field("title").is_empty());
        assert!(metadata.str_list_field("missing").is_empty());
    }

    #[test]
    fn test_format_header_empty_metadata() {
        assert_eq!(format_header(&Metadata::default()), None);
    }

    #[test]
    fn test_format_header_unrecognized_keys_only() {
        let metadata = metadata_from(json!({"tags": ["a"], "draft": true}));

        assert_eq!(format_header(&metadata), None);
    }

    #[test]
    fn test_format_header_title_only() {
        let metadata = metadata_from(json!({"title": "Hello"}));

        assert_eq!(
            format_header(&metadata).as_deref(),
            Some(r#"<h1 class="page-title">Hello</h1>"#)
        );
    }

    #[test]
    fn test_format_header_date_only() {
        let metadata = metadata_from(json!({"date": "2024-01-01"}));

        assert_eq!(
            format_header(&metadata).as_deref(),
            Some(
                r#"<div class="page-metadata"><time class="page-date">2024-01-01</time></div>"#
            )
        );
    }

    #[test]
    fn test_format_header_date_and_authors_separated() {
        let metadata = metadata_from(json!({"date": "2024-01-01", "author": "Ada"}));

        let header = format_header(&metadata).unwrap();
        assert!(header.contains(
            r#"<time class="page-date">2024-01-01</time> · <div class="page-authors">Ada</div>"#
        ));
        assert!(header.starts_with(r#"<div class="page-metadata">"#));
    }

    #[test]
    fn test_format_header_full() {
        let metadata = metadata_from(json!({
            "title": "Post",
            "date": "2024-01-01",
            "author": "Ada"
        }));

        let header = format_header(&metadata).unwrap();
        assert!(header.starts_with(r#"<h1 class="page-title">Post</h1>"#));
        assert!(header.ends_with("</div>"));
    }

    #[test]
    fn test_format_header_prefers_singular_author() {
        let metadata = metadata_from(json!({
            "author": "Ada",
            "authors": ["Grace", "Katherine"]
        }));

        let header = format_header(&metadata).unwrap();
        assert!(header.contains(">Ada<"));
        assert!(!header.contains("Grace"));
    }

    #[test]
    fn test_format_header_joins_authors_list() {
        let metadata = metadata_from(json!({"authors": ["Ada", "Grace"]}));

        let header = format_header(&metadata).unwrap();
        assert!(header.contains(r#"<div class="page-authors">Ada, Grace</div>"#));
    }

    #[test]
    fn test_format_header_empty_strings_read_as_absent() {
        let metadata = metadata_from(json!({"title": "", "date": "", "author": ""}));

        assert_eq!(format_header(&metadata), None);
    }

    #[test]
    fn test_format_header_empty_author_falls_back_to_list() {
        let metadata = metadata_from(json!({"author": "", "authors": ["Grace"]}));

        let header = format_header(&metadata).unwrap();
        assert!(header.contains("Grace"));
    }

    #[test]
    fn test_format_header_values_not_escaped() {
        let metadata = metadata_from(json!({"title": "A <em>fancy</em> title"}));

        let header = format_header(&metadata).unwrap();
        assert!(header.contains("<em>fancy</em>"));
    }

    #[test]
    fn test_metadata_round_trip() {
        let metadata = metadata_from(json!({"title": "T", "tags": ["a", "b"]}));

        let json = serde_json::to_string(&metadata).unwrap();
        let back: Metadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metadata);
    }
}
