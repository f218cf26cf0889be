//! Front-matter extraction.
//!
//! A document may open with a metadata block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Hello
//! authors: [a, b]
//! ---
//! body...
//! ```
//!
//! Anything that fails to look like such a block, including a block whose
//! YAML does not parse, degrades to "no metadata" rather than an error.
//! The three cases stay distinguishable via [`FrontMatter`] so callers can
//! log the malformed ones before collapsing them.

use crate::compiler::meta::Metadata;
use serde_json::{Map, Value};

/// Outcome of looking for a front-matter block at the top of a document.
#[derive(Debug)]
pub enum FrontMatter {
    /// No block present.
    Absent,
    /// Block parsed into key-value metadata.
    Parsed(Metadata),
    /// Block present but not parseable. Never fatal.
    Invalid(serde_yaml::Error),
}

impl FrontMatter {
    /// Collapse to metadata: anything but a successful parse is empty.
    pub fn into_metadata(self) -> Metadata {
        match self {
            FrontMatter::Parsed(metadata) => metadata,
            FrontMatter::Absent | FrontMatter::Invalid(_) => Metadata::default(),
        }
    }
}

/// Split a document into its front matter and body.
///
/// The opening delimiter must be the very first line and the closing
/// delimiter must sit on its own line. When either is missing the whole
/// input is returned as the body, byte for byte. When the block is found
/// the body is returned trimmed of surrounding whitespace, also when the
/// block itself turns out to be garbage.
pub fn split(content: &str) -> (FrontMatter, &str) {
    let Some(rest) = content.strip_prefix("---\n") else {
        return (FrontMatter::Absent, content);
    };

    let Some((block, body)) = rest.split_once("\n---\n") else {
        return (FrontMatter::Absent, content);
    };

    let matter = if block.trim().is_empty() {
        FrontMatter::Parsed(Metadata::default())
    } else {
        match serde_yaml::from_str::<Map<String, Value>>(block) {
            Ok(map) => FrontMatter::Parsed(Metadata::from_map(map)),
            Err(err) => FrontMatter::Invalid(err),
        }
    };

    (matter, body.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_no_frontmatter() {
        let doc = "# Just a heading\n\nSome text.\n";
        let (matter, body) = split(doc);

        assert!(matches!(matter, FrontMatter::Absent));
        assert_eq!(body, doc);
    }

    #[test]
    fn test_split_missing_closing_delimiter() {
        let doc = "---\ntitle: Unclosed\n\n# Body\n";
        let (matter, body) = split(doc);

        assert!(matches!(matter, FrontMatter::Absent));
        assert_eq!(body, doc);
    }

    #[test]
    fn test_split_delimiter_not_at_start() {
        let doc = "\n---\ntitle: Late\n---\nbody\n";
        let (matter, body) = split(doc);

        assert!(matches!(matter, FrontMatter::Absent));
        assert_eq!(body, doc);
    }

    #[test]
    fn test_split_basic() {
        let doc = "---\ntitle: Hello\ndate: 2024-01-01\n---\n\n# Body\n";
        let (matter, body) = split(doc);

        let metadata = matter.into_metadata();
        assert_eq!(metadata.str_field("title"), Some("Hello"));
        assert_eq!(metadata.str_field("date"), Some("2024-01-01"));
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_split_body_trimmed() {
        let doc = "---\ntitle: T\n---\n\n\nbody text\n\n";
        let (_, body) = split(doc);

        assert_eq!(body, "body text");
    }

    #[test]
    fn test_split_list_values() {
        let doc = "---\nauthors:\n  - Ada\n  - Grace\n---\nbody";
        let (matter, body) = split(doc);

        let metadata = matter.into_metadata();
        assert_eq!(metadata.str_list_field("authors"), vec!["Ada", "Grace"]);
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_invalid_yaml() {
        let doc = "---\ntitle: [unclosed\n---\nbody";
        let (matter, body) = split(doc);

        assert!(matches!(matter, FrontMatter::Invalid(_)));
        // The block is still stripped from the body.
        assert_eq!(body, "body");
        assert!(matter.into_metadata().is_empty());
    }

    #[test]
    fn test_split_non_mapping_yaml() {
        let doc = "---\njust a string\n---\nbody";
        let (matter, body) = split(doc);

        assert!(matches!(matter, FrontMatter::Invalid(_)));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_empty_block() {
        let doc = "---\n\n---\nbody";
        let (matter, body) = split(doc);

        assert!(matches!(matter, FrontMatter::Parsed(_)));
        assert!(matter.into_metadata().is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_unrecognized_keys_preserved() {
        let doc = "---\ntitle: T\ncustom_key: 42\n---\nbody";
        let (matter, _) = split(doc);

        let metadata = matter.into_metadata();
        assert_eq!(
            metadata.get("custom_key").and_then(|v| v.as_i64()),
            Some(42)
        );
    }

    #[test]
    fn test_into_metadata_absent() {
        assert!(FrontMatter::Absent.into_metadata().is_empty());
    }
}
