//! Client script generation.
//!
//! Produces the self-contained router script shipped as `app.js`: the
//! embedded template with the site configuration and the full content
//! manifest inlined as data, so the browser resolves routes without
//! any further requests.

use crate::{
    compiler::Metadata,
    config::{ClientConfig, SiteConfig},
    generator::manifest::ContentManifest,
    log,
};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::{collections::BTreeMap, fs};

// ============================================================================
// Public API
// ============================================================================

/// File name of the generated script inside the output directory.
pub const CLIENT_FILE: &str = "app.js";

const CLIENT_TEMPLATE: &str = include_str!("../embed/client/app.js");

const CONFIG_SLOT: &str = "__VERSO_CONFIG__";
const MANIFEST_SLOT: &str = "__VERSO_MANIFEST__";

/// Page shape embedded in the generated script.
///
/// Field-compatible with [`crate::compiler::Page`], kept as its own
/// schema so the embedded form can evolve with the script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientPage {
    pub route: String,
    pub content: String,
    pub metadata: Metadata,
}

/// Manifest shape embedded in the generated script.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientManifest {
    pub pages: BTreeMap<String, ClientPage>,
}

impl From<&ContentManifest> for ClientManifest {
    fn from(manifest: &ContentManifest) -> Self {
        let pages = manifest
            .pages
            .iter()
            .map(|(route, page)| {
                let page = ClientPage {
                    route: page.route.clone(),
                    content: page.content.clone(),
                    metadata: page.metadata.clone(),
                };
                (route.clone(), page)
            })
            .collect();

        Self { pages }
    }
}

/// Generate the router script source for the given manifest.
pub fn generate(manifest: &ClientManifest, client: &ClientConfig, title: &str) -> Result<String> {
    let config = json!({
        "title": title,
        "container": client.container,
        "nav": client.nav,
        "interceptLinks": client.intercept_links,
    });

    let config = serde_json::to_string(&config).context("Failed to serialize client config")?;
    let manifest =
        serde_json::to_string(manifest).context("Failed to serialize client manifest")?;

    fill_template(CLIENT_TEMPLATE, &config, &manifest)
}

/// Project the manifest into the client schema and write `app.js`.
pub fn write_client(manifest: &ContentManifest, config: &SiteConfig) -> Result<()> {
    let client = ClientManifest::from(manifest);
    let script = generate(&client, &config.client, &config.base.title)?;

    let path = config.build.output.join(CLIENT_FILE);
    fs::write(&path, script).with_context(|| format!("Failed to write `{}`", path.display()))?;

    log!("client"; "{CLIENT_FILE}");
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Splice serialized data into the template slots.
///
/// Slots are located in the template before anything is inserted, so
/// spliced data is never itself searched for slot markers.
fn fill_template(template: &str, config: &str, manifest: &str) -> Result<String> {
    let (head, rest) = template
        .split_once(CONFIG_SLOT)
        .context("Client template has no config slot")?;
    let (middle, tail) = rest
        .split_once(MANIFEST_SLOT)
        .context("Client template has no manifest slot")?;

    Ok(format!("{head}{config}{middle}{manifest}{tail}"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::Page;
    use serde_json::{Map, Value};

    fn manifest_with(route: &str, content: &str) -> ContentManifest {
        let mut pages = BTreeMap::new();
        pages.insert(
            route.to_string(),
            Page {
                route: route.into(),
                content: content.into(),
                metadata: Metadata::default(),
            },
        );
        ContentManifest::new(pages)
    }

    #[test]
    fn test_generate_replaces_slots() {
        let manifest = ClientManifest::from(&manifest_with("index", "<p>hi</p>"));
        let script = generate(&manifest, &ClientConfig::default(), "Site").unwrap();

        assert!(!script.contains(CONFIG_SLOT));
        assert!(!script.contains(MANIFEST_SLOT));
        assert!(script.contains("\"container\":\"#content\""));
        assert!(script.contains("\"interceptLinks\":true"));
    }

    #[test]
    fn test_generate_embeds_title() {
        let manifest = ClientManifest::default();
        let script = generate(&manifest, &ClientConfig::default(), "My Blog").unwrap();

        assert!(script.contains("\"title\":\"My Blog\""));
    }

    #[test]
    fn test_generate_empty_manifest() {
        let manifest = ClientManifest::default();
        let script = generate(&manifest, &ClientConfig::default(), "Site").unwrap();

        assert!(script.contains("{\"pages\":{}}"));
        assert!(script.contains("init();"));
    }

    #[test]
    fn test_generate_embeds_page_content() {
        let manifest = ClientManifest::from(&manifest_with("about", "<h1 id=\"me\">Me</h1>"));
        let script = generate(&manifest, &ClientConfig::default(), "Site").unwrap();

        assert!(script.contains("\"about\""));
        assert!(script.contains("<h1 id=\\\"me\\\">Me</h1>"));
    }

    #[test]
    fn test_generate_content_containing_slot_marker() {
        let manifest = ClientManifest::from(&manifest_with("docs", "see __VERSO_CONFIG__ marker"));
        let script = generate(&manifest, &ClientConfig::default(), "Site").unwrap();

        assert!(script.contains("see __VERSO_CONFIG__ marker"));
        assert!(script.contains("\"container\":\"#content\""));
    }

    #[test]
    fn test_fill_template_missing_config_slot() {
        let result = fill_template("no slots here", "{}", "{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_fill_template_missing_manifest_slot() {
        let result = fill_template("only __VERSO_CONFIG__ present", "{}", "{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_client_projection_field_compatible() {
        let mut meta = Map::new();
        meta.insert("title".into(), Value::String("Hello".into()));

        let page = Page {
            route: "index".into(),
            content: "<p>hello</p>".into(),
            metadata: Metadata::from_map(meta),
        };
        let mut pages = BTreeMap::new();
        pages.insert("index".to_string(), page.clone());

        let client = ClientManifest::from(&ContentManifest::new(pages));

        let server_json = serde_json::to_value(&page).unwrap();
        let client_json = serde_json::to_value(&client.pages["index"]).unwrap();
        assert_eq!(server_json, client_json);
    }

    #[test]
    fn test_write_client() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.build.output = dir.path().to_path_buf();

        let manifest = manifest_with("index", "<p>hi</p>");
        write_client(&manifest, &config).unwrap();

        let script = fs::read_to_string(dir.path().join(CLIENT_FILE)).unwrap();
        assert!(script.contains("\"pages\""));
        assert!(script.contains("<p>hi</p>"));
    }
}
