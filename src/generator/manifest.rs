//! Content manifest assembly.
//!
//! Gathers every compiled page into a single JSON document that ships
//! with the site. The manifest is both an artifact in its own right
//! (`content.json`, fetched by external consumers) and the data source
//! for the embedded copy inside the generated client script.

use crate::{compiler::Page, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

// ============================================================================
// Public API
// ============================================================================

/// File name of the manifest inside the output directory.
pub const MANIFEST_FILE: &str = "content.json";

/// Server-side manifest, keyed by route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentManifest {
    pub pages: BTreeMap<String, Page>,
}

impl ContentManifest {
    pub fn new(pages: BTreeMap<String, Page>) -> Self {
        Self { pages }
    }

    /// Serialize to the on-disk format: pretty-printed JSON with
    /// 2-space indentation and routes in sorted order.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize content manifest")
    }

    /// Write the manifest into the output directory as `content.json`.
    pub fn write(&self, output_dir: &Path) -> Result<()> {
        let path = output_dir.join(MANIFEST_FILE);
        fs::write(&path, self.to_json()?)
            .with_context(|| format!("Failed to write `{}`", path.display()))?;

        log!("manifest"; "{MANIFEST_FILE} ({} pages)", self.pages.len());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
