//! Site building orchestration.
//!
//! Coordinates content compilation and artifact generation.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── collect_pages() ──────► Walk content dir, compile every page
//!     │
//!     ├── write_client() ───────► app.js with embedded manifest
//!     │
//!     ├── ContentManifest::write() ──► content.json
//!     │
//!     ├── copy_template() ──────► templates/index.html → output root
//!     │
//!     └── copy_static() ────────► Mirror the static tree into output
//! ```

use crate::{
    compiler::{assets, collect_pages},
    config::SiteConfig,
    generator::{ContentManifest, write_client},
    log,
};
use anyhow::{Context, Result};
use std::fs;

/// Build the entire site into the output directory.
///
/// Any failure aborts the build; partially written artifacts from an
/// earlier step are left for the next successful build to overwrite.
///
/// Returns the assembled manifest so callers can inspect what was built.
pub fn build_site(config: &SiteConfig) -> Result<ContentManifest> {
    log!("build"; "building site...");

    let output = &config.build.output;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory `{}`", output.display()))?;

    let pages = collect_pages(config).context("Failed to parse content")?;
    let manifest = ContentManifest::new(pages);

    write_client(&manifest, config).context("Failed to write client script")?;
    manifest.write(output).context("Failed to write manifest")?;

    assets::copy_template(config).context("Failed to copy template")?;
    assets::copy_static(config).context("Failed to copy static assets")?;

    log!("build"; "done ({} pages)", manifest.pages.len());
    Ok(manifest)
}

// ============================================================================
// Tests
// ============================================================================
