//! Content tree walking and page assembly.
//!
//! One `.md` source file becomes one [`Page`]: its route, its rendered
//! HTML (metadata header included), and its raw metadata. Source paths
//! are processed in sorted order so route collisions resolve the same
//! way on every build.

use crate::compiler::frontmatter::{self, FrontMatter};
use crate::compiler::markdown;
use crate::compiler::meta::{self, Metadata};
use crate::config::SiteConfig;
use crate::log;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// One routed page, the unit the manifest is assembled from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub route: String,
    pub content: String,
    pub metadata: Metadata,
}

/// Walk the content root and build every page, keyed by route.
///
/// The first read or render failure aborts the walk. A missing content
/// directory is an error; an empty one is an empty page set.
pub fn collect_pages(config: &SiteConfig) -> Result<BTreeMap<String, Page>> {
    let content_dir = &config.build.content;

    let mut sources = Vec::new();
    for entry in WalkDir::new(content_dir) {
        let entry = entry.with_context(|| {
            format!(
                "Failed to walk content directory `{}`",
                content_dir.display()
            )
        })?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "md")
        {
            sources.push(entry.into_path());
        }
    }
    sources.sort();

    let mut pages = BTreeMap::new();
    for source in &sources {
        let page = build_page(source, content_dir)?;
        insert_page(&mut pages, source, page);
    }

    Ok(pages)
}

/// Read, split, render and route a single source file.
fn build_page(source: &Path, content_dir: &Path) -> Result<Page> {
    let route = route_for(source, content_dir)?;

    let raw = fs::read_to_string(source)
        .with_context(|| format!("Failed to read `{}`", source.display()))?;

    let (matter, body) = frontmatter::split(&raw);
    if let FrontMatter::Invalid(err) = &matter {
        log!("warn"; "Ignoring malformed front matter in `{}`: {err}", source.display());
    }
    let metadata = matter.into_metadata();

    let mut content = markdown::render(body);
    if let Some(header) = meta::format_header(&metadata) {
        content = format!("{header}\n{content}");
    }

    log!("content"; "{source} -> /{route}", source = source.display());

    Ok(Page {
        route,
        content,
        metadata,
    })
}

/// Derive a page route: the source path relative to the content root with
/// the `.md` suffix stripped and separators normalized to `/`.
pub fn route_for(source: &Path, content_dir: &Path) -> Result<String> {
    let relative = source
        .strip_prefix(content_dir)
        .map_err(|_| anyhow!("File is not in content directory: {}", source.display()))?;

    let stripped = relative.with_extension("");
    let mut parts = Vec::new();
    for component in stripped.components() {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| anyhow!("Invalid path encoding: {}", source.display()))?;
        parts.push(part.to_owned());
    }

    Ok(parts.join("/"))
}

/// Insert a page, warning when it displaces one already built for the
/// same route. Later sources win; sorted input keeps the winner stable.
fn insert_page(pages: &mut BTreeMap<String, Page>, source: &Path, page: Page) {
    let route = page.route.clone();
    if pages.insert(route.clone(), page).is_some() {
        log!(
            "warn";
            "Route collision at `/{route}`: `{}` replaces an earlier page",
            source.display()
        );
    }
}
