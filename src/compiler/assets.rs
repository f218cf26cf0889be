//! Template and static asset copying.

use crate::config::SiteConfig;
use crate::log;
use anyhow::{Context, Result};
use std::fs;
use walkdir::WalkDir;

/// Copy the template shell `templates/index.html` into the output
/// directory unchanged. A missing template is a build error.
pub fn copy_template(config: &SiteConfig) -> Result<()> {
    let source = config.build.templates.join("index.html");
    let dest = config.build.output.join("index.html");

    fs::copy(&source, &dest)
        .with_context(|| format!("Failed to copy template `{}`", source.display()))?;

    Ok(())
}

/// Mirror the static directory tree into the output directory,
/// preserving relative paths. A missing static directory means there is
/// nothing to copy, not an error.
pub fn copy_static(config: &SiteConfig) -> Result<()> {
    let static_dir = &config.build.static_dir;
    if !static_dir.exists() {
        return Ok(());
    }

    for entry in WalkDir::new(static_dir) {
        let entry = entry.with_context(|| {
            format!("Failed to walk static directory `{}`", static_dir.display())
        })?;

        let relative = entry.path().strip_prefix(static_dir)?;
        let dest = config.build.output.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).with_context(|| {
                format!("Failed to create directory `{}`", dest.display())
            })?;
            continue;
        }

        log!("static"; "{}", relative.display());
        fs::copy(entry.path(), &dest).with_context(|| {
            format!("Failed to copy static asset `{}`", entry.path().display())
        })?;
    }

    Ok(())
}
