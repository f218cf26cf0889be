//! `[build]` section configuration.
//!
//! Contains the directory layout the build pipeline reads from and writes to.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in verso.toml - build pipeline paths.
///
/// All paths are relative to the project root unless given as absolute.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"      # Markdown sources
/// templates = "templates"  # Must contain index.html
/// static = "static"        # Mirrored into the output as-is
/// output = "dist"          # Build output
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Markdown source directory.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// HTML template directory. `index.html` inside it becomes the
    /// single page shell copied into the output.
    #[serde(default = "defaults::build::templates")]
    #[educe(Default = defaults::build::templates())]
    pub templates: PathBuf,

    /// Static assets directory (images, CSS, fonts), copied byte-for-byte.
    #[serde(rename = "static", default = "defaults::build::r#static")]
    #[educe(Default = defaults::build::r#static())]
    pub static_dir: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,
}
