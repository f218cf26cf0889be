//! `[client]` section configuration.
//!
//! Options baked into the generated router script at build time.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[client]` section in verso.toml - generated script behaviour.
///
/// # Example
/// ```toml
/// [client]
/// container = "#content"   # Where page HTML is injected
/// nav = true               # Render the route list into #nav
/// intercept_links = true   # Route same-origin <a> clicks client-side
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// CSS selector for the element receiving page HTML.
    #[serde(default = "defaults::client::container")]
    #[educe(Default = defaults::client::container())]
    pub container: String,

    /// Render a navigation entry per route into the `#nav` element.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub nav: bool,

    /// Intercept same-origin `<a>` clicks instead of full page loads.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub intercept_links: bool,
}
