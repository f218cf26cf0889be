//! Output artifact generation.
//!
//! Projects the compiled page set into the two artifacts the browser
//! consumes: the `content.json` manifest and the self-contained
//! `app.js` router script.

pub mod client;
pub mod manifest;

pub use client::write_client;
pub use manifest::ContentManifest;
