//! Markdown compilation for static site generation.
//!
//! This module turns the content tree into routed pages:
//!
//! - **frontmatter**: split `---` metadata blocks off page bodies
//! - **markdown**: render Markdown bodies to HTML
//! - **meta**: typed metadata access and the injected header fragment
//! - **pages**: walk the content tree and assemble [`Page`]s
//! - **assets**: copy the template shell and mirror the static tree
//!
//! # Build Flow
//!
//! ```text
//! collect_pages()
//!     │
//!     ├── frontmatter::split() ──► meta (raw key-values)
//!     ├── markdown::render()   ──► HTML body
//!     └── meta::format_header()──► header fragment, prepended
//!                 │
//!                 ▼
//!        BTreeMap<route, Page>
//! ```

pub mod assets;
pub mod frontmatter;
pub mod markdown;
pub mod meta;
pub mod pages;

// ============================================================================
// Public API
// ============================================================================

pub use meta::Metadata;
pub use pages::Page;
pub use pages::collect_pages;
