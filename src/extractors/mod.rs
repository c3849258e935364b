//! Per-category extraction over a parsed [`DocumentTree`].
//!
//! Every function here is pure. Styles and scripts return an [`AssetPlan`]
//! whose linked entries are fetched later, once the tree has been dropped.

pub mod assets;
pub mod media;


use crate::parsers::DocumentTree;

pub use assets::{AssetPlan, scripts, styles};
pub use media::{images, videos};

/// The page markup exactly as fetched
pub fn markup(raw: &str) -> String {
    raw.to_string()
}

/// Visible body text with all whitespace runs collapsed to single spaces
pub fn text(doc: &DocumentTree) -> String {
    doc.body_text()
}
