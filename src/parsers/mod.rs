//! Markup parsing.
//!
//! Extractors only see [`DocumentTree`] and [`Element`]; the underlying HTML
//! parser stays an implementation detail of [`html`].

pub mod html;
pub mod text;


pub use html::{DocumentTree, Element};
