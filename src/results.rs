use crate::request::CategoryKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extracted content for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryPayload {
    /// A single document (markup or text)
    Document(String),
    /// Ordered bodies or references (styles, scripts, images, videos)
    Items(Vec<String>),
}

impl CategoryPayload {
    pub fn as_document(&self) -> Option<&str> {
        match self {
            CategoryPayload::Document(doc) => Some(doc),
            CategoryPayload::Items(_) => None,
        }
    }

    pub fn as_items(&self) -> Option<&[String]> {
        match self {
            CategoryPayload::Items(items) => Some(items),
            CategoryPayload::Document(_) => None,
        }
    }
}

/// Result of one scrape: exactly one entry per requested category.
///
/// Serializes as a JSON object keyed by category name, in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionResult {
    entries: BTreeMap<CategoryKind, CategoryPayload>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: CategoryKind, payload: CategoryPayload) {
        self.entries.insert(kind, payload);
    }

    pub fn get(&self, kind: CategoryKind) -> Option<&CategoryPayload> {
        self.entries.get(&kind)
    }

    /// Shortcut for markup and text
    pub fn document(&self, kind: CategoryKind) -> Option<&str> {
        self.get(kind).and_then(CategoryPayload::as_document)
    }

    /// Shortcut for the sequence categories
    pub fn items(&self, kind: CategoryKind) -> Option<&[String]> {
        self.get(kind).and_then(CategoryPayload::as_items)
    }

    pub fn kinds(&self) -> impl Iterator<Item = CategoryKind> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
