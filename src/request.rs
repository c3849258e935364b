use crate::error::ScrapeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Content categories that can be extracted from a page.
///
/// Declaration order is the canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Raw page markup
    Markup,
    /// Visible body text
    Text,
    /// Inline and linked stylesheets
    Styles,
    /// Inline and external scripts
    Scripts,
    /// Image URLs
    Images,
    /// Video URLs
    Videos,
}

impl CategoryKind {
    /// Every category, in canonical order
    pub const ALL: [CategoryKind; 6] = [
        CategoryKind::Markup,
        CategoryKind::Text,
        CategoryKind::Styles,
        CategoryKind::Scripts,
        CategoryKind::Images,
        CategoryKind::Videos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Markup => "markup",
            CategoryKind::Text => "text",
            CategoryKind::Styles => "styles",
            CategoryKind::Scripts => "scripts",
            CategoryKind::Images => "images",
            CategoryKind::Videos => "videos",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier that is not one of the known categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {:?}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for CategoryKind {
    type Err = UnknownCategory;

    /// Accepts the canonical names plus the short forms used by older clients
    /// (`html`, `txt`, `css`, `js`, `img`, `video`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markup" | "html" => Ok(CategoryKind::Markup),
            "text" | "txt" => Ok(CategoryKind::Text),
            "styles" | "css" => Ok(CategoryKind::Styles),
            "scripts" | "js" => Ok(CategoryKind::Scripts),
            "images" | "img" | "image" => Ok(CategoryKind::Images),
            "videos" | "video" => Ok(CategoryKind::Videos),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// A validated scrape request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    target_url: String,
    categories: Vec<CategoryKind>,
}

impl ScrapeRequest {
    /// Builds a request from raw category identifiers.
    ///
    /// Unknown identifiers are dropped; the request is invalid only when
    /// nothing recognizable remains or the URL is not an absolute URL.
    pub fn new<I, S>(target_url: &str, categories: I) -> Result<Self, ScrapeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kinds = Vec::new();
        for raw in categories {
            match raw.as_ref().parse::<CategoryKind>() {
                Ok(kind) => kinds.push(kind),
                Err(e) => ::log::warn!("Ignoring {}", e),
            }
        }
        Self::from_kinds(target_url, kinds)
    }

    /// Builds a request from already-typed categories
    pub fn from_kinds(
        target_url: &str,
        categories: impl IntoIterator<Item = CategoryKind>,
    ) -> Result<Self, ScrapeError> {
        let target_url = target_url.trim();
        if target_url.is_empty() {
            return Err(ScrapeError::InvalidRequest("missing url".to_string()));
        }
        match Url::parse(target_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ScrapeError::InvalidRequest(format!(
                    "unsupported url scheme: {}",
                    url.scheme()
                )));
            }
            Err(e) => {
                return Err(ScrapeError::InvalidRequest(format!(
                    "invalid url {:?}: {}",
                    target_url, e
                )));
            }
        }

        let mut categories: Vec<CategoryKind> = categories.into_iter().collect();
        categories.sort();
        categories.dedup();
        if categories.is_empty() {
            return Err(ScrapeError::InvalidRequest(
                "no recognized categories requested".to_string(),
            ));
        }

        Ok(Self {
            target_url: target_url.to_string(),
            categories,
        })
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Requested categories, deduplicated and in canonical order
    pub fn categories(&self) -> &[CategoryKind] {
        &self.categories
    }

    pub fn wants(&self, kind: CategoryKind) -> bool {
        self.categories.contains(&kind)
    }
}
