use crate::parsers::text;
use scraper::{ElementRef, Html};

/// Elements whose text content is never rendered
const NON_VISIBLE: [&str; 4] = ["script", "style", "noscript", "template"];

/// Parsed, queryable HTML document.
///
/// Parsing never fails: malformed or partial markup is repaired the way a
/// browser would repair it.
pub struct DocumentTree {
    html: Html,
}

impl DocumentTree {
    /// Parses raw markup into a tree
    pub fn parse(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            ::log::trace!("Markup parsed with {} recoverable errors", html.errors.len());
        }
        Self { html }
    }

    /// All elements with the given tag name, in document order
    pub fn elements<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = Element<'a>> + 'a {
        named(self.html.root_element().descendants().filter_map(ElementRef::wrap), tag)
    }

    /// The `<body>` element, if the document has one
    pub fn body(&self) -> Option<Element<'_>> {
        self.elements("body").next()
    }

    /// Whitespace-normalized visible text of the body
    pub fn body_text(&self) -> String {
        self.body()
            .map(|body| body.visible_text())
            .unwrap_or_default()
    }
}

/// A single element of a [`DocumentTree`]
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

impl<'a> Element<'a> {
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Attribute value, treating an empty string as absent
    pub fn non_empty_attr(&self, name: &str) -> Option<&'a str> {
        self.attr(name).filter(|value| !value.is_empty())
    }

    /// Whether the whole (trimmed) attribute value equals `expected`, ignoring ASCII case
    pub fn attr_is(&self, name: &str, expected: &str) -> bool {
        self.attr(name)
            .is_some_and(|value| value.trim().eq_ignore_ascii_case(expected))
    }

    /// Raw text content, concatenated verbatim
    pub fn text(&self) -> String {
        self.inner.text().collect()
    }

    /// Descendant elements with the given tag name, excluding `self`
    pub fn descendants(self, tag: &'a str) -> impl Iterator<Item = Element<'a>> + 'a {
        named(
            self.inner.descendants().skip(1).filter_map(ElementRef::wrap),
            tag,
        )
    }

    /// Concatenated text a reader would see, whitespace-normalized
    pub fn visible_text(&self) -> String {
        let concatenated: String = self.inner.descendants().filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|e| NON_VISIBLE.contains(&e.name()))
            });
            (!hidden).then_some(&**text)
        })
        .collect();
        text::normalize_whitespace(&concatenated)
    }
}

impl<'a> From<ElementRef<'a>> for Element<'a> {
    fn from(inner: ElementRef<'a>) -> Self {
        Self { inner }
    }
}

fn named<'a>(
    elements: impl Iterator<Item = ElementRef<'a>> + 'a,
    tag: &'a str,
) -> impl Iterator<Item = Element<'a>> + 'a {
    elements
        .filter(move |e| e.value().name().eq_ignore_ascii_case(tag))
        .map(Element::from)
}
