use crate::parsers::DocumentTree;
use crate::resolver;

/// Inline bodies found in the markup plus resolved URLs still to be fetched,
/// both in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetPlan {
    pub inline: Vec<String>,
    pub linked: Vec<String>,
}

impl AssetPlan {
    pub fn is_empty(&self) -> bool {
        self.inline.is_empty() && self.linked.is_empty()
    }
}

/// `<style>` blocks and `<link rel="stylesheet">` targets
pub fn styles(doc: &DocumentTree, base: &str) -> AssetPlan {
    let inline = doc
        .elements("style")
        .map(|style| style.text())
        .filter(|body| !body.is_empty())
        .collect();

    let linked = doc
        .elements("link")
        .filter(|link| link.attr_is("rel", "stylesheet"))
        .filter_map(|link| link.non_empty_attr("href"))
        .map(|href| resolver::resolve(href, base))
        .collect();

    AssetPlan { inline, linked }
}

/// Inline `<script>` bodies and `<script src>` targets
pub fn scripts(doc: &DocumentTree, base: &str) -> AssetPlan {
    let mut plan = AssetPlan::default();
    for script in doc.elements("script") {
        if script.has_attr("src") {
            if let Some(src) = script.non_empty_attr("src") {
                plan.linked.push(resolver::resolve(src, base));
            }
        } else {
            let body = script.text();
            if !body.is_empty() {
                plan.inline.push(body);
            }
        }
    }
    plan
}
