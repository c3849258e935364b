use crate::filter::VideoLinkFilter;
use crate::parsers::DocumentTree;
use crate::resolver;

/// Image URLs from `<img src>`, falling back to lazy-loading `data-src`
pub fn images(doc: &DocumentTree, base: &str) -> Vec<String> {
    doc.elements("img")
        .filter_map(|img| img.non_empty_attr("src").or_else(|| img.non_empty_attr("data-src")))
        .map(|src| resolver::resolve(src, base))
        .collect()
}

/// Video URLs from `<video src>`, nested `<source src>`, then anchors whose
/// target looks like a video file
pub fn videos(doc: &DocumentTree, base: &str, filter: &VideoLinkFilter) -> Vec<String> {
    let mut found = Vec::new();

    for video in doc.elements("video") {
        if let Some(src) = video.non_empty_attr("src") {
            found.push(resolver::resolve(src, base));
        }
        for source in video.descendants("source") {
            if let Some(src) = source.non_empty_attr("src") {
                found.push(resolver::resolve(src, base));
            }
        }
    }

    for anchor in doc.elements("a") {
        let Some(href) = anchor.non_empty_attr("href") else {
            continue;
        };
        let resolved = resolver::resolve(href, base);
        if filter.is_video_link(&resolved) {
            found.push(resolved);
        }
    }

    found
}
