//! Runs the requested extractors over one page and assembles the result.
//!
//! Extraction happens in two phases. [`plan`] parses the markup once and
//! runs every requested extractor synchronously; the tree is dropped before
//! it returns. [`extract`] then performs the sub-resource fetches the plan
//! calls for, so no document tree is ever held across an await point.

use crate::config::ScraperConfig;
use crate::extractors::{self, AssetPlan};
use crate::fetchers::{FetchOutcome, Fetcher};
use crate::filter::VideoLinkFilter;
use crate::parsers::DocumentTree;
use crate::request::{CategoryKind, ScrapeRequest};
use crate::results::{CategoryPayload, ExtractionResult};
use futures::stream::{self, StreamExt};
use std::time::Duration;

/// A category's result before any sub-resource fetching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Planned {
    /// Complete payload, nothing left to fetch
    Ready(CategoryPayload),
    /// Inline bodies plus linked assets to retrieve
    Assets(AssetPlan),
}

/// Run every requested extractor against a single parse of `markup`
pub fn plan(
    request: &ScrapeRequest,
    markup: &str,
    video_filter: &VideoLinkFilter,
) -> Vec<(CategoryKind, Planned)> {
    let base = request.target_url();
    let needs_tree = request
        .categories()
        .iter()
        .any(|kind| *kind != CategoryKind::Markup);
    let doc = needs_tree.then(|| DocumentTree::parse(markup));

    let mut planned = Vec::with_capacity(request.categories().len());
    for &kind in request.categories() {
        let entry = match (kind, doc.as_ref()) {
            (CategoryKind::Markup, _) => {
                Planned::Ready(CategoryPayload::Document(extractors::markup(markup)))
            }
            (CategoryKind::Text, Some(doc)) => {
                Planned::Ready(CategoryPayload::Document(extractors::text(doc)))
            }
            (CategoryKind::Styles, Some(doc)) => Planned::Assets(extractors::styles(doc, base)),
            (CategoryKind::Scripts, Some(doc)) => Planned::Assets(extractors::scripts(doc, base)),
            (CategoryKind::Images, Some(doc)) => {
                Planned::Ready(CategoryPayload::Items(extractors::images(doc, base)))
            }
            (CategoryKind::Videos, Some(doc)) => Planned::Ready(CategoryPayload::Items(
                extractors::videos(doc, base, video_filter),
            )),
            (_, None) => continue,
        };
        ::log::debug!("Planned {} for {}", kind, base);
        planned.push((kind, entry));
    }
    planned
}

/// Extract every requested category from already-fetched page markup
pub async fn extract<F: Fetcher + ?Sized>(
    fetcher: &F,
    config: &ScraperConfig,
    video_filter: &VideoLinkFilter,
    request: &ScrapeRequest,
    markup: &str,
) -> ExtractionResult {
    let planned = plan(request, markup, video_filter);

    let mut result = ExtractionResult::new();
    for (kind, entry) in planned {
        let payload = match entry {
            Planned::Ready(payload) => payload,
            Planned::Assets(AssetPlan { inline, linked }) => {
                let fetched = fetch_all(
                    fetcher,
                    &linked,
                    config.resource_timeout(),
                    config.max_concurrent_fetches,
                )
                .await;
                CategoryPayload::Items(assemble(kind, inline, fetched))
            }
        };
        result.insert(kind, payload);
    }
    result
}

/// Fetch `urls` with bounded concurrency; outcomes keep the order of `urls`
pub async fn fetch_all<F: Fetcher + ?Sized>(
    fetcher: &F,
    urls: &[String],
    timeout: Duration,
    max_concurrency: usize,
) -> Vec<FetchOutcome> {
    let fetches: Vec<_> = urls
        .iter()
        .map(|url| fetcher.fetch(url, timeout))
        .collect();
    stream::iter(fetches)
        .buffered(max_concurrency.max(1))
        .collect()
        .await
}

/// Inline bodies first, then every successfully fetched body; failures are
/// logged and dropped
pub fn assemble(kind: CategoryKind, inline: Vec<String>, fetched: Vec<FetchOutcome>) -> Vec<String> {
    let mut bodies = inline;
    let mut skipped = 0;
    for outcome in fetched {
        match outcome {
            Ok(body) => bodies.push(body),
            Err(e) => {
                skipped += 1;
                ::log::warn!("Skipping {} entry: {}", kind, e);
            }
        }
    }
    ::log::debug!("Collected {} {} entries ({} skipped)", bodies.len(), kind, skipped);
    bodies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetchers::mock::StaticFetcher;

    const PAGE: &str = "https://x.com/dir/page.html";

    fn request(categories: &[&str]) -> ScrapeRequest {
        ScrapeRequest::new(PAGE, categories).unwrap()
    }

    async fn run(fetcher: &StaticFetcher, categories: &[&str], markup: &str) -> ExtractionResult {
        extract(
            fetcher,
            &ScraperConfig::default(),
            &VideoLinkFilter::default(),
            &request(categories),
            markup,
        )
        .await
    }

    #[tokio::test]
    async fn test_extract_runs_on_spawned_task() {
        let fetcher = std::sync::Arc::new(
            StaticFetcher::new()
                .with_body("https://x.com/dir/a.js", "a()")
                .with_body("https://x.com/dir/b.js", "b()"),
        );
        let shared = fetcher.clone();
        let handle = tokio::spawn(async move {
            extract(
                shared.as_ref(),
                &ScraperConfig::default(),
                &VideoLinkFilter::default(),
                &request(&["scripts"]),
                "<script src='a.js'></script><script src='b.js'></script>",
            )
            .await
        });
        let result = handle.await.unwrap();
        assert_eq!(result.items(CategoryKind::Scripts).unwrap(), &["a()", "b()"]);
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[test]
    fn test_assemble_drops_failures() {
        let fetched = vec![
            Ok("a".to_string()),
            Err(FetchError::Status {
                url: "https://x.com/b.css".to_string(),
                status: 500,
            }),
            Ok("c".to_string()),
        ];
        let bodies = assemble(CategoryKind::Styles, vec!["inline".to_string()], fetched);
        assert_eq!(bodies, vec!["inline", "a", "c"]);
    }

    #[test]
    fn test_plan_follows_canonical_order() {
        let planned = plan(
            &request(&["videos", "scripts", "markup", "text"]),
            "<p>hi</p>",
            &VideoLinkFilter::default(),
        );
        let kinds: Vec<_> = planned.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(
            kinds,
            vec![
                CategoryKind::Markup,
                CategoryKind::Text,
                CategoryKind::Scripts,
                CategoryKind::Videos
            ]
        );
    }

    #[tokio::test]
    async fn test_result_has_exactly_requested_keys() {
        let fetcher = StaticFetcher::new();
        let result = run(&fetcher, &["img", "txt"], "<p>hi</p><img src='a.png'>").await;

        assert_eq!(
            result.kinds().collect::<Vec<_>>(),
            vec![CategoryKind::Text, CategoryKind::Images]
        );
        assert_eq!(result.document(CategoryKind::Text), Some("hi"));
        assert_eq!(
            result.items(CategoryKind::Images),
            Some(&["https://x.com/dir/a.png".to_string()][..])
        );
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_markup_is_byte_identical() {
        let markup = "<!DOCTYPE html>\n<html>\r\n<body>\t<p>unclosed";
        let fetcher = StaticFetcher::new();
        let result = run(&fetcher, &["markup"], markup).await;
        assert_eq!(result.document(CategoryKind::Markup), Some(markup));
    }

    #[tokio::test]
    async fn test_inline_styles_precede_fetched() {
        let fetcher = StaticFetcher::new()
            .with_body("https://x.com/dir/first.css", "/* first */")
            .with_body("https://x.com/last.css", "/* last */");
        let markup = r#"<head>
            <link rel="stylesheet" href="first.css">
            <link rel="stylesheet" href="/missing.css">
        </head><body>
            <style>.inline {}</style>
            <link rel="stylesheet" href="/last.css">
        </body>"#;

        let result = run(&fetcher, &["styles"], markup).await;
        assert_eq!(
            result.items(CategoryKind::Styles).unwrap(),
            &[".inline {}", "/* first */", "/* last */"]
        );
        assert_eq!(
            fetcher.requests(),
            vec![
                "https://x.com/dir/first.css",
                "https://x.com/missing.css",
                "https://x.com/last.css"
            ]
        );
    }

    #[tokio::test]
    async fn test_scripts_keep_reference_order_despite_completion_order() {
        let fetcher = StaticFetcher::new()
            .with_delayed_body("https://x.com/dir/slow.js", "slow()", Duration::from_millis(200))
            .with_body("https://x.com/dir/fast.js", "fast()");
        let markup = r#"<script src="slow.js"></script><script>inline()</script><script src="fast.js"></script>"#;

        let result = run(&fetcher, &["scripts"], markup).await;
        assert_eq!(
            result.items(CategoryKind::Scripts).unwrap(),
            &["inline()", "slow()", "fast()"]
        );
    }

    #[tokio::test]
    async fn test_timed_out_resource_is_skipped() {
        let fetcher = StaticFetcher::new()
            .with_delayed_body("https://x.com/dir/hang.js", "never()", Duration::from_secs(60))
            .with_body("https://x.com/dir/ok.js", "ok()");
        let config = ScraperConfig {
            resource_timeout_secs: 0,
            ..ScraperConfig::default()
        };
        let markup = r#"<script src="hang.js"></script><script src="ok.js"></script>"#;

        let result = extract(
            &fetcher,
            &config,
            &VideoLinkFilter::default(),
            &request(&["js"]),
            markup,
        )
        .await;
        assert_eq!(result.items(CategoryKind::Scripts).unwrap(), &["ok()"]);
    }

    #[tokio::test]
    async fn test_all_sub_resources_failing_still_succeeds() {
        let fetcher = StaticFetcher::new();
        let markup = r#"<link rel="stylesheet" href="a.css"><script src="b.js"></script>"#;

        let result = run(&fetcher, &["css", "js"], markup).await;
        assert_eq!(result.items(CategoryKind::Styles), Some(&[][..]));
        assert_eq!(result.items(CategoryKind::Scripts), Some(&[][..]));
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_unresolvable_link_is_skipped() {
        let fetcher = StaticFetcher::new().with_body("https://x.com/dir/good.css", "good");
        let markup =
            r#"<link rel="stylesheet" href="not a url::"><link rel="stylesheet" href="good.css">"#;

        let result = run(&fetcher, &["styles"], markup).await;
        assert_eq!(result.items(CategoryKind::Styles).unwrap(), &["good"]);
        assert_eq!(fetcher.requests()[0], "not a url::");
    }

    #[tokio::test]
    async fn test_extraction_is_idempotent() {
        let fetcher = StaticFetcher::new().with_body("https://x.com/dir/a.css", "a");
        let markup = r#"<link rel="stylesheet" href="a.css"><style>b</style>
            <img src="1.png"><video src="v.mp4"></video><p>text</p>"#;
        let categories = ["videos", "images", "styles", "text", "markup"];

        let first = run(&fetcher, &categories, markup).await;
        let second = run(&fetcher, &categories, markup).await;
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[tokio::test]
    async fn test_fetch_all_preserves_order() {
        let fetcher = StaticFetcher::new()
            .with_delayed_body("https://x.com/1", "one", Duration::from_millis(100))
            .with_body("https://x.com/2", "two");
        let urls = vec![
            "https://x.com/1".to_string(),
            "https://x.com/missing".to_string(),
            "https://x.com/2".to_string(),
        ];

        let outcomes = fetch_all(&fetcher, &urls, Duration::from_secs(1), 0).await;
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].as_deref().ok(), Some("one"));
        assert!(outcomes[1].is_err());
        assert_eq!(outcomes[2].as_deref().ok(), Some("two"));
    }
}
