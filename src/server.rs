//! JSON-over-HTTP front end for [`PageScraper`]

use crate::config::ServerConfig;
use crate::error::ScrapeError;
use crate::fetchers::Fetcher;
use crate::results::ExtractionResult;
use crate::PageScraper;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Maximum accepted request body
const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Body of `POST /scrape`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapeRequestBody {
    #[serde(default)]
    pub url: Option<String>,

    /// Category identifiers; `contentTypes` is accepted for older clients
    #[serde(default, alias = "contentTypes")]
    pub categories: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub message: &'static str,
    pub results: ExtractionResult,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

/// Build the router around a shared scraper
pub fn router<F: Fetcher + 'static>(scraper: Arc<PageScraper<F>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/scrape", post(scrape_handler::<F>))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(scraper)
}

/// Bind the configured address and serve until the process exits
pub async fn serve<F: Fetcher + 'static>(
    scraper: PageScraper<F>,
    config: &ServerConfig,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    ::log::info!("Server running on http://{}", listener.local_addr()?);
    axum::serve(listener, router(Arc::new(scraper))).await
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn scrape_handler<F: Fetcher + 'static>(
    State(scraper): State<Arc<PageScraper<F>>>,
    body: Result<Json<ScrapeRequestBody>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            ::log::warn!("Rejected scrape body: {}", rejection.body_text());
            let body = ErrorResponse {
                error: "Invalid JSON body".to_string(),
                details: rejection.body_text(),
            };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };
    let url = body.url.unwrap_or_default();
    let categories = body.categories.unwrap_or_default();

    match scraper.scrape_url(&url, &categories).await {
        Ok(results) => (
            StatusCode::OK,
            Json(ScrapeResponse {
                message: "Scrape complete",
                results,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(error: ScrapeError) -> Response {
    let (status, message) = match &error {
        ScrapeError::InvalidRequest(_) => {
            (StatusCode::BAD_REQUEST, "Missing or invalid url or categories")
        }
        ScrapeError::PageFetch(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch or parse the URL",
        ),
    };
    let body = ErrorResponse {
        error: message.to_string(),
        details: error.to_string(),
    };
    (status, Json(body)).into_response()
}
