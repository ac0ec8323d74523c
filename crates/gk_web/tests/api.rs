use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use gk_core::{Article, ArticleScraper, ArticleSearch, Config, Error, Result, SearchResult};
use gk_web::{create_app, AppState};
use serde_json::Value;
use tower::ServiceExt;

#[derive(Default)]
struct MockScraper {
    paths: Mutex<Vec<String>>,
}

#[async_trait]
impl ArticleScraper for MockScraper {
    async fn scrape_article(&self, path: &str) -> Result<Article> {
        self.paths.lock().unwrap().push(path.to_string());
        if path.ends_with("Missing") {
            return Err(Error::status(404));
        }
        Ok(Article {
            title: "Machine learning control".to_string(),
            url: format!("https://grokipedia.com/{}", path),
            content: "First block\n\nSecond block".to_string(),
            summary: String::new(),
            categories: vec![],
            last_updated: String::new(),
        })
    }
}

struct MockSearch;

#[async_trait]
impl ArticleSearch for MockSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        if query == "explode" {
            return Err(Error::Search("deadline of 30s exceeded".to_string()));
        }
        Ok(vec![SearchResult {
            title: "Machine Learning Control".to_string(),
            url: "https://grokipedia.com/page/Machine_Learning_Control".to_string(),
            snippet: "No description available".to_string(),
        }])
    }
}

fn app() -> (Router, Arc<MockScraper>) {
    let scraper = Arc::new(MockScraper::default());
    let state = AppState {
        config: Arc::new(Config::default()),
        scraper: scraper.clone(),
        search: Arc::new(MockSearch),
    };
    (create_app(state), scraper)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(!body["version"].as_str().unwrap().is_empty());
    assert!(chrono::DateTime::parse_from_rfc3339(body["time"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_article_path_with_slashes() {
    let (app, scraper) = app();
    let (status, body) = get(app, "/api/article/page/Machine_learning_control").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Machine learning control");
    assert_eq!(body["content"], "First block\n\nSecond block");
    assert!(body.get("categories").is_none());

    let paths = scraper.paths.lock().unwrap();
    assert_eq!(paths.len(), 1);
    assert!(paths[0].ends_with("page/Machine_learning_control"));
}

#[tokio::test]
async fn test_empty_article_path_is_bad_request() {
    for uri in ["/api/article", "/api/article/"] {
        let (app, scraper) = app();
        let (status, body) = get(app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(body["message"], "Article path is required");
        assert!(scraper.paths.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_upstream_404_is_internal_error() {
    let (app, _) = app();
    let (status, body) = get(app, "/api/article/page/Missing").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Failed to fetch article: "), "{}", message);
    assert!(message.contains("status code 404"), "{}", message);
}

#[tokio::test]
async fn test_search() {
    let (app, _) = app();
    let (status, body) = get(app, "/api/search?q=machine%20learning").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "machine learning");
    assert_eq!(body["count"], 1);
    assert_eq!(
        body["results"][0]["url"],
        "https://grokipedia.com/page/Machine_Learning_Control"
    );
}

#[tokio::test]
async fn test_search_requires_query() {
    for uri in ["/api/search", "/api/search?q=", "/api/search?q=%20"] {
        let (app, _) = app();
        let (status, body) = get(app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["message"].as_str().unwrap().contains("'q'"));
    }
}

#[tokio::test]
async fn test_search_failure_is_internal_error() {
    let (app, _) = app();
    let (status, body) = get(app, "/api/search?q=explode").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["message"],
        "Search failed: Search error: deadline of 30s exceeded"
    );
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = app();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/search?q=rust")
                .header("origin", "http://example.com")
                .header("access-control-request-method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
