use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::response::Html;
use axum::routing::get;
use axum::Router;
use gk_core::config::CHROME_PATH_VAR;
use gk_core::{Config, NO_DESCRIPTION};
use gk_scrapers::SearchDriver;

const CHROMIUM_CANDIDATES: [&str; 5] = [
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/opt/google/chrome/chrome",
];

fn chromium() -> Option<PathBuf> {
    std::env::var(CHROME_PATH_VAR)
        .ok()
        .map(PathBuf::from)
        .into_iter()
        .chain(CHROMIUM_CANDIDATES.iter().map(PathBuf::from))
        .find(|path| path.is_file())
}

fn long_paragraph() -> String {
    (0..250).map(|i| char::from(b'a' + (i % 26) as u8)).collect()
}

fn item(title: Option<&str>, paragraphs: &[&str]) -> String {
    let title = title
        .map(|t| format!(r#"<span class="line-clamp-1"><span>{}</span></span>"#, t))
        .unwrap_or_default();
    let paragraphs: String = paragraphs.iter().map(|p| format!("<p>{}</p>", p)).collect();
    format!(r#"<div class="cursor-pointer">{}{}</div>"#, title, paragraphs)
}

/// 25 unique topics plus an untitled item and two repeated titles, all placed
/// before the 20th unique topic.
fn search_page() -> String {
    let long = long_paragraph();
    let mut items = vec![
        item(None, &["An untitled item with a long enough paragraph."]),
        item(Some("Topic 0"), &["Too short.", "The second paragraph is long enough."]),
        item(Some("Topic 1"), &["First listing of topic one, kept."]),
        item(Some("Topic 1"), &["Second listing of topic one, dropped."]),
        item(Some("Topic 2"), &[long.as_str()]),
        item(Some("Topic 3"), &["exactly twenty chars"]),
        item(Some("Topic 3"), &["Repeated topic three with a long paragraph."]),
        item(Some("Topic 4"), &[]),
    ];
    for i in 5..25 {
        let title = format!("Topic {}", i);
        let paragraph = format!("Summary paragraph for topic number {}.", i);
        items.push(item(Some(title.as_str()), &[paragraph.as_str()]));
    }
    format!(
        "<!DOCTYPE html><html><body><main>{}</main></body></html>",
        items.concat()
    )
}

async fn serve() -> String {
    let page = search_page();
    let router = Router::new().route(
        "/search",
        get(move || {
            let page = page.clone();
            async move { Html(page) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_search_against_local_page() {
    let Some(chrome) = chromium() else {
        eprintln!("skipping: no Chromium found (set {})", CHROME_PATH_VAR);
        return;
    };

    let base = serve().await;
    let mut config = Config::new(&base).unwrap().with_chrome_executable(Some(chrome));
    config.render_settle = Duration::from_millis(200);
    let driver = SearchDriver::new(Arc::new(config));

    let results = driver.search("topic").await.unwrap();

    let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
    let expected: Vec<_> = (0..20).map(|i| format!("Topic {}", i)).collect();
    assert_eq!(titles, expected);

    for result in &results {
        let slug = result.title.replace(' ', "_");
        assert_eq!(result.url, format!("{}/page/{}", base, slug));
    }

    assert_eq!(results[0].snippet, "The second paragraph is long enough.");
    assert_eq!(results[1].snippet, "First listing of topic one, kept.");
    assert_eq!(results[2].snippet, long_paragraph().chars().take(200).collect::<String>());
    assert_eq!(results[3].snippet, NO_DESCRIPTION);
    assert_eq!(results[4].snippet, NO_DESCRIPTION);
    assert_eq!(results[5].snippet, "Summary paragraph for topic number 5.");
    assert!(results.iter().all(|r| r.snippet.chars().count() <= 200));
}
