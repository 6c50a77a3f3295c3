use espresso::source::{DigestSource, HttpSource};
use espresso::view::{DayState, DayView, IndexState, IndexView};
use espresso::FetchError;
use mockito::Server;
use std::time::Duration;

const DAY_JSON: &str = r#"{
  "date": "2024-06-01",
  "total_items": 2,
  "categories": {
    "AI": [
      {"title": "Paper one", "summary": "First", "link": "https://arxiv.org/abs/1"},
      {"title": "Paper two", "summary": "Second", "link": "https://arxiv.org/abs/2", "pdf_link": "https://arxiv.org/pdf/2"}
    ]
  },
  "category_summaries": {},
  "has_podcast": false
}"#;

fn source(server: &Server) -> HttpSource {
  HttpSource::new(&server.url(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_index() {
  let mut server = Server::new_async().await;
  let _mock = server
    .mock("GET", "/data/index.json")
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"[{"date":"2024-06-01","total_items":12,"categories":["AI"],"has_podcast":false}]"#)
    .create_async()
    .await;

  let mut view = IndexView::new();
  view.load(&source(&server)).await;

  let rows = view.timeline();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].date, "2024-06-01");
  assert_eq!(rows[0].tags, vec!["AI"]);
  assert_eq!(rows[0].total_items, 12);
}

#[tokio::test]
async fn test_index_404_is_empty() {
  let mut server = Server::new_async().await;
  let _mock = server.mock("GET", "/data/index.json").with_status(404).create_async().await;

  let source = source(&server);
  assert!(source.fetch_index().await.unwrap_err().is_not_found());

  let mut view = IndexView::new();
  assert_eq!(view.load(&source).await, &IndexState::Empty);
}

#[tokio::test]
async fn test_server_error_is_status() {
  let mut server = Server::new_async().await;
  let _mock = server.mock("GET", "/data/summaries/2024-06-01.json").with_status(500).create_async().await;

  let result = source(&server).fetch_day("2024-06-01").await;
  assert_eq!(
    result.unwrap_err(),
    FetchError::Status { path: "data/summaries/2024-06-01.json".to_string(), status: 500 }
  );
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
  let mut server = Server::new_async().await;
  let _mock = server
    .mock("GET", "/data/index.json")
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body("<html>not json</html>")
    .create_async()
    .await;

  let result = source(&server).fetch_index().await;
  assert!(matches!(result, Err(FetchError::Decode { .. })));
}

#[tokio::test]
async fn test_day_document_keeps_category_order() {
  let mut server = Server::new_async().await;
  let _mock = server
    .mock("GET", "/data/summaries/2024-06-01.json")
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(DAY_JSON)
    .create_async()
    .await;

  let mut view = DayView::new();
  view.load(&source(&server), "2024-06-01").await;

  let summary = view.summary().unwrap();
  assert_eq!(summary.categories.get("AI").unwrap().len(), 2);
  assert_eq!(view.active_category(), Some("AI"));
}

#[tokio::test]
async fn test_missing_day_is_not_found() {
  let mut server = Server::new_async().await;
  let _mock =
    server.mock("GET", "/data/summaries/2024-02-30.json").with_status(404).create_async().await;

  let mut view = DayView::new();
  assert_eq!(view.load(&source(&server), "2024-02-30").await, &DayState::NotFound);
}

#[tokio::test]
async fn test_site_in_subdirectory() {
  let mut server = Server::new_async().await;
  let mock = server
    .mock("GET", "/digest/data/index.json")
    .with_status(200)
    .with_body("[]")
    .expect(1)
    .create_async()
    .await;

  let source = HttpSource::new(&format!("{}/digest", server.url()), Duration::from_secs(5)).unwrap();
  assert!(source.fetch_index().await.unwrap().is_empty());
  mock.assert_async().await;
}
