// Stub Trend Engine backend for end-to-end tests.
//
// Each test spawns its own axum server on an ephemeral port and points a
// real `QueryClient` at it. Every request is recorded so tests can assert on
// paths, query strings and headers.

use axum::{
    Json, Router,
    extract::{OriginalUri, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use trend_digest::{Config, QueryClient};

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub uri: String,
    pub content_type: Option<String>,
    pub cookie: Option<String>,
}

#[derive(Clone, Default)]
pub struct RequestLog {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl RequestLog {
    fn record(&self, uri: &OriginalUri, headers: &HeaderMap) {
        let value = |name| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.seen.lock().unwrap().push(SeenRequest {
            uri: uri.0.to_string(),
            content_type: value(header::CONTENT_TYPE),
            cookie: value(header::COOKIE),
        });
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn count(&self, path_prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.uri.starts_with(path_prefix))
            .count()
    }
}

pub fn daily_summaries_fixture() -> Value {
    json!([{
        "id": 1,
        "date": "2024-01-01",
        "summary": "x",
        "topic": {"id": 1, "name": "tech"},
        "articles": [{"id": 1, "title": "A", "url": "http://a", "topics": []}]
    }])
}

async fn topics(State(log): State<RequestLog>, uri: OriginalUri, headers: HeaderMap) -> Json<Value> {
    log.record(&uri, &headers);
    Json(json!([{"id": 1, "name": "tech"}, {"id": 2, "name": "science"}, {"id": 3, "name": "quiet"}]))
}

async fn articles(State(log): State<RequestLog>, uri: OriginalUri, headers: HeaderMap) -> Json<Value> {
    log.record(&uri, &headers);
    // Slow enough for concurrent identical queries to overlap.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let body = match uri.0.query() {
        Some("topic_id=1") => json!([
            {"id": 10, "title": "Rust 2024", "url": "https://blog.rust-lang.org", "source": "hn", "topicId": 1, "topicName": "tech"},
            {"id": 11, "title": "No link here", "url": "", "source": "hn", "topicId": 1}
        ]),
        Some("topic_id=2") => json!([
            {"id": 20, "title": "Comet", "url": "https://nasa.gov/comet", "topicId": 2}
        ]),
        _ => json!([]),
    };
    Json(body)
}

async fn daily_summaries(
    State(log): State<RequestLog>,
    uri: OriginalUri,
    headers: HeaderMap,
) -> Json<Value> {
    log.record(&uri, &headers);
    Json(daily_summaries_fixture())
}

async fn topic(
    State(log): State<RequestLog>,
    uri: OriginalUri,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Json<Value> {
    log.record(&uri, &headers);
    Json(json!({"id": id, "name": "tech", "articles": [{"id": 1, "title": "A", "url": "http://a", "topics": [{"id": id, "name": "tech"}]}]}))
}

async fn article(
    State(log): State<RequestLog>,
    uri: OriginalUri,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Json<Value> {
    log.record(&uri, &headers);
    Json(json!({"id": id, "title": "A", "url": "http://a", "topics": [{"id": 1, "name": "tech"}]}))
}

/// Answers every request with a 500 and a JSON error body.
async fn failing(State(log): State<RequestLog>, uri: OriginalUri, headers: HeaderMap) -> impl IntoResponse {
    log.record(&uri, &headers);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "boom"})))
}

/// Answers 200 with a body that is not JSON.
async fn garbage(State(log): State<RequestLog>, uri: OriginalUri, headers: HeaderMap) -> impl IntoResponse {
    log.record(&uri, &headers);
    (StatusCode::OK, "<html>oops</html>")
}

pub fn healthy_router(log: RequestLog) -> Router {
    Router::new()
        .route("/topics/", get(topics))
        .route("/articles/", get(articles))
        .route("/daily-summaries/", get(daily_summaries))
        .route("/topic/:id/", get(topic))
        .route("/article/:id/", get(article))
        .with_state(log)
}

pub fn failing_router(log: RequestLog) -> Router {
    Router::new()
        .route("/topics/", get(garbage))
        .route("/articles/", get(failing))
        .route("/daily-summaries/", get(failing))
        .with_state(log)
}

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn config_for(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        session_cookie: Some("session=abc123".to_string()),
        request_timeout_secs: 5,
        ..Config::default()
    }
}

pub struct TestContext {
    pub log: RequestLog,
    pub client: QueryClient,
}

impl TestContext {
    pub async fn healthy() -> Self {
        Self::with_router(healthy_router).await
    }

    pub async fn failing() -> Self {
        Self::with_router(failing_router).await
    }

    async fn with_router(build: fn(RequestLog) -> Router) -> Self {
        let log = RequestLog::default();
        let base_url = spawn(build(log.clone())).await;
        let client = QueryClient::from_config(&config_for(&base_url)).unwrap();
        Self { log, client }
    }
}
