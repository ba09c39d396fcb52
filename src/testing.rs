//! Stand-in for the archive's advanced-search endpoint, served on an
//! ephemeral loopback port. The `q` parameter selects the behaviour:
//!
//! - `fail*`, `Q1`: 503
//! - `garbled`: 200 with a non-JSON body
//! - `nodocs`: JSON without `response.docs`
//! - `empty`: zero docs
//! - `noid`: one doc lacking `identifier`
//! - `slow`: answers after two seconds
//! - `echo-params`: one doc whose title is the raw query string
//! - anything else: five Moby Dick candidates

use axum::{
    extract::RawQuery,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

pub const FAKE_SEARCH_PATH: &str = "/advancedsearch.php";

pub fn moby_docs() -> Value {
    json!([
        { "identifier": "mobydick00melv", "title": "Moby Dick", "creator": "Melville, Herman", "year": "1851", "mediatype": "texts" },
        { "identifier": "mobydickorwhale00melv", "title": "Moby Dick; or, The Whale", "creator": ["Melville, Herman"], "mediatype": "texts" },
        { "identifier": "moby-dick-audio", "title": "moby dick", "mediatype": "audio" },
        { "identifier": "untitled-scan-001", "mediatype": "texts" },
        { "identifier": "dick-moby-remix", "title": "Dick Moby", "mediatype": "audio" }
    ])
}

fn envelope(docs: Value) -> Response {
    Json(json!({ "responseHeader": { "status": 0 }, "response": { "docs": docs } })).into_response()
}

async fn advanced_search(RawQuery(raw): RawQuery) -> Response {
    let raw = raw.unwrap_or_default();
    let q = url_query_value(&raw, "q").unwrap_or_default();

    match q.as_str() {
        "Q1" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        q if q.starts_with("fail") => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        "garbled" => "<html>maintenance</html>".into_response(),
        "nodocs" => Json(json!({ "responseHeader": { "status": 0 } })).into_response(),
        "empty" => envelope(json!([])),
        "noid" => envelope(json!([{ "title": "Orphan record" }])),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            envelope(moby_docs())
        }
        "echo-params" => envelope(json!([{ "identifier": "echo", "title": raw }])),
        _ => envelope(moby_docs()),
    }
}

fn url_query_value(raw: &str, key: &str) -> Option<String> {
    let pairs: HashMap<String, String> = reqwest::Url::parse(&format!("http://x/?{raw}"))
        .ok()?
        .query_pairs()
        .into_owned()
        .collect();
    pairs.get(key).cloned()
}

/// Serve `router` on 127.0.0.1 with an OS-assigned port; returns `http://addr`.
pub async fn serve_ephemeral(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Start the fake archive; returns the full search URL.
pub async fn spawn_fake_archive() -> String {
    let router = Router::new().route(FAKE_SEARCH_PATH, get(advanced_search));
    let base = serve_ephemeral(router).await;
    format!("{base}{FAKE_SEARCH_PATH}")
}
