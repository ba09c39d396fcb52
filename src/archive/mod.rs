pub mod candidate;

pub use candidate::{Candidate, NO_TITLE};

use crate::config::{ServiceConfig, FETCH_ROWS, SEARCH_FIELDS};
use crate::error::ReconcileResult;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

const USER_AGENT: &str = concat!("ia-recon/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Default, Deserialize)]
struct SearchEnvelope {
    response: Option<SearchDocs>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchDocs {
    docs: Option<Vec<Value>>,
}

/// Client for the archive's advanced-search endpoint.
#[derive(Clone)]
pub struct ArchiveClient {
    client: reqwest::Client,
    search_url: String,
}

impl ArchiveClient {
    pub fn new(config: &ServiceConfig) -> ReconcileResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            search_url: config.search_url.clone(),
        })
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Candidate documents for `query`. Any upstream failure is logged and
    /// yields an empty list so the caller still gets an answer.
    pub async fn search(&self, query: &str) -> Vec<Value> {
        match self.try_search(query).await {
            Ok(docs) => docs,
            Err(e) => {
                error!(query, error = %e, "error querying Internet Archive");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str) -> ReconcileResult<Vec<Value>> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&search_params(query))
            .send()
            .await?;

        debug!(url = %response.url(), status = %response.status(), "archive search response");

        let body = response.error_for_status()?.text().await?;
        debug!(body = %body, "archive search body");

        let docs = parse_docs(&body)?;
        debug!(query, docs = docs.len(), "archive candidates fetched");
        Ok(docs)
    }
}

/// Documents under `response.docs`; a missing path is an empty list.
fn parse_docs(body: &str) -> ReconcileResult<Vec<Value>> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;
    Ok(envelope
        .response
        .and_then(|r| r.docs)
        .unwrap_or_default())
}

fn search_params(query: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![("q", query.to_string())];
    params.extend(SEARCH_FIELDS.iter().map(|field| ("fl[]", field.to_string())));
    params.push(("rows", FETCH_ROWS.to_string()));
    params.push(("output", "json".to_string()));
    params
}
