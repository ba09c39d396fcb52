use crate::error::{ReconcileError, ReconcileResult};
use serde::Deserialize;
use serde_json::Value;

/// Raw `query` / `queries` fields as they arrive in a form body or query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReconcileParams {
    pub query: Option<String>,
    pub queries: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub key: String,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileRequest {
    Single(String),
    Batch(Vec<BatchEntry>),
    /// No query supplied; answer with the service manifest.
    Describe,
}

impl ReconcileRequest {
    /// Form fields take precedence over query-string parameters. An empty
    /// value counts as absent, so `query=` falls through to `queries`.
    pub fn from_params(form: &ReconcileParams, args: &ReconcileParams) -> ReconcileResult<Self> {
        let query = form.query.as_deref().or(args.query.as_deref());
        if let Some(raw) = query.filter(|q| !q.is_empty()) {
            return Ok(Self::Single(parse_single(raw)?));
        }

        let queries = form.queries.as_deref().or(args.queries.as_deref());
        if let Some(raw) = queries.filter(|q| !q.is_empty()) {
            return Ok(Self::Batch(parse_batch(raw)?));
        }

        Ok(Self::Describe)
    }
}

/// Bare text, or a `{"query": "..."}` envelope when the value starts with `{`.
pub fn parse_single(raw: &str) -> ReconcileResult<String> {
    if !raw.starts_with('{') {
        return Ok(raw.to_string());
    }
    let envelope: Value = serde_json::from_str(raw)?;
    query_text(&envelope)
}

pub fn parse_batch(raw: &str) -> ReconcileResult<Vec<BatchEntry>> {
    let parsed: Value = serde_json::from_str(raw)?;
    let Some(entries) = parsed.as_object() else {
        return Err(ReconcileError::InvalidBatch);
    };

    entries
        .iter()
        .map(|(key, object)| {
            if !object.is_object() {
                return Err(ReconcileError::InvalidBatch);
            }
            Ok(BatchEntry {
                key: key.clone(),
                query: query_text(object)?,
            })
        })
        .collect()
}

fn query_text(object: &Value) -> ReconcileResult<String> {
    object
        .get("query")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ReconcileError::MissingQueryText)
}
