use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Malformed JSON in `query` or `queries`.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    #[error("'queries' must be a JSON object mapping keys to query objects")]
    InvalidBatch,

    #[error("query object has no string 'query' field")]
    MissingQueryText,

    /// Candidate document without a usable `identifier`.
    #[error("candidate is missing 'identifier'")]
    MissingIdentifier,

    /// Transport, status or body failure talking to the archive.
    /// Absorbed by the fetcher; never reaches a client.
    #[error("archive search failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for ReconcileError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "reconcile failed");
        let body = json!({ "error": self.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub type ReconcileResult<T> = Result<T, ReconcileError>;
