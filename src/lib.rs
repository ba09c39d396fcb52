pub mod archive;
pub mod config;
pub mod error;
pub mod manifest;
pub mod query;
pub mod rank;
pub mod server;

#[cfg(test)]
pub(crate) mod testing;

use crate::archive::ArchiveClient;
use crate::config::{ServiceConfig, RESULT_LIMIT};
use crate::error::ReconcileResult;
use crate::query::{BatchEntry, ReconcileRequest};
use crate::rank::{rank_candidates, ScoredResult};
use serde_json::{json, Map, Value};

/// Fetch-then-rank pipeline shared by every request. Holds no per-request
/// state; clones share the underlying connection pool.
#[derive(Clone)]
pub struct Reconciler {
    archive: ArchiveClient,
    result_limit: usize,
}

impl Reconciler {
    pub fn new(config: &ServiceConfig) -> ReconcileResult<Self> {
        Ok(Self {
            archive: ArchiveClient::new(config)?,
            result_limit: RESULT_LIMIT,
        })
    }

    pub fn archive(&self) -> &ArchiveClient {
        &self.archive
    }

    pub async fn reconcile_query(&self, query: &str) -> ReconcileResult<Vec<ScoredResult>> {
        let docs = self.archive.search(query).await;
        rank_candidates(query, &docs, self.result_limit)
    }

    /// Entries run one after another. An unreachable archive only empties the
    /// affected key; a malformed candidate fails the whole batch.
    pub async fn reconcile_batch(&self, entries: &[BatchEntry]) -> ReconcileResult<Map<String, Value>> {
        let mut out = Map::new();
        for entry in entries {
            let results = self.reconcile_query(&entry.query).await?;
            out.insert(entry.key.clone(), json!({ "result": results }));
        }
        Ok(out)
    }

    pub async fn respond(&self, request: ReconcileRequest) -> ReconcileResult<Value> {
        match request {
            ReconcileRequest::Single(query) => {
                let results = self.reconcile_query(&query).await?;
                Ok(json!({ "result": results }))
            }
            ReconcileRequest::Batch(entries) => Ok(Value::Object(self.reconcile_batch(&entries).await?)),
            ReconcileRequest::Describe => Ok(manifest::service_manifest()),
        }
    }
}
