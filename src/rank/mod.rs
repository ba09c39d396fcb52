pub mod fuzz;

use crate::archive::Candidate;
use crate::error::ReconcileResult;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// One entry of a reconciliation `result` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    pub id: String,
    pub name: String,
    pub score: u8,
    /// True only when the query equals the title byte for byte.
    #[serde(rename = "match")]
    pub matched: bool,
}

pub fn score_candidate(query: &str, candidate: &Candidate) -> ScoredResult {
    let result = ScoredResult {
        id: candidate.identifier.clone(),
        name: candidate.title.clone(),
        score: fuzz::token_sort_ratio(query, &candidate.title),
        matched: query == candidate.title,
    };
    debug!(
        id = %result.id,
        url = %candidate.item_url(),
        creator = ?candidate.creator,
        year = ?candidate.year,
        mediatype = candidate.mediatype.as_deref().unwrap_or("-"),
        score = result.score,
        matched = result.matched,
        "scored candidate"
    );
    result
}

/// Score every document against `query`, best first, keeping at most `limit`.
/// Equal scores keep the archive's own ordering.
pub fn rank_candidates(query: &str, docs: &[Value], limit: usize) -> ReconcileResult<Vec<ScoredResult>> {
    let mut results = docs
        .iter()
        .map(|doc| Candidate::from_doc(doc).map(|c| score_candidate(query, &c)))
        .collect::<ReconcileResult<Vec<_>>>()?;

    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(limit);
    Ok(results)
}
