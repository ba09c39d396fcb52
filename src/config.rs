use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:9000";
pub const DEFAULT_SEARCH_URL: &str = "https://archive.org/advancedsearch.php";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Rows requested from the archive per query.
pub const FETCH_ROWS: usize = 5;
/// Scored results returned per query.
pub const RESULT_LIMIT: usize = 3;
pub const SEARCH_FIELDS: &[&str] = &["identifier", "title", "creator", "year", "mediatype"];

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind: SocketAddr,
    pub search_url: String,
    pub timeout: Duration,
    pub debug: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 9000)),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            debug: false,
        }
    }
}

impl ServiceConfig {
    /// Config pointing at a different search endpoint; everything else default.
    pub fn with_search_url(search_url: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
            ..Self::default()
        }
    }
}
