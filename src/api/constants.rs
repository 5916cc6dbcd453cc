//! Accounting service endpoints and defaults

/// Default accounting service address
pub const DEFAULT_URL: &str = "http://localhost:6820";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Commit/rollback endpoint
pub const COMMIT_ENDPOINT: &str = "commit";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("acctmgr/", env!("CARGO_PKG_VERSION"));

/// Build a collection endpoint URL
pub fn collection_endpoint(base_url: &str, collection: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), collection)
}

/// Build the commit endpoint URL
pub fn commit_endpoint(base_url: &str) -> String {
    collection_endpoint(base_url, COMMIT_ENDPOINT)
}
