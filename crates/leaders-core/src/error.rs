// Error types for the stats fetch path.

use thiserror::Error;

/// Failures surfaced by the leaders pipeline.
///
/// Only fetching can fail. Empty pools, missing stat fields and
/// non-numeric values are normalized during ranking instead.
#[derive(Debug, Error)]
pub enum LeadersError {
    #[error("stats request to {url} failed: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("failed to parse stats response from {url}: {source}")]
    Parse {
        url: String,
        source: serde_json::Error,
    },
}
