use thiserror::Error;

/// Unified error type for the entire watchlist-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Upstream outcomes treated as "no data" ──────────────────────
    #[error("No API key configured for the market data provider")]
    MissingApiKey,

    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    #[error("No data available for {0}")]
    NoData(String),

    // ── Charting ────────────────────────────────────────────────────
    #[error("Cannot chart an empty series")]
    EmptySeries,

    #[error("Not enough points to chart: {points} (need at least 2)")]
    InsufficientData { points: usize },

    // ── Validation ──────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// True for outcomes a caller should render as "not available"
    /// rather than as a failure.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            CoreError::MissingApiKey | CoreError::RateLimited(_) | CoreError::NoData(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors embed the full request URL, and the API key rides in the query.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
