use serde::{Deserialize, Serialize};

use super::chart::ChartCanvas;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Host-supplied configuration.
///
/// The API key is passed in explicitly; the library never reads the
/// process environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Alpha Vantage API key. `None` makes every fetch report "no data".
    pub api_key: Option<String>,

    /// Query endpoint. Overridable for tests and proxies.
    pub base_url: String,

    /// How many of the most recent daily prices the detail view keeps.
    pub history_limit: usize,

    pub request_timeout_secs: u64,

    /// Floor for the cache lifetime of upstream responses.
    pub min_revalidate_secs: u64,

    pub canvas: ChartCanvas,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            history_limit: 60,
            request_timeout_secs: 30,
            min_revalidate_secs: 60,
            canvas: ChartCanvas::default(),
        }
    }
}

impl Settings {
    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            ..Self::default()
        }
    }

    /// The configured key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}
