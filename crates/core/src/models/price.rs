use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One trading day of normalized price history.
///
/// `change_pct` is the day-over-day change against the immediately older
/// point, in percent. It is `None` when either close is missing, when the
/// older close is zero, and always for the oldest point in a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrice {
    pub date: NaiveDate,
    pub close: Option<f64>,
    pub volume: Option<u64>,
    pub change_pct: Option<f64>,
}

/// A plottable (date, close) pair. Only points with a known close make it here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub close: f64,
}

// ── Alpha Vantage TIME_SERIES_DAILY response types ──────────────────

/// Raw `TIME_SERIES_DAILY` payload.
///
/// Alpha Vantage answers throttled or misconfigured requests with HTTP 200
/// and a `Note` / `Information` field instead of the series.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeSeriesDailyResponse {
    #[serde(rename = "Time Series (Daily)", default)]
    pub time_series: Option<HashMap<String, RawDailyBar>>,

    #[serde(rename = "Note", default)]
    pub note: Option<String>,

    #[serde(rename = "Information", default)]
    pub information: Option<String>,
}

impl TimeSeriesDailyResponse {
    /// The rate-limit or informational notice carried instead of data, if any.
    pub fn notice(&self) -> Option<&str> {
        self.note.as_deref().or(self.information.as_deref())
    }
}

/// One day's entry in the raw series.
///
/// Fields are kept as untyped JSON so that a malformed close or volume only
/// nulls out that field instead of failing the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDailyBar {
    #[serde(rename = "4. close", default)]
    pub close: Option<serde_json::Value>,

    #[serde(rename = "5. volume", default)]
    pub volume: Option<serde_json::Value>,
}

impl RawDailyBar {
    pub fn new(close: Option<&str>, volume: Option<&str>) -> Self {
        Self {
            close: close.map(|c| serde_json::Value::String(c.to_string())),
            volume: volume.map(|v| serde_json::Value::String(v.to_string())),
        }
    }
}
