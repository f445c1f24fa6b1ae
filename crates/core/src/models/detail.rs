use serde::{Deserialize, Serialize};

use super::chart::PriceRange;
use super::overview::CompanyOverview;
use super::price::{ChartPoint, DailyPrice};

/// Everything a symbol's detail page renders.
///
/// Sections whose upstream fetch failed are simply absent: `overview` is
/// `None` and/or `history` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDetail {
    /// Uppercased ticker.
    pub symbol: String,
    pub overview: Option<CompanyOverview>,
    /// Most recent first, capped at the configured history limit.
    pub history: Vec<DailyPrice>,
    /// `history` days with a close, oldest first.
    pub chart_points: Vec<ChartPoint>,
    /// True when no API key is configured, so the page can prompt for one.
    pub missing_api_key: bool,
}

impl StockDetail {
    pub fn latest(&self) -> Option<&DailyPrice> {
        self.history.first()
    }

    /// High/low of the charted closes.
    pub fn price_range(&self) -> Option<PriceRange> {
        PriceRange::of(&self.chart_points)
    }

    pub fn has_history(&self) -> bool {
        !self.history.is_empty()
    }
}
