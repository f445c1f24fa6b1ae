use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::overview::CompanyOverview;
use crate::models::price::DailyPrice;

/// Source of company fundamentals and daily price history.
///
/// Alpha Vantage is the production implementation; tests plug in mocks.
/// "No data" outcomes (missing key, rate-limit notice, absent series) are
/// reported as the matching `CoreError` variants, see `CoreError::is_no_data`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    async fn get_company_overview(&self, symbol: &str) -> Result<CompanyOverview, CoreError>;

    /// Normalized daily history, most recent first.
    async fn get_daily_prices(&self, symbol: &str) -> Result<Vec<DailyPrice>, CoreError>;
}
