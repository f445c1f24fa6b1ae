use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::cache::ResponseCache;
use crate::models::detail::StockDetail;
use crate::models::overview::CompanyOverview;
use crate::models::price::DailyPrice;
use crate::models::settings::Settings;
use crate::providers::traits::MarketDataProvider;
use crate::services::revalidation::next_revalidation;
use crate::services::series_service::SeriesService;

/// Assembles a symbol's detail view from the market data provider.
///
/// Overview and prices are fetched concurrently and joined. Either may fail
/// without affecting the other: a failed section is rendered as "not
/// available" and nothing is retried. Usable responses are cached until the
/// next ET midnight.
pub struct StockDetailService {
    provider: Box<dyn MarketDataProvider>,
    history_limit: usize,
    min_revalidate_secs: u64,
    cache: Mutex<ResponseCache>,
}

impl StockDetailService {
    pub fn new(provider: Box<dyn MarketDataProvider>, settings: &Settings) -> Self {
        Self {
            provider,
            history_limit: settings.history_limit,
            min_revalidate_secs: settings.min_revalidate_secs,
            cache: Mutex::new(ResponseCache::new()),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn load(&self, raw_symbol: &str) -> Result<StockDetail, CoreError> {
        self.load_at(raw_symbol, Utc::now()).await
    }

    /// `load` with an explicit clock, for cache expiry.
    pub async fn load_at(
        &self,
        raw_symbol: &str,
        now: DateTime<Utc>,
    ) -> Result<StockDetail, CoreError> {
        let symbol = normalize_symbol(raw_symbol)?;

        let (overview, prices) =
            futures::join!(self.overview(&symbol, now), self.prices(&symbol, now));

        let mut missing_api_key = false;
        let overview = match overview {
            Ok(o) => Some(o),
            Err(e) => {
                missing_api_key |= matches!(e, CoreError::MissingApiKey);
                warn!(symbol = %symbol, error = %e, "Company overview not available");
                None
            }
        };
        let prices = match prices {
            Ok(p) => p,
            Err(e) => {
                missing_api_key |= matches!(e, CoreError::MissingApiKey);
                warn!(symbol = %symbol, error = %e, "Daily prices not available");
                Vec::new()
            }
        };

        let history = SeriesService::recent(&prices, self.history_limit);
        let chart_points = SeriesService::chart_points(&history);

        Ok(StockDetail {
            symbol,
            overview,
            history,
            chart_points,
            missing_api_key,
        })
    }

    /// Number of cached responses (fresh or expired).
    pub fn cached_entries(&self) -> usize {
        self.lock_cache().len()
    }

    pub fn prune_cache(&self, now: DateTime<Utc>) -> usize {
        self.lock_cache().prune_expired(now)
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    async fn overview(
        &self,
        symbol: &str,
        now: DateTime<Utc>,
    ) -> Result<CompanyOverview, CoreError> {
        let cached = self.lock_cache().get_overview(symbol, now).cloned();
        if let Some(overview) = cached {
            debug!(symbol, "Overview cache hit");
            return Ok(overview);
        }

        let overview = self.provider.get_company_overview(symbol).await?;
        let expires_at = next_revalidation(now, self.min_revalidate_secs);
        self.lock_cache()
            .set_overview(symbol, overview.clone(), expires_at);
        Ok(overview)
    }

    async fn prices(&self, symbol: &str, now: DateTime<Utc>) -> Result<Vec<DailyPrice>, CoreError> {
        let cached = self.lock_cache().get_series(symbol, now).map(<[DailyPrice]>::to_vec);
        if let Some(prices) = cached {
            debug!(symbol, "Daily series cache hit");
            return Ok(prices);
        }

        let prices = self.provider.get_daily_prices(symbol).await?;
        let expires_at = next_revalidation(now, self.min_revalidate_secs);
        self.lock_cache()
            .set_series(symbol, prices.clone(), expires_at);
        Ok(prices)
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResponseCache> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Trim and uppercase a ticker taken from a URL or user input.
///
/// Tickers are ASCII letters and digits, optionally with `.` or `-`
/// (e.g. `BRK.B`, `TSCO.LON`).
pub fn normalize_symbol(raw: &str) -> Result<String, CoreError> {
    let symbol = raw.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(CoreError::ValidationError("symbol must not be empty".into()));
    }
    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(CoreError::ValidationError(format!(
            "invalid symbol '{}': only letters, digits, '.' and '-' are allowed",
            raw.trim()
        )));
    }
    Ok(symbol)
}
