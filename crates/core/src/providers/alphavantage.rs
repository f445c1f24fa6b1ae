use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::{debug, warn};

use super::traits::MarketDataProvider;
use crate::errors::CoreError;
use crate::models::overview::{CompanyOverview, OverviewResponse};
use crate::models::price::{DailyPrice, TimeSeriesDailyResponse};
use crate::models::settings::Settings;
use crate::services::series_service::SeriesService;

const PROVIDER: &str = "Alpha Vantage";

/// Alpha Vantage provider for company overviews and daily prices.
///
/// - **Free tier**: 25 requests/day across all endpoints. Exceeding it yields
///   HTTP 200 with a `Note` or `Information` field, reported as `RateLimited`.
/// - **Requires**: API key from `Settings`. Without one, nothing is requested.
/// - **Series**: `TIME_SERIES_DAILY` with `outputsize=compact` (last 100 days).
pub struct AlphaVantageProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl AlphaVantageProvider {
    pub fn new(settings: &Settings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key: settings.api_key().map(str::to_string),
            base_url: settings.base_url.clone(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn query<T: DeserializeOwned>(
        &self,
        function: &str,
        symbol: &str,
        extra: &[(&str, &str)],
    ) -> Result<T, CoreError> {
        let api_key = self.api_key.as_deref().ok_or(CoreError::MissingApiKey)?;

        let mut params: Vec<(&str, &str)> = vec![("function", function), ("symbol", symbol)];
        params.extend_from_slice(extra);
        params.push(("apikey", api_key));

        debug!(function, symbol, "Querying Alpha Vantage");
        let resp = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("{function} for {symbol} returned HTTP {status}"),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse {function} for {symbol}: {e}"),
        })
    }
}

fn rate_limited(function: &str, symbol: &str, notice: &str) -> CoreError {
    warn!(function, symbol, notice, "Alpha Vantage returned a notice instead of data");
    CoreError::RateLimited(notice.to_string())
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_company_overview(&self, symbol: &str) -> Result<CompanyOverview, CoreError> {
        let symbol = symbol.to_uppercase();
        let resp: OverviewResponse = self.query("OVERVIEW", &symbol, &[]).await?;

        if let Some(notice) = resp.notice() {
            return Err(rate_limited("OVERVIEW", &symbol, notice));
        }
        CompanyOverview::from_response(resp).ok_or(CoreError::NoData(symbol))
    }

    async fn get_daily_prices(&self, symbol: &str) -> Result<Vec<DailyPrice>, CoreError> {
        let symbol = symbol.to_uppercase();
        let resp: TimeSeriesDailyResponse = self
            .query("TIME_SERIES_DAILY", &symbol, &[("outputsize", "compact")])
            .await?;

        if let Some(notice) = resp.notice() {
            return Err(rate_limited("TIME_SERIES_DAILY", &symbol, notice));
        }
        SeriesService::normalize(&resp).ok_or(CoreError::NoData(symbol))
    }
}
