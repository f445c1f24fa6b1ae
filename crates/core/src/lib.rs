pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use models::{
    chart::{ChartGeometry, HoverState, Tooltip},
    detail::StockDetail,
    settings::Settings,
};
use providers::{alphavantage::AlphaVantageProvider, traits::MarketDataProvider};
use services::{chart_service::ChartService, detail_service::StockDetailService};

use errors::CoreError;

/// Main entry point for the watchlist core library.
/// Holds the configuration and the services a detail page needs.
#[must_use]
pub struct Watchlist {
    settings: Settings,
    detail_service: StockDetailService,
    chart_service: ChartService,
}

impl std::fmt::Debug for Watchlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watchlist")
            .field("provider", &self.detail_service.provider_name())
            .field("has_api_key", &self.settings.api_key().is_some())
            .field("history_limit", &self.settings.history_limit)
            .field("cached_responses", &self.detail_service.cached_entries())
            .finish()
    }
}

impl Watchlist {
    /// Create a watchlist backed by Alpha Vantage.
    pub fn new(settings: Settings) -> Self {
        let provider = AlphaVantageProvider::new(&settings);
        Self::with_provider(Box::new(provider), settings)
    }

    /// Create a watchlist backed by any market data provider.
    pub fn with_provider(provider: Box<dyn MarketDataProvider>, settings: Settings) -> Self {
        Self {
            detail_service: StockDetailService::new(provider, &settings),
            chart_service: ChartService::new(settings.canvas),
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Detail page ─────────────────────────────────────────────────

    /// Load overview and price history for a symbol.
    ///
    /// Only an invalid symbol is an error; upstream failures leave the
    /// corresponding section empty.
    pub async fn load_stock_detail(&self, symbol: &str) -> Result<StockDetail, CoreError> {
        self.detail_service.load(symbol).await
    }

    /// Drop cached responses (e.g. after changing the API key upstream).
    pub fn clear_cache(&self) {
        self.detail_service.clear_cache();
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Chart geometry for a loaded detail view.
    /// Fails with `EmptySeries` / `InsufficientData` when there is nothing to draw.
    pub fn chart(&self, detail: &StockDetail) -> Result<ChartGeometry, CoreError> {
        self.chart_service.geometry(&detail.chart_points)
    }

    /// Update hover state from a pointer position in canvas units.
    pub fn hover(&self, hover: &mut HoverState, pointer_x: f64, geometry: &ChartGeometry) {
        self.chart_service.pointer_move(hover, pointer_x, geometry);
    }

    #[must_use]
    pub fn tooltip(
        &self,
        detail: &StockDetail,
        geometry: &ChartGeometry,
        hover: &HoverState,
    ) -> Option<Tooltip> {
        self.chart_service
            .tooltip(geometry, &detail.chart_points, hover)
    }

    #[must_use]
    pub fn chart_service(&self) -> &ChartService {
        &self.chart_service
    }
}
