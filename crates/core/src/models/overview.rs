use serde::{Deserialize, Serialize};

/// Company overview as shown on a symbol's detail page.
/// Every field is optional: the provider may omit any of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyOverview {
    pub symbol: Option<String>,
    pub asset_type: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub exchange: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    /// Market capitalization as the numeric string the provider sends.
    pub market_cap: Option<String>,
}

impl CompanyOverview {
    /// Build an overview from a raw `OVERVIEW` response.
    /// Returns `None` when the response is a rate-limit or informational notice.
    pub fn from_response(resp: OverviewResponse) -> Option<Self> {
        if resp.notice().is_some() {
            return None;
        }
        Some(Self {
            symbol: resp.symbol,
            asset_type: resp.asset_type,
            name: resp.name,
            description: resp.description,
            exchange: resp.exchange,
            sector: resp.sector,
            industry: resp.industry,
            market_cap: resp.market_capitalization,
        })
    }

    /// Market capitalization parsed as a number, if it is a finite one.
    pub fn market_cap_value(&self) -> Option<f64> {
        self.market_cap
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }
}

// ── Alpha Vantage OVERVIEW response type ────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverviewResponse {
    #[serde(rename = "Symbol", default)]
    pub symbol: Option<String>,
    #[serde(rename = "AssetType", default)]
    pub asset_type: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Exchange", default)]
    pub exchange: Option<String>,
    #[serde(rename = "Sector", default)]
    pub sector: Option<String>,
    #[serde(rename = "Industry", default)]
    pub industry: Option<String>,
    #[serde(rename = "MarketCapitalization", default)]
    pub market_capitalization: Option<String>,
    #[serde(rename = "Note", default)]
    pub note: Option<String>,
    #[serde(rename = "Information", default)]
    pub information: Option<String>,
}

impl OverviewResponse {
    pub fn notice(&self) -> Option<&str> {
        self.note.as_deref().or(self.information.as_deref())
    }
}
