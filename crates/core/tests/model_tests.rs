use chrono::{NaiveDate, TimeZone, Utc};
use watchlist_core::models::cache::ResponseCache;
use watchlist_core::models::chart::ChartCanvas;
use watchlist_core::models::detail::StockDetail;
use watchlist_core::models::overview::{CompanyOverview, OverviewResponse};
use watchlist_core::models::price::{ChartPoint, DailyPrice};
use watchlist_core::models::settings::{Settings, DEFAULT_BASE_URL};
use watchlist_core::services::revalidation::{next_revalidation, seconds_until_next_et_midnight};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn price(date: NaiveDate, close: f64) -> DailyPrice {
    DailyPrice {
        date,
        close: Some(close),
        volume: Some(1),
        change_pct: None,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.api_key, None);
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
        assert_eq!(s.history_limit, 60);
        assert_eq!(s.request_timeout_secs, 30);
        assert_eq!(s.min_revalidate_secs, 60);
        assert_eq!(s.canvas, ChartCanvas::default());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s: Settings =
            serde_json::from_str(r#"{ "api_key": "abc", "history_limit": 30 }"#).unwrap();
        assert_eq!(s.api_key(), Some("abc"));
        assert_eq!(s.history_limit, 30);
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
        assert_eq!(s.canvas.width, 720.0);
    }

    #[test]
    fn api_key_trimmed_and_blank_ignored() {
        assert_eq!(Settings::with_api_key(" k1 ").api_key(), Some("k1"));
        assert_eq!(Settings::with_api_key("").api_key(), None);
    }

    #[test]
    fn serde_roundtrip_json() {
        let s = Settings::with_api_key("key");
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  CompanyOverview
// ═══════════════════════════════════════════════════════════════════

mod overview {
    use super::*;

    fn parse(json: &str) -> Option<CompanyOverview> {
        let resp: OverviewResponse = serde_json::from_str(json).unwrap();
        CompanyOverview::from_response(resp)
    }

    #[test]
    fn maps_pascal_case_fields() {
        let o = parse(
            r#"{"Symbol":"XOM","AssetType":"Common Stock","Name":"Exxon Mobil Corp",
                "Exchange":"NYSE","Sector":"ENERGY","Industry":"PETROLEUM REFINING",
                "MarketCapitalization":"420000000000"}"#,
        )
        .unwrap();
        assert_eq!(o.symbol.as_deref(), Some("XOM"));
        assert_eq!(o.exchange.as_deref(), Some("NYSE"));
        assert_eq!(o.market_cap.as_deref(), Some("420000000000"));
        assert_eq!(o.description, None);
    }

    #[test]
    fn notice_yields_none() {
        assert!(parse(r#"{"Note":"slow down"}"#).is_none());
        assert!(parse(r#"{"Information":"premium endpoint"}"#).is_none());
    }

    #[test]
    fn market_cap_value() {
        let with = |cap: Option<&str>| CompanyOverview {
            market_cap: cap.map(str::to_string),
            ..Default::default()
        };
        assert_eq!(with(Some("1000")).market_cap_value(), Some(1000.0));
        assert_eq!(with(Some(" 2.5e9 ")).market_cap_value(), Some(2.5e9));
        assert_eq!(with(Some("None")).market_cap_value(), None);
        assert_eq!(with(Some("")).market_cap_value(), None);
        assert_eq!(with(Some("inf")).market_cap_value(), None);
        assert_eq!(with(None).market_cap_value(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  DailyPrice / StockDetail
// ═══════════════════════════════════════════════════════════════════

mod detail {
    use super::*;

    #[test]
    fn daily_price_serializes_calendar_date() {
        let json = serde_json::to_value(price(d(2024, 1, 3), 105.0)).unwrap();
        assert_eq!(json["date"], "2024-01-03");
        assert_eq!(json["change_pct"], serde_json::Value::Null);
    }

    #[test]
    fn helpers() {
        let detail = StockDetail {
            symbol: "AAPL".into(),
            overview: None,
            history: vec![price(d(2024, 1, 3), 105.0), price(d(2024, 1, 2), 100.0)],
            chart_points: vec![
                ChartPoint {
                    date: d(2024, 1, 2),
                    close: 100.0,
                },
                ChartPoint {
                    date: d(2024, 1, 3),
                    close: 105.0,
                },
            ],
            missing_api_key: false,
        };
        assert_eq!(detail.latest().unwrap().date, d(2024, 1, 3));
        assert!(detail.has_history());
        let range = detail.price_range().unwrap();
        assert_eq!((range.min, range.max), (100.0, 105.0));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ResponseCache
// ═══════════════════════════════════════════════════════════════════

mod cache {
    use super::*;

    #[test]
    fn fresh_entries_returned() {
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let expires = now + chrono::Duration::hours(1);
        let mut cache = ResponseCache::new();
        cache.set_series("aapl", vec![price(d(2024, 1, 4), 1.0)], expires);
        cache.set_overview("AAPL", CompanyOverview::default(), expires);

        assert_eq!(cache.get_series("AAPL", now).unwrap().len(), 1);
        assert!(cache.get_overview("aapl", now).is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn expired_entries_hidden() {
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let mut cache = ResponseCache::new();
        cache.set_series("AAPL", vec![], now);
        assert!(cache.get_series("AAPL", now).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn prune_expired_counts_removed() {
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let mut cache = ResponseCache::new();
        cache.set_series("OLD", vec![], now - chrono::Duration::minutes(1));
        cache.set_overview("OLD", CompanyOverview::default(), now);
        cache.set_series("NEW", vec![], now + chrono::Duration::minutes(1));

        assert_eq!(cache.prune_expired(now), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.get_series("NEW", now).is_some());
    }

    #[test]
    fn clear() {
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let mut cache = ResponseCache::new();
        cache.set_overview("A", CompanyOverview::default(), now);
        cache.clear();
        assert!(cache.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Revalidation (next ET midnight)
// ═══════════════════════════════════════════════════════════════════

mod revalidation {
    use super::*;

    #[test]
    fn winter_offset() {
        // 10:00 EST -> 14h to midnight.
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 15, 0, 0).unwrap();
        assert_eq!(seconds_until_next_et_midnight(now, 60), 14 * 3600);
    }

    #[test]
    fn summer_offset() {
        // 08:00 EDT -> 16h to midnight.
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        assert_eq!(seconds_until_next_et_midnight(now, 60), 16 * 3600);
    }

    #[test]
    fn spring_forward_day_is_23_hours() {
        // 2024-03-10 00:00 EST; clocks jump at 02:00.
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap();
        assert_eq!(seconds_until_next_et_midnight(now, 60), 23 * 3600);
    }

    #[test]
    fn floor_applies_near_midnight() {
        // 23:59:30 EST.
        let now = Utc.with_ymd_and_hms(2024, 3, 6, 4, 59, 30).unwrap();
        assert_eq!(seconds_until_next_et_midnight(now, 60), 60);
        assert_eq!(seconds_until_next_et_midnight(now, 0), 30);
    }

    #[test]
    fn rounds_partial_seconds_up() {
        let now = Utc.with_ymd_and_hms(2024, 3, 6, 4, 59, 59).unwrap()
            + chrono::Duration::milliseconds(500);
        assert_eq!(seconds_until_next_et_midnight(now, 0), 1);
    }

    #[test]
    fn next_revalidation_is_et_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 15, 0, 0).unwrap();
        assert_eq!(
            next_revalidation(now, 60),
            Utc.with_ymd_and_hms(2024, 3, 6, 5, 0, 0).unwrap()
        );
    }
}
