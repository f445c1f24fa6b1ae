use chrono::NaiveDate;
use serde_json::Value;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::price::{ChartPoint, DailyPrice, RawDailyBar, TimeSeriesDailyResponse};

/// Turns raw daily bars into an ordered, change-annotated price history.
///
/// Output order is always most recent first. Bad fields degrade to `None`
/// one at a time; they never fail the whole series.
pub struct SeriesService;

impl SeriesService {
    /// Normalize a `TIME_SERIES_DAILY` response.
    ///
    /// Returns `None` ("no data") when the provider sent a rate-limit or
    /// informational notice, or omitted the series entirely.
    pub fn normalize(resp: &TimeSeriesDailyResponse) -> Option<Vec<DailyPrice>> {
        if resp.notice().is_some() {
            return None;
        }
        let series = resp.time_series.as_ref()?;
        Some(Self::normalize_entries(series.iter()))
    }

    /// Normalize (date, bar) entries given in source order.
    ///
    /// When a date appears more than once the later entry wins.
    /// Keys that are not `YYYY-MM-DD` dates are dropped.
    pub fn normalize_entries<K, B, I>(entries: I) -> Vec<DailyPrice>
    where
        K: AsRef<str>,
        B: Borrow<RawDailyBar>,
        I: IntoIterator<Item = (K, B)>,
    {
        let mut by_date: BTreeMap<NaiveDate, (Option<f64>, Option<u64>)> = BTreeMap::new();
        for (key, bar) in entries {
            let key = key.as_ref();
            let bar = bar.borrow();
            match NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d") {
                Ok(date) => {
                    let close = bar.close.as_ref().and_then(parse_number);
                    let volume = bar.volume.as_ref().and_then(parse_volume);
                    by_date.insert(date, (close, volume));
                }
                Err(e) => debug!(key, error = %e, "Dropping series entry with invalid date"),
            }
        }

        let rows: Vec<(NaiveDate, Option<f64>, Option<u64>)> = by_date
            .into_iter()
            .rev()
            .map(|(date, (close, volume))| (date, close, volume))
            .collect();

        rows.iter()
            .enumerate()
            .map(|(i, &(date, close, volume))| {
                let older_close = rows.get(i + 1).and_then(|r| r.1);
                DailyPrice {
                    date,
                    close,
                    volume,
                    change_pct: change_pct(close, older_close),
                }
            })
            .collect()
    }

    /// The `limit` most recent points.
    pub fn recent(prices: &[DailyPrice], limit: usize) -> Vec<DailyPrice> {
        prices.iter().take(limit).cloned().collect()
    }

    /// Plottable points in chronological order (oldest first), skipping
    /// days without a close. Expects the most-recent-first order produced
    /// by `normalize`.
    pub fn chart_points(prices: &[DailyPrice]) -> Vec<ChartPoint> {
        prices
            .iter()
            .rev()
            .filter_map(|p| {
                p.close.map(|close| ChartPoint {
                    date: p.date,
                    close,
                })
            })
            .collect()
    }
}

/// Percent change from `older` to `close`.
pub fn change_pct(close: Option<f64>, older: Option<f64>) -> Option<f64> {
    match (close, older) {
        (Some(c), Some(o)) if o != 0.0 => Some((c - o) / o * 100.0),
        _ => None,
    }
}

/// Lenient numeric parse: strings are trimmed, blank means missing,
/// and anything non-finite is rejected.
pub fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn parse_volume(value: &Value) -> Option<u64> {
    parse_number(value)
        .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64)
        .map(|v| v as u64)
}
