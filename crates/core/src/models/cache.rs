use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::overview::CompanyOverview;
use super::price::DailyPrice;

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// In-memory cache of upstream responses, keyed by uppercased symbol.
///
/// Daily bars only change once per trading day, so entries live until the
/// next revalidation point (see `services::revalidation`). Only usable data
/// is stored; "no data" outcomes are always refetched.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    overviews: HashMap<String, CacheEntry<CompanyOverview>>,
    series: HashMap<String, CacheEntry<Vec<DailyPrice>>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_overview(&self, symbol: &str, now: DateTime<Utc>) -> Option<&CompanyOverview> {
        self.overviews
            .get(&symbol.to_uppercase())
            .filter(|e| e.is_fresh(now))
            .map(|e| &e.value)
    }

    pub fn set_overview(
        &mut self,
        symbol: &str,
        overview: CompanyOverview,
        expires_at: DateTime<Utc>,
    ) {
        self.overviews.insert(
            symbol.to_uppercase(),
            CacheEntry {
                value: overview,
                expires_at,
            },
        );
    }

    pub fn get_series(&self, symbol: &str, now: DateTime<Utc>) -> Option<&[DailyPrice]> {
        self.series
            .get(&symbol.to_uppercase())
            .filter(|e| e.is_fresh(now))
            .map(|e| e.value.as_slice())
    }

    pub fn set_series(&mut self, symbol: &str, prices: Vec<DailyPrice>, expires_at: DateTime<Utc>) {
        self.series.insert(
            symbol.to_uppercase(),
            CacheEntry {
                value: prices,
                expires_at,
            },
        );
    }

    /// Drop every expired entry. Returns the number of entries removed.
    pub fn prune_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.len();
        self.overviews.retain(|_, e| e.is_fresh(now));
        self.series.retain(|_, e| e.is_fresh(now));
        before - self.len()
    }

    pub fn clear(&mut self) {
        self.overviews.clear();
        self.series.clear();
    }

    /// Total entries across overviews and series, fresh or not.
    pub fn len(&self) -> usize {
        self.overviews.len() + self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
