// src/services/fmp.rs
use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::US::Eastern;
use log::{debug, error, info, warn};
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use std::time::Duration as StdDuration;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{CompanyProfile, EarningsEntry, RawEarnings};
use crate::services::cache::FetchCache;

const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error)]
pub enum FmpError {
    #[error("FMP_API_KEY is missing")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("unexpected response shape: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Inclusive report-date range for a calendar lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarningsWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl EarningsWindow {
    /// Fills in missing bounds: start defaults to `today`, end to start + `span_days`.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
        span_days: i64,
    ) -> Self {
        let start = start.unwrap_or(today);
        let end = end.unwrap_or_else(|| {
            Duration::try_days(span_days)
                .and_then(|span| start.checked_add_signed(span))
                .unwrap_or(NaiveDate::MAX)
        });
        EarningsWindow { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Today's date on the US equity market calendar.
pub fn market_today() -> NaiveDate {
    Utc::now().with_timezone(&Eastern).date_naive()
}

/// Upper-cases a ticker and rejects anything that cannot be one.
pub fn normalize_symbol(symbol: &str) -> Option<String> {
    static SYMBOL_RE: OnceLock<Regex> = OnceLock::new();
    let re = SYMBOL_RE
        .get_or_init(|| Regex::new(r"^[A-Z0-9][A-Z0-9.\-]{0,14}$").expect("valid symbol pattern"));

    let upper = symbol.trim().to_ascii_uppercase();
    if re.is_match(&upper) {
        Some(upper)
    } else {
        None
    }
}

/// Client for the Financial Modeling Prep "stable" API.
///
/// `fetch_*` methods surface every failure as an [`FmpError`]. The `get_*`
/// methods are what pages call: they log the failure and hand back an empty
/// list or `None` instead.
pub struct FmpClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    window_days: i64,
    cache: FetchCache,
}

impl FmpClient {
    pub fn new(config: &AppConfig) -> Result<Self, FmpError> {
        let http = Client::builder()
            .timeout(StdDuration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(FmpClient {
            http,
            base_url: config.fmp_base_url.trim_end_matches('/').to_string(),
            api_key: config.fmp_api_key.clone(),
            window_days: config.earnings_window_days,
            cache: FetchCache::new(config.cache_ttl_secs),
        })
    }

    pub fn resolve_window(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> EarningsWindow {
        EarningsWindow::resolve(start, end, market_today(), self.window_days)
    }

    /// Entries reported within `window`, ascending by date. Upstream order is
    /// kept for entries sharing a date.
    pub async fn fetch_earnings_calendar(
        &self,
        window: EarningsWindow,
    ) -> Result<Vec<EarningsEntry>, FmpError> {
        if window.is_empty() {
            warn!(
                "Earnings window start {} is after end {}, nothing to fetch",
                window.start, window.end
            );
            return Ok(Vec::new());
        }

        info!("Fetching earnings calendar from {} to {}", window.start, window.end);
        let raw: Vec<RawEarnings> = self
            .get_json(
                "earnings-calendar",
                &[
                    ("from", window.start.format("%Y-%m-%d").to_string()),
                    ("to", window.end.format("%Y-%m-%d").to_string()),
                ],
            )
            .await?;

        let received = raw.len();
        let mapped: Vec<EarningsEntry> = raw.into_iter().filter_map(RawEarnings::into_entry).collect();
        if mapped.len() != received {
            debug!(
                "Skipped {} earnings records without a symbol or date",
                received - mapped.len()
            );
        }

        let in_range = mapped.len();
        let mut entries: Vec<EarningsEntry> = mapped
            .into_iter()
            .filter(|entry| window.contains(entry.date))
            .collect();

        if entries.len() != in_range {
            debug!(
                "Dropped {} earnings entries outside {}..={}",
                in_range - entries.len(),
                window.start,
                window.end
            );
        }

        // Stable, so same-day entries keep upstream order.
        entries.sort_by_key(|entry| entry.date);
        info!("Fetched {} earnings entries", entries.len());
        Ok(entries)
    }

    /// First profile upstream returns for `symbol`, or `None` when it returns none.
    pub async fn fetch_company_profile(
        &self,
        symbol: &str,
    ) -> Result<Option<CompanyProfile>, FmpError> {
        let Some(symbol) = normalize_symbol(symbol) else {
            warn!("Rejecting malformed ticker symbol {:?}", symbol);
            return Ok(None);
        };

        info!("Fetching company profile for {}", symbol);
        let profiles: Vec<CompanyProfile> = self
            .get_json("profile", &[("symbol", symbol.clone())])
            .await?;

        if profiles.is_empty() {
            info!("No profile found for {}", symbol);
        }
        Ok(profiles.into_iter().next())
    }

    /// Fail-soft calendar lookup with default window bounds.
    pub async fn get_earnings_calendar(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Vec<EarningsEntry> {
        self.get_earnings_in(self.resolve_window(start, end)).await
    }

    pub async fn get_earnings_in(&self, window: EarningsWindow) -> Vec<EarningsEntry> {
        match self.fetch_earnings_calendar(window).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Error fetching earnings calendar: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get_company_profile(&self, symbol: &str) -> Option<CompanyProfile> {
        match self.fetch_company_profile(symbol).await {
            Ok(profile) => profile,
            Err(e) => {
                error!("Error fetching company profile for {}: {}", symbol, e);
                None
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, FmpError> {
        let api_key = self.api_key.as_deref().ok_or(FmpError::MissingApiKey)?;

        let cache_key = format!(
            "{}?{}",
            endpoint,
            url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
                .finish()
        );

        if let Some(body) = self.cache.get(&cache_key).await {
            return Ok(serde_json::from_str(&body)?);
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} ({})", url, cache_key);

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("apikey", api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read body".to_string());
            return Err(FmpError::Status { status, body });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str(&body)?;
        self.cache.insert(cache_key, body).await;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_defaults_to_today_plus_span() {
        let today = date(2026, 10, 15);
        let window = EarningsWindow::resolve(None, None, today, 14);
        assert_eq!(window.start, today);
        assert_eq!(window.end, date(2026, 10, 29));
    }

    #[test]
    fn window_end_is_derived_from_explicit_start() {
        let window = EarningsWindow::resolve(Some(date(2026, 12, 25)), None, date(2026, 10, 15), 14);
        assert_eq!(window.start, date(2026, 12, 25));
        assert_eq!(window.end, date(2027, 1, 8));
    }

    #[test]
    fn explicit_bounds_win() {
        let window = EarningsWindow::resolve(
            Some(date(2026, 1, 1)),
            Some(date(2026, 1, 3)),
            date(2026, 10, 15),
            14,
        );
        assert!(window.contains(date(2026, 1, 1)));
        assert!(window.contains(date(2026, 1, 3)));
        assert!(!window.contains(date(2026, 1, 4)));
        assert!(!window.is_empty());
    }

    #[test]
    fn inverted_window_is_empty() {
        let window = EarningsWindow::resolve(None, Some(date(2026, 10, 1)), date(2026, 10, 15), 14);
        assert!(window.is_empty());
    }

    #[test]
    fn oversized_span_saturates_instead_of_panicking() {
        let today = date(2026, 10, 15);
        let window = EarningsWindow::resolve(None, None, today, 200_000_000_000);
        assert_eq!(window.start, today);
        assert_eq!(window.end, NaiveDate::MAX);
        assert!(window.contains(date(2030, 1, 1)));

        let window = EarningsWindow::resolve(None, None, today, i64::MAX);
        assert_eq!(window.end, NaiveDate::MAX);
    }

    #[test]
    fn symbols_are_normalized() {
        assert_eq!(normalize_symbol("aapl").as_deref(), Some("AAPL"));
        assert_eq!(normalize_symbol(" brk.b ").as_deref(), Some("BRK.B"));
        assert_eq!(normalize_symbol("RDS-A").as_deref(), Some("RDS-A"));
        assert_eq!(normalize_symbol(""), None);
        assert_eq!(normalize_symbol("AAPL&apikey=x"), None);
        assert_eq!(normalize_symbol(".X"), None);
    }
}
