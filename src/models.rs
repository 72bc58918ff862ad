// src/models.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// When during the trading day a company reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportTime {
    #[serde(rename = "bmo")]
    BeforeMarketOpen,
    #[serde(rename = "amc")]
    AfterMarketClose,
    #[serde(rename = "ime")]
    DuringMarketHours,
}

impl ReportTime {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "bmo" => Some(ReportTime::BeforeMarketOpen),
            "amc" => Some(ReportTime::AfterMarketClose),
            "ime" | "dmh" => Some(ReportTime::DuringMarketHours),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportTime::BeforeMarketOpen => "Before Market",
            ReportTime::AfterMarketClose => "After Close",
            ReportTime::DuringMarketHours => "During Market",
        }
    }
}

/// Earnings record as FMP sends it. Any field may be missing or null; records
/// without a symbol or a readable date are skipped when mapped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEarnings {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub eps_actual: Option<f64>,
    #[serde(default)]
    pub eps_estimated: Option<f64>,
    #[serde(default)]
    pub revenue_actual: Option<f64>,
    #[serde(default)]
    pub revenue_estimated: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub fiscal_date_ending: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsEntry {
    pub symbol: String,
    pub date: NaiveDate,
    pub eps_actual: Option<f64>,
    pub eps_estimated: Option<f64>,
    pub revenue_actual: Option<f64>,
    pub revenue_estimated: Option<f64>,
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<ReportTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_date_ending: Option<NaiveDate>,
}

fn parse_day(raw: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw?.trim(), "%Y-%m-%d").ok()
}

impl RawEarnings {
    pub fn into_entry(self) -> Option<EarningsEntry> {
        let symbol = self
            .symbol
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?
            .to_string();
        let date = parse_day(self.date.as_deref())?;
        Some(EarningsEntry {
            symbol,
            date,
            eps_actual: self.eps_actual.filter(|v| v.is_finite()),
            eps_estimated: self.eps_estimated.filter(|v| v.is_finite()),
            revenue_actual: self.revenue_actual.filter(|v| v.is_finite()),
            revenue_estimated: self.revenue_estimated.filter(|v| v.is_finite()),
            time: self.time.as_deref().and_then(ReportTime::from_tag),
            fiscal_date_ending: parse_day(self.fiscal_date_ending.as_deref()),
            last_updated: self.last_updated.filter(|s| !s.trim().is_empty()),
        })
    }
}

impl EarningsEntry {
    /// `last_updated` as a calendar date, accepting plain dates and timestamps.
    pub fn last_updated_date(&self) -> Option<NaiveDate> {
        let raw = self.last_updated.as_deref()?.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.date_naive());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|ts| ts.date())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub symbol: String,
    pub company_name: String,
    pub price: f64,
    #[serde(default)]
    pub beta: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub average_volume: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub last_dividend: Option<f64>,
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(default)]
    pub change_percentage: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub cik: Option<String>,
    #[serde(default)]
    pub isin: Option<String>,
    #[serde(default)]
    pub cusip: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub exchange_full_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ceo: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub full_time_employees: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub dcf_diff: Option<f64>,
    #[serde(default)]
    pub dcf: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ipo_date: Option<String>,
    #[serde(default)]
    pub default_image: Option<bool>,
    #[serde(default)]
    pub is_etf: Option<bool>,
    #[serde(default)]
    pub is_actively_trading: Option<bool>,
    #[serde(default)]
    pub is_adr: Option<bool>,
    #[serde(default)]
    pub is_fund: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_numeric_fields_become_none() {
        let raw: RawEarnings = serde_json::from_value(json!({
            "symbol": "AAPL",
            "date": "2026-10-29",
            "epsEstimated": 1.74,
            "revenueActual": null,
            "lastUpdated": "2026-10-14"
        }))
        .unwrap();

        let entry = raw.into_entry().unwrap();
        assert_eq!(entry.symbol, "AAPL");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2026, 10, 29).unwrap());
        assert_eq!(entry.eps_estimated, Some(1.74));
        assert_eq!(entry.eps_actual, None);
        assert_eq!(entry.revenue_actual, None);
        assert_eq!(entry.revenue_estimated, None);
        assert_eq!(entry.time, None);
        assert_eq!(entry.fiscal_date_ending, None);
    }

    #[test]
    fn records_without_symbol_or_date_are_skipped() {
        let raw: Vec<RawEarnings> = serde_json::from_value(json!([
            {"symbol": "AAPL", "date": "2026-10-29", "fiscalDateEnding": "2026-09-27"},
            {"symbol": "NODATE", "date": null},
            {"symbol": "BADDATE", "date": "soon"},
            {"date": "2026-10-29"},
            {"symbol": " ", "date": "2026-10-29"}
        ]))
        .unwrap();

        let entries: Vec<EarningsEntry> = raw.into_iter().filter_map(RawEarnings::into_entry).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].symbol, "AAPL");
        assert_eq!(entries[0].fiscal_date_ending, NaiveDate::from_ymd_opt(2026, 9, 27));
    }

    #[test]
    fn report_time_tags() {
        assert_eq!(ReportTime::from_tag("bmo"), Some(ReportTime::BeforeMarketOpen));
        assert_eq!(ReportTime::from_tag("AMC"), Some(ReportTime::AfterMarketClose));
        assert_eq!(ReportTime::from_tag("ime"), Some(ReportTime::DuringMarketHours));
        assert_eq!(ReportTime::from_tag("--"), None);
        assert_eq!(ReportTime::AfterMarketClose.label(), "After Close");
    }

    #[test]
    fn last_updated_accepts_dates_and_timestamps() {
        let mut entry = serde_json::from_value::<RawEarnings>(json!({"symbol": "X", "date": "2026-01-02"}))
            .unwrap()
            .into_entry()
            .unwrap();
        let expected = NaiveDate::from_ymd_opt(2026, 10, 14);

        entry.last_updated = Some("2026-10-14".into());
        assert_eq!(entry.last_updated_date(), expected);
        entry.last_updated = Some("2026-10-14T20:15:00Z".into());
        assert_eq!(entry.last_updated_date(), expected);
        entry.last_updated = Some("2026-10-14 08:00:00".into());
        assert_eq!(entry.last_updated_date(), expected);
        entry.last_updated = Some("yesterday".into());
        assert_eq!(entry.last_updated_date(), None);
    }

    #[test]
    fn profile_requires_only_core_fields() {
        let profile: CompanyProfile = serde_json::from_value(json!({
            "symbol": "AAPL",
            "companyName": "Apple Inc.",
            "price": 232.14,
            "marketCap": 3500000000000.0,
            "isEtf": false
        }))
        .unwrap();
        assert_eq!(profile.company_name, "Apple Inc.");
        assert_eq!(profile.market_cap, Some(3.5e12));
        assert_eq!(profile.is_etf, Some(false));
        assert_eq!(profile.sector, None);
    }
}
