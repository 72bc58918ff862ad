// src/services/date_filter.rs
use chrono::NaiveDate;
use log::warn;
use serde::Deserialize;
use url::form_urlencoded::Serializer;

use crate::services::pagination::parse_page;

pub const EARNINGS_PATH: &str = "/earnings";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw query string of the earnings listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EarningsQuery {
    pub page: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

impl EarningsQuery {
    pub fn page_number(&self) -> i64 {
        parse_page(self.page.as_deref())
    }

    /// Where to redirect when the query carries blank date parameters, as a
    /// plain HTML form submission does. `None` when the query is already clean.
    pub fn canonical_url(&self) -> Option<String> {
        let blank = |v: &Option<String>| v.as_deref().map_or(false, |s| s.trim().is_empty());
        if blank(&self.start_date) || blank(&self.end_date) {
            let filter = DateRangeFilter::from_query(self);
            let page = usize::try_from(self.page_number()).unwrap_or(1);
            Some(filter.page_url(page))
        } else {
            None
        }
    }
}

/// The two optional dates selected in the listing's filter form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRangeFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRangeFilter {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateRangeFilter { start, end }
    }

    pub fn from_query(query: &EarningsQuery) -> Self {
        DateRangeFilter {
            start: parse_date(query.start_date.as_deref(), "startDate"),
            end: parse_date(query.end_date.as_deref(), "endDate"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Both dates set with start after end.
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s > e)
    }

    /// Applying a filter always lands on page 1.
    pub fn apply_url(&self) -> String {
        self.page_url(1)
    }

    pub fn clear_url() -> &'static str {
        EARNINGS_PATH
    }

    pub fn page_url(&self, page: usize) -> String {
        let mut query = Serializer::new(String::new());
        query.append_pair("page", &page.max(1).to_string());
        if let Some(start) = self.start {
            query.append_pair("startDate", &start.format(DATE_FORMAT).to_string());
        }
        if let Some(end) = self.end {
            query.append_pair("endDate", &end.format(DATE_FORMAT).to_string());
        }
        format!("{}?{}", EARNINGS_PATH, query.finish())
    }

    pub fn start_value(&self) -> String {
        self.start.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default()
    }

    pub fn end_value(&self) -> String {
        self.end.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default()
    }
}

fn parse_date(raw: Option<&str>, name: &str) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", name, raw, e);
            None
        }
    }
}
