// Shared fixtures for the integration tests.
#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use wiremock::MockServer;

use earnings_dashboard::config::AppConfig;

pub const API_KEY: &str = "test-key";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        fmp_api_key: Some(API_KEY.to_string()),
        fmp_base_url: server.uri(),
        ..AppConfig::default()
    }
}

/// `count` earnings records, three per day starting at `start`, with every
/// optional field present.
pub fn earnings_payload(count: usize, start: NaiveDate) -> Value {
    let records: Vec<Value> = (0..count)
        .map(|i| {
            let day = start + Duration::days((i / 3) as i64);
            json!({
                "symbol": format!("T{:02}", i),
                "date": day.format("%Y-%m-%d").to_string(),
                "epsActual": null,
                "epsEstimated": 1.25,
                "revenueActual": null,
                "revenueEstimated": 1250000000.0,
                "lastUpdated": "2026-10-14"
            })
        })
        .collect();
    Value::Array(records)
}

pub fn apple_profile() -> Value {
    json!([{
        "symbol": "AAPL",
        "companyName": "Apple Inc.",
        "price": 232.14,
        "change": 2.31,
        "changePercentage": 1.01,
        "marketCap": 3450000000000.0,
        "volume": 52340000,
        "averageVolume": 48900000,
        "range": "164.08-237.23",
        "industry": "Consumer Electronics",
        "sector": "Technology",
        "exchange": "NASDAQ",
        "description": "Apple Inc. designs, manufactures, and markets smartphones.",
        "isEtf": false,
        "isAdr": false,
        "isFund": false,
        "isActivelyTrading": true
    }])
}
