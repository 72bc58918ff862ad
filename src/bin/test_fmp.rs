// src/bin/test_fmp.rs
//
// Hits the live FMP API with the configured key and logs what comes back.
// Usage: test_fmp [SYMBOL] [START yyyy-mm-dd] [END yyyy-mm-dd]
use chrono::NaiveDate;
use dotenv::dotenv;
use env_logger;
use log::{error, info};

use earnings_dashboard::config::AppConfig;
use earnings_dashboard::services::fmp::FmpClient;
use earnings_dashboard::services::pagination::{paginate, PAGE_SIZE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let symbol = args.next().unwrap_or_else(|| "AAPL".to_string());
    let start = args
        .next()
        .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
        .transpose()?;
    let end = args
        .next()
        .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
        .transpose()?;

    let config = AppConfig::from_env();
    let client = FmpClient::new(&config)?;

    let window = client.resolve_window(start, end);
    info!("Testing earnings calendar {} to {}...", window.start, window.end);
    match client.fetch_earnings_calendar(window).await {
        Ok(entries) => {
            let first = paginate(&entries, 1, PAGE_SIZE);
            info!(
                "SUCCESS: {} entries across {} pages",
                first.total_items, first.total_pages
            );
            for entry in &first.items {
                info!("  {} {} est EPS {:?}", entry.date, entry.symbol, entry.eps_estimated);
            }
        }
        Err(e) => error!("ERROR: Failed to fetch earnings calendar: {}", e),
    }

    info!("Testing company profile for {}...", symbol);
    match client.fetch_company_profile(&symbol).await {
        Ok(Some(profile)) => info!(
            "SUCCESS: {} ({}) at {:.2}",
            profile.company_name, profile.symbol, profile.price
        ),
        Ok(None) => info!("No profile found for {}", symbol),
        Err(e) => {
            error!("ERROR: Failed to fetch company profile: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
