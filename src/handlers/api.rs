// src/handlers/api.rs
use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::earnings::load_earnings;
use super::error::ApiError;
use crate::models::EarningsEntry;
use crate::services::date_filter::EarningsQuery;
use crate::services::pagination::Page;
use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EarningsResponse {
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(flatten)]
    page: Page<EarningsEntry>,
}

pub async fn get_earnings(query: EarningsQuery, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling API request to get earnings: {:?}", query);
    let selection = load_earnings(&query, &state).await;
    Ok(warp::reply::json(&EarningsResponse {
        start_date: selection.window.start,
        end_date: selection.window.end,
        page: selection.page,
    }))
}

pub async fn get_profile(symbol: String, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling API request to get profile for {}", symbol);
    match state.fmp.get_company_profile(&symbol).await {
        Some(profile) => Ok(warp::reply::json(&profile)),
        None => Err(warp::reject::custom(ApiError::not_found(format!(
            "No profile found for {}",
            symbol.to_ascii_uppercase()
        )))),
    }
}
