// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;

use log::info;
use warp::http::{StatusCode, Uri};
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::api::{get_earnings, get_profile};
use crate::handlers::earnings::get_earnings_page;
use crate::handlers::error::ApiError;
use crate::handlers::stock::{get_stock_page, StockQuery};
use crate::services::date_filter::EarningsQuery;
use crate::AppState;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        code = StatusCode::BAD_REQUEST;
        message = "Invalid query string".to_string();
    } else {
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(state: Arc<AppState>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let state_filter = warp::any().map(move || state.clone());

    let index_route = warp::path::end()
        .and(warp::get())
        .map(|| warp::redirect::see_other(Uri::from_static("/earnings")));

    let earnings_route = warp::path!("earnings")
        .and(warp::get())
        .and(warp::query::<EarningsQuery>())
        .and(state_filter.clone())
        .and_then(get_earnings_page);

    let stock_route = warp::path!("stock" / String)
        .and(warp::get())
        .and(warp::query::<StockQuery>())
        .and(state_filter.clone())
        .and_then(get_stock_page);

    let api_earnings_route = warp::path!("api" / "v1" / "earnings")
        .and(warp::get())
        .and(warp::query::<EarningsQuery>())
        .and(state_filter.clone())
        .and_then(get_earnings);

    let api_profile_route = warp::path!("api" / "v1" / "profile" / String)
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_profile);

    info!("All routes configured successfully.");

    index_route
        .or(earnings_route)
        .or(stock_route)
        .or(api_earnings_route)
        .or(api_profile_route)
        .recover(handle_rejection)
}
