// src/handlers/stock.rs
use log::info;
use serde::Deserialize;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::views::stock::{render_stock_not_found, render_stock_page};
use crate::views::Theme;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StockQuery {
    pub theme: Option<String>,
}

pub async fn get_stock_page(
    symbol: String,
    query: StockQuery,
    state: Arc<AppState>,
) -> Result<impl Reply, Rejection> {
    info!("Handling request to get stock page for {}", symbol);
    let theme = Theme::from_param(query.theme.as_deref());

    let reply = match state.fmp.get_company_profile(&symbol).await {
        Some(profile) => warp::reply::with_status(
            warp::reply::html(render_stock_page(&profile, theme, state.chart.as_ref())),
            StatusCode::OK,
        ),
        None => warp::reply::with_status(
            warp::reply::html(render_stock_not_found(&symbol, theme)),
            StatusCode::NOT_FOUND,
        ),
    };
    Ok(reply)
}
