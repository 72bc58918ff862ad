// src/lib.rs

pub mod config;
pub mod services;
pub mod models;
pub mod handlers;
pub mod routes;
pub mod views;

use std::sync::Arc;

use services::fmp::{FmpClient, FmpError};
use views::chart::{ChartWidget, TradingViewWidget};

/// Shared per-process state handed to every request.
pub struct AppState {
    pub config: config::AppConfig,
    pub fmp: FmpClient,
    pub chart: Arc<dyn ChartWidget>,
}

impl AppState {
    pub fn new(config: config::AppConfig) -> Result<Self, FmpError> {
        Self::with_chart(config, Arc::new(TradingViewWidget))
    }

    pub fn with_chart(config: config::AppConfig, chart: Arc<dyn ChartWidget>) -> Result<Self, FmpError> {
        let fmp = FmpClient::new(&config)?;
        Ok(AppState { config, fmp, chart })
    }
}
