use dotenv::dotenv;
use env_logger;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use earnings_dashboard::config::AppConfig;
use earnings_dashboard::routes;
use earnings_dashboard::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let config = AppConfig::from_env();
    info!("Using PORT: {}", config.port);
    info!(
        "Earnings window: {} days, upstream cache TTL: {}s",
        config.earnings_window_days, config.cache_ttl_secs
    );

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    let state = Arc::new(AppState::new(config)?);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET"]);

    let app = routes::routes(state).with(cors).with(warp::log("earnings_dashboard"));
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(app).run(addr).await;
    Ok(())
}
