// src/handlers/earnings.rs
use log::{debug, error, info};
use std::sync::Arc;
use warp::http::Uri;
use warp::{Rejection, Reply};

use super::error::ApiError;
use crate::models::EarningsEntry;
use crate::services::date_filter::{DateRangeFilter, EarningsQuery};
use crate::services::fmp::EarningsWindow;
use crate::services::pagination::{paginate, Page, PAGE_SIZE};
use crate::views::earnings::{render_earnings_page, EarningsListing};
use crate::AppState;

/// Filter, resolved window and requested page for an earnings query.
pub struct EarningsSelection {
    pub filter: DateRangeFilter,
    pub window: EarningsWindow,
    pub page: Page<EarningsEntry>,
}

pub async fn load_earnings(query: &EarningsQuery, state: &AppState) -> EarningsSelection {
    let filter = DateRangeFilter::from_query(query);
    let window = state.fmp.resolve_window(filter.start, filter.end);
    let entries = state.fmp.get_earnings_in(window).await;
    let page = paginate(&entries, query.page_number(), PAGE_SIZE);
    debug!(
        "Earnings page {} of {} ({} entries total)",
        page.page, page.total_pages, page.total_items
    );
    EarningsSelection { filter, window, page }
}

pub async fn get_earnings_page(
    query: EarningsQuery,
    state: Arc<AppState>,
) -> Result<Box<dyn Reply>, Rejection> {
    info!("Handling request to get earnings page: {:?}", query);

    if let Some(target) = query.canonical_url() {
        debug!("Redirecting to canonical earnings URL {}", target);
        let uri: Uri = target.parse().map_err(|e| {
            error!("Failed to build redirect URI {}: {}", target, e);
            warp::reject::custom(ApiError::internal("Failed to build redirect"))
        })?;
        return Ok(Box::new(warp::redirect::see_other(uri)));
    }

    let selection = load_earnings(&query, &state).await;
    let html = render_earnings_page(&EarningsListing {
        filter: selection.filter,
        window: selection.window,
        page: &selection.page,
        window_days: state.config.earnings_window_days,
    });

    Ok(Box::new(warp::reply::html(html)))
}
