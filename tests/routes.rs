mod common;

use std::sync::Arc;

use serde_json::{json, Value};
use warp::http::StatusCode;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{apple_profile, config_for, date, earnings_payload};
use earnings_dashboard::config::AppConfig;
use earnings_dashboard::routes::routes;
use earnings_dashboard::AppState;

async fn upstream() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/earnings-calendar"))
        .and(query_param("from", "2026-10-01"))
        .and(query_param("to", "2026-10-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(earnings_payload(23, date(2026, 10, 1))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(query_param("symbol", "AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(apple_profile()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    server
}

fn state_for(server: &MockServer) -> Arc<AppState> {
    Arc::new(AppState::new(config_for(server)).unwrap())
}

fn body_text(body: &[u8]) -> String {
    String::from_utf8_lossy(body).into_owned()
}

#[tokio::test]
async fn root_redirects_to_earnings() {
    let server = upstream().await;
    let api = routes(state_for(&server));

    let res = warp::test::request().method("GET").path("/").reply(&api).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/earnings");
}

#[tokio::test]
async fn last_page_holds_the_remainder() {
    let server = upstream().await;
    let api = routes(state_for(&server));

    let res = warp::test::request()
        .method("GET")
        .path("/earnings?page=3&startDate=2026-10-01&endDate=2026-10-31")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let html = body_text(res.body());
    assert!(html.contains("Showing 21-23 of 23"));
    assert!(html.contains("Page 3 of 3"));
    assert!(html.contains("<a href=\"/stock/T22\">T22</a>"));
    assert!(!html.contains("<a href=\"/stock/T19\">"));
    assert!(html.contains("/earnings?page=2&amp;startDate=2026-10-01&amp;endDate=2026-10-31"));
}

#[tokio::test]
async fn page_zero_matches_page_one() {
    let server = upstream().await;
    let api = routes(state_for(&server));

    let page_one = warp::test::request()
        .path("/earnings?page=1&startDate=2026-10-01&endDate=2026-10-31")
        .reply(&api)
        .await;
    let page_zero = warp::test::request()
        .path("/earnings?page=0&startDate=2026-10-01&endDate=2026-10-31")
        .reply(&api)
        .await;
    assert_eq!(page_one.body(), page_zero.body());
}

#[tokio::test]
async fn page_past_end_renders_empty_state() {
    let server = upstream().await;
    let api = routes(state_for(&server));

    let res = warp::test::request()
        .path("/earnings?page=9&startDate=2026-10-01&endDate=2026-10-31")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res.body());
    assert!(html.contains("No results on page 9"));
    assert!(!html.contains("No earnings found"));
}

#[tokio::test]
async fn oversized_page_number_lands_past_end() {
    let server = upstream().await;
    let api = routes(state_for(&server));

    let res = warp::test::request()
        .path("/earnings?page=99999999999999999999&startDate=2026-10-01&endDate=2026-10-31")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res.body());
    assert!(html.contains(&format!("No results on page {}", i64::MAX)));
    assert!(html.contains("/earnings?page=3&amp;startDate=2026-10-01&amp;endDate=2026-10-31"));
}

#[tokio::test]
async fn filter_hint_uses_configured_window() {
    let server = upstream().await;
    let config = AppConfig {
        earnings_window_days: 30,
        ..config_for(&server)
    };
    let api = routes(Arc::new(AppState::new(config).unwrap()));

    let res = warp::test::request().path("/earnings").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res.body()).contains("for the next 30 days"));
}

#[tokio::test]
async fn blank_form_fields_are_dropped_by_redirect() {
    let server = upstream().await;
    let api = routes(state_for(&server));

    let res = warp::test::request()
        .path("/earnings?startDate=&endDate=2026-10-31&page=1")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/earnings?page=1&endDate=2026-10-31");
}

#[tokio::test]
async fn stock_page_renders_profile() {
    let server = upstream().await;
    let api = routes(state_for(&server));

    let res = warp::test::request().path("/stock/aapl?theme=dark").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res.body());
    assert!(html.contains("Apple Inc. (AAPL)"));
    assert!(html.contains("$232.14"));
    assert!(html.contains("+2.31 (+1.01%) Today"));
    assert!(html.contains("$3.45T"));
    assert!(html.contains("tradingview_aapl_"));
    assert!(html.contains("<body class=\"dark\">"));
}

#[tokio::test]
async fn unknown_stock_renders_not_found_page() {
    let server = upstream().await;
    let api = routes(state_for(&server));

    let res = warp::test::request().path("/stock/ZZZZ").reply(&api).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(body_text(res.body()).contains("Stock not found"));
}

#[tokio::test]
async fn api_returns_page_json() {
    let server = upstream().await;
    let api = routes(state_for(&server));

    let res = warp::test::request()
        .path("/api/v1/earnings?startDate=2026-10-01&endDate=2026-10-31&page=2")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["startDate"], "2026-10-01");
    assert_eq!(body["endDate"], "2026-10-31");
    assert_eq!(body["page"], 2);
    assert_eq!(body["totalItems"], 23);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(10));
    assert_eq!(body["items"][0]["symbol"], "T10");
    assert_eq!(body["items"][0]["epsActual"], Value::Null);
}

#[tokio::test]
async fn api_profile_not_found_is_404() {
    let server = upstream().await;
    let api = routes(state_for(&server));

    let res = warp::test::request().path("/api/v1/profile/ZZZZ").reply(&api).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["error"], "No profile found for ZZZZ");

    let res = warp::test::request().path("/api/v1/profile/AAPL").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["companyName"], "Apple Inc.");
}

#[tokio::test]
async fn unknown_routes_are_json_404() {
    let server = upstream().await;
    let api = routes(state_for(&server));

    let res = warp::test::request().path("/nope").reply(&api).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["error"], "Not Found");
}
