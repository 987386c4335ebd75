use chrono::Utc;
use httpmock::prelude::*;
use tickerboard::{
    dashboard::Dashboard,
    view::{self, Block},
};
use tickerboard_client::prelude::*;
use url::Url;

fn finnhub(server: &MockServer) -> Finnhub {
    Finnhub::new(
        Client::new(),
        Url::parse(&server.url("/api/v1")).unwrap(),
        Url::parse(&server.url("/get")).unwrap(),
        "key",
    )
}

#[tokio::test]
async fn relay_and_direct_failure_show_the_error_banner() {
    let server = MockServer::start_async().await;
    let relay = server
        .mock_async(|when, then| {
            when.method(GET).path("/get");
            then.status(500);
        })
        .await;
    let direct = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/quote").query_param("symbol", "AAPL");
            then.status(500);
        })
        .await;
    let news = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/company-news");
            then.status(200).body("[]");
        })
        .await;

    let mut dashboard = Dashboard::new(finnhub(&server), "aapl");
    dashboard.refresh();
    dashboard.settle().await;

    let state = dashboard.state();
    assert!(!state.is_loading());
    assert!(state.quote().is_none());
    let message = state.error().unwrap();
    assert!(message.starts_with("Failed to load data:"));
    assert!(message.contains("500"));
    assert!(!message.contains("token=key"));

    let blocks = view::blocks(state, &Utc);
    assert!(blocks.iter().any(|b| matches!(b, Block::Error(_))));
    assert!(!blocks
        .iter()
        .any(|b| matches!(b, Block::Quote(_) | Block::Loading)));

    relay.assert_async().await;
    direct.assert_async().await;
    assert_eq!(news.hits_async().await, 0);
}

#[tokio::test]
async fn refresh_recovers_once_upstream_answers() {
    let server = MockServer::start_async().await;
    let mut failing = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(500);
        })
        .await;

    let mut dashboard = Dashboard::new(finnhub(&server), "AAPL");
    dashboard.refresh();
    dashboard.settle().await;
    assert!(dashboard.state().error().is_some());

    failing.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/quote");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"c":150.0,"d":2.5,"dp":1.69,"h":151.0,"l":148.0}"#);
        })
        .await;

    dashboard.refresh();
    dashboard.settle().await;

    let state = dashboard.state();
    assert_eq!(state.error(), None);
    assert_eq!(state.generation(), 2);
    assert_eq!(state.quote().unwrap().data.current, 150.0);
}
