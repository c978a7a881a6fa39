//! Integration tests for the live feed
//!
//! These tests run `LiveFeed` against a scripted local WebSocket server and
//! check the resulting dashboard state.

mod common;

use common::{wait_for, MockFeedServer};
use edgequant::application::dashboard::{DashboardState, MAX_TRADES};
use edgequant::domain::Metrics;
use edgequant::infrastructure::client::feed::LiveFeed;
use hypersockets::ConnectionState;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn decision_frame(n: usize) -> String {
    json!({
        "type": "decision",
        "decision": {"id": format!("d{}", n), "symbol": "NIFTY", "entry": 100 + n}
    })
    .to_string()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_decisions_keep_last_ten_newest_first() {
    let server = MockFeedServer::start((0..25).map(decision_frame).collect()).await;
    let state = DashboardState::shared(50);

    let feed = LiveFeed::connect(&server.ws_url(), Arc::clone(&state)).await.unwrap();

    let newest_seen = wait_for(Duration::from_secs(5), || {
        state.read().trades().next().and_then(|t| t.key().map(str::to_string)) == Some("d24".to_string())
    })
    .await;
    assert!(newest_seen);

    let keys: Vec<String> = state
        .read()
        .trades()
        .filter_map(|t| t.key().map(str::to_string))
        .collect();
    verbose_println!("  trades: {:?}", keys);

    let expected: Vec<String> = (15..25).rev().map(|n| format!("d{}", n)).collect();
    assert_eq!(keys.len(), MAX_TRADES);
    assert_eq!(keys, expected);

    feed.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_malformed_frames_leave_state_unchanged() {
    let frames = vec![
        decision_frame(1),
        "{not json".to_string(),
        "null".to_string(),
        "[1, 2, 3]".to_string(),
        json!({"type": "decision"}).to_string(),
        json!({"type": "zerohero", "suggestions": "soon"}).to_string(),
        json!({"type": "heartbeat", "ts": 1}).to_string(),
        decision_frame(2),
    ];
    let server = MockFeedServer::start(frames).await;
    let state = DashboardState::shared(50);

    let feed = LiveFeed::connect(&server.ws_url(), Arc::clone(&state)).await.unwrap();

    assert!(wait_for(Duration::from_secs(5), || state.read().trade_count() == 2).await);
    assert!(wait_for(Duration::from_secs(5), || feed.stats().messages_received == 8).await);

    let keys: Vec<String> = state
        .read()
        .trades()
        .filter_map(|t| t.key().map(str::to_string))
        .collect();
    assert_eq!(keys, vec!["d2".to_string(), "d1".to_string()]);

    {
        let state = state.read();
        assert!(state.suggestions().is_empty());
        assert!(state.metrics().is_empty());
        assert!(state.tick_prices().is_empty());
    }

    assert_eq!(feed.stats().parse_errors, 5);
    assert_eq!(feed.connection_state(), ConnectionState::Connected);
    assert_eq!(server.closed(), 0);

    feed.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_zerohero_replaces_and_tick_merges() {
    let frames = vec![
        json!({"type": "zerohero", "suggestions": [{"id": "a"}, {"id": "b"}, {"id": "c"}]}).to_string(),
        json!({"type": "tick", "price": 24010.5}).to_string(),
        json!({"type": "zerohero", "suggestions": [{"id": "z", "symbol": "BANKNIFTY", "prob": 0.31}]}).to_string(),
        json!({"type": "tick", "price": "24011"}).to_string(),
    ];
    let server = MockFeedServer::start(frames).await;
    let state = DashboardState::shared(50);
    {
        let mut s = state.write();
        s.set_instruments(vec![edgequant::Instrument::new("1", "NIFTY", "NSE")]);
        s.apply_snapshot("1", Metrics::from_snapshot(json!({"oi": 900, "last_price": 1})).unwrap());
    }

    let feed = LiveFeed::connect(&server.ws_url(), Arc::clone(&state)).await.unwrap();

    assert!(wait_for(Duration::from_secs(5), || {
        let s = state.read();
        s.suggestions().len() == 1 && s.tick_prices().len() == 2
    })
    .await);

    let s = state.read();
    assert_eq!(s.suggestions()[0].id.as_deref(), Some("z"));
    assert_eq!(s.suggestions()[0].prob_percent(), 31);
    assert_eq!(s.metrics().display("last_price"), "24011");
    assert_eq!(s.metrics().display("oi"), "900");
    assert_eq!(s.tick_prices().iter().copied().collect::<Vec<_>>(), vec![24010.5, 24011.0]);
    drop(s);

    feed.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_session_restart_closes_one_socket_and_opens_one() {
    let server = MockFeedServer::start(Vec::new()).await;
    let state = DashboardState::shared(50);

    let first = LiveFeed::connect(&server.ws_url(), Arc::clone(&state)).await.unwrap();
    assert!(wait_for(Duration::from_secs(5), || server.opened() == 1).await);
    assert!(wait_for(Duration::from_secs(5), || first.is_connected()).await);

    first.shutdown().await.unwrap();
    assert!(wait_for(Duration::from_secs(5), || server.closed() == 1).await);

    let second = LiveFeed::connect(&server.ws_url(), Arc::clone(&state)).await.unwrap();
    assert!(wait_for(Duration::from_secs(5), || server.opened() == 2).await);
    assert_eq!(server.closed(), 1);

    second.shutdown().await.unwrap();
    assert!(wait_for(Duration::from_secs(5), || server.closed() == 2).await);
    assert_eq!(server.opened(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_feed_events_are_reported() {
    let server = MockFeedServer::start(Vec::new()).await;
    let state = DashboardState::shared(50);

    let feed = LiveFeed::connect(&server.ws_url(), Arc::clone(&state)).await.unwrap();

    let events = parking_lot::Mutex::new(Vec::new());
    let connected = wait_for(Duration::from_secs(5), || {
        let mut events = events.lock();
        events.extend(feed.poll_events());
        events.contains(&hypersockets::ClientEvent::Connected)
    })
    .await;
    assert!(connected);
    assert!(feed.poll_events().is_empty());

    feed.shutdown().await.unwrap();
}
