//! WakaTime fallback chain against a local mock server.

use badges_common::{
    test_utils::{init_test_logging, waka_fixtures},
    RetryPolicy, WakaTimeClient, WakaTimeConfig,
};
use badges_graphs::{resolve_stats, StatsSource};
use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;

const ALL_TIME: &str = "/api/v1/users/current/stats/all_time";
const LAST_WEEK: &str = "/api/v1/users/current/stats/last_7_days";

fn client_for(server: &MockServer) -> WakaTimeClient {
    WakaTimeClient::new(
        WakaTimeConfig::new("key")
            .with_base_url(server.url("/api/v1"))
            .with_retry(RetryPolicy::immediate(2)),
    )
    .unwrap()
}

#[tokio::test]
async fn live_all_time_is_used_and_cached() {
    init_test_logging();
    let server = MockServer::start_async().await;
    let all_time = server
        .mock_async(|when, then| {
            when.method(GET).path(ALL_TIME);
            then.status(200).json_body(waka_fixtures::all_time_stats());
        })
        .await;
    let last_week = server
        .mock_async(|when, then| {
            when.method(GET).path(LAST_WEEK);
            then.status(200).json_body(waka_fixtures::last_week_stats());
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("waka-template/waka_data.json");
    let client = client_for(&server);
    let resolved = resolve_stats(Some(&client), &cache).await;

    all_time.assert_async().await;
    last_week.assert_hits_async(0).await;
    assert_eq!(resolved.source, StatsSource::AllTime);
    assert_eq!(resolved.summary().hours, "100.0");

    let cached: serde_json::Value = serde_json::from_str(&fs::read_to_string(&cache).unwrap()).unwrap();
    assert_eq!(cached, waka_fixtures::all_time_stats());
}

#[tokio::test]
async fn zero_all_time_falls_back_to_last_week() {
    init_test_logging();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(ALL_TIME);
            then.status(200).json_body(waka_fixtures::empty_stats());
        })
        .await;
    let last_week = server
        .mock_async(|when, then| {
            when.method(GET).path(LAST_WEEK);
            then.status(200).json_body(waka_fixtures::last_week_stats());
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("waka.json");
    let client = client_for(&server);
    let resolved = resolve_stats(Some(&client), &cache).await;

    last_week.assert_async().await;
    assert_eq!(resolved.source, StatsSource::LastSevenDays);
    assert_eq!(resolved.summary().hours, "5.0");
    assert!(cache.exists());
}

#[tokio::test]
async fn failing_api_uses_cache_without_rewriting_it() {
    init_test_logging();
    let server = MockServer::start_async().await;
    let all_time = server
        .mock_async(|when, then| {
            when.method(GET).path(ALL_TIME);
            then.status(500);
        })
        .await;
    let last_week = server
        .mock_async(|when, then| {
            when.method(GET).path(LAST_WEEK);
            then.status(503);
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("waka.json");
    let cached_text = serde_json::to_string(&waka_fixtures::last_week_stats()).unwrap();
    fs::write(&cache, &cached_text).unwrap();

    let client = client_for(&server);
    let resolved = resolve_stats(Some(&client), &cache).await;

    all_time.assert_hits_async(2).await;
    last_week.assert_hits_async(2).await;
    assert_eq!(resolved.source, StatsSource::Cache);
    assert_eq!(resolved.raw, waka_fixtures::last_week_stats());
    assert_eq!(fs::read_to_string(&cache).unwrap(), cached_text);
}

#[tokio::test]
async fn nothing_available_renders_placeholder() {
    init_test_logging();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(401);
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("waka.json");
    let client = client_for(&server);
    let resolved = resolve_stats(Some(&client), &cache).await;

    assert_eq!(resolved.source, StatsSource::Placeholder);
    let summary = resolved.summary();
    assert_eq!(summary.hours, "0.0");
    assert_eq!(summary.projects, 0);
    assert!(!cache.exists());
}
