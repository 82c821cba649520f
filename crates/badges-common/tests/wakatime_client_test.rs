//! WakaTime client tests against a local mock server.

use badges_common::{
    test_utils::{init_test_logging, waka_fixtures},
    RetryPolicy, StatsRange, WakaStatsResponse, WakaTimeClient, WakaTimeConfig,
};
use httpmock::prelude::*;
use pretty_assertions::assert_eq;

fn client_for(server: &MockServer) -> WakaTimeClient {
    WakaTimeClient::new(
        WakaTimeConfig::new("key")
            .with_base_url(server.url("/api/v1"))
            .with_retry(RetryPolicy::immediate(4)),
    )
    .unwrap()
}

#[tokio::test]
async fn sends_basic_auth_with_blank_password() {
    init_test_logging();
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/users/current/stats/all_time")
                // base64("key:")
                .header("authorization", "Basic a2V5Og==");
            then.status(200).json_body(waka_fixtures::all_time_stats());
        })
        .await;

    let raw = client_for(&server).stats(StatsRange::AllTime).await.unwrap();

    mock.assert_async().await;
    assert_eq!(raw, waka_fixtures::all_time_stats());
    let stats = WakaStatsResponse::from_value(&raw);
    assert_eq!(stats.data.total_seconds(), 360000.0);
    assert_eq!(stats.data.projects.len(), 3);
}

#[tokio::test]
async fn fetches_last_seven_days() {
    init_test_logging();
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/users/current/stats/last_7_days");
            then.status(200).json_body(waka_fixtures::last_week_stats());
        })
        .await;

    let raw = client_for(&server)
        .stats(StatsRange::LastSevenDays)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(WakaStatsResponse::from_value(&raw).data.total_seconds(), 18000.0);
}

#[tokio::test]
async fn retries_any_failure() {
    init_test_logging();
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/users/current/stats/all_time");
            then.status(401).body("unauthorized");
        })
        .await;

    let err = client_for(&server)
        .stats(StatsRange::AllTime)
        .await
        .unwrap_err();

    mock.assert_hits_async(4).await;
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn invalid_json_is_an_error() {
    init_test_logging();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/users/current/stats/all_time");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let result = client_for(&server).stats(StatsRange::AllTime).await;
    assert!(result.is_err());
}
