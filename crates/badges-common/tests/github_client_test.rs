//! GitHub GraphQL client tests against a local mock server.

use badges_common::{
    test_utils::{calendar_fixtures, date, init_test_logging},
    GitHubClient, GitHubConfig, RetryPolicy,
};
use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::new(
        GitHubConfig::new("test-token")
            .with_endpoint(server.url("/graphql"))
            .with_retry(RetryPolicy::immediate(4)),
    )
    .unwrap()
}

#[tokio::test]
async fn fetches_and_flattens_calendar() {
    init_test_logging();
    let server = MockServer::start_async().await;
    let calendar = calendar_fixtures::calendar_from("2024-01-08", &[0, 2, 3, 1]);

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/graphql")
                .header("authorization", "bearer test-token");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(calendar_fixtures::graphql_body(&calendar));
        })
        .await;

    let fetched = client_for(&server)
        .contribution_calendar("octocat", None)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(fetched.total_contributions, 6);
    let days = fetched.days();
    assert_eq!(days.len(), 4);
    assert_eq!(days[0].date, date("2024-01-08"));
    assert_eq!(days[3].count, 1);
}

#[tokio::test]
async fn retries_server_errors_until_budget_is_spent() {
    init_test_logging();
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(502).body("bad gateway");
        })
        .await;

    let err = client_for(&server)
        .contribution_calendar("octocat", None)
        .await
        .unwrap_err();

    mock.assert_hits_async(4).await;
    assert_eq!(err.exit_code(), 10);
}

#[tokio::test]
async fn does_not_retry_bad_credentials() {
    init_test_logging();
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(401)
                .json_body(json!({"message": "Bad credentials"}));
        })
        .await;

    let err = client_for(&server)
        .contribution_calendar("octocat", None)
        .await
        .unwrap_err();

    mock.assert_hits_async(1).await;
    assert_eq!(err.exit_code(), 10);
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn retries_rate_limit_graphql_errors() {
    init_test_logging();
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(json!({
                "data": null,
                "errors": [{"type": "RATE_LIMITED", "message": "API rate limit exceeded"}]
            }));
        })
        .await;

    let err = client_for(&server)
        .contribution_calendar("octocat", None)
        .await
        .unwrap_err();

    mock.assert_hits_async(4).await;
    assert!(err.to_string().contains("rate limit"));
}

#[tokio::test]
async fn unknown_user_is_a_malformed_response() {
    init_test_logging();
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200)
                .json_body(calendar_fixtures::graphql_unknown_user("nobody-here"));
        })
        .await;

    let err = client_for(&server)
        .contribution_calendar("nobody-here", None)
        .await
        .unwrap_err();

    mock.assert_hits_async(1).await;
    assert_eq!(err.exit_code(), 11);
}

#[tokio::test]
async fn missing_calendar_is_a_malformed_response() {
    init_test_logging();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200)
                .json_body(json!({"data": {"user": {"contributionsCollection": null}}}));
        })
        .await;

    let err = client_for(&server)
        .contribution_calendar_for_year("octocat", 2024)
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 11);
}
