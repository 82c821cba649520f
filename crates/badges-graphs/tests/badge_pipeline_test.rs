//! Fetch → compute → render flows with the GitHub API mocked.

use badges_common::{
    test_utils::{calendar_fixtures, date, init_test_logging},
    GitHubClient, GitHubConfig, RetryPolicy,
};
use badges_graphs::{
    continue_streak, sanitize_file, BadgeRenderer, DailyLineChart, MonthlyHeatmap, StreakCard,
    StreakState, YearContributions,
};
use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;

fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::new(
        GitHubConfig::new("test-token")
            .with_endpoint(server.url("/graphql"))
            .with_retry(RetryPolicy::immediate(1)),
    )
    .unwrap()
}

#[tokio::test]
async fn streak_run_extends_saved_state_and_writes_card() {
    init_test_logging();
    let server = MockServer::start_async().await;
    let calendar = calendar_fixtures::calendar_from("2024-01-08", &[1, 1, 4, 3, 1]);
    server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200)
                .json_body(calendar_fixtures::graphql_body(&calendar));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("streak_state.json");
    let card_path = dir.path().join("streak.svg");
    StreakState::new(5, date("2024-01-10")).save(&state_path).unwrap();

    let fetched = client_for(&server)
        .contribution_calendar("octocat", None)
        .await
        .unwrap();
    let saved = StreakState::load(&state_path);
    let state = continue_streak(saved.as_ref(), &fetched.days()).unwrap();
    state.save(&state_path).unwrap();
    StreakCard::default().render_to_file(&state.streak, &card_path).unwrap();

    assert_eq!(state, StreakState::new(7, date("2024-01-12")));
    assert_eq!(StreakState::load(&state_path), Some(state));
    let svg = fs::read_to_string(&card_path).unwrap();
    assert!(svg.contains(r#"aria-label="7 day streak""#));
    assert!(!sanitize_file(&card_path).unwrap());
}

#[test]
fn second_run_on_the_same_day_keeps_the_streak() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("streak_state.json");
    StreakState::new(40, date("2024-01-12")).save(&state_path).unwrap();

    // the calendar alone would only give a streak of 2
    let days = calendar_fixtures::days_from("2024-01-09", &[0, 0, 1, 1]);
    let saved = StreakState::load(&state_path);
    let state = continue_streak(saved.as_ref(), &days).unwrap();
    assert_eq!(state.streak, 40);
}

#[tokio::test]
async fn year_charts_render_from_fetched_calendar() {
    init_test_logging();
    let server = MockServer::start_async().await;
    let calendar = calendar_fixtures::calendar_from("2024-03-01", &[2, 0, 9, 4]);
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/graphql")
                .body_includes("2024-01-01T00:00:00+00:00");
            then.status(200)
                .json_body(calendar_fixtures::graphql_body(&calendar));
        })
        .await;

    let fetched = client_for(&server)
        .contribution_calendar_for_year("octocat", 2024)
        .await
        .unwrap();
    mock.assert_async().await;

    let year = YearContributions::new("octocat", 2024, &fetched.days());
    assert_eq!(year.total(), 15);
    assert_eq!(year.monthly_totals()[2], 15);

    let dir = tempfile::tempdir().unwrap();
    let heatmap_path = dir.path().join("assets/contrib-monthly.svg");
    let line_path = dir.path().join("Assets/contrib-daily-line.svg");
    MonthlyHeatmap::default().render_to_file(&year, &heatmap_path).unwrap();
    DailyLineChart::default().render_to_file(&year, &line_path).unwrap();

    let heatmap = fs::read_to_string(&heatmap_path).unwrap();
    assert!(heatmap.contains("<title>2024-03-03 — 9 contributions</title>"));
    let line = fs::read_to_string(&line_path).unwrap();
    assert!(line.contains("<title>Mar 03, 2024: 9 contributions</title>"));
}
