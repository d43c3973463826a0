//! Single player check scenarios.

use chrono::Duration;

use rustops_core::error::ErrorKind;
use rustops_entity::presence::{PresenceStatus, UnknownReason};
use rustops_entity::resolution::PlayerCheck;

use crate::helpers::{SERVER_ID, TestApp, player_json, session_json};

#[tokio::test]
async fn test_same_name_two_fresh_candidates() {
    let app = TestApp::new().await;
    app.mount_candidates(
        "SomeName",
        vec![
            player_json("1001", "SomeName", Duration::hours(1)),
            player_json("1002", "SomeName", Duration::days(4)),
        ],
    )
    .await;
    app.mount_sessions("1001", vec![session_json(Duration::hours(2), None)])
        .await;
    app.mount_session_error("1002", 503).await;

    let check = app
        .services
        .players
        .check_player("SomeName", SERVER_ID)
        .await
        .unwrap();

    let PlayerCheck::Ambiguous(ranked) = &check else {
        panic!("expected two candidates, got {check:?}");
    };
    assert_eq!(ranked[0].status, PresenceStatus::Active);
    assert!(matches!(
        ranked[1].status,
        PresenceStatus::Unknown(UnknownReason::LookupFailed(_))
    ));

    let lines = check.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "1. SomeName (1001): ACTIVE");
    assert!(lines[1].starts_with("2. SomeName (1002): unknown (lookup failed"));
}

#[tokio::test]
async fn test_stale_duplicate_resolves_single_match() {
    let app = TestApp::new().await;
    app.mount_candidates(
        "Lonely",
        vec![
            player_json("1", "Lonely", Duration::days(90)),
            player_json("2", "Lonely", Duration::hours(6)),
            player_json("3", "Lonely", Duration::days(61)),
        ],
    )
    .await;
    app.mount_sessions(
        "2",
        vec![session_json(Duration::hours(3), Some(Duration::minutes(40)))],
    )
    .await;

    let check = app
        .services
        .players
        .check_player("Lonely", SERVER_ID)
        .await
        .unwrap();
    let lines = check.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Lonely (2): last seen "));
    assert!(lines[0].ends_with("m ago"));
}

#[tokio::test]
async fn test_directory_id_without_sessions() {
    let app = TestApp::new().await;
    app.mount_player(player_json("777", "Quiet", Duration::hours(1)))
        .await;
    app.mount_sessions("777", Vec::new()).await;

    let check = app
        .services
        .players
        .check_player("777", SERVER_ID)
        .await
        .unwrap();
    assert_eq!(
        check.lines(),
        vec!["Quiet (777): unknown (no session data)".to_string()]
    );
}

#[tokio::test]
async fn test_profile_url_resolves_through_identity_provider() {
    let app = TestApp::new().await;
    app.mount_profile("76561198000000001", "Steam Person").await;
    app.mount_candidates(
        "Steam Person",
        vec![player_json("55", "Steam Person", Duration::hours(2))],
    )
    .await;
    app.mount_sessions("55", vec![session_json(Duration::minutes(30), None)])
        .await;

    let check = app
        .services
        .players
        .check_player(
            "https://steamcommunity.com/profiles/76561198000000001/",
            SERVER_ID,
        )
        .await
        .unwrap();
    assert_eq!(check.lines(), vec!["Steam Person (55): ACTIVE".to_string()]);
}

#[tokio::test]
async fn test_search_failure_is_directory_unavailable() {
    let app = TestApp::new().await;
    let err = app
        .services
        .players
        .check_player("NobodyMounted", SERVER_ID)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::DirectoryUnavailable);
}
