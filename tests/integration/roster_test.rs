//! Roster management and roster check scenarios.

use chrono::{Duration, Utc};

use rustops_core::error::ErrorKind;
use rustops_core::types::NewRosterMember;
use rustops_entity::roster::{AddMemberOutcome, MemberSource};

use crate::helpers::{SERVER_ID, TestApp, player_json, session_json};

fn by_directory_id(name: &str, id: &str) -> NewRosterMember {
    NewRosterMember {
        name: name.to_string(),
        platform_id: None,
        directory_id: Some(id.to_string()),
    }
}

#[tokio::test]
async fn test_check_with_one_failing_member() {
    let app = TestApp::new().await;
    app.rosters.seed("raiders", by_directory_id("Alpha", "1"));
    app.rosters.seed("raiders", by_directory_id("Bravo", "2"));
    app.rosters.seed("raiders", by_directory_id("Charlie", "3"));
    app.mount_sessions("1", vec![session_json(Duration::hours(1), None)])
        .await;
    app.mount_session_error("2", 500).await;
    app.mount_sessions(
        "3",
        vec![session_json(Duration::days(3), Some(Duration::days(2)))],
    )
    .await;

    let report = app
        .services
        .rosters
        .check_roster("raiders", SERVER_ID)
        .await
        .unwrap();

    assert_eq!(report.header(), "raiders ACTIVE PLAYERS: (1 / 3)");
    let lines = report.render_lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Alpha: ACTIVE");
    assert!(lines[1].starts_with("Bravo: unknown (lookup failed"));
    assert_eq!(lines[2], "Charlie: last seen 2 days ago");
    assert!(report.snapshot_error.is_none());

    let summaries = app.services.rosters.list_rosters(Utc::now()).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert!(summaries[0].to_string().starts_with("1. raiders (1/3) : "));
}

#[tokio::test]
async fn test_stored_name_member_is_flagged() {
    let app = TestApp::new().await;
    app.rosters.seed(
        "legacy",
        NewRosterMember {
            name: "OldTimer".to_string(),
            platform_id: None,
            directory_id: None,
        },
    );
    app.mount_candidates("OldTimer", vec![player_json("9", "OldTimer", Duration::hours(1))])
        .await;
    app.mount_sessions("9", vec![session_json(Duration::minutes(20), None)])
        .await;

    let report = app
        .services
        .rosters
        .check_roster("legacy", SERVER_ID)
        .await
        .unwrap();
    assert_eq!(report.lines[0].source, MemberSource::StoredName);
    assert!(!report.lines[0].verified);
    assert_eq!(report.render_lines(), vec!["OldTimer: ACTIVE [unverified]".to_string()]);
}

#[tokio::test]
async fn test_add_by_directory_id_then_duplicate() {
    let app = TestApp::new().await;
    app.mount_player(player_json("4242", "Newcomer", Duration::hours(2)))
        .await;

    let first = app
        .services
        .rosters
        .add_member("squad", "4242", SERVER_ID)
        .await
        .unwrap();
    assert!(matches!(first, AddMemberOutcome::Added { ref member, alias_applied: false } if member.name == "Newcomer"));

    let second = app
        .services
        .rosters
        .add_member("squad", "4242", SERVER_ID)
        .await
        .unwrap();
    assert!(matches!(second, AddMemberOutcome::AlreadyMember(_)));

    let members = app.services.rosters.list_members("squad").await.unwrap();
    assert_eq!(members.len(), 1);
}

#[tokio::test]
async fn test_rename_and_delete() {
    let app = TestApp::new().await;
    app.rosters.seed("a", by_directory_id("X", "1"));
    app.rosters.seed("b", by_directory_id("Y", "2"));

    let err = app.services.rosters.rename_roster("a", "b").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    assert!(app.services.rosters.rename_roster("a", "c").await.unwrap());
    assert!(app.services.rosters.delete_roster("c").await.unwrap());

    let names: Vec<String> = app
        .services
        .rosters
        .list_rosters(Utc::now())
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.roster)
        .collect();
    assert_eq!(names, vec!["b".to_string()]);
}

#[tokio::test]
async fn test_removing_last_member_forgets_the_check() {
    let app = TestApp::new().await;
    app.rosters.seed("solo", by_directory_id("Alpha", "1"));
    app.mount_sessions("1", vec![session_json(Duration::hours(1), None)])
        .await;
    app.mount_player(player_json("2", "Bravo", Duration::hours(1)))
        .await;

    app.services
        .rosters
        .check_roster("solo", SERVER_ID)
        .await
        .unwrap();
    assert!(app.services.rosters.remove_member("solo", "Alpha").await.unwrap());

    app.services
        .rosters
        .add_member("solo", "2", SERVER_ID)
        .await
        .unwrap();
    let summaries = app.services.rosters.list_rosters(Utc::now()).await.unwrap();
    assert_eq!(summaries[0].to_string(), "1. solo (0/0) : Never");
}
