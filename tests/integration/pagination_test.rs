//! Pagination through the real directory client.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rustops_core::config::DirectoryConfig;
use rustops_core::types::PlayerSort;
use rustops_directory::BattleMetricsClient;
use rustops_service::DirectorySearch;
use rustops_service::directory::SERVER_RESULT_CAP;

use crate::helpers::{TestApp, player_json, server_json};

fn players(prefix: &str, n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| player_json(&format!("{prefix}{i}"), "Name", Duration::hours(1)))
        .collect()
}

#[tokio::test]
async fn test_candidate_search_follows_links_until_short_page() {
    let server = MockServer::start().await;
    let pages = vec![players("a", 10), players("b", 10), players("c", 10), players("d", 4)];
    let count = pages.len();

    for (index, data) in pages.into_iter().enumerate() {
        let mut body = json!({ "data": data, "links": {} });
        if index + 1 < count {
            body["links"]["next"] =
                json!(format!("{}/players?page[key]={}", server.uri(), index + 1));
        }
        let mock = Mock::given(method("GET")).and(path("/players"));
        let mock = if index == 0 {
            mock.and(query_param_is_missing("page[key]"))
        } else {
            mock.and(query_param("page[key]", index.to_string()))
        };
        mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;
    }

    let config = DirectoryConfig {
        base_url: server.uri(),
        token: "t".to_string(),
        ..DirectoryConfig::default()
    };
    let client = Arc::new(BattleMetricsClient::new(&config).unwrap());
    let search = DirectorySearch::new(
        client,
        config.page_size,
        config.candidate_result_cap,
        StdDuration::from_secs(10),
    );

    let found = search
        .search_candidates_for_server("Name", "123", PlayerSort::LastSeenDesc)
        .await
        .unwrap();
    assert_eq!(found.len(), 34);
    assert_eq!(found[0].id, "a0");
    assert_eq!(found[33].id, "d3");
    // Request counts are verified by `expect(1)` when the server drops.
}

#[tokio::test]
async fn test_server_search_halts_at_cap() {
    let app = TestApp::new().await;
    let first: Vec<Value> = (0..25)
        .map(|i| server_json(&i.to_string(), &format!("Rust {i}")))
        .collect();
    Mock::given(method("GET"))
        .and(path("/servers"))
        .and(query_param_is_missing("page[key]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": first,
            "links": { "next": format!("{}/servers?page[key]=1", app.directory.uri()) }
        })))
        .expect(1)
        .mount(&app.directory)
        .await;
    Mock::given(method("GET"))
        .and(path("/servers"))
        .and(query_param("page[key]", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(0)
        .mount(&app.directory)
        .await;

    let found = app.services.servers.find_servers("Rust").await.unwrap();
    assert_eq!(found.len(), SERVER_RESULT_CAP);
}
