//! Server search and active server scenarios.

use rustops_cli::commands::server::ServerRow;

use crate::helpers::{TestApp, server_json};

#[tokio::test]
async fn test_find_servers_across_pages() {
    let app = TestApp::new().await;
    app.mount_server_pages(vec![
        (0..10)
            .map(|i| server_json(&i.to_string(), &format!("EU {i}")))
            .collect(),
        vec![server_json("99", "EU 0"), server_json("10", "EU 10")],
    ])
    .await;

    let found = app.services.servers.find_servers("EU").await.unwrap();
    assert_eq!(found.len(), 11);
    assert_eq!(found[0].id, "99");
    assert_eq!(found[10].name, "EU 10");

    let rows = ServerRow::from_servers(&found);
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[10].position, 11);
}

#[tokio::test]
async fn test_active_server_replace_and_clear() {
    let app = TestApp::new().await;
    let servers = &app.services.servers;

    assert_eq!(servers.require_active_server().await.unwrap().server_id, "123");

    servers.set_active_server("456", "Other").await.unwrap();
    assert_eq!(servers.require_active_server().await.unwrap().server_name, "Other");

    assert!(servers.clear_active_server().await.unwrap());
    assert!(servers.require_active_server().await.is_err());
}
