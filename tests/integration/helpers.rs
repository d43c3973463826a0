//! Shared test helpers for integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rustops_core::config::{DirectoryConfig, IdentityConfig, LookupConfig};
use rustops_core::error::AppError;
use rustops_core::result::AppResult;
use rustops_core::traits::{ActiveServerStore, RosterStore};
use rustops_core::types::{ActiveServer, NewRosterMember, RosterMember, RosterSnapshot};
use rustops_directory::{BattleMetricsClient, SteamClient};
use rustops_service::{AppServices, Collaborators};

/// Server ID used by every scenario.
pub const SERVER_ID: &str = "123";

/// Test application context
pub struct TestApp {
    /// Mock directory API
    pub directory: MockServer,
    /// Mock identity provider API
    pub identity: MockServer,
    /// In-memory roster store
    pub rosters: Arc<MemoryRosterStore>,
    /// Services wired to the mocks
    pub services: AppServices,
}

impl TestApp {
    /// Create a new test application with an active server set.
    pub async fn new() -> Self {
        Self::with_lookup(LookupConfig::default()).await
    }

    /// Create a new test application with custom lookup tuning.
    pub async fn with_lookup(lookup: LookupConfig) -> Self {
        let directory = MockServer::start().await;
        let identity = MockServer::start().await;

        let directory_config = DirectoryConfig {
            base_url: directory.uri(),
            token: "test-token".to_string(),
            ..DirectoryConfig::default()
        };
        let identity_config = IdentityConfig {
            base_url: identity.uri(),
            api_key: "test-key".to_string(),
            ..IdentityConfig::default()
        };

        let rosters = Arc::new(MemoryRosterStore::default());
        let active_server = Arc::new(MemoryActiveServerStore::default());
        let services = AppServices::build(
            Collaborators {
                directory: Arc::new(
                    BattleMetricsClient::new(&directory_config).expect("directory client"),
                ),
                identity: Arc::new(SteamClient::new(&identity_config).expect("identity client")),
                rosters: rosters.clone(),
                active_server,
            },
            &directory_config,
            &lookup,
        );

        services
            .servers
            .set_active_server(SERVER_ID, "Test Server")
            .await
            .expect("set active server");

        Self {
            directory,
            identity,
            rosters,
            services,
        }
    }

    /// Serve a single page of player candidates for `name`.
    pub async fn mount_candidates(&self, name: &str, players: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path("/players"))
            .and(query_param("filter[search]", name))
            .and(query_param("filter[servers]", SERVER_ID))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": players })))
            .mount(&self.directory)
            .await;
    }

    /// Serve a player by directory ID.
    pub async fn mount_player(&self, player: Value) {
        let id = player["id"].as_str().unwrap_or_default().to_string();
        Mock::given(method("GET"))
            .and(path(format!("/players/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": player })))
            .mount(&self.directory)
            .await;
    }

    /// Serve the sessions of a player on the test server.
    pub async fn mount_sessions(&self, player_id: &str, sessions: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(format!("/players/{player_id}/relationships/sessions")))
            .and(query_param("filter[servers]", SERVER_ID))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": sessions })))
            .mount(&self.directory)
            .await;
    }

    /// Make the session lookup of a player fail with `status`.
    pub async fn mount_session_error(&self, player_id: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/players/{player_id}/relationships/sessions")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.directory)
            .await;
    }

    /// Serve a Steam profile for a SteamID64.
    pub async fn mount_profile(&self, steam_id: &str, persona: &str) {
        Mock::given(method("GET"))
            .and(path("/ISteamUser/GetPlayerSummaries/v0002/"))
            .and(query_param("steamids", steam_id))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": { "players": [{ "steamid": steam_id, "personaname": persona }] }
            })))
            .mount(&self.identity)
            .await;
    }

    /// Serve paginated server search results, linking each page to the next.
    pub async fn mount_server_pages(&self, pages: Vec<Vec<Value>>) {
        let count = pages.len();
        for (index, servers) in pages.into_iter().enumerate() {
            let mut body = json!({ "data": servers, "links": {} });
            if index + 1 < count {
                body["links"]["next"] =
                    json!(format!("{}/servers?page[key]={}", self.directory.uri(), index + 1));
            }
            let mock = Mock::given(method("GET")).and(path("/servers"));
            let mock = if index == 0 {
                mock.and(query_param_is_missing("page[key]"))
            } else {
                mock.and(query_param("page[key]", index.to_string()))
            };
            mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
                .expect(1)
                .mount(&self.directory)
                .await;
        }
    }
}

/// A player resource updated `age` ago.
pub fn player_json(id: &str, name: &str, age: Duration) -> Value {
    json!({
        "type": "player",
        "id": id,
        "attributes": { "name": name, "updatedAt": (Utc::now() - age).to_rfc3339() }
    })
}

/// A session resource; `stop_ago == None` is still connected.
pub fn session_json(start_ago: Duration, stop_ago: Option<Duration>) -> Value {
    let now = Utc::now();
    json!({
        "type": "session",
        "id": Uuid::new_v4().to_string(),
        "attributes": {
            "start": (now - start_ago).to_rfc3339(),
            "stop": stop_ago.map(|d| (now - d).to_rfc3339()),
        }
    })
}

/// A server resource.
pub fn server_json(id: &str, name: &str) -> Value {
    json!({ "type": "server", "id": id, "attributes": { "name": name } })
}

/// Roster store held in memory.
#[derive(Debug, Default)]
pub struct MemoryRosterStore {
    members: Mutex<Vec<RosterMember>>,
    snapshots: Mutex<HashMap<String, RosterSnapshot>>,
}

impl MemoryRosterStore {
    /// Insert a member directly, bypassing resolution.
    pub fn seed(&self, roster: &str, member: NewRosterMember) {
        let mut members = self.members.lock().unwrap();
        let offset = Duration::milliseconds(members.len() as i64);
        members.push(RosterMember {
            id: Uuid::new_v4(),
            roster: roster.to_string(),
            name: member.name,
            platform_id: member.platform_id,
            directory_id: member.directory_id,
            created_at: Utc::now() + offset,
        });
    }
}

#[async_trait]
impl RosterStore for MemoryRosterStore {
    async fn list_roster_names(&self) -> AppResult<Vec<String>> {
        let mut names: Vec<String> = self
            .members
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.roster.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    async fn add_member(&self, roster: &str, member: &NewRosterMember) -> AppResult<RosterMember> {
        self.seed(roster, member.clone());
        let members = self.members.lock().unwrap();
        members
            .last()
            .cloned()
            .ok_or_else(|| AppError::store_failure("insert lost"))
    }

    async fn remove_member(&self, roster: &str, member_name: &str) -> AppResult<bool> {
        let mut members = self.members.lock().unwrap();
        let index = members
            .iter()
            .position(|m| m.roster == roster && m.name == member_name);
        let removed = index.map(|i| members.remove(i)).is_some();
        if removed && !members.iter().any(|m| m.roster == roster) {
            self.snapshots.lock().unwrap().remove(roster);
        }
        Ok(removed)
    }

    async fn find_duplicate(
        &self,
        roster: &str,
        platform_id: Option<&str>,
        directory_id: Option<&str>,
    ) -> AppResult<Option<RosterMember>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| {
                m.roster == roster
                    && ((platform_id.is_some() && m.platform_id.as_deref() == platform_id)
                        || (directory_id.is_some() && m.directory_id.as_deref() == directory_id))
            })
            .cloned())
    }

    async fn list_members(&self, roster: &str) -> AppResult<Vec<RosterMember>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.roster == roster)
            .cloned()
            .collect())
    }

    async fn upsert_snapshot(
        &self,
        roster: &str,
        active_count: i32,
        total_count: i32,
        checked_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.snapshots.lock().unwrap().insert(
            roster.to_string(),
            RosterSnapshot {
                roster: roster.to_string(),
                active_count,
                total_count,
                checked_at,
            },
        );
        Ok(())
    }

    async fn get_snapshot(&self, roster: &str) -> AppResult<Option<RosterSnapshot>> {
        Ok(self.snapshots.lock().unwrap().get(roster).cloned())
    }

    async fn delete_roster(&self, roster: &str) -> AppResult<bool> {
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|m| m.roster != roster);
        let snapshot = self.snapshots.lock().unwrap().remove(roster);
        Ok(before != members.len() || snapshot.is_some())
    }

    async fn rename_roster(&self, old_name: &str, new_name: &str) -> AppResult<bool> {
        let mut members = self.members.lock().unwrap();
        if members.iter().any(|m| m.roster == new_name) {
            return Err(AppError::conflict(format!("Roster '{new_name}' already exists")));
        }
        let mut renamed = false;
        for member in members.iter_mut().filter(|m| m.roster == old_name) {
            member.roster = new_name.to_string();
            renamed = true;
        }
        let mut snapshots = self.snapshots.lock().unwrap();
        snapshots.remove(new_name);
        if let Some(mut snapshot) = snapshots.remove(old_name) {
            snapshot.roster = new_name.to_string();
            snapshots.insert(new_name.to_string(), snapshot);
        }
        Ok(renamed)
    }
}

/// Active server setting held in memory.
#[derive(Debug, Default)]
pub struct MemoryActiveServerStore {
    current: Mutex<Option<ActiveServer>>,
}

#[async_trait]
impl ActiveServerStore for MemoryActiveServerStore {
    async fn get(&self) -> AppResult<Option<ActiveServer>> {
        Ok(self.current.lock().unwrap().clone())
    }

    async fn set(&self, server_id: &str, server_name: &str) -> AppResult<ActiveServer> {
        let server = ActiveServer {
            server_id: server_id.to_string(),
            server_name: server_name.to_string(),
            set_at: Utc::now(),
        };
        *self.current.lock().unwrap() = Some(server.clone());
        Ok(server)
    }

    async fn clear(&self) -> AppResult<bool> {
        Ok(self.current.lock().unwrap().take().is_some())
    }
}
