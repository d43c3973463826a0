//! In-memory collaborators for service tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use rustops_core::error::AppError;
use rustops_core::result::AppResult;
use rustops_core::traits::{ActiveServerStore, DirectoryService, IdentityProvider, RosterStore};
use rustops_core::types::{
    ActiveServer, Candidate, DirectoryPage, NewRosterMember, PlatformProfile, PlayerSort,
    RosterMember, RosterSnapshot, ServerSummary, SessionRecord,
};

const PAGE_PREFIX: &str = "page:";

fn page_index(page: Option<&str>) -> usize {
    page.and_then(|p| p.strip_prefix(PAGE_PREFIX))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn take_page<T: Clone>(pages: &[Vec<T>], index: usize) -> DirectoryPage<T> {
    match pages.get(index) {
        Some(items) => {
            let next = (index + 1 < pages.len()).then(|| format!("{PAGE_PREFIX}{}", index + 1));
            DirectoryPage::new(items.clone(), next)
        }
        None => DirectoryPage::new(Vec::new(), None),
    }
}

/// Scripted directory service.
#[derive(Debug, Default)]
pub struct FakeDirectory {
    server_pages: Vec<Vec<ServerSummary>>,
    player_pages: HashMap<String, Vec<Vec<Candidate>>>,
    players: HashMap<String, Candidate>,
    sessions: HashMap<String, Vec<SessionRecord>>,
    failing_sessions: HashSet<String>,
    fail_search_on_page: Option<usize>,
    delay: Option<Duration>,
    search_requests: AtomicUsize,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server_pages(mut self, pages: Vec<Vec<ServerSummary>>) -> Self {
        self.server_pages = pages;
        self
    }

    pub fn with_player_pages(mut self, name: &str, pages: Vec<Vec<Candidate>>) -> Self {
        self.player_pages.insert(name.to_lowercase(), pages);
        self
    }

    pub fn with_candidates(self, name: &str, candidates: Vec<Candidate>) -> Self {
        self.with_player_pages(name, vec![candidates])
    }

    pub fn with_player(mut self, candidate: Candidate) -> Self {
        self.players.insert(candidate.id.clone(), candidate);
        self
    }

    pub fn with_sessions(mut self, player_id: &str, sessions: Vec<SessionRecord>) -> Self {
        self.sessions.insert(player_id.to_string(), sessions);
        self
    }

    pub fn failing_sessions(mut self, player_id: &str) -> Self {
        self.failing_sessions.insert(player_id.to_string());
        self
    }

    pub fn failing_search_on_page(mut self, page: usize) -> Self {
        self.fail_search_on_page = Some(page);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn search_requests(&self) -> usize {
        self.search_requests.load(Ordering::SeqCst)
    }

    fn record_search(&self, index: usize) -> AppResult<()> {
        self.search_requests.fetch_add(1, Ordering::SeqCst);
        if self.fail_search_on_page == Some(index) {
            return Err(AppError::directory_unavailable(format!("page {index} failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryService for FakeDirectory {
    async fn search_servers(
        &self,
        _query: &str,
        page: Option<&str>,
    ) -> AppResult<DirectoryPage<ServerSummary>> {
        let index = page_index(page);
        self.record_search(index)?;
        Ok(take_page(&self.server_pages, index))
    }

    async fn search_players(
        &self,
        name: &str,
        _server_id: &str,
        _sort: PlayerSort,
        page: Option<&str>,
    ) -> AppResult<DirectoryPage<Candidate>> {
        let index = page_index(page);
        self.record_search(index)?;
        Ok(self
            .player_pages
            .get(&name.to_lowercase())
            .map(|pages| take_page(pages, index))
            .unwrap_or_else(|| DirectoryPage::new(Vec::new(), None)))
    }

    async fn get_player(&self, player_id: &str) -> AppResult<Option<Candidate>> {
        Ok(self.players.get(player_id).cloned())
    }

    async fn get_sessions(
        &self,
        player_id: &str,
        _server_id: &str,
    ) -> AppResult<Vec<SessionRecord>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_sessions.contains(player_id) {
            return Err(AppError::directory_unavailable("HTTP 503"));
        }
        Ok(self.sessions.get(player_id).cloned().unwrap_or_default())
    }
}

/// Scripted identity provider keyed by URL or platform ID.
#[derive(Debug, Default)]
pub struct FakeIdentity {
    profiles: HashMap<String, PlatformProfile>,
    failing: HashSet<String>,
}

impl FakeIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, key: &str, platform_id: &str, display_name: &str) -> Self {
        self.profiles.insert(
            key.to_string(),
            PlatformProfile {
                platform_id: platform_id.to_string(),
                display_name: display_name.to_string(),
            },
        );
        self
    }

    pub fn failing(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn resolve_profile(&self, url_or_id: &str) -> AppResult<PlatformProfile> {
        if self.failing.contains(url_or_id) {
            return Err(AppError::identity_unavailable("HTTP 500"));
        }
        self.profiles
            .get(url_or_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("No profile for {url_or_id}")))
    }
}

/// Roster store held in memory.
#[derive(Debug, Default)]
pub struct MemoryRosterStore {
    members: Mutex<Vec<RosterMember>>,
    snapshots: Mutex<HashMap<String, RosterSnapshot>>,
    failing_snapshot_reads: HashSet<String>,
    fail_snapshot_writes: bool,
    upserts: AtomicUsize,
}

impl MemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(self, roster: &str, member: NewRosterMember) -> Self {
        self.insert(roster, &member);
        self
    }

    pub fn with_snapshot(self, snapshot: RosterSnapshot) -> Self {
        self.snapshots
            .lock()
            .unwrap()
            .insert(snapshot.roster.clone(), snapshot);
        self
    }

    pub fn failing_snapshot_read(mut self, roster: &str) -> Self {
        self.failing_snapshot_reads.insert(roster.to_string());
        self
    }

    pub fn failing_snapshot_writes(mut self) -> Self {
        self.fail_snapshot_writes = true;
        self
    }

    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    fn insert(&self, roster: &str, member: &NewRosterMember) -> RosterMember {
        let mut members = self.members.lock().unwrap();
        let row = RosterMember {
            id: Uuid::new_v4(),
            roster: roster.to_string(),
            name: member.name.clone(),
            platform_id: member.platform_id.clone(),
            directory_id: member.directory_id.clone(),
            created_at: Utc::now() + chrono::Duration::microseconds(members.len() as i64),
        };
        members.push(row.clone());
        row
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
        Ok(self.insert(roster, member))
    }

    async fn remove_member(&self, roster: &str, member_name: &str) -> AppResult<bool> {
        let mut members = self.members.lock().unwrap();
        match members
            .iter()
            .position(|m| m.roster == roster && m.name == member_name)
        {
            Some(index) => {
                members.remove(index);
                if !members.iter().any(|m| m.roster == roster) {
                    self.snapshots.lock().unwrap().remove(roster);
                }
                Ok(true)
            }
            None => Ok(false),
        }
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
        self.upserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_snapshot_writes {
            return Err(AppError::store_failure("snapshot write failed"));
        }
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
        if self.failing_snapshot_reads.contains(roster) {
            return Err(AppError::store_failure("snapshot read failed"));
        }
        Ok(self.snapshots.lock().unwrap().get(roster).cloned())
    }

    async fn delete_roster(&self, roster: &str) -> AppResult<bool> {
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|m| m.roster != roster);
        let removed_snapshot = self.snapshots.lock().unwrap().remove(roster).is_some();
        Ok(before != members.len() || removed_snapshot)
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

impl MemoryActiveServerStore {
    pub fn new() -> Self {
        Self::default()
    }
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
