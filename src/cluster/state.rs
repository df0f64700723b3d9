//! In-memory cluster state.
//!
//! `ClusterState` is the concurrently mutable store a convergence process
//! writes into. It implements both provider traits so the status surface
//! can read from it directly, and it can be seeded from a JSON snapshot
//! file when running standalone.

use std::path::Path;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, StatusError};

use super::source::{MembershipSource, ServiceRegistry, SourceError};
use super::types::{Member, ServiceGroups, ServiceRegistration};

/// Serialized form of a cluster state, used for seed files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    /// Known members.
    #[serde(default)]
    pub members: Vec<Member>,
    /// Known service registrations.
    #[serde(default)]
    pub services: Vec<ServiceRegistration>,
}

/// Concurrent store of members (by name) and registrations (by id).
#[derive(Debug, Default)]
pub struct ClusterState {
    members: DashMap<String, Member>,
    services: DashMap<String, ServiceRegistration>,
}

impl ClusterState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from a snapshot.
    pub fn from_snapshot(snapshot: ClusterSnapshot) -> Self {
        let state = Self::new();
        for member in snapshot.members {
            state.upsert_member(member);
        }
        for service in snapshot.services {
            state.upsert_service(service);
        }
        state
    }

    /// Load a snapshot file and build a state from it.
    pub fn load_snapshot(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| StatusError::Snapshot {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let snapshot: ClusterSnapshot =
            serde_json::from_str(&raw).map_err(|e| StatusError::Snapshot {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        info!(
            "Loaded snapshot from {}: {} members, {} services",
            path.display(),
            snapshot.members.len(),
            snapshot.services.len()
        );

        Ok(Self::from_snapshot(snapshot))
    }

    /// Insert or replace a member, keyed by name.
    pub fn upsert_member(&self, member: Member) {
        debug!("Member {} is {}", member.name, member.status);
        self.members.insert(member.name.clone(), member);
    }

    /// Remove a member by name.
    pub fn remove_member(&self, name: &str) -> Option<Member> {
        self.members.remove(name).map(|(_, member)| member)
    }

    /// Insert or replace a registration, keyed by id.
    pub fn upsert_service(&self, service: ServiceRegistration) {
        self.services.insert(service.id.clone(), service);
    }

    /// Remove a registration by id.
    pub fn remove_service(&self, id: &str) -> Option<ServiceRegistration> {
        self.services.remove(id).map(|(_, service)| service)
    }

    /// Number of known members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Number of known registrations.
    pub fn service_count(&self) -> usize {
        self.services.len()
    }
}

impl MembershipSource for ClusterState {
    fn list_members(&self) -> std::result::Result<Vec<Member>, SourceError> {
        Ok(self.members.iter().map(|entry| entry.value().clone()).collect())
    }
}

impl ServiceRegistry for ClusterState {
    fn by_service(&self) -> std::result::Result<ServiceGroups, SourceError> {
        let mut groups = ServiceGroups::new();
        for entry in self.services.iter() {
            groups
                .entry(entry.service_name.clone())
                .or_default()
                .push(entry.value().clone());
        }
        // DashMap iteration order is arbitrary
        for instances in groups.values_mut() {
            instances.sort_by(|a, b| a.id.cmp(&b.id));
        }
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use time::macros::datetime;

    fn registration(id: &str, name: &str, owner: &str) -> ServiceRegistration {
        ServiceRegistration::new(id, name, owner, datetime!(2024-03-01 12:00:00 UTC))
    }

    #[test]
    fn by_service_groups_and_sorts_instances() {
        let state = ClusterState::new();
        state.upsert_service(registration("c", "web", "node-1"));
        state.upsert_service(registration("a", "web", "node-2"));
        state.upsert_service(registration("b", "db", "node-1"));

        let groups = state.by_service().unwrap();

        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["db", "web"]);
        let web_ids: Vec<_> = groups["web"].iter().map(|s| s.id.as_str()).collect();
        assert_eq!(web_ids, vec!["a", "c"]);
    }

    #[test]
    fn upsert_replaces_by_key() {
        let state = ClusterState::new();
        let addr = "10.0.0.1:7946".parse().unwrap();
        state.upsert_member(Member::new("node-1", addr));
        state.upsert_member(
            Member::new("node-1", addr).with_status(crate::cluster::MemberStatus::Tombstone),
        );

        assert_eq!(state.member_count(), 1);
        let members = state.list_members().unwrap();
        assert_eq!(members[0].status, crate::cluster::MemberStatus::Tombstone);
    }

    #[test]
    fn remove_drops_entries() {
        let state = ClusterState::new();
        state.upsert_service(registration("a", "web", "node-1"));

        assert!(state.remove_service("a").is_some());
        assert!(state.remove_service("a").is_none());
        assert!(state.by_service().unwrap().is_empty());
        assert!(state.remove_member("ghost").is_none());
    }

    #[test]
    fn load_snapshot_reads_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "members": [{{"name": "node-1", "address": "10.0.0.1:7946", "status": 0}}],
                "services": [{{
                    "id": "abc", "service_name": "web", "owner": "node-1",
                    "last_updated": "2024-03-01T12:00:00Z", "image": "nginx"
                }}]
            }}"#
        )
        .unwrap();

        let state = ClusterState::load_snapshot(file.path()).unwrap();

        assert_eq!(state.member_count(), 1);
        assert_eq!(state.service_count(), 1);
        assert_eq!(
            state.by_service().unwrap()["web"][0].extra["image"],
            serde_json::json!("nginx")
        );
    }

    #[test]
    fn load_snapshot_reports_bad_files() {
        let missing = ClusterState::load_snapshot(Path::new("/nonexistent/cluster.json"));
        assert!(matches!(missing, Err(StatusError::Snapshot { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let invalid = ClusterState::load_snapshot(file.path());
        assert!(matches!(invalid, Err(StatusError::Snapshot { .. })));
    }
}
