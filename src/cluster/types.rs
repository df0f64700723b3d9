//! Cluster membership and service registration types.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use strum::Display;
use time::OffsetDateTime;

/// Services grouped by name, as produced by a [`ServiceRegistry`](super::ServiceRegistry).
pub type ServiceGroups = BTreeMap<String, Vec<ServiceRegistration>>;

/// Liveness of a cluster member as reported by the gossip layer.
///
/// On the wire this is the numeric status code: 0 for alive, 1 for
/// tombstone. Any other code is kept as [`MemberStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Default)]
#[serde(from = "i64", into = "i64")]
pub enum MemberStatus {
    /// Member is responding to gossip.
    #[default]
    Alive,
    /// Member has left or been declared dead.
    Tombstone,
    /// Status code this build does not recognise.
    Unknown(i64),
}

impl MemberStatus {
    /// Numeric status code used on the wire and by the display helpers.
    pub fn code(&self) -> i64 {
        match self {
            MemberStatus::Alive => 0,
            MemberStatus::Tombstone => 1,
            MemberStatus::Unknown(code) => *code,
        }
    }
}

impl From<i64> for MemberStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => MemberStatus::Alive,
            1 => MemberStatus::Tombstone,
            other => MemberStatus::Unknown(other),
        }
    }
}

impl From<MemberStatus> for i64 {
    fn from(status: MemberStatus) -> Self {
        status.code()
    }
}

/// A cluster participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Node name, unique within a snapshot.
    pub name: String,
    /// Gossip endpoint.
    pub address: SocketAddr,
    /// Current liveness.
    #[serde(default)]
    pub status: MemberStatus,
}

impl Member {
    /// Create an alive member.
    pub fn new(name: impl Into<String>, address: SocketAddr) -> Self {
        Self {
            name: name.into(),
            address,
            status: MemberStatus::Alive,
        }
    }

    /// Set the member status.
    pub fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }
}

/// One advertised service instance.
///
/// Only the fields the status pages need are typed. Everything else the
/// registry attaches is kept in `extra` and written back out untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRegistration {
    /// Instance identifier, unique across the registry.
    pub id: String,
    /// Service name; the grouping key.
    pub service_name: String,
    /// Name of the member advertising this instance. May refer to a member
    /// that is no longer in the membership list.
    pub owner: String,
    /// When the owning member last refreshed this registration.
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
    /// Registry-specific descriptive fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ServiceRegistration {
    /// Create a registration with no extra fields.
    pub fn new(
        id: impl Into<String>,
        service_name: impl Into<String>,
        owner: impl Into<String>,
        last_updated: OffsetDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            service_name: service_name.into(),
            owner: owner.into(),
            last_updated,
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an opaque descriptive field.
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}
