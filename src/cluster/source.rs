//! Read-only provider interfaces over the externally owned cluster state.
//!
//! The gossip layer owns membership and service registrations and mutates
//! them concurrently. The status surface only ever takes point-in-time
//! snapshots through these two traits.

use thiserror::Error;

use super::types::{Member, ServiceGroups};

/// A provider could not produce a snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source_name} unavailable: {reason}")]
pub struct SourceError {
    /// Which provider failed ("membership" or "registry").
    pub source_name: &'static str,
    /// Reason reported by the provider.
    pub reason: String,
}

impl SourceError {
    /// Failure reading the membership list.
    pub fn membership(reason: impl Into<String>) -> Self {
        Self {
            source_name: "membership",
            reason: reason.into(),
        }
    }

    /// Failure reading the service registry.
    pub fn registry(reason: impl Into<String>) -> Self {
        Self {
            source_name: "registry",
            reason: reason.into(),
        }
    }
}

/// Source of the current cluster membership.
pub trait MembershipSource: Send + Sync {
    /// Snapshot of every known member, in no particular order.
    fn list_members(&self) -> Result<Vec<Member>, SourceError>;
}

/// Source of the current service registrations.
pub trait ServiceRegistry: Send + Sync {
    /// Snapshot of all registrations grouped by service name.
    fn by_service(&self) -> Result<ServiceGroups, SourceError>;
}
