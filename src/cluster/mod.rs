//! Cluster state model consumed by the status surface.
//!
//! This module handles:
//! - Member and service registration types
//! - Provider traits for membership and registry snapshots
//! - An in-memory, concurrently mutable reference state
//! - Mock providers for testing

pub mod mock;
pub mod source;
pub mod state;
pub mod types;

pub use mock::{MockCluster, MockConfig};
pub use source::{MembershipSource, ServiceRegistry, SourceError};
pub use state::{ClusterSnapshot, ClusterState};
pub use types::{Member, MemberStatus, ServiceGroups, ServiceRegistration};
