//! Mock cluster providers for unit testing.
//!
//! Serves fixed members and service groups, and can be told to fail either
//! source to exercise the upstream-unavailable paths.

use std::sync::{Arc, Mutex};

use super::source::{MembershipSource, ServiceRegistry, SourceError};
use super::types::{Member, ServiceGroups, ServiceRegistration};

/// Configuration for mock provider behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Whether `list_members` fails.
    pub fail_membership: bool,
    /// Whether `by_service` fails.
    pub fail_registry: bool,
}

/// Mock membership and registry source.
#[derive(Debug, Clone, Default)]
pub struct MockCluster {
    config: MockConfig,
    members: Arc<Mutex<Vec<Member>>>,
    services: Arc<Mutex<ServiceGroups>>,
}

impl MockCluster {
    /// Create an empty mock that never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock with custom failure behavior.
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Add a member. Insertion order is preserved in `list_members`.
    pub fn add_member(&self, member: Member) {
        self.members.lock().unwrap().push(member);
    }

    /// Add a registration under its service name.
    pub fn add_service(&self, service: ServiceRegistration) {
        self.services
            .lock()
            .unwrap()
            .entry(service.service_name.clone())
            .or_default()
            .push(service);
    }
}

impl MembershipSource for MockCluster {
    fn list_members(&self) -> Result<Vec<Member>, SourceError> {
        if self.config.fail_membership {
            return Err(SourceError::membership("Mock membership failure"));
        }
        Ok(self.members.lock().unwrap().clone())
    }
}

impl ServiceRegistry for MockCluster {
    fn by_service(&self) -> Result<ServiceGroups, SourceError> {
        if self.config.fail_registry {
            return Err(SourceError::registry("Mock registry failure"));
        }
        Ok(self.services.lock().unwrap().clone())
    }
}
