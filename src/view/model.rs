//! Per-request view model assembly.

use time::OffsetDateTime;
use tracing::debug;

use crate::cluster::{Member, MembershipSource, ServiceGroups, ServiceRegistry, SourceError};

use super::ordering::sort_members;

/// Everything one status response renders.
///
/// Built fresh for every request and dropped once the response is written.
#[derive(Debug, Clone)]
pub struct ViewModel {
    /// Members sorted by name.
    pub members: Vec<Member>,
    /// Registrations grouped by service name, as returned by the registry.
    pub services: ServiceGroups,
    /// Reference instant for every relative age in the response.
    pub rendered_at: OffsetDateTime,
}

impl ViewModel {
    /// Snapshot both sources, stamping the view with the current time.
    pub fn assemble(
        membership: &dyn MembershipSource,
        registry: &dyn ServiceRegistry,
    ) -> Result<Self, SourceError> {
        Self::assemble_at(membership, registry, OffsetDateTime::now_utc())
    }

    /// Snapshot both sources with an explicit reference instant.
    pub fn assemble_at(
        membership: &dyn MembershipSource,
        registry: &dyn ServiceRegistry,
        rendered_at: OffsetDateTime,
    ) -> Result<Self, SourceError> {
        let members = sort_members(membership.list_members()?);
        let services = registry.by_service()?;

        debug!(
            "Assembled view: {} members, {} services",
            members.len(),
            services.len()
        );

        Ok(Self {
            members,
            services,
            rendered_at,
        })
    }
}
