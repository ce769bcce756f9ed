use dnscheck_domain::{DomainError, ResolverGroup, ResolverRegistry};
use std::sync::Arc;

/// Read access to the resolver registry for presentation layers.
pub struct GetResolversUseCase {
    registry: Arc<ResolverRegistry>,
}

impl GetResolversUseCase {
    pub fn new(registry: Arc<ResolverRegistry>) -> Self {
        Self { registry }
    }

    /// All groups, ordered by name.
    pub fn get_all(&self) -> Vec<ResolverGroup> {
        self.registry.groups().cloned().collect()
    }

    pub fn get_by_name(&self, name: &str) -> Result<ResolverGroup, DomainError> {
        self.registry.require_group(name).cloned()
    }
}
