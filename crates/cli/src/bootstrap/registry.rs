use dnscheck_domain::config::ResolversConfig;
use dnscheck_domain::{ResolverGroup, ResolverRegistry};
use dnscheck_infrastructure::system::read_nameservers;
use tracing::info;

/// Custom resolvers win outright; then configured groups; then the built-in
/// groups plus the system nameservers.
pub async fn build_registry(config: &ResolversConfig) -> anyhow::Result<ResolverRegistry> {
    let registry = if !config.custom.is_empty() {
        ResolverRegistry::custom(&config.custom)?
    } else if !config.groups.is_empty() {
        ResolverRegistry::new(
            config
                .groups
                .iter()
                .map(|group| ResolverGroup::new(&group.name, &group.servers)),
        )?
    } else {
        let local = read_nameservers(&config.resolv_conf).await?;
        ResolverRegistry::with_defaults(&local)?
    };

    info!(
        groups = registry.len(),
        names = ?registry.names().collect::<Vec<_>>(),
        "Resolver registry ready"
    );

    Ok(registry)
}
