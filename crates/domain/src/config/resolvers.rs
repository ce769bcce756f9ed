use serde::{Deserialize, Serialize};

/// A resolver group declared in the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverGroupConfig {
    pub name: String,
    pub servers: Vec<String>,
}

/// Resolver group definitions.
///
/// Precedence when building the registry:
/// 1. `custom` non-empty: a single "Custom" group, everything else ignored
/// 2. `groups` non-empty: exactly those groups
/// 3. otherwise the built-in groups plus the nameservers from `resolv_conf`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolversConfig {
    #[serde(default)]
    pub custom: Vec<String>,

    #[serde(default)]
    pub groups: Vec<ResolverGroupConfig>,

    #[serde(default = "default_resolv_conf")]
    pub resolv_conf: String,
}

impl Default for ResolversConfig {
    fn default() -> Self {
        Self {
            custom: vec![],
            groups: vec![],
            resolv_conf: default_resolv_conf(),
        }
    }
}

fn default_resolv_conf() -> String {
    "/etc/resolv.conf".to_string()
}
