use crate::host::validate_hostname;
use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_DNS_PORT: u16 = 53;

pub const LOCAL_GROUP: &str = "Local Resolvers";
pub const GOOGLE_GROUP: &str = "Google DNS";
pub const OPENDNS_GROUP: &str = "OpenDNS";
pub const CUSTOM_GROUP: &str = "Custom";

/// Parsed form of a resolver address string.
///
/// Accepts `ip`, `ip:port`, `[ipv6]`, `[ipv6]:port`, `name` and `name:port`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolverEndpoint {
    Socket(SocketAddr),
    Named { host: Arc<str>, port: u16 },
}

impl ResolverEndpoint {
    pub fn port(&self) -> u16 {
        match self {
            Self::Socket(addr) => addr.port(),
            Self::Named { port, .. } => *port,
        }
    }
}

impl FromStr for ResolverEndpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty resolver address".to_string());
        }

        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(Self::Socket(addr));
        }
        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(Self::Socket(SocketAddr::new(ip, DEFAULT_DNS_PORT)));
        }
        if let Some(inner) = s.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            return inner
                .parse::<IpAddr>()
                .map(|ip| Self::Socket(SocketAddr::new(ip, DEFAULT_DNS_PORT)))
                .map_err(|_| format!("invalid resolver address '{}'", s));
        }

        let (host, port) = match s.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| format!("invalid port in resolver address '{}'", s))?;
                (host, port)
            }
            None => (s, DEFAULT_DNS_PORT),
        };
        validate_hostname(host)
            .map_err(|reason| format!("invalid resolver address '{}': {}", s, reason))?;

        Ok(Self::Named {
            host: Arc::from(host),
            port,
        })
    }
}

impl fmt::Display for ResolverEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Socket(addr) => write!(f, "{}", addr),
            Self::Named { host, port } => write!(f, "{}:{}", host, port),
        }
    }
}

/// A named, ordered set of resolver addresses queried together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverGroup {
    pub name: Arc<str>,
    pub addresses: Vec<Arc<str>>,
}

impl ResolverGroup {
    pub fn new<S: AsRef<str>>(name: &str, addresses: &[S]) -> Self {
        Self {
            name: Arc::from(name),
            addresses: addresses.iter().map(|a| Arc::from(a.as_ref())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("resolver group name cannot be empty".to_string());
        }
        if self.addresses.is_empty() {
            return Err(format!("resolver group '{}' has no addresses", self.name));
        }
        for addr in &self.addresses {
            addr.parse::<ResolverEndpoint>()?;
        }
        Ok(())
    }
}

/// Group name → resolver group, built once at startup and shared read-only.
///
/// Names are exact, case-sensitive keys. Iteration is ordered by name.
#[derive(Debug, Clone, Default)]
pub struct ResolverRegistry {
    groups: BTreeMap<Arc<str>, ResolverGroup>,
}

impl ResolverRegistry {
    pub fn new(groups: impl IntoIterator<Item = ResolverGroup>) -> Result<Self, DomainError> {
        let mut map = BTreeMap::new();
        for group in groups {
            group.validate().map_err(DomainError::InputError)?;
            let name = Arc::clone(&group.name);
            if map.insert(Arc::clone(&name), group).is_some() {
                return Err(DomainError::input(format!(
                    "duplicate resolver group '{}'",
                    name
                )));
            }
        }
        Ok(Self { groups: map })
    }

    /// Registry used when no custom resolvers are configured.
    pub fn with_defaults<S: AsRef<str>>(local_resolvers: &[S]) -> Result<Self, DomainError> {
        let mut groups = vec![
            ResolverGroup::new(GOOGLE_GROUP, &["8.8.8.8", "8.8.4.4"]),
            ResolverGroup::new(OPENDNS_GROUP, &["208.67.222.222", "208.67.220.220"]),
        ];
        if !local_resolvers.is_empty() {
            groups.push(ResolverGroup::new(LOCAL_GROUP, local_resolvers));
        }
        Self::new(groups)
    }

    /// Registry holding a single "Custom" group.
    pub fn custom<S: AsRef<str>>(addresses: &[S]) -> Result<Self, DomainError> {
        Self::new([ResolverGroup::new(CUSTOM_GROUP, addresses)])
    }

    pub fn lookup_group(&self, name: &str) -> Option<&ResolverGroup> {
        self.groups.get(name)
    }

    /// Like [`lookup_group`](Self::lookup_group), but an unknown name is an
    /// input error.
    pub fn require_group(&self, name: &str) -> Result<&ResolverGroup, DomainError> {
        self.lookup_group(name).ok_or_else(|| {
            DomainError::input(format!("resolver group '{}' does not exist", name))
        })
    }

    pub fn groups(&self) -> impl Iterator<Item = &ResolverGroup> {
        self.groups.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(|k| k.as_ref())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
