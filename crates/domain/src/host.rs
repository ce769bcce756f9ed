use crate::{DomainError, RecordType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// A lookup target: a syntactically valid hostname or an IP literal.
///
/// Validation is purely syntactic. A well-formed name that does not exist is
/// a normal query outcome, not a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Host(Arc<str>);

impl Host {
    /// Validates a single token of user input.
    pub fn parse(token: &str) -> Result<Self, DomainError> {
        let token = token.trim();

        let unbracketed = token
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .unwrap_or(token);
        if let Ok(ip) = unbracketed.parse::<IpAddr>() {
            return Ok(Self(Arc::from(ip.to_string().as_str())));
        }

        validate_hostname(token)
            .map_err(|reason| DomainError::input(format!("invalid host '{}': {}", token, reason)))?;
        Ok(Self(Arc::from(token)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.0.parse().ok()
    }

    pub fn is_ip(&self) -> bool {
        self.ip().is_some()
    }

    /// Name to put in the question section for `record_type`.
    ///
    /// PTR lookups on an IP literal use the reverse-mapping name; everything
    /// else queries the host text as given.
    pub fn query_name(&self, record_type: RecordType) -> String {
        match (record_type, self.ip()) {
            (RecordType::PTR, Some(ip)) => reverse_name(ip),
            _ => self.0.to_string(),
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Host {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Hostname grammar check (RFC 1123 labels, underscores tolerated for
/// service names like `_dmarc.example.com`).
pub fn validate_hostname(name: &str) -> Result<(), &'static str> {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() {
        return Err("empty name");
    }
    if name.len() > MAX_HOSTNAME_LEN {
        return Err("name exceeds 253 characters");
    }

    for label in name.split('.') {
        if label.is_empty() {
            return Err("empty label");
        }
        if label.len() > MAX_LABEL_LEN {
            return Err("label exceeds 63 characters");
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err("label starts or ends with a hyphen");
        }
        if !label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err("invalid character");
        }
    }
    Ok(())
}

fn reverse_name(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, c, d] = v4.octets();
            format!("{}.{}.{}.{}.in-addr.arpa.", d, c, b, a)
        }
        IpAddr::V6(v6) => {
            let mut name = String::with_capacity(73);
            for byte in v6.octets().iter().rev() {
                name.push_str(&format!("{:x}.{:x}.", byte & 0x0f, byte >> 4));
            }
            name.push_str("ip6.arpa.");
            name
        }
    }
}

/// Turns free-form user input into an ordered, size-bounded host list.
#[derive(Debug, Clone, Copy)]
pub struct HostParser {
    max_hosts: usize,
}

impl HostParser {
    pub fn new(max_hosts: usize) -> Self {
        Self { max_hosts }
    }

    pub fn max_hosts(&self) -> usize {
        self.max_hosts
    }

    /// Splits on commas, whitespace and newlines. Order is preserved and
    /// duplicates are kept.
    pub fn parse(&self, raw_input: &str) -> Result<Vec<Host>, DomainError> {
        let tokens: Vec<&str> = raw_input
            .split(|c: char| c == ',' || c.is_whitespace())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            return Err(DomainError::input("no hosts provided"));
        }
        if tokens.len() > self.max_hosts {
            return Err(DomainError::input("too many hosts"));
        }

        tokens.into_iter().map(Host::parse).collect()
    }
}
