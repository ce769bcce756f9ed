use serde::{Deserialize, Serialize};

/// Hosts as free text (`"a.com, b.com"`) or as a JSON list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HostsInput {
    Text(String),
    List(Vec<String>),
}

impl HostsInput {
    /// Text form understood by the host parser.
    pub fn to_raw(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::List(hosts) => hosts.join("\n"),
        }
    }
}

/// Request DTO for submitting a lookup
#[derive(Debug, Clone, Deserialize)]
pub struct LookupRequest {
    pub hosts: HostsInput,
    #[serde(default = "default_record_type")]
    pub record_type: String,
    /// Resolver group name
    pub resolvers: String,
}

fn default_record_type() -> String {
    "A".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupCreatedResponse {
    pub key: String,
    pub queries: usize,
}
