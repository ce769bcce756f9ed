use dnscheck_domain::{RecordType, ResolverGroup};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverGroupResponse {
    pub name: String,
    pub addresses: Vec<String>,
}

impl From<ResolverGroup> for ResolverGroupResponse {
    fn from(group: ResolverGroup) -> Self {
        Self {
            name: group.name.to_string(),
            addresses: group.addresses.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Everything a client needs to build a lookup request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolversResponse {
    pub groups: Vec<ResolverGroupResponse>,
    pub record_types: Vec<String>,
}

impl ResolversResponse {
    pub fn new(groups: Vec<ResolverGroup>) -> Self {
        Self {
            groups: groups.into_iter().map(ResolverGroupResponse::from).collect(),
            record_types: RecordType::all()
                .into_iter()
                .map(|t| t.as_str().to_string())
                .collect(),
        }
    }
}
