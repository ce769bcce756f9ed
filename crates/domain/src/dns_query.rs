use crate::{Host, RecordType};
use std::sync::Arc;

/// One unit of work: ask `resolver` for the `record_type` records of `host`.
///
/// Uses `Arc<str>` so fanning a host out across a resolver group only bumps
/// reference counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub host: Host,
    pub resolver: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(host: Host, resolver: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            host,
            resolver: resolver.into(),
            record_type,
        }
    }

    /// Name placed in the question section.
    pub fn query_name(&self) -> String {
        self.host.query_name(self.record_type)
    }
}
