//! dnscheck domain layer
//!
//! Host parsing, the resolver registry, the lookup result model and the
//! statistics computed over it. No I/O happens here.
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod host;
pub mod lookup;
pub mod resolver;
pub mod stats;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use dns_record::RecordType;
pub use errors::DomainError;
pub use host::{Host, HostParser};
pub use lookup::{
    HostResults, LookupMetadata, LookupResultSet, QueryFailure, QueryOutcome, QueryResult,
};
pub use resolver::{ResolverEndpoint, ResolverGroup, ResolverRegistry};
pub use stats::{
    Agreement, HostAgreement, LatencyStats, OutcomeCounts, StatsCalculator, StatsOptions,
    StatsSummary,
};
