pub mod lookup_repository;
pub mod upstream_resolver;

pub use lookup_repository::LookupRepository;
pub use upstream_resolver::UpstreamResolver;
