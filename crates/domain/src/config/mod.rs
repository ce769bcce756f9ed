//! Configuration module for dnscheck
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `server`: HTTP binding
//! - `lookup`: Concurrency, host limit and per-query timeout
//! - `resolvers`: Resolver groups and custom resolvers
//! - `database`: Result storage
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod database;
pub mod errors;
pub mod logging;
pub mod lookup;
pub mod resolvers;
pub mod root;
pub mod server;

pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use lookup::LookupConfig;
pub use resolvers::{ResolverGroupConfig, ResolversConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
