//! dnscheck application layer
//!
//! Ports to the outside world, the concurrent lookup engine and the use cases
//! the presentation layers call into.
pub mod ports;
pub mod services;
pub mod use_cases;
