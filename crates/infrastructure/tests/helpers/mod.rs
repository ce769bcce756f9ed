pub mod builders;
pub mod dns_server_mock;

#[allow(unused_imports)]
pub use builders::sample_results;
#[allow(unused_imports)]
pub use dns_server_mock::{MockDnsServer, MockReply};
