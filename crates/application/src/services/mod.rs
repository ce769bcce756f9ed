pub mod lookup_engine;
pub mod result_aggregator;

pub use lookup_engine::{LookupEngine, LookupSettings};
pub use result_aggregator::ResultAggregator;
