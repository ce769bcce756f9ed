pub mod lookup;
pub mod serve;

pub use lookup::{run_lookup, LookupArgs};
pub use serve::run_serve;
