pub mod get_lookup;
pub mod get_stats;
pub mod submit_lookup;

pub use get_lookup::GetLookupUseCase;
pub use get_stats::GetLookupStatsUseCase;
pub use submit_lookup::{SubmitLookupUseCase, SubmittedLookup};
