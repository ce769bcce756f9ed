pub mod lookups;
pub mod resolvers;

// Re-export use cases
pub use lookups::{GetLookupStatsUseCase, GetLookupUseCase, SubmitLookupUseCase, SubmittedLookup};
pub use resolvers::GetResolversUseCase;
