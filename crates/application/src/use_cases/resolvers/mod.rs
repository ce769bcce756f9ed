pub mod get_resolvers;

pub use get_resolvers::GetResolversUseCase;
