pub mod error;
pub mod lookup;
pub mod resolvers;

pub use error::ErrorResponse;
pub use lookup::{HostsInput, LookupCreatedResponse, LookupRequest};
pub use resolvers::{ResolverGroupResponse, ResolversResponse};
