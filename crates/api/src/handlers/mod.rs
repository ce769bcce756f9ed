pub mod health;
pub mod lookups;
pub mod resolvers;
pub mod stats;

pub use health::health_check;
