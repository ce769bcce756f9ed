pub mod key_generator;
pub mod lookup_repository;

pub use key_generator::generate_key;
pub use lookup_repository::SqliteLookupRepository;
