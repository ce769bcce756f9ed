pub mod database;
pub mod dns;
pub mod repositories;
pub mod system;
