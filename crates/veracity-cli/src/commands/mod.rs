//! Command implementations.

pub mod aggregate;
pub mod config;
pub mod import;

pub use self::aggregate::execute_aggregate;
pub use self::config::execute_config;
pub use self::import::execute_import;
