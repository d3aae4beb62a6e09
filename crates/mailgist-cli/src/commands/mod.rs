//! Command implementations.

pub mod export;
pub mod process;
pub mod setup_db;

pub use self::export::execute_export;
pub use self::process::execute_process;
pub use self::setup_db::execute_setup_db;
