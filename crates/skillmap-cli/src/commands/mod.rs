//! Command implementations.

pub mod batch;
pub mod catalog;
pub mod check_tool;
pub mod ingest;
pub mod taxonomy;

pub use self::batch::{execute_assign, execute_prune, execute_run, execute_validate_tools};
pub use self::catalog::execute_catalog;
pub use self::check_tool::execute_check_tool;
pub use self::ingest::execute_ingest;
pub use self::taxonomy::execute_taxonomy;
