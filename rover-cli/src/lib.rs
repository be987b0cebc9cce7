//! Shared logic behind the `planner` and `verify` binaries.

pub mod logging;
pub mod planner;
pub mod verify;

pub use logging::init_logging;
pub use planner::run_planner;
pub use verify::run_verify;
