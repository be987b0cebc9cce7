//! Static dimensional caps on problem size.
//!
//! These size the fixed bitmaps used throughout the state representation.
//! Raising them is possible but changes the memory footprint of every
//! `State`; the caps below match the values required by the domain.

pub const MAX_ROVERS: usize = 10;
pub const MAX_WAYPOINTS: usize = 30;
pub const MAX_CAMERAS: usize = 10;
pub const MAX_STORES: usize = 10;
pub const MAX_OBJECTIVES: usize = 10;
pub const MAX_MODES: usize = 3;

/// Default wall-clock budget for a single `planner` invocation, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;
