//! State model and action semantics for the Rover numeric planning domain.
//!
//! This crate has no knowledge of search, parsing, or I/O: it only knows
//! how to represent a world state and how to check and apply the ten
//! ground actions against it.

pub mod action;
pub mod builder;
pub mod error;
pub mod ids;
pub mod limits;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use action::{apply, Action};
pub use builder::StateBuilder;
pub use error::{CoreError, NotApplicable};
pub use ids::{CameraId, Mode, ObjectiveId, RoverId, StoreId, WaypointId};
pub use state::{Camera, Goal, Lander, Objective, Rover, State, Store, Waypoint};
