//! Fixtures shared by this crate's unit tests, built with `rover-core`'s
//! public `StateBuilder` rather than reaching into private fields.

use rover_core::{CameraId, Mode, ObjectiveId, RoverId, State, StateBuilder, StoreId, WaypointId};

/// One rover, three colinear waypoints (0-1-2, traversable both ways, each
/// visible only to its immediate neighbour), one empty store. Waypoint 2
/// carries the lander and sees waypoint 0's soil sample destination.
pub(crate) fn linear_three_waypoints() -> (State, rover_core::Goal) {
    let mut b = StateBuilder::new(1, 3, 0, 1, 0);
    let rover = RoverId::new(0);
    let w0 = WaypointId::new(0);
    let w1 = WaypointId::new(1);
    let w2 = WaypointId::new(2);

    b.set_rover_position(rover, w0)
        .set_rover_energy(rover, 40)
        .equip_soil(rover)
        .set_can_traverse(rover, w0, w1)
        .set_can_traverse(rover, w1, w0)
        .set_can_traverse(rover, w1, w2)
        .set_can_traverse(rover, w2, w1)
        .set_visible(w0, w1)
        .set_visible(w1, w0)
        .set_visible(w1, w2)
        .set_visible(w2, w1)
        .set_soil_sample(w1)
        .set_store_owner(StoreId::new(0), rover)
        .set_lander_position(w2)
        .set_in_sun(w0);

    let goal = b.new_goal();
    (b.build(), goal)
}

/// Rover with an imaging camera, used by heuristic/successor tests that
/// exercise calibrate/take_image.
#[allow(dead_code)]
pub(crate) fn imaging_problem() -> (State, rover_core::Goal) {
    let mut b = StateBuilder::new(1, 2, 1, 0, 1);
    let rover = RoverId::new(0);
    let camera = CameraId::new(0);
    let objective = ObjectiveId::new(0);
    let w0 = WaypointId::new(0);
    let w1 = WaypointId::new(1);

    b.set_rover_position(rover, w0)
        .set_rover_energy(rover, 40)
        .equip_imaging(rover)
        .set_can_traverse(rover, w0, w1)
        .set_can_traverse(rover, w1, w0)
        .set_visible(w0, w1)
        .set_visible(w1, w0)
        .set_camera_owner(camera, rover)
        .add_calibration_target(camera, objective)
        .add_supported_mode(camera, Mode::HighRes)
        .add_objective_visibility(objective, w1)
        .set_lander_position(w0);

    let mut goal = b.new_goal();
    goal.set_image(objective, Mode::HighRes);
    (b.build(), goal)
}
