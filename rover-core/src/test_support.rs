//! Minimal fixtures shared by the unit tests in this crate.

use fixedbitset::FixedBitSet;

use crate::ids::{RoverId, StoreId, WaypointId};
use crate::limits::MAX_MODES;
use crate::state::{Goal, Lander, Rover, State, Store, Waypoint};

/// A single rover, two mutually visible waypoints, one store, no cameras
/// or objectives. Waypoint 0 carries the lander and sits in sunlight.
pub(crate) fn two_waypoint_problem() -> (State, Goal) {
    let num_waypoints = 2;

    let mut visible_from_0 = FixedBitSet::with_capacity(num_waypoints);
    visible_from_0.insert(1);
    let mut visible_from_1 = FixedBitSet::with_capacity(num_waypoints);
    visible_from_1.insert(0);

    let mut can_traverse = FixedBitSet::with_capacity(num_waypoints * num_waypoints);
    can_traverse.insert(0 * num_waypoints + 1);
    can_traverse.insert(1 * num_waypoints + 0);

    let rover = Rover {
        position: WaypointId::new(0),
        energy: 20,
        available: true,
        equipped_soil: true,
        equipped_rock: true,
        equipped_imaging: true,
        has_soil_analysis: FixedBitSet::with_capacity(num_waypoints),
        has_rock_analysis: FixedBitSet::with_capacity(num_waypoints),
        have_image: FixedBitSet::with_capacity(MAX_MODES),
        can_traverse,
    };

    let waypoints = vec![
        Waypoint {
            has_soil_sample: true,
            has_rock_sample: true,
            communicated_soil: false,
            communicated_rock: false,
            in_sun: true,
            visible_waypoints: visible_from_0,
        },
        Waypoint {
            has_soil_sample: false,
            has_rock_sample: false,
            communicated_soil: false,
            communicated_rock: false,
            in_sun: false,
            visible_waypoints: visible_from_1,
        },
    ];

    let store = Store {
        is_full: false,
        rover_id: RoverId::new(0),
    };

    let lander = Lander {
        position: WaypointId::new(0),
        channel_free: true,
    };

    let state = State {
        rovers: vec![rover],
        waypoints,
        cameras: vec![],
        stores: vec![store],
        objectives: vec![],
        lander,
        recharges: 0,
    };

    let mut goal = Goal::new(num_waypoints, 0);
    goal.set_soil(WaypointId::new(0));
    goal.set_rock(WaypointId::new(0));

    (state, goal)
}

#[allow(dead_code)]
pub(crate) fn store_of(state: &State, rover: RoverId) -> StoreId {
    state.stores_of(rover).next().expect("rover owns at least one store")
}
