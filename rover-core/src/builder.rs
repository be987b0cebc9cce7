//! Incremental construction of a [`State`] and [`Goal`] from parsed
//! problem-file facts. Kept separate from `state.rs` so
//! that the invariants of a finished `State` (all bitsets sized to the
//! final entity counts) never have to hold mid-construction.

use fixedbitset::FixedBitSet;

use crate::ids::{CameraId, Mode, ObjectiveId, RoverId, StoreId, WaypointId};
use crate::limits::MAX_MODES;
use crate::state::{Camera, Goal, Lander, Objective, Rover, State, Store, Waypoint};

pub struct StateBuilder {
    num_waypoints: usize,
    num_objectives: usize,
    rovers: Vec<Rover>,
    waypoints: Vec<Waypoint>,
    cameras: Vec<Camera>,
    stores: Vec<Store>,
    objectives: Vec<Objective>,
    lander_position: WaypointId,
    channel_free: bool,
}

impl StateBuilder {
    pub fn new(num_rovers: usize, num_waypoints: usize, num_cameras: usize, num_stores: usize, num_objectives: usize) -> Self {
        let rovers = (0..num_rovers)
            .map(|_| Rover {
                position: WaypointId::new(0),
                energy: 0,
                available: true,
                equipped_soil: false,
                equipped_rock: false,
                equipped_imaging: false,
                has_soil_analysis: FixedBitSet::with_capacity(num_waypoints),
                has_rock_analysis: FixedBitSet::with_capacity(num_waypoints),
                have_image: FixedBitSet::with_capacity(num_objectives * MAX_MODES),
                can_traverse: FixedBitSet::with_capacity(num_waypoints * num_waypoints),
            })
            .collect();

        let waypoints = (0..num_waypoints)
            .map(|_| Waypoint {
                has_soil_sample: false,
                has_rock_sample: false,
                communicated_soil: false,
                communicated_rock: false,
                in_sun: false,
                visible_waypoints: FixedBitSet::with_capacity(num_waypoints),
            })
            .collect();

        let cameras = (0..num_cameras)
            .map(|_| Camera {
                calibrated: false,
                rover_id: RoverId::new(0),
                calibration_targets: FixedBitSet::with_capacity(num_objectives),
                modes_supported: [false; MAX_MODES],
            })
            .collect();

        let stores = (0..num_stores)
            .map(|_| Store {
                is_full: false,
                rover_id: RoverId::new(0),
            })
            .collect();

        let objectives = (0..num_objectives)
            .map(|_| Objective {
                communicated_image: [false; MAX_MODES],
                visible_waypoints: FixedBitSet::with_capacity(num_waypoints),
            })
            .collect();

        StateBuilder {
            num_waypoints,
            num_objectives,
            rovers,
            waypoints,
            cameras,
            stores,
            objectives,
            lander_position: WaypointId::new(0),
            channel_free: true,
        }
    }

    pub fn set_rover_position(&mut self, rover: RoverId, waypoint: WaypointId) -> &mut Self {
        self.rovers[rover.index()].position = waypoint;
        self
    }
    pub fn set_rover_energy(&mut self, rover: RoverId, energy: u32) -> &mut Self {
        self.rovers[rover.index()].energy = energy;
        self
    }
    pub fn equip_soil(&mut self, rover: RoverId) -> &mut Self {
        self.rovers[rover.index()].equipped_soil = true;
        self
    }
    pub fn equip_rock(&mut self, rover: RoverId) -> &mut Self {
        self.rovers[rover.index()].equipped_rock = true;
        self
    }
    pub fn equip_imaging(&mut self, rover: RoverId) -> &mut Self {
        self.rovers[rover.index()].equipped_imaging = true;
        self
    }
    pub fn set_can_traverse(&mut self, rover: RoverId, from: WaypointId, to: WaypointId) -> &mut Self {
        let idx = from.index() * self.num_waypoints + to.index();
        self.rovers[rover.index()].can_traverse.insert(idx);
        self
    }

    pub fn set_visible(&mut self, from: WaypointId, to: WaypointId) -> &mut Self {
        self.waypoints[from.index()].visible_waypoints.insert(to.index());
        self
    }
    pub fn set_in_sun(&mut self, waypoint: WaypointId) -> &mut Self {
        self.waypoints[waypoint.index()].in_sun = true;
        self
    }
    pub fn set_soil_sample(&mut self, waypoint: WaypointId) -> &mut Self {
        self.waypoints[waypoint.index()].has_soil_sample = true;
        self
    }
    pub fn set_rock_sample(&mut self, waypoint: WaypointId) -> &mut Self {
        self.waypoints[waypoint.index()].has_rock_sample = true;
        self
    }

    /// Marks a rover as already holding the soil analysis for a waypoint,
    /// without it having sampled the waypoint during the plan.
    pub fn set_has_soil_analysis(&mut self, rover: RoverId, waypoint: WaypointId) -> &mut Self {
        self.rovers[rover.index()].has_soil_analysis.insert(waypoint.index());
        self
    }
    pub fn set_has_rock_analysis(&mut self, rover: RoverId, waypoint: WaypointId) -> &mut Self {
        self.rovers[rover.index()].has_rock_analysis.insert(waypoint.index());
        self
    }
    pub fn set_have_image(&mut self, rover: RoverId, objective: ObjectiveId, mode: Mode) -> &mut Self {
        let idx = objective.index() * MAX_MODES + mode.index();
        self.rovers[rover.index()].have_image.insert(idx);
        self
    }

    pub fn set_store_owner(&mut self, store: StoreId, rover: RoverId) -> &mut Self {
        self.stores[store.index()].rover_id = rover;
        self
    }
    pub fn set_store_full(&mut self, store: StoreId) -> &mut Self {
        self.stores[store.index()].is_full = true;
        self
    }

    pub fn set_camera_owner(&mut self, camera: CameraId, rover: RoverId) -> &mut Self {
        self.cameras[camera.index()].rover_id = rover;
        self
    }
    pub fn set_camera_calibrated(&mut self, camera: CameraId) -> &mut Self {
        self.cameras[camera.index()].calibrated = true;
        self
    }
    pub fn add_calibration_target(&mut self, camera: CameraId, objective: ObjectiveId) -> &mut Self {
        self.cameras[camera.index()].calibration_targets.insert(objective.index());
        self
    }
    pub fn add_supported_mode(&mut self, camera: CameraId, mode: Mode) -> &mut Self {
        self.cameras[camera.index()].modes_supported[mode.index()] = true;
        self
    }

    pub fn add_objective_visibility(&mut self, objective: ObjectiveId, waypoint: WaypointId) -> &mut Self {
        self.objectives[objective.index()].visible_waypoints.insert(waypoint.index());
        self
    }

    pub fn set_lander_position(&mut self, waypoint: WaypointId) -> &mut Self {
        self.lander_position = waypoint;
        self
    }

    pub fn build(self) -> State {
        State {
            rovers: self.rovers,
            waypoints: self.waypoints,
            cameras: self.cameras,
            stores: self.stores,
            objectives: self.objectives,
            lander: Lander {
                position: self.lander_position,
                channel_free: self.channel_free,
            },
            recharges: 0,
        }
    }

    pub fn new_goal(&self) -> Goal {
        Goal::new(self.num_waypoints, self.num_objectives)
    }
}
