//! The ten ground action kinds and their precondition/effect semantics.

use std::fmt;

use crate::error::{CoreError, NotApplicable};
use crate::ids::{CameraId, Mode, ObjectiveId, RoverId, StoreId, WaypointId};
use crate::state::{Goal, State};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Action {
    Navigate {
        rover: RoverId,
        from: WaypointId,
        to: WaypointId,
    },
    Recharge {
        rover: RoverId,
        waypoint: WaypointId,
    },
    SampleSoil {
        rover: RoverId,
        store: StoreId,
        waypoint: WaypointId,
    },
    SampleRock {
        rover: RoverId,
        store: StoreId,
        waypoint: WaypointId,
    },
    Drop {
        rover: RoverId,
        store: StoreId,
    },
    Calibrate {
        rover: RoverId,
        camera: CameraId,
        objective: ObjectiveId,
        waypoint: WaypointId,
    },
    TakeImage {
        rover: RoverId,
        waypoint: WaypointId,
        objective: ObjectiveId,
        camera: CameraId,
        mode: Mode,
    },
    CommunicateSoil {
        rover: RoverId,
        sample_waypoint: WaypointId,
        rover_waypoint: WaypointId,
        lander_waypoint: WaypointId,
    },
    CommunicateRock {
        rover: RoverId,
        sample_waypoint: WaypointId,
        rover_waypoint: WaypointId,
        lander_waypoint: WaypointId,
    },
    CommunicateImage {
        rover: RoverId,
        objective: ObjectiveId,
        mode: Mode,
        rover_waypoint: WaypointId,
        lander_waypoint: WaypointId,
    },
}

impl Action {
    /// The action-name token as it appears in a rendered plan line.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Navigate { .. } => "navigate",
            Action::Recharge { .. } => "recharge",
            Action::SampleSoil { .. } => "sample_soil",
            Action::SampleRock { .. } => "sample_rock",
            Action::Drop { .. } => "drop",
            Action::Calibrate { .. } => "calibrate",
            Action::TakeImage { .. } => "take_image",
            Action::CommunicateSoil { .. } => "communicate_soil_data",
            Action::CommunicateRock { .. } => "communicate_rock_data",
            Action::CommunicateImage { .. } => "communicate_image_data",
        }
    }

    /// The rover performing this action.
    pub fn rover(&self) -> RoverId {
        match *self {
            Action::Navigate { rover, .. }
            | Action::Recharge { rover, .. }
            | Action::SampleSoil { rover, .. }
            | Action::SampleRock { rover, .. }
            | Action::Drop { rover, .. }
            | Action::Calibrate { rover, .. }
            | Action::TakeImage { rover, .. }
            | Action::CommunicateSoil { rover, .. }
            | Action::CommunicateRock { rover, .. }
            | Action::CommunicateImage { rover, .. } => rover,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Action::Navigate { rover, from, to } => write!(f, "( navigate {rover} {from} {to} )"),
            Action::Recharge { rover, waypoint } => write!(f, "( recharge {rover} {waypoint} )"),
            Action::SampleSoil { rover, store, waypoint } => {
                write!(f, "( sample_soil {rover} {store} {waypoint} )")
            }
            Action::SampleRock { rover, store, waypoint } => {
                write!(f, "( sample_rock {rover} {store} {waypoint} )")
            }
            Action::Drop { rover, store } => write!(f, "( drop {rover} {store} )"),
            Action::Calibrate {
                rover,
                camera,
                objective,
                waypoint,
            } => write!(f, "( calibrate {rover} {camera} {objective} {waypoint} )"),
            Action::TakeImage {
                rover,
                waypoint,
                objective,
                camera,
                mode,
            } => write!(f, "( take_image {rover} {waypoint} {objective} {camera} {mode} )"),
            Action::CommunicateSoil {
                rover,
                sample_waypoint,
                rover_waypoint,
                lander_waypoint,
            } => write!(
                f,
                "( communicate_soil_data {rover} {sample_waypoint} {rover_waypoint} {lander_waypoint} general )"
            ),
            Action::CommunicateRock {
                rover,
                sample_waypoint,
                rover_waypoint,
                lander_waypoint,
            } => write!(
                f,
                "( communicate_rock_data {rover} {sample_waypoint} {rover_waypoint} {lander_waypoint} general )"
            ),
            Action::CommunicateImage {
                rover,
                objective,
                mode,
                rover_waypoint,
                lander_waypoint,
            } => write!(
                f,
                "( communicate_image_data {rover} {objective} {mode} {rover_waypoint} {lander_waypoint} general )"
            ),
        }
    }
}

fn fail(action: Action, reason: &'static str) -> CoreError {
    CoreError::NotApplicable(NotApplicable { action, reason })
}

/// Checks preconditions, applies effects, and returns the resulting state
/// plus the energy spent. Leaves `state` untouched on
/// failure (the error is returned before any mutation happens, since a
/// fresh clone is only committed once every precondition has passed).
pub fn apply(state: &State, goal: &Goal, action: Action) -> Result<(State, u32), CoreError> {
    let num_waypoints = state.num_waypoints();
    match action {
        Action::Navigate { rover, from, to } => {
            let r = state.rover(rover);
            if !r.available {
                return Err(fail(action, "rover not available"));
            }
            if r.energy < 8 {
                return Err(fail(action, "insufficient energy"));
            }
            if !state.waypoint(from).sees(to) {
                return Err(fail(action, "destination not visible from origin"));
            }
            if !r.can_traverse(from, to, num_waypoints) {
                return Err(fail(action, "rover cannot traverse this edge"));
            }
            if r.position != from {
                return Err(fail(action, "rover is not at the origin waypoint"));
            }
            if from == to {
                return Err(fail(action, "origin and destination are the same waypoint"));
            }
            let mut s = state.clone();
            let r = &mut s.rovers[rover.index()];
            r.position = to;
            r.energy -= 8;
            Ok((s, 8))
        }
        Action::Recharge { rover, waypoint } => {
            let r = state.rover(rover);
            if !state.waypoint(waypoint).in_sun {
                return Err(fail(action, "waypoint is not in sunlight"));
            }
            if r.position != waypoint {
                return Err(fail(action, "rover is not at the recharge waypoint"));
            }
            if r.energy >= 8 {
                return Err(fail(action, "rover energy is not below the recharge threshold"));
            }
            let mut s = state.clone();
            s.rovers[rover.index()].energy += 20;
            s.recharges += 1;
            Ok((s, 0))
        }
        Action::SampleSoil { rover, store, waypoint } => {
            let r = state.rover(rover);
            let w = state.waypoint(waypoint);
            let s_store = state.store(store);
            if r.position != waypoint {
                return Err(fail(action, "rover is not at the sample waypoint"));
            }
            if r.energy < 3 {
                return Err(fail(action, "insufficient energy"));
            }
            if !w.has_soil_sample {
                return Err(fail(action, "no soil sample at this waypoint"));
            }
            if !r.equipped_soil {
                return Err(fail(action, "rover is not equipped for soil analysis"));
            }
            if s_store.rover_id != rover {
                return Err(fail(action, "store is not owned by this rover"));
            }
            if s_store.is_full {
                return Err(fail(action, "store is full"));
            }
            if !goal.soil(waypoint) {
                return Err(fail(action, "no outstanding soil goal at this waypoint"));
            }
            if w.communicated_soil {
                return Err(fail(action, "soil data already communicated"));
            }
            let mut s = state.clone();
            s.stores[store.index()].is_full = true;
            s.rovers[rover.index()].has_soil_analysis.insert(waypoint.index());
            s.waypoints[waypoint.index()].has_soil_sample = false;
            s.rovers[rover.index()].energy -= 3;
            Ok((s, 3))
        }
        Action::SampleRock { rover, store, waypoint } => {
            let r = state.rover(rover);
            let w = state.waypoint(waypoint);
            let s_store = state.store(store);
            if r.position != waypoint {
                return Err(fail(action, "rover is not at the sample waypoint"));
            }
            if r.energy < 5 {
                return Err(fail(action, "insufficient energy"));
            }
            if !w.has_rock_sample {
                return Err(fail(action, "no rock sample at this waypoint"));
            }
            if !r.equipped_rock {
                return Err(fail(action, "rover is not equipped for rock analysis"));
            }
            if s_store.rover_id != rover {
                return Err(fail(action, "store is not owned by this rover"));
            }
            if s_store.is_full {
                return Err(fail(action, "store is full"));
            }
            if !goal.rock(waypoint) {
                return Err(fail(action, "no outstanding rock goal at this waypoint"));
            }
            if w.communicated_rock {
                return Err(fail(action, "rock data already communicated"));
            }
            let mut s = state.clone();
            s.stores[store.index()].is_full = true;
            s.rovers[rover.index()].has_rock_analysis.insert(waypoint.index());
            s.waypoints[waypoint.index()].has_rock_sample = false;
            s.rovers[rover.index()].energy -= 5;
            Ok((s, 5))
        }
        Action::Drop { rover, store } => {
            let s_store = state.store(store);
            if s_store.rover_id != rover {
                return Err(fail(action, "store is not owned by this rover"));
            }
            if !s_store.is_full {
                return Err(fail(action, "store is already empty"));
            }
            let mut s = state.clone();
            s.stores[store.index()].is_full = false;
            Ok((s, 0))
        }
        Action::Calibrate {
            rover,
            camera,
            objective,
            waypoint,
        } => {
            let r = state.rover(rover);
            let cam = state.camera(camera);
            if !r.equipped_imaging {
                return Err(fail(action, "rover is not equipped for imaging"));
            }
            if r.energy < 2 {
                return Err(fail(action, "insufficient energy"));
            }
            if !cam.targets(objective) {
                return Err(fail(action, "camera does not calibrate against this objective"));
            }
            if r.position != waypoint {
                return Err(fail(action, "rover is not at the calibration waypoint"));
            }
            if !state.objective(objective).visible_from(waypoint) {
                return Err(fail(action, "objective is not visible from this waypoint"));
            }
            if cam.rover_id != rover {
                return Err(fail(action, "camera is not mounted on this rover"));
            }
            let mut s = state.clone();
            s.cameras[camera.index()].calibrated = true;
            s.rovers[rover.index()].energy -= 2;
            Ok((s, 2))
        }
        Action::TakeImage {
            rover,
            waypoint,
            objective,
            camera,
            mode,
        } => {
            let r = state.rover(rover);
            let cam = state.camera(camera);
            if !cam.calibrated {
                return Err(fail(action, "camera is not calibrated"));
            }
            if cam.rover_id != rover {
                return Err(fail(action, "camera is not mounted on this rover"));
            }
            if !r.equipped_imaging {
                return Err(fail(action, "rover is not equipped for imaging"));
            }
            if !cam.supports(mode) {
                return Err(fail(action, "camera does not support this mode"));
            }
            if !state.objective(objective).visible_from(waypoint) {
                return Err(fail(action, "objective is not visible from this waypoint"));
            }
            if r.position != waypoint {
                return Err(fail(action, "rover is not at the imaging waypoint"));
            }
            if r.energy < 1 {
                return Err(fail(action, "insufficient energy"));
            }
            if !goal.image(objective, mode) {
                return Err(fail(action, "no outstanding image goal for this objective/mode"));
            }
            if state.objective(objective).communicated_image(mode) {
                return Err(fail(action, "image already communicated"));
            }
            let mut s = state.clone();
            s.rovers[rover.index()].have_image.insert(image_index(objective, mode));
            s.cameras[camera.index()].calibrated = false;
            s.rovers[rover.index()].energy -= 1;
            Ok((s, 1))
        }
        Action::CommunicateSoil {
            rover,
            sample_waypoint,
            rover_waypoint,
            lander_waypoint,
        } => {
            let r = state.rover(rover);
            let lander = state.lander();
            if r.position != rover_waypoint {
                return Err(fail(action, "rover is not at the given rover waypoint"));
            }
            if lander.position != lander_waypoint {
                return Err(fail(action, "lander is not at the given lander waypoint"));
            }
            if !r.has_soil_analysis(sample_waypoint) {
                return Err(fail(action, "rover does not hold this soil analysis"));
            }
            if !state.waypoint(rover_waypoint).sees(lander_waypoint) {
                return Err(fail(action, "lander is not visible from the rover waypoint"));
            }
            if !r.available {
                return Err(fail(action, "rover not available"));
            }
            if !lander.channel_free {
                return Err(fail(action, "communication channel is busy"));
            }
            if r.energy < 4 {
                return Err(fail(action, "insufficient energy"));
            }
            if !goal.soil(sample_waypoint) {
                return Err(fail(action, "no outstanding soil goal at this waypoint"));
            }
            if state.waypoint(sample_waypoint).communicated_soil {
                return Err(fail(action, "soil data already communicated"));
            }
            let mut s = state.clone();
            s.waypoints[sample_waypoint.index()].communicated_soil = true;
            s.rovers[rover.index()].energy -= 4;
            Ok((s, 4))
        }
        Action::CommunicateRock {
            rover,
            sample_waypoint,
            rover_waypoint,
            lander_waypoint,
        } => {
            let r = state.rover(rover);
            let lander = state.lander();
            if r.position != rover_waypoint {
                return Err(fail(action, "rover is not at the given rover waypoint"));
            }
            if lander.position != lander_waypoint {
                return Err(fail(action, "lander is not at the given lander waypoint"));
            }
            if !r.has_rock_analysis(sample_waypoint) {
                return Err(fail(action, "rover does not hold this rock analysis"));
            }
            if !state.waypoint(rover_waypoint).sees(lander_waypoint) {
                return Err(fail(action, "lander is not visible from the rover waypoint"));
            }
            if !r.available {
                return Err(fail(action, "rover not available"));
            }
            if !lander.channel_free {
                return Err(fail(action, "communication channel is busy"));
            }
            if r.energy < 4 {
                return Err(fail(action, "insufficient energy"));
            }
            if !goal.rock(sample_waypoint) {
                return Err(fail(action, "no outstanding rock goal at this waypoint"));
            }
            if state.waypoint(sample_waypoint).communicated_rock {
                return Err(fail(action, "rock data already communicated"));
            }
            let mut s = state.clone();
            s.waypoints[sample_waypoint.index()].communicated_rock = true;
            s.rovers[rover.index()].energy -= 4;
            Ok((s, 4))
        }
        Action::CommunicateImage {
            rover,
            objective,
            mode,
            rover_waypoint,
            lander_waypoint,
        } => {
            let r = state.rover(rover);
            let lander = state.lander();
            if !r.have_image(objective, mode) {
                return Err(fail(action, "rover does not hold this image"));
            }
            if r.position != rover_waypoint {
                return Err(fail(action, "rover is not at the given rover waypoint"));
            }
            if lander.position != lander_waypoint {
                return Err(fail(action, "lander is not at the given lander waypoint"));
            }
            if !state.waypoint(rover_waypoint).sees(lander_waypoint) {
                return Err(fail(action, "lander is not visible from the rover waypoint"));
            }
            if !r.available {
                return Err(fail(action, "rover not available"));
            }
            if !lander.channel_free {
                return Err(fail(action, "communication channel is busy"));
            }
            if r.energy < 6 {
                return Err(fail(action, "insufficient energy"));
            }
            if !goal.image(objective, mode) {
                return Err(fail(action, "no outstanding image goal for this objective/mode"));
            }
            if state.objective(objective).communicated_image(mode) {
                return Err(fail(action, "image already communicated"));
            }
            let mut s = state.clone();
            s.objectives[objective.index()].communicated_image[mode.index()] = true;
            s.rovers[rover.index()].energy -= 6;
            Ok((s, 6))
        }
    }
}

fn image_index(obj: ObjectiveId, mode: Mode) -> usize {
    obj.index() * crate::limits::MAX_MODES + mode.index()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::two_waypoint_problem;

    #[test]
    fn navigate_requires_energy() {
        let (mut state, goal) = two_waypoint_problem();
        state.rovers[0].energy = 4;
        let action = Action::Navigate {
            rover: RoverId::new(0),
            from: WaypointId::new(0),
            to: WaypointId::new(1),
        };
        assert!(apply(&state, &goal, action).is_err());
    }

    #[test]
    fn navigate_moves_and_spends_energy() {
        let (state, goal) = two_waypoint_problem();
        let action = Action::Navigate {
            rover: RoverId::new(0),
            from: WaypointId::new(0),
            to: WaypointId::new(1),
        };
        let (next, spent) = apply(&state, &goal, action).unwrap();
        assert_eq!(spent, 8);
        assert_eq!(next.rover(RoverId::new(0)).position(), WaypointId::new(1));
        assert_eq!(next.rover(RoverId::new(0)).energy(), state.rover(RoverId::new(0)).energy() - 8);
    }

    #[test]
    fn recharge_requires_sun_and_deficit() {
        let (mut state, goal) = two_waypoint_problem();
        state.rovers[0].energy = 20;
        let action = Action::Recharge {
            rover: RoverId::new(0),
            waypoint: WaypointId::new(0),
        };
        assert!(apply(&state, &goal, action).is_err());
    }

    #[test]
    fn recharge_restores_energy_and_counts() {
        let (mut state, goal) = two_waypoint_problem();
        state.rovers[0].energy = 2;
        let action = Action::Recharge {
            rover: RoverId::new(0),
            waypoint: WaypointId::new(0),
        };
        let (next, spent) = apply(&state, &goal, action).unwrap();
        assert_eq!(spent, 0);
        assert_eq!(next.rover(RoverId::new(0)).energy(), 22);
        assert_eq!(next.recharges(), 1);
    }

    #[test]
    fn drop_requires_full_store() {
        let (state, goal) = two_waypoint_problem();
        let action = Action::Drop {
            rover: RoverId::new(0),
            store: StoreId::new(0),
        };
        assert!(apply(&state, &goal, action).is_err());
    }
}
