//! Lossy canonical state encoding used for duplicate detection. Two states
//! with the same fingerprint are treated as equal by the search, even if
//! they differ in fields the fingerprint does not pack.

use std::collections::HashSet;

use rover_core::{Mode, State};

/// The packed fingerprint of a state: rover positions, rover energies,
/// combined soil/rock analysis bitmaps, combined have-image bitmaps,
/// per-waypoint sample/communicated bitmaps, camera calibration bitmap,
/// store-full bitmap, objective communicated-image bitmap (collapsed over
/// modes), and `recharges`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Fingerprint(Vec<u8>);

impl Fingerprint {
    pub fn compute(state: &State) -> Self {
        let mut buf = Vec::new();

        for rover in state.rover_ids() {
            buf.push(state.rover(rover).position().index() as u8);
        }
        for rover in state.rover_ids() {
            buf.extend_from_slice(&state.rover(rover).energy().to_le_bytes());
        }
        for w in state.waypoint_ids() {
            let mut byte = 0u8;
            for rover in state.rover_ids() {
                if state.rover(rover).has_soil_analysis(w) {
                    byte |= 1 << (rover.index() % 8);
                }
            }
            buf.push(byte);
        }
        for w in state.waypoint_ids() {
            let mut byte = 0u8;
            for rover in state.rover_ids() {
                if state.rover(rover).has_rock_analysis(w) {
                    byte |= 1 << (rover.index() % 8);
                }
            }
            buf.push(byte);
        }
        for obj in state.objective_ids() {
            for &mode in Mode::ALL.iter() {
                let mut byte = 0u8;
                for rover in state.rover_ids() {
                    if state.rover(rover).have_image(obj, mode) {
                        byte |= 1 << (rover.index() % 8);
                    }
                }
                buf.push(byte);
            }
        }
        for w in state.waypoint_ids() {
            let wp = state.waypoint(w);
            let mut byte = 0u8;
            byte |= (wp.has_soil_sample() as u8) << 0;
            byte |= (wp.has_rock_sample() as u8) << 1;
            byte |= (wp.communicated_soil() as u8) << 2;
            byte |= (wp.communicated_rock() as u8) << 3;
            buf.push(byte);
        }
        for cam in state.camera_ids() {
            buf.push(state.camera(cam).calibrated() as u8);
        }
        for store in state.store_ids() {
            buf.push(state.store(store).is_full() as u8);
        }
        for obj in state.objective_ids() {
            let mut byte = 0u8;
            for (i, &mode) in Mode::ALL.iter().enumerate() {
                if state.objective(obj).communicated_image(mode) {
                    byte |= 1 << i;
                }
            }
            buf.push(byte);
        }
        buf.extend_from_slice(&state.recharges().to_le_bytes());

        Fingerprint(buf)
    }
}

/// Exact-membership duplicate detector over fingerprints.
#[derive(Default)]
pub struct ClosedSet {
    seen: HashSet<Fingerprint>,
}

impl ClosedSet {
    pub fn new() -> Self {
        ClosedSet { seen: HashSet::new() }
    }

    /// Inserts the state's fingerprint, returning `true` if it was not
    /// already present.
    pub fn insert(&mut self, state: &State) -> bool {
        self.seen.insert(Fingerprint::compute(state))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::linear_three_waypoints;

    #[test]
    fn identical_states_share_a_fingerprint() {
        let (state, _) = linear_three_waypoints();
        assert_eq!(Fingerprint::compute(&state), Fingerprint::compute(&state.clone()));
    }

    #[test]
    fn closed_set_rejects_duplicates() {
        let (state, _) = linear_three_waypoints();
        let mut closed = ClosedSet::new();
        assert!(closed.insert(&state));
        assert!(!closed.insert(&state));
        assert_eq!(closed.len(), 1);
    }

    #[test]
    fn distinguishes_states_with_different_recharges() {
        let (_, goal) = linear_three_waypoints();
        let mut closed = ClosedSet::new();

        let mut b = rover_core::StateBuilder::new(1, 3, 0, 1, 0);
        let rover = rover_core::RoverId::new(0);
        let w0 = rover_core::WaypointId::new(0);
        b.set_rover_position(rover, w0).set_rover_energy(rover, 2).set_in_sun(w0);
        let depleted = b.build();

        let action = rover_core::Action::Recharge { rover, waypoint: w0 };
        let (recharged, _) = rover_core::apply(&depleted, &goal, action).unwrap();

        assert!(closed.insert(&depleted));
        assert!(closed.insert(&recharged));
        assert_eq!(closed.len(), 2);
    }
}
