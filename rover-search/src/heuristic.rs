//! Admissible heuristic estimator: per-goal relaxed costs, a greedy
//! one-task-per-rover assignment, and a recharge lower bound.

use rover_core::{Mode, ObjectiveId, RoverId, State, WaypointId};

use crate::distance::{DistanceTable, UNREACHABLE};

pub type Cost = u32;
pub const INFINITY: Cost = UNREACHABLE;

const SAMPLE_SOIL_COST: Cost = 3;
const SAMPLE_ROCK_COST: Cost = 5;
const COMM_SOIL_COST: Cost = 4;
const COMM_ROCK_COST: Cost = 4;
const COMM_IMAGE_COST: Cost = 6;
const CALIBRATE_COST: Cost = 2;
const TAKE_IMAGE_COST: Cost = 1;

#[derive(Clone, Copy, Debug)]
enum Goal {
    Soil(WaypointId),
    Rock(WaypointId),
    Image(ObjectiveId, Mode),
}

/// Computes the admissible lower bound `h(state)` on the additional energy
/// needed to reach `goal`. Returns `0` if `state` is already a goal state
/// and `INFINITY` if no assignment of rovers to outstanding goals exists.
pub fn estimate(state: &State, goal: &rover_core::Goal, dist: &DistanceTable) -> Cost {
    if state.is_goal(goal) {
        return 0;
    }

    let outstanding = outstanding_goals(state, goal);
    if outstanding.is_empty() {
        return 0;
    }

    // step 1: per-goal relaxed cost for every (goal, rover) pair. A goal with
    // no finite cost for any rover can never be satisfied from this state,
    // so the true remaining cost is infinite and returning infinity here is
    // not an overestimate.
    let mut candidates: Vec<(Cost, RoverId)> = Vec::new();
    for g in &outstanding {
        let mut reachable_by_any = false;
        for rover in state.rover_ids() {
            let c = relaxed_cost(state, dist, rover, *g);
            if c < INFINITY {
                candidates.push((c, rover));
                reachable_by_any = true;
            }
        }
        if !reachable_by_any {
            return INFINITY;
        }
    }

    // step 2: greedy one-task-per-rover assignment, most expensive first.
    // Walks every candidate, not just the first `outstanding.len()` rovers
    // claimed: with more rovers than outstanding goals, later candidates
    // still bind an as-yet-unused rover to its best remaining task and add
    // to the lower bound.
    candidates.sort_by(|a, b| b.0.cmp(&a.0));
    let mut used = vec![false; state.num_rovers()];
    let mut assigned: Vec<(RoverId, Cost)> = Vec::new();
    for (cost, rover) in candidates {
        if used[rover.index()] {
            continue;
        }
        used[rover.index()] = true;
        assigned.push((rover, cost));
    }

    let h_tasks: Cost = assigned.iter().fold(0u32, |acc, &(_, c)| acc.saturating_add(c));

    // step 3: recharge lower bound
    let mut h_energy: Cost = 0;
    for &(rover, assigned_cost) in &assigned {
        let energy = state.rover(rover).energy();
        if assigned_cost > energy {
            let pos = state.rover(rover).position();
            let nearest_sun = state
                .waypoint_ids()
                .filter(|&w| state.waypoint(w).in_sun())
                .filter(|&w| dist.is_reachable(rover, pos, w))
                .map(|w| dist.dist(rover, pos, w))
                .min();
            match nearest_sun {
                Some(d) => h_energy = h_energy.saturating_add(d),
                None => return INFINITY,
            }
        }
    }

    h_tasks.saturating_add(h_energy)
}

fn outstanding_goals(state: &State, goal: &rover_core::Goal) -> Vec<Goal> {
    let mut out = Vec::new();
    for w in state.waypoint_ids() {
        if goal.soil(w) && !state.waypoint(w).communicated_soil() {
            out.push(Goal::Soil(w));
        }
        if goal.rock(w) && !state.waypoint(w).communicated_rock() {
            out.push(Goal::Rock(w));
        }
    }
    for obj in state.objective_ids() {
        for &mode in Mode::ALL.iter() {
            if goal.image(obj, mode) && !state.objective(obj).communicated_image(mode) {
                out.push(Goal::Image(obj, mode));
            }
        }
    }
    out
}

fn relaxed_cost(state: &State, dist: &DistanceTable, rover: RoverId, goal: Goal) -> Cost {
    let pos = state.rover(rover).position();
    match goal {
        Goal::Soil(w) => {
            let r = state.rover(rover);
            if r.has_soil_analysis(w) {
                comm_leg(state, dist, rover, pos, COMM_SOIL_COST)
            } else if r.equipped_soil() && state.waypoint(w).has_soil_sample() {
                let to_sample = dist.dist(rover, pos, w);
                if to_sample >= INFINITY {
                    return INFINITY;
                }
                let comm = comm_leg(state, dist, rover, w, COMM_SOIL_COST);
                if comm >= INFINITY {
                    return INFINITY;
                }
                to_sample.saturating_add(SAMPLE_SOIL_COST).saturating_add(comm)
            } else {
                INFINITY
            }
        }
        Goal::Rock(w) => {
            let r = state.rover(rover);
            if r.has_rock_analysis(w) {
                comm_leg(state, dist, rover, pos, COMM_ROCK_COST)
            } else if r.equipped_rock() && state.waypoint(w).has_rock_sample() {
                let to_sample = dist.dist(rover, pos, w);
                if to_sample >= INFINITY {
                    return INFINITY;
                }
                let comm = comm_leg(state, dist, rover, w, COMM_ROCK_COST);
                if comm >= INFINITY {
                    return INFINITY;
                }
                to_sample.saturating_add(SAMPLE_ROCK_COST).saturating_add(comm)
            } else {
                INFINITY
            }
        }
        Goal::Image(obj, mode) => {
            let r = state.rover(rover);
            if r.have_image(obj, mode) {
                comm_leg(state, dist, rover, pos, COMM_IMAGE_COST)
            } else if r.equipped_imaging() && state.cameras_of(rover).any(|c| state.camera(c).supports(mode)) {
                state
                    .waypoint_ids()
                    .filter(|&sw| state.objective(obj).visible_from(sw))
                    .filter_map(|sw| {
                        let to_sw = dist.dist(rover, pos, sw);
                        if to_sw >= INFINITY {
                            return None;
                        }
                        let comm = comm_leg(state, dist, rover, sw, COMM_IMAGE_COST);
                        if comm >= INFINITY {
                            return None;
                        }
                        Some(to_sw.saturating_add(CALIBRATE_COST).saturating_add(TAKE_IMAGE_COST).saturating_add(comm))
                    })
                    .min()
                    .unwrap_or(INFINITY)
            } else {
                INFINITY
            }
        }
    }
}

/// Distance from `from` to the nearest waypoint that sees the lander, plus
/// the fixed communicate-action cost. `INFINITY` if no such waypoint is
/// reachable.
fn comm_leg(state: &State, dist: &DistanceTable, rover: RoverId, from: WaypointId, comm_cost: Cost) -> Cost {
    match dist.nearest_comm_point(state, rover, from) {
        Some(cp) => {
            let d = dist.dist(rover, from, cp);
            if d >= INFINITY {
                INFINITY
            } else {
                d.saturating_add(comm_cost)
            }
        }
        None => INFINITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::linear_three_waypoints;

    #[test]
    fn zero_on_goal_state() {
        let (state, goal) = linear_three_waypoints();
        let dist = DistanceTable::compute(&state);
        // no goals set beyond the default fixture's empty goal
        let empty_goal = rover_core::Goal::new(state.num_waypoints(), state.num_objectives());
        assert_eq!(estimate(&state, &empty_goal, &dist), 0);
        let _ = goal;
    }

    #[test]
    fn positive_on_outstanding_goal() {
        let (state, _) = linear_three_waypoints();
        let dist = DistanceTable::compute(&state);
        let mut goal = rover_core::Goal::new(state.num_waypoints(), state.num_objectives());
        goal.set_soil(rover_core::WaypointId::new(1));
        assert!(estimate(&state, &goal, &dist) > 0);
    }

    #[test]
    fn infinity_when_unreachable() {
        let mut b = rover_core::StateBuilder::new(1, 2, 0, 0, 0);
        let rover = rover_core::RoverId::new(0);
        b.set_rover_position(rover, rover_core::WaypointId::new(0)).set_rover_energy(rover, 40);
        let state = b.build();
        let dist = DistanceTable::compute(&state);
        let mut goal = rover_core::Goal::new(2, 0);
        goal.set_soil(rover_core::WaypointId::new(1));
        assert_eq!(estimate(&state, &goal, &dist), INFINITY);
    }
}
