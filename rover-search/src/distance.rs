//! Per-rover all-pairs shortest paths over the traversal graph. Built once
//! before search starts and shared by reference across the whole run.

use rover_core::{RoverId, State, WaypointId};

/// Edge weight of a single navigate action.
const NAVIGATE_COST: u32 = 8;

/// Sentinel for "no path exists". Kept far below `u32::MAX` so that adding
/// a few finite costs to it never wraps.
pub const UNREACHABLE: u32 = u32::MAX / 4;

/// `dist[rover][from][to]`, flattened row-major per rover.
pub struct DistanceTable {
    num_waypoints: usize,
    // one flattened `num_waypoints * num_waypoints` matrix per rover
    tables: Vec<Vec<u32>>,
}

impl DistanceTable {
    /// Runs Floyd-Warshall once per rover over the edges the rover can
    /// traverse and see: `u -> v` iff `can_traverse[u][v]` and `v` is
    /// visible from `u`.
    pub fn compute(state: &State) -> Self {
        let n = state.num_waypoints();
        let tables = state
            .rover_ids()
            .map(|rover| floyd_warshall(state, rover, n))
            .collect();
        DistanceTable { num_waypoints: n, tables }
    }

    pub fn dist(&self, rover: RoverId, from: WaypointId, to: WaypointId) -> u32 {
        self.tables[rover.index()][from.index() * self.num_waypoints + to.index()]
    }

    pub fn is_reachable(&self, rover: RoverId, from: WaypointId, to: WaypointId) -> bool {
        self.dist(rover, from, to) < UNREACHABLE
    }

    /// The reachable waypoint (possibly `from` itself) from which the lander
    /// is visible, minimising travel distance for `rover` from `from`.
    pub fn nearest_comm_point(&self, state: &State, rover: RoverId, from: WaypointId) -> Option<WaypointId> {
        let lander_pos = state.lander().position();
        state
            .waypoint_ids()
            .filter(|&w| state.waypoint(w).sees(lander_pos) || w == lander_pos)
            .filter(|&w| self.is_reachable(rover, from, w))
            .min_by_key(|&w| self.dist(rover, from, w))
    }
}

fn floyd_warshall(state: &State, rover: RoverId, n: usize) -> Vec<u32> {
    let mut dist = vec![UNREACHABLE; n * n];
    for i in 0..n {
        dist[i * n + i] = 0;
    }
    let r = state.rover(rover);
    for u in state.waypoint_ids() {
        for v in state.waypoint_ids() {
            if u != v && r.can_traverse(u, v, n) && state.waypoint(u).sees(v) {
                dist[u.index() * n + v.index()] = NAVIGATE_COST;
            }
        }
    }
    for k in 0..n {
        for i in 0..n {
            let d_ik = dist[i * n + k];
            if d_ik >= UNREACHABLE {
                continue;
            }
            for j in 0..n {
                let through = d_ik.saturating_add(dist[k * n + j]);
                if through < dist[i * n + j] {
                    dist[i * n + j] = through;
                }
            }
        }
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::linear_three_waypoints;

    #[test]
    fn direct_edge_has_navigate_cost() {
        let (state, _) = linear_three_waypoints();
        let table = DistanceTable::compute(&state);
        assert_eq!(table.dist(RoverId::new(0), WaypointId::new(0), WaypointId::new(1)), 8);
    }

    #[test]
    fn self_distance_is_zero() {
        let (state, _) = linear_three_waypoints();
        let table = DistanceTable::compute(&state);
        assert_eq!(table.dist(RoverId::new(0), WaypointId::new(0), WaypointId::new(0)), 0);
    }

    #[test]
    fn transitive_hop_is_reachable() {
        let (state, _) = linear_three_waypoints();
        let table = DistanceTable::compute(&state);
        assert_eq!(table.dist(RoverId::new(0), WaypointId::new(0), WaypointId::new(2)), 16);
    }
}
