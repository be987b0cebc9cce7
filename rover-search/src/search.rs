//! Search driver: wires the frontier, closed set, distance oracle,
//! heuristic and successor generator into the main loop.

use std::time::Instant;

use rover_core::{Goal, State};
use tracing::{debug, info, warn};

use crate::config::{Cfg, Method};
use crate::distance::DistanceTable;
use crate::fingerprint::ClosedSet;
use crate::frontier::Frontier;
use crate::heuristic::{self, Cost, INFINITY};
use crate::node::{PlanStep, SearchNode};
use crate::successors;

#[derive(Debug)]
pub struct Stats {
    pub nodes_generated: u64,
    pub nodes_expanded: u64,
    pub closed_size: usize,
    pub elapsed: std::time::Duration,
}

pub struct Solution {
    pub steps: Vec<PlanStep>,
    pub total_energy: u32,
    pub total_recharges: u32,
    pub length: u32,
    pub stats: Stats,
}

#[derive(Debug, Eq, PartialEq)]
pub enum NoSolutionReason {
    /// The frontier emptied without reaching a goal state.
    Exhausted,
    /// The wall-clock budget in `Cfg` elapsed during expansion.
    Timeout,
}

pub enum Outcome {
    Solved(Solution),
    NoSolution { reason: NoSolutionReason, stats: Stats },
}

/// Runs the search to completion (or timeout). Never panics on a
/// well-formed `state`/`goal` pair; a malformed one is a bug in the
/// caller, since validation happens before the engine starts.
pub fn search(state: &State, goal: &Goal, cfg: &Cfg) -> Outcome {
    let start = Instant::now();
    let dist = DistanceTable::compute(state);
    let mut closed = ClosedSet::new();
    let mut frontier = Frontier::new();
    let mut nodes_generated: u64 = 1;
    let mut nodes_expanded: u64 = 0;

    let root_h = heuristic::estimate(state, goal, &dist);
    let root_f = f_value(cfg.method, 0, root_h);
    let root = SearchNode::root(state.clone(), root_h, root_f);
    closed.insert(&root.state);

    if state.is_goal(goal) {
        return Outcome::Solved(finish(&root, start, nodes_generated, nodes_expanded, &closed));
    }
    frontier.push(root_f, root);

    loop {
        let Some(node) = frontier.pop_min() else {
            info!(nodes_generated, nodes_expanded, "frontier exhausted without a solution");
            return Outcome::NoSolution {
                reason: NoSolutionReason::Exhausted,
                stats: stats_of(start, nodes_generated, nodes_expanded, &closed),
            };
        };

        if node.state.is_goal(goal) {
            return Outcome::Solved(finish(&node, start, nodes_generated, nodes_expanded, &closed));
        }

        nodes_expanded += 1;
        if nodes_expanded % cfg.timeout_check_period == 0 && start.elapsed() >= cfg.timeout {
            warn!(nodes_generated, nodes_expanded, "search timed out");
            return Outcome::NoSolution {
                reason: NoSolutionReason::Timeout,
                stats: stats_of(start, nodes_generated, nodes_expanded, &closed),
            };
        }

        for action in successors::candidates(&node.state, goal) {
            let Ok((child_state, energy_spent)) = rover_core::apply(&node.state, goal, action) else {
                continue;
            };
            if !closed.insert(&child_state) {
                continue;
            }
            nodes_generated += 1;
            let h = heuristic::estimate(&child_state, goal, &dist);
            if h >= INFINITY {
                continue;
            }
            let g = node.g + energy_spent;
            let f = f_value(cfg.method, g, h);
            let child = SearchNode::child(&node, child_state, action, energy_spent, h, f);
            frontier.push(f, child);
        }

        debug!(frontier_size = frontier.len(), closed_size = closed.len(), "expanded node");
    }
}

fn f_value(method: Method, g: u32, h: Cost) -> Cost {
    match method {
        Method::Satisficing => h,
        Method::Optimal => (g as Cost).saturating_add(h),
    }
}

fn finish(
    node: &std::rc::Rc<SearchNode>,
    start: Instant,
    nodes_generated: u64,
    nodes_expanded: u64,
    closed: &ClosedSet,
) -> Solution {
    let steps = node.extract_plan();
    Solution {
        length: steps.len() as u32,
        total_energy: node.g,
        total_recharges: node.state.recharges(),
        steps,
        stats: stats_of(start, nodes_generated, nodes_expanded, closed),
    }
}

fn stats_of(start: Instant, nodes_generated: u64, nodes_expanded: u64, closed: &ClosedSet) -> Stats {
    Stats {
        nodes_generated,
        nodes_expanded,
        closed_size: closed.len(),
        elapsed: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::linear_three_waypoints;

    #[test]
    fn empty_goal_solves_immediately() {
        let (state, _) = linear_three_waypoints();
        let goal = Goal::new(state.num_waypoints(), state.num_objectives());
        let cfg = Cfg::new(Method::Satisficing);
        match search(&state, &goal, &cfg) {
            Outcome::Solved(sol) => assert_eq!(sol.length, 0),
            Outcome::NoSolution { .. } => panic!("expected an immediate solution"),
        }
    }

    #[test]
    fn finds_soil_goal_via_navigate_and_sample() {
        let (state, _) = linear_three_waypoints();
        let mut goal = Goal::new(state.num_waypoints(), state.num_objectives());
        goal.set_soil(rover_core::WaypointId::new(1));
        let cfg = Cfg::new(Method::Satisficing);
        match search(&state, &goal, &cfg) {
            Outcome::Solved(sol) => assert!(sol.length > 0),
            Outcome::NoSolution { reason, .. } => panic!("expected a solution, got {:?}", reason),
        }
    }

    #[test]
    fn isolated_rover_reports_no_solution() {
        let mut b = rover_core::StateBuilder::new(1, 2, 0, 0, 0);
        let rover = rover_core::RoverId::new(0);
        b.set_rover_position(rover, rover_core::WaypointId::new(0)).set_rover_energy(rover, 40);
        let state = b.build();
        let mut goal = Goal::new(2, 0);
        goal.set_soil(rover_core::WaypointId::new(1));
        let cfg = Cfg::new(Method::Satisficing);
        match search(&state, &goal, &cfg) {
            Outcome::NoSolution { reason, .. } => assert_eq!(reason, NoSolutionReason::Exhausted),
            Outcome::Solved(_) => panic!("an isolated rover cannot reach the goal"),
        }
    }
}
