//! Search tree nodes, linked to their parent for plan reconstruction.
//!
//! Parents are kept alive via `Rc` rather than an arena of integer
//! handles: the problem sizes this engine targets (a few hundred
//! thousand nodes at most) make the simpler reference-counted tree the
//! right tradeoff.

use std::rc::Rc;

use rover_core::{Action, State};

use crate::heuristic::Cost;

pub struct SearchNode {
    pub state: State,
    pub parent: Option<Rc<SearchNode>>,
    /// The action applied to `parent.state` to reach `state`. `None` only
    /// for the root.
    pub action: Option<Action>,
    pub g: u32,
    pub depth: u32,
    pub h: Cost,
    pub f: Cost,
}

impl SearchNode {
    pub fn root(state: State, h: Cost, f: Cost) -> Rc<SearchNode> {
        Rc::new(SearchNode {
            state,
            parent: None,
            action: None,
            g: 0,
            depth: 0,
            h,
            f,
        })
    }

    pub fn child(parent: &Rc<SearchNode>, state: State, action: Action, energy_spent: u32, h: Cost, f: Cost) -> Rc<SearchNode> {
        Rc::new(SearchNode {
            state,
            parent: Some(parent.clone()),
            action: Some(action),
            g: parent.g + energy_spent,
            depth: parent.depth + 1,
            h,
            f,
        })
    }

    /// Walks the parent chain and returns the plan from root to this node,
    /// in forward order. Each step carries the `h`/`f` values of the node
    /// that the step produced, for the solution file's `h=.. f=..` suffix.
    pub fn extract_plan(self: &Rc<Self>) -> Vec<PlanStep> {
        let mut steps = Vec::with_capacity(self.depth as usize);
        let mut cur = self.clone();
        while let Some(action) = cur.action {
            steps.push(PlanStep {
                action,
                h: cur.h,
                f: cur.f,
            });
            let parent = cur.parent.clone().expect("a node with an action always has a parent");
            cur = parent;
        }
        steps.reverse();
        steps
    }
}

pub struct PlanStep {
    pub action: Action,
    pub h: Cost,
    pub f: Cost,
}
