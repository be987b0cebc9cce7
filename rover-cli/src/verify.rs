//! Plan verification: re-simulate the plan against the problem's initial
//! state and confirm it reaches the goal, in the fold-with-short-circuit
//! style used elsewhere in this codebase's validators.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

pub fn run_verify(problem_path: &Path, solution_path: &Path) -> Result<()> {
    let problem_text = std::fs::read_to_string(problem_path)
        .with_context(|| format!("reading problem file {}", problem_path.display()))?;
    let problem = rover_io::parse(&problem_path.display().to_string(), &problem_text)
        .with_context(|| format!("parsing problem file {}", problem_path.display()))?;

    let solution_text = std::fs::read_to_string(solution_path)
        .with_context(|| format!("reading solution file {}", solution_path.display()))?;
    let solution = rover_io::parse_solution(&solution_path.display().to_string(), &solution_text)
        .with_context(|| format!("parsing solution file {}", solution_path.display()))?;

    let mut state = problem.state;
    let mut total_energy: u32 = 0;
    for (i, &action) in solution.actions.iter().enumerate() {
        // action lines start after the two header lines
        let lineno = i + 3;
        match rover_core::apply(&state, &problem.goal, action) {
            Ok((next, spent)) => {
                state = next;
                total_energy += spent;
            }
            Err(err) => {
                bail!("{}:{}: action not applicable: {}", solution_path.display(), lineno, err);
            }
        }
    }

    if !state.is_goal(&problem.goal) {
        bail!("plan does not reach the goal state after applying all {} actions", solution.actions.len());
    }
    if state.recharges() != solution.total_recharges {
        bail!(
            "solution file reports {} recharges but re-simulation used {}",
            solution.total_recharges,
            state.recharges()
        );
    }

    info!(actions = solution.actions.len(), total_energy, "plan verified");
    println!("OK: {} actions, total_energy={}, recharges={}", solution.actions.len(), total_energy, state.recharges());
    Ok(())
}
