//! Planner invocation: parse the problem file, run search, and write the
//! solution file.

use std::path::Path;

use anyhow::{bail, Context, Result};
use rover_search::{Cfg, Method, NoSolutionReason, Outcome};
use tracing::info;

pub fn run_planner(method: &str, problem_path: &Path, solution_path: &Path) -> Result<()> {
    let Some(method) = Method::parse(method) else {
        bail!("unknown method '{method}', expected 'best' or 'astar'");
    };

    let problem_text = std::fs::read_to_string(problem_path)
        .with_context(|| format!("reading problem file {}", problem_path.display()))?;
    let problem = rover_io::parse(&problem_path.display().to_string(), &problem_text)
        .with_context(|| format!("parsing problem file {}", problem_path.display()))?;

    let cfg = Cfg::new(method);
    info!(method = ?method, timeout_secs = cfg.timeout.as_secs(), "starting search");
    match rover_search::search(&problem.state, &problem.goal, &cfg) {
        Outcome::Solved(solution) => {
            info!(
                length = solution.length,
                total_energy = solution.total_energy,
                total_recharges = solution.total_recharges,
                nodes_generated = solution.stats.nodes_generated,
                nodes_expanded = solution.stats.nodes_expanded,
                elapsed_ms = solution.stats.elapsed.as_millis() as u64,
                "solution found"
            );
            rover_io::write_to_file(solution_path, &solution.steps, solution.total_recharges)
                .with_context(|| format!("writing solution file {}", solution_path.display()))?;
            println!(
                "solved: length={} total_energy={} total_recharges={}",
                solution.length, solution.total_energy, solution.total_recharges
            );
            Ok(())
        }
        Outcome::NoSolution { reason, stats } => {
            info!(
                nodes_generated = stats.nodes_generated,
                nodes_expanded = stats.nodes_expanded,
                elapsed_ms = stats.elapsed.as_millis() as u64,
                "search ended without a solution"
            );
            match reason {
                NoSolutionReason::Exhausted => bail!("no solution: search space exhausted"),
                NoSolutionReason::Timeout => bail!("no solution: timed out after {:?}", stats.elapsed),
            }
        }
    }
}
