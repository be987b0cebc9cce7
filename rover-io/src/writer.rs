//! Solution-file writer: two header lines followed by one line per action.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use rover_search::PlanStep;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to write solution file {path}: {source}")]
    Io { path: String, source: std::io::Error },
}

/// Renders a plan into solution-file text: two header lines, then one
/// `( action args... ) h=H f=F` line per step.
pub fn render(steps: &[PlanStep], total_recharges: u32) -> String {
    let mut out = String::new();
    writeln!(out, "Solution length: {}", steps.len()).unwrap();
    writeln!(out, "Total recharges uses: {total_recharges}").unwrap();
    for step in steps {
        writeln!(out, "{} h={} f={}", step.action, step.h, step.f).unwrap();
    }
    out
}

pub fn write_to_file(path: &Path, steps: &[PlanStep], total_recharges: u32) -> Result<(), WriteError> {
    let text = render(steps, total_recharges);
    fs::write(path, text).map_err(|source| WriteError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_core::{Action, RoverId, WaypointId};

    #[test]
    fn renders_header_and_one_line_per_step() {
        let steps = vec![PlanStep {
            action: Action::Navigate {
                rover: RoverId::new(0),
                from: WaypointId::new(0),
                to: WaypointId::new(1),
            },
            h: 7,
            f: 15,
        }];
        let text = render(&steps, 1);
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "Solution length: 1");
        assert_eq!(lines.next().unwrap(), "Total recharges uses: 1");
        assert_eq!(lines.next().unwrap(), "( navigate rover0 waypoint0 waypoint1 ) h=7 f=15");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_plan_renders_only_the_header() {
        let text = render(&[], 0);
        assert_eq!(text, "Solution length: 0\nTotal recharges uses: 0\n");
    }
}
