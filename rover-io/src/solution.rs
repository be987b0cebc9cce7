//! Reads back a solution file written by [`crate::writer`], for the
//! verifier. The action count is derived from the total line count minus
//! the two header lines `writer::render` always emits, not from the
//! `Solution length:` header field, so a hand-edited or truncated header
//! can't desynchronize the verifier from the actual action lines.

use rover_core::{Action, CameraId, Mode, ObjectiveId, RoverId, StoreId, WaypointId};
use thiserror::Error;

use crate::parser::trailing_index;

#[derive(Error, Debug)]
pub enum SolutionParseError {
    #[error("{file}:{line}: {message}")]
    Syntax { file: String, line: usize, message: String },
}

pub struct ParsedSolution {
    pub total_recharges: u32,
    pub actions: Vec<Action>,
}

pub fn parse_solution(file: &str, text: &str) -> Result<ParsedSolution, SolutionParseError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 2 {
        return Err(syntax(file, lines.len(), "solution file is missing its two header lines"));
    }

    let total_recharges = lines[1]
        .strip_prefix("Total recharges uses: ")
        .ok_or_else(|| syntax(file, 2, "expected 'Total recharges uses: <K>'"))?
        .trim()
        .parse::<u32>()
        .map_err(|_| syntax(file, 2, "recharge count is not an integer"))?;

    let mut actions = Vec::with_capacity(lines.len() - 2);
    for (i, line) in lines[2..].iter().enumerate() {
        let lineno = i + 3;
        if line.trim().is_empty() {
            continue;
        }
        actions.push(parse_action_line(file, lineno, line)?);
    }

    Ok(ParsedSolution { total_recharges, actions })
}

fn parse_action_line(file: &str, lineno: usize, line: &str) -> Result<Action, SolutionParseError> {
    let close = line
        .rfind(')')
        .ok_or_else(|| syntax(file, lineno, "action line is missing a closing parenthesis"))?;
    let body = line[..close].trim_start_matches('(').trim();
    let mut tokens = body.split_whitespace();
    let name = tokens.next().ok_or_else(|| syntax(file, lineno, "empty action line"))?;
    let args: Vec<&str> = tokens.collect();

    let rover = |i: usize| id::<RoverId>(file, lineno, &args, i, RoverId::new);
    let waypoint = |i: usize| id::<WaypointId>(file, lineno, &args, i, WaypointId::new);
    let store = |i: usize| id::<StoreId>(file, lineno, &args, i, StoreId::new);
    let camera = |i: usize| id::<CameraId>(file, lineno, &args, i, CameraId::new);
    let objective = |i: usize| id::<ObjectiveId>(file, lineno, &args, i, ObjectiveId::new);
    let mode = |i: usize| {
        args.get(i)
            .and_then(|t| Mode::from_name(t))
            .ok_or_else(|| syntax(file, lineno, "expected a mode name"))
    };

    match name {
        "navigate" => Ok(Action::Navigate {
            rover: rover(0)?,
            from: waypoint(1)?,
            to: waypoint(2)?,
        }),
        "recharge" => Ok(Action::Recharge {
            rover: rover(0)?,
            waypoint: waypoint(1)?,
        }),
        "sample_soil" => Ok(Action::SampleSoil {
            rover: rover(0)?,
            store: store(1)?,
            waypoint: waypoint(2)?,
        }),
        "sample_rock" => Ok(Action::SampleRock {
            rover: rover(0)?,
            store: store(1)?,
            waypoint: waypoint(2)?,
        }),
        "drop" => Ok(Action::Drop { rover: rover(0)?, store: store(1)? }),
        "calibrate" => Ok(Action::Calibrate {
            rover: rover(0)?,
            camera: camera(1)?,
            objective: objective(2)?,
            waypoint: waypoint(3)?,
        }),
        "take_image" => Ok(Action::TakeImage {
            rover: rover(0)?,
            waypoint: waypoint(1)?,
            objective: objective(2)?,
            camera: camera(3)?,
            mode: mode(4)?,
        }),
        "communicate_soil_data" => Ok(Action::CommunicateSoil {
            rover: rover(0)?,
            sample_waypoint: waypoint(1)?,
            rover_waypoint: waypoint(2)?,
            lander_waypoint: waypoint(3)?,
        }),
        "communicate_rock_data" => Ok(Action::CommunicateRock {
            rover: rover(0)?,
            sample_waypoint: waypoint(1)?,
            rover_waypoint: waypoint(2)?,
            lander_waypoint: waypoint(3)?,
        }),
        "communicate_image_data" => Ok(Action::CommunicateImage {
            rover: rover(0)?,
            objective: objective(1)?,
            mode: mode(2)?,
            rover_waypoint: waypoint(3)?,
            lander_waypoint: waypoint(4)?,
        }),
        other => Err(syntax(file, lineno, &format!("unknown action name '{other}'"))),
    }
}

fn id<T>(file: &str, lineno: usize, args: &[&str], i: usize, make: impl Fn(usize) -> T) -> Result<T, SolutionParseError> {
    let token = args.get(i).ok_or_else(|| syntax(file, lineno, "missing action argument"))?;
    trailing_index(token)
        .map(make)
        .ok_or_else(|| syntax(file, lineno, &format!("expected an indexed object name, found '{token}'")))
}

fn syntax(file: &str, line: usize, message: &str) -> SolutionParseError {
    SolutionParseError::Syntax {
        file: file.to_string(),
        line,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_rendered_plan() {
        let steps = vec![rover_search::PlanStep {
            action: Action::Navigate {
                rover: RoverId::new(0),
                from: WaypointId::new(0),
                to: WaypointId::new(1),
            },
            h: 7,
            f: 15,
        }];
        let text = crate::writer::render(&steps, 0);
        let parsed = parse_solution("plan.sol", &text).unwrap();
        assert_eq!(parsed.actions.len(), 1);
        assert_eq!(parsed.total_recharges, 0);
        assert!(matches!(parsed.actions[0], Action::Navigate { .. }));
    }
}
