//! Problem-file parser.
//!
//! The format is a line-oriented, PDDL-flavoured textual format:
//! `:objects` declares typed entities one per line (`name - type`);
//! `:init` lists parenthesised predicates and `(= (fluent args) value)`
//! assignments; `:goal` lists the communication goal atoms. Object
//! identity is the trailing integer in the object's name.

use std::collections::HashMap;

use rover_core::limits::{MAX_CAMERAS, MAX_OBJECTIVES, MAX_ROVERS, MAX_STORES, MAX_WAYPOINTS};
use rover_core::{CameraId, Goal, Mode, ObjectiveId, RoverId, State, StateBuilder, StoreId, WaypointId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{file}:{line}: {message}")]
    Syntax { file: String, line: usize, message: String },
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("rover position waypoint{0} is out of range")]
    RoverPositionOutOfRange(usize),
    #[error("camera{0} has no calibration target")]
    CameraWithoutTarget(usize),
    #[error("no goal atoms were declared")]
    NoGoals,
    #[error("store{0} is claimed by more than one rover")]
    StoreWithTwoOwners(usize),
    #[error("can_traverse {rover} {from} {to} declared without mutual visibility")]
    TraversalWithoutVisibility { rover: usize, from: usize, to: usize },
}

pub struct Problem {
    pub state: State,
    pub goal: Goal,
}

struct Counts {
    rovers: usize,
    waypoints: usize,
    cameras: usize,
    stores: usize,
    objectives: usize,
}

/// Parses a complete problem file, then runs post-parse validation checks:
/// rover positions in range, cameras own at least one calibration target,
/// a goal section is present, traversal implies mutual visibility, and
/// stores have at most one owner.
pub fn parse(file: &str, text: &str) -> Result<Problem, ParseOrValidationError> {
    let sections = split_sections(file, text)?;
    let counts = count_objects(file, &sections.objects)?;

    let mut builder = StateBuilder::new(counts.rovers, counts.waypoints, counts.cameras, counts.stores, counts.objectives);
    let mut traversals: Vec<(RoverId, WaypointId, WaypointId)> = Vec::new();
    let mut store_owners: HashMap<usize, RoverId> = HashMap::new();

    for (lineno, raw) in sections.init {
        apply_init_fact(file, lineno, &raw, &mut builder, &mut traversals, &mut store_owners)?;
    }

    let state = builder.build();
    let mut goal = Goal::new(counts.waypoints, counts.objectives);
    for (lineno, raw) in sections.goal {
        apply_goal_fact(file, lineno, &raw, &mut goal)?;
    }

    validate(file, &state, &traversals, sections.goal_section_present)?;

    Ok(Problem { state, goal })
}

#[derive(Error, Debug)]
pub enum ParseOrValidationError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

struct Sections {
    objects: Vec<(usize, String)>,
    init: Vec<(usize, String)>,
    goal: Vec<(usize, String)>,
    /// Distinguishes "no `:goal` header at all" (a validation error) from
    /// "a `:goal` header with zero atoms under it" (valid, and yields an
    /// empty plan since the state already satisfies every goal).
    goal_section_present: bool,
}

fn split_sections(file: &str, text: &str) -> Result<Sections, ParseError> {
    let mut objects = Vec::new();
    let mut init = Vec::new();
    let mut goal = Vec::new();
    let mut current: Option<&mut Vec<(usize, String)>> = None;
    let mut goal_section_present = false;

    for (i, raw_line) in text.lines().enumerate() {
        let lineno = i + 1;
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        match line {
            ":objects" => current = Some(&mut objects),
            ":init" => current = Some(&mut init),
            ":goal" => {
                goal_section_present = true;
                current = Some(&mut goal);
            }
            _ => match current.as_deref_mut() {
                Some(bucket) => bucket.push((lineno, line.to_string())),
                None => {
                    return Err(ParseError::Syntax {
                        file: file.to_string(),
                        line: lineno,
                        message: "content before any :objects/:init/:goal section header".to_string(),
                    })
                }
            },
        }
    }

    Ok(Sections {
        objects,
        init,
        goal,
        goal_section_present,
    })
}

fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(i) => &line[..i],
        None => line,
    }
}

fn count_objects(file: &str, lines: &[(usize, String)]) -> Result<Counts, ParseError> {
    let mut counts = Counts {
        rovers: 0,
        waypoints: 0,
        cameras: 0,
        stores: 0,
        objectives: 0,
    };
    for (lineno, line) in lines {
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or_else(|| syntax(file, *lineno, "empty object declaration"))?;
        let dash = parts.next();
        let kind = parts.next();
        if dash != Some("-") || kind.is_none() {
            return Err(syntax(file, *lineno, "expected '<name> - <type>'"));
        }
        let kind = kind.unwrap();
        let index = trailing_index(name).ok_or_else(|| syntax(file, *lineno, "object name has no trailing index"))?;
        let (count, max) = match kind {
            "rover" => (&mut counts.rovers, MAX_ROVERS),
            "waypoint" => (&mut counts.waypoints, MAX_WAYPOINTS),
            "camera" => (&mut counts.cameras, MAX_CAMERAS),
            "store" => (&mut counts.stores, MAX_STORES),
            "objective" => (&mut counts.objectives, MAX_OBJECTIVES),
            "mode" => continue,
            other => return Err(syntax(file, *lineno, &format!("unknown object type '{other}'"))),
        };
        if index + 1 > max {
            return Err(syntax(file, *lineno, &format!("object index {index} exceeds the static limit {max}")));
        }
        *count = (*count).max(index + 1);
    }
    Ok(counts)
}

pub(crate) fn trailing_index(name: &str) -> Option<usize> {
    let digits_start = name.find(|c: char| c.is_ascii_digit())?;
    name[digits_start..].parse::<usize>().ok()
}

fn strip_parens(s: &str) -> &str {
    s.trim_start_matches('(').trim_end_matches(')').trim()
}

fn apply_init_fact(
    file: &str,
    lineno: usize,
    raw: &str,
    b: &mut StateBuilder,
    traversals: &mut Vec<(RoverId, WaypointId, WaypointId)>,
    store_owners: &mut HashMap<usize, RoverId>,
) -> Result<(), ParseOrValidationError> {
    let inner = strip_parens(raw);
    if let Some(rest) = inner.strip_prefix("= ") {
        return apply_fluent(file, lineno, rest, b);
    }
    let mut tokens = inner.split_whitespace();
    let pred = tokens.next().ok_or_else(|| syntax(file, lineno, "empty init fact"))?;
    let args: Vec<&str> = tokens.collect();

    match pred {
        "visible" => {
            let (a, c) = two_waypoints(file, lineno, &args)?;
            b.set_visible(a, c);
        }
        "at_soil_sample" => {
            b.set_soil_sample(one_waypoint(file, lineno, &args)?);
        }
        "at_rock_sample" => {
            b.set_rock_sample(one_waypoint(file, lineno, &args)?);
        }
        "have_soil_analysis" => {
            let (r, w) = rover_and_waypoint(file, lineno, &args)?;
            b.set_has_soil_analysis(r, w);
        }
        "have_rock_analysis" => {
            let (r, w) = rover_and_waypoint(file, lineno, &args)?;
            b.set_has_rock_analysis(r, w);
        }
        "have_image" => {
            let r = rover_id(file, lineno, arg(file, lineno, &args, 0)?)?;
            let o = objective_id(file, lineno, arg(file, lineno, &args, 1)?)?;
            let m = mode(file, lineno, arg(file, lineno, &args, 2)?)?;
            b.set_have_image(r, o, m);
        }
        "in_sun" => {
            b.set_in_sun(one_waypoint(file, lineno, &args)?);
        }
        "at_lander" => {
            let w = args.last().ok_or_else(|| syntax(file, lineno, "at_lander needs a waypoint argument"))?;
            b.set_lander_position(waypoint_id(file, lineno, w)?);
        }
        "channel_free" => { /* the builder's lander starts with a free channel */ }
        "in" => {
            let (r, w) = rover_and_waypoint(file, lineno, &args)?;
            b.set_rover_position(r, w);
        }
        "available" => { /* rovers start available in the builder */ }
        "can_traverse" => {
            let r = rover_id(file, lineno, arg(file, lineno, &args, 0)?)?;
            let from = waypoint_id(file, lineno, arg(file, lineno, &args, 1)?)?;
            let to = waypoint_id(file, lineno, arg(file, lineno, &args, 2)?)?;
            b.set_can_traverse(r, from, to);
            traversals.push((r, from, to));
        }
        "equipped_for_soil_analysis" => {
            b.equip_soil(rover_id(file, lineno, arg(file, lineno, &args, 0)?)?);
        }
        "equipped_for_rock_analysis" => {
            b.equip_rock(rover_id(file, lineno, arg(file, lineno, &args, 0)?)?);
        }
        "equipped_for_imaging" => {
            b.equip_imaging(rover_id(file, lineno, arg(file, lineno, &args, 0)?)?);
        }
        "empty" => { /* stores start empty in the builder */ }
        "store_of" => {
            let s = store_id(file, lineno, arg(file, lineno, &args, 0)?)?;
            let r = rover_id(file, lineno, arg(file, lineno, &args, 1)?)?;
            if let Some(&prior) = store_owners.get(&s.index()) {
                if prior != r {
                    return Err(ValidationError::StoreWithTwoOwners(s.index()).into());
                }
            }
            store_owners.insert(s.index(), r);
            b.set_store_owner(s, r);
        }
        "calibration_target" => {
            let c = camera_id(file, lineno, arg(file, lineno, &args, 0)?)?;
            let o = objective_id(file, lineno, arg(file, lineno, &args, 1)?)?;
            b.add_calibration_target(c, o);
        }
        "on_board" => {
            let c = camera_id(file, lineno, arg(file, lineno, &args, 0)?)?;
            let r = rover_id(file, lineno, arg(file, lineno, &args, 1)?)?;
            b.set_camera_owner(c, r);
        }
        "calibrated" => {
            b.set_camera_calibrated(camera_id(file, lineno, arg(file, lineno, &args, 0)?)?);
        }
        "supports" => {
            let c = camera_id(file, lineno, arg(file, lineno, &args, 0)?)?;
            let m = mode(file, lineno, arg(file, lineno, &args, 1)?)?;
            b.add_supported_mode(c, m);
        }
        "visible_from" => {
            let o = objective_id(file, lineno, arg(file, lineno, &args, 0)?)?;
            let w = waypoint_id(file, lineno, arg(file, lineno, &args, 1)?)?;
            b.add_objective_visibility(o, w);
        }
        other => return Err(syntax(file, lineno, &format!("unknown init predicate '{other}'")).into()),
    }
    Ok(())
}

fn apply_fluent(file: &str, lineno: usize, rest: &str, b: &mut StateBuilder) -> Result<(), ParseOrValidationError> {
    let rest = rest.trim();
    let (head, value) = rest
        .rsplit_once(' ')
        .ok_or_else(|| syntax(file, lineno, "expected '(<fluent> args) value'"))?;
    let head = strip_parens(head);
    let value: u32 = value
        .trim()
        .parse()
        .map_err(|_| syntax(file, lineno, &format!("expected an integer fluent value, found '{value}'")))?;
    let mut tokens = head.split_whitespace();
    let fluent = tokens.next().ok_or_else(|| syntax(file, lineno, "empty fluent name"))?;
    let args: Vec<&str> = tokens.collect();
    match fluent {
        "energy" => {
            b.set_rover_energy(rover_id(file, lineno, arg(file, lineno, &args, 0)?)?, value);
        }
        "recharges" => { /* the builder always starts a fresh run at zero recharges */ }
        other => return Err(syntax(file, lineno, &format!("unknown fluent '{other}'")).into()),
    }
    Ok(())
}

fn apply_goal_fact(file: &str, lineno: usize, raw: &str, goal: &mut Goal) -> Result<(), ParseOrValidationError> {
    let inner = strip_parens(raw);
    let mut tokens = inner.split_whitespace();
    let pred = tokens.next().ok_or_else(|| syntax(file, lineno, "empty goal atom"))?;
    let args: Vec<&str> = tokens.collect();
    match pred {
        "communicated_soil_data" => {
            goal.set_soil(waypoint_id(file, lineno, arg(file, lineno, &args, 0)?)?);
        }
        "communicated_rock_data" => {
            goal.set_rock(waypoint_id(file, lineno, arg(file, lineno, &args, 0)?)?);
        }
        "communicated_image_data" => {
            let o = objective_id(file, lineno, arg(file, lineno, &args, 0)?)?;
            let m = mode(file, lineno, arg(file, lineno, &args, 1)?)?;
            goal.set_image(o, m);
        }
        other => return Err(syntax(file, lineno, &format!("unknown goal atom '{other}'")).into()),
    }
    Ok(())
}

fn validate(
    file: &str,
    state: &State,
    traversals: &[(RoverId, WaypointId, WaypointId)],
    goal_section_present: bool,
) -> Result<(), ParseOrValidationError> {
    let _ = file;
    for rover in state.rover_ids() {
        let pos = state.rover(rover).position();
        if pos.index() >= state.num_waypoints() {
            return Err(ValidationError::RoverPositionOutOfRange(pos.index()).into());
        }
    }
    for camera in state.camera_ids() {
        let has_target = state.objective_ids().any(|o| state.camera(camera).targets(o));
        if !has_target {
            return Err(ValidationError::CameraWithoutTarget(camera.index()).into());
        }
    }
    if !goal_section_present {
        return Err(ValidationError::NoGoals.into());
    }
    for &(rover, from, to) in traversals {
        if !state.waypoint(from).sees(to) {
            return Err(ValidationError::TraversalWithoutVisibility {
                rover: rover.index(),
                from: from.index(),
                to: to.index(),
            }
            .into());
        }
    }
    Ok(())
}

fn syntax(file: &str, line: usize, message: &str) -> ParseError {
    ParseError::Syntax {
        file: file.to_string(),
        line,
        message: message.to_string(),
    }
}

fn arg<'a>(file: &str, lineno: usize, args: &[&'a str], i: usize) -> Result<&'a str, ParseError> {
    args.get(i).copied().ok_or_else(|| syntax(file, lineno, "missing argument"))
}

fn indexed(file: &str, lineno: usize, token: &str, what: &'static str) -> Result<usize, ParseError> {
    trailing_index(token).ok_or_else(|| syntax(file, lineno, &format!("expected a {what} name, found '{token}'")))
}

fn rover_id(file: &str, lineno: usize, token: &str) -> Result<RoverId, ParseError> {
    indexed(file, lineno, token, "rover").map(RoverId::new)
}
fn waypoint_id(file: &str, lineno: usize, token: &str) -> Result<WaypointId, ParseError> {
    indexed(file, lineno, token, "waypoint").map(WaypointId::new)
}
fn camera_id(file: &str, lineno: usize, token: &str) -> Result<CameraId, ParseError> {
    indexed(file, lineno, token, "camera").map(CameraId::new)
}
fn store_id(file: &str, lineno: usize, token: &str) -> Result<StoreId, ParseError> {
    indexed(file, lineno, token, "store").map(StoreId::new)
}
fn objective_id(file: &str, lineno: usize, token: &str) -> Result<ObjectiveId, ParseError> {
    indexed(file, lineno, token, "objective").map(ObjectiveId::new)
}
fn mode(file: &str, lineno: usize, token: &str) -> Result<Mode, ParseError> {
    Mode::from_name(token).ok_or_else(|| syntax(file, lineno, &format!("unknown mode '{token}'")))
}

fn one_waypoint(file: &str, lineno: usize, args: &[&str]) -> Result<WaypointId, ParseError> {
    waypoint_id(file, lineno, arg(file, lineno, args, 0)?)
}
fn two_waypoints(file: &str, lineno: usize, args: &[&str]) -> Result<(WaypointId, WaypointId), ParseError> {
    Ok((waypoint_id(file, lineno, arg(file, lineno, args, 0)?)?, waypoint_id(file, lineno, arg(file, lineno, args, 1)?)?))
}
fn rover_and_waypoint(file: &str, lineno: usize, args: &[&str]) -> Result<(RoverId, WaypointId), ParseError> {
    Ok((rover_id(file, lineno, arg(file, lineno, args, 0)?)?, waypoint_id(file, lineno, arg(file, lineno, args, 1)?)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIVIAL: &str = "
:objects
rover0 - rover
waypoint0 - waypoint

:init
(at_lander general waypoint0)
(channel_free)
(visible waypoint0 waypoint0)
(in rover0 waypoint0)
(available rover0)
(= (energy rover0) 10)

:goal
(communicated_soil_data waypoint0)
";

    #[test]
    fn parses_trivial_problem() {
        let problem = parse("trivial.pddl", TRIVIAL).unwrap();
        assert_eq!(problem.state.num_rovers(), 1);
        assert_eq!(problem.state.num_waypoints(), 1);
        assert_eq!(problem.state.rover(RoverId::new(0)).energy(), 10);
        assert!(problem.goal.soil(WaypointId::new(0)));
    }

    #[test]
    fn rejects_absent_goal_section() {
        let text = TRIVIAL.replace(":goal\n(communicated_soil_data waypoint0)\n", "");
        assert!(parse("no_goal.pddl", &text).is_err());
    }

    #[test]
    fn accepts_empty_goal_section_as_trivial_plan_boundary() {
        let text = TRIVIAL.replace("(communicated_soil_data waypoint0)\n", "");
        let problem = parse("empty_goal.pddl", &text).unwrap();
        assert!(problem.goal.is_empty());
    }

    #[test]
    fn rejects_unknown_predicate() {
        let text = TRIVIAL.replace("(channel_free)", "(mystery_predicate)");
        assert!(parse("bad.pddl", &text).is_err());
    }
}
