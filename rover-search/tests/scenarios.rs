use rover_core::{Mode, RoverId, StateBuilder, StoreId, WaypointId};
use rover_search::{search, Cfg, Method, Outcome};

fn solved(state: &rover_core::State, goal: &rover_core::Goal, method: Method) -> rover_search::Solution {
    match search(state, goal, &Cfg::new(method)) {
        Outcome::Solved(solution) => solution,
        Outcome::NoSolution { reason, stats } => {
            panic!("expected a solution, got {reason:?} after {} expansions", stats.nodes_expanded)
        }
    }
}

#[test]
fn trivial_plan_communicates_an_already_held_sample() {
    let r0 = RoverId::new(0);
    let w0 = WaypointId::new(0);

    let mut b = StateBuilder::new(1, 1, 0, 0, 0);
    b.set_rover_position(r0, w0)
        .set_rover_energy(r0, 10)
        .set_visible(w0, w0)
        .set_lander_position(w0)
        .set_has_soil_analysis(r0, w0);
    let mut goal = b.new_goal();
    goal.set_soil(w0);
    let state = b.build();

    let solution = solved(&state, &goal, Method::Optimal);
    assert_eq!(solution.length, 1);
    assert_eq!(solution.total_energy, 4);
    assert_eq!(solution.steps[0].action.name(), "communicate_soil_data");
}

fn navigate_then_sample_problem(rover_energy: u32) -> (rover_core::State, rover_core::Goal) {
    let r0 = RoverId::new(0);
    let w0 = WaypointId::new(0);
    let w1 = WaypointId::new(1);
    let w2 = WaypointId::new(2);
    let s0 = StoreId::new(0);

    let mut b = StateBuilder::new(1, 3, 0, 1, 0);
    b.set_rover_position(r0, w0)
        .set_rover_energy(r0, rover_energy)
        .equip_soil(r0)
        .set_store_owner(s0, r0)
        .set_soil_sample(w1)
        .set_visible(w0, w1)
        .set_visible(w1, w0)
        .set_can_traverse(r0, w0, w1)
        .set_can_traverse(r0, w1, w0)
        .set_visible(w1, w2)
        .set_lander_position(w2)
        .set_in_sun(w0);
    let mut goal = b.new_goal();
    goal.set_soil(w1);
    (b.build(), goal)
}

#[test]
fn navigate_then_sample_then_communicate() {
    let (state, goal) = navigate_then_sample_problem(20);
    let solution = solved(&state, &goal, Method::Optimal);
    assert_eq!(solution.length, 3);
    assert_eq!(solution.total_energy, 15);
    assert_eq!(solution.total_recharges, 0);
    let names: Vec<&str> = solution.steps.iter().map(|s| s.action.name()).collect();
    assert_eq!(names, ["navigate", "sample_soil", "communicate_soil_data"]);
}

#[test]
fn recharge_is_inserted_when_energy_would_otherwise_run_out() {
    // Energy is kept below the recharge threshold (< 8) so the rover must
    // top up at the sunlit starting waypoint before it can afford the
    // navigate/sample/communicate sequence.
    let (state, goal) = navigate_then_sample_problem(7);
    let solution = solved(&state, &goal, Method::Optimal);
    assert_eq!(solution.length, 4);
    assert_eq!(solution.total_energy, 15);
    assert_eq!(solution.total_recharges, 1);
    let names: Vec<&str> = solution.steps.iter().map(|s| s.action.name()).collect();
    assert_eq!(names, ["recharge", "navigate", "sample_soil", "communicate_soil_data"]);
}

#[test]
fn two_rovers_each_solve_their_own_independent_goal() {
    let r0 = RoverId::new(0);
    let r1 = RoverId::new(1);
    let w0 = WaypointId::new(0);
    let w1 = WaypointId::new(1);
    let w2 = WaypointId::new(2);
    let w3 = WaypointId::new(3);
    let w4 = WaypointId::new(4);
    let s0 = StoreId::new(0);
    let s1 = StoreId::new(1);

    let mut b = StateBuilder::new(2, 5, 0, 2, 0);
    b.set_rover_position(r0, w0)
        .set_rover_energy(r0, 20)
        .equip_soil(r0)
        .set_store_owner(s0, r0)
        .set_visible(w0, w1)
        .set_visible(w1, w0)
        .set_can_traverse(r0, w0, w1)
        .set_can_traverse(r0, w1, w0)
        .set_soil_sample(w1)
        .set_visible(w1, w4)
        .set_rover_position(r1, w3)
        .set_rover_energy(r1, 20)
        .equip_soil(r1)
        .set_store_owner(s1, r1)
        .set_visible(w3, w2)
        .set_visible(w2, w3)
        .set_can_traverse(r1, w3, w2)
        .set_can_traverse(r1, w2, w3)
        .set_soil_sample(w2)
        .set_visible(w2, w4)
        .set_lander_position(w4);
    let mut goal = b.new_goal();
    goal.set_soil(w1);
    goal.set_soil(w2);
    let state = b.build();

    let solution = solved(&state, &goal, Method::Optimal);
    assert_eq!(solution.length, 6);
    assert_eq!(solution.total_energy, 30);
}

#[test]
fn image_goal_calibrates_then_takes_and_communicates_the_image() {
    let r0 = RoverId::new(0);
    let w0 = WaypointId::new(0);
    let w1 = WaypointId::new(1);
    let cam0 = rover_core::CameraId::new(0);
    let obj0 = rover_core::ObjectiveId::new(0);

    let mut b = StateBuilder::new(1, 2, 1, 0, 1);
    b.set_rover_position(r0, w0)
        .set_rover_energy(r0, 20)
        .equip_imaging(r0)
        .set_camera_owner(cam0, r0)
        .add_calibration_target(cam0, obj0)
        .add_supported_mode(cam0, Mode::HighRes)
        .add_objective_visibility(obj0, w1)
        .set_visible(w0, w1)
        .set_visible(w1, w0)
        .set_can_traverse(r0, w0, w1)
        .set_can_traverse(r0, w1, w0)
        .set_visible(w1, w1)
        .set_lander_position(w1);
    let mut goal = b.new_goal();
    goal.set_image(obj0, Mode::HighRes);
    let state = b.build();

    let solution = solved(&state, &goal, Method::Optimal);
    assert_eq!(solution.total_energy, 17);
    let names: Vec<&str> = solution.steps.iter().map(|s| s.action.name()).collect();
    assert_eq!(names, ["navigate", "calibrate", "take_image", "communicate_image_data"]);
}

#[test]
fn isolated_rover_with_an_unreachable_goal_reports_no_solution() {
    let r0 = RoverId::new(0);
    let w0 = WaypointId::new(0);
    let w1 = WaypointId::new(1);

    let mut b = StateBuilder::new(1, 2, 0, 0, 0);
    b.set_rover_position(r0, w0).set_rover_energy(r0, 20).set_soil_sample(w1);
    let mut goal = b.new_goal();
    goal.set_soil(w1);
    let state = b.build();

    match search(&state, &goal, &Cfg::new(Method::Optimal)) {
        Outcome::Solved(solution) => panic!("expected no solution, got a {}-step plan", solution.length),
        Outcome::NoSolution { .. } => {}
    }
}

#[test]
fn astar_is_deterministic_across_runs() {
    let (state, goal) = navigate_then_sample_problem(20);
    let first = solved(&state, &goal, Method::Optimal);
    let second = solved(&state, &goal, Method::Optimal);
    let first_names: Vec<&str> = first.steps.iter().map(|s| s.action.name()).collect();
    let second_names: Vec<&str> = second.steps.iter().map(|s| s.action.name()).collect();
    assert_eq!(first_names, second_names);
    assert_eq!(first.total_energy, second.total_energy);
}
