use rover_search::{Cfg, Method, Outcome};

const PROBLEM: &str = "
:objects
rover0 - rover
waypoint0 - waypoint
waypoint1 - waypoint
waypoint2 - waypoint
store0 - store

:init
(at_lander general waypoint2)
(channel_free)
(visible waypoint0 waypoint1)
(visible waypoint1 waypoint0)
(visible waypoint1 waypoint2)
(in rover0 waypoint0)
(available rover0)
(can_traverse rover0 waypoint0 waypoint1)
(can_traverse rover0 waypoint1 waypoint0)
(equipped_for_soil_analysis rover0)
(store_of store0 rover0)
(at_soil_sample waypoint1)
(= (energy rover0) 20)

:goal
(communicated_soil_data waypoint1)
";

#[test]
fn parses_solves_renders_and_verifies_a_full_problem() {
    let problem = rover_io::parse("pipeline.pddl", PROBLEM).unwrap();

    let solution = match rover_search::search(&problem.state, &problem.goal, &Cfg::new(Method::Optimal)) {
        Outcome::Solved(solution) => solution,
        Outcome::NoSolution { reason, .. } => panic!("expected a solution, got {reason:?}"),
    };
    assert_eq!(solution.length, 3);
    assert_eq!(solution.total_energy, 15);

    let rendered = rover_io::render(&solution.steps, solution.total_recharges);
    let mut lines = rendered.lines();
    assert_eq!(lines.next(), Some("Solution length: 3"));
    assert_eq!(lines.next(), Some("Total recharges uses: 0"));
    assert_eq!(lines.count(), 3);

    let parsed_solution = rover_io::parse_solution("pipeline.sol", &rendered).unwrap();
    assert_eq!(parsed_solution.actions.len(), 3);
    assert_eq!(parsed_solution.total_recharges, 0);

    let mut state = problem.state.clone();
    for action in parsed_solution.actions {
        let (next, _) = rover_core::apply(&state, &problem.goal, action).expect("re-simulated action must be applicable");
        state = next;
    }
    assert!(state.is_goal(&problem.goal));
}
