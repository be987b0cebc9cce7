//! Successor generator: for each available rover, candidate actions are
//! enumerated in a fixed order. That order is part of the observable
//! behaviour of the engine since it determines tie-breaking among
//! equal-`f` nodes in the frontier.

use rover_core::{Action, Goal, Mode, State};

/// Candidate actions for `state`, in a fixed enumeration order, across
/// every available rover (rovers visited in increasing `RoverId` order).
pub fn candidates(state: &State, goal: &Goal) -> Vec<Action> {
    let mut out = Vec::new();
    for rover in state.rover_ids() {
        if !state.rover(rover).available() {
            continue;
        }
        let p = state.rover(rover).position();
        let wp = state.waypoint(p);

        // 1. recharge
        if wp.in_sun() && state.rover(rover).energy() < 8 {
            out.push(Action::Recharge { rover, waypoint: p });
        }

        // 2. sample_soil, for each empty store owned by the rover
        if state.rover(rover).equipped_soil()
            && state.rover(rover).energy() >= 3
            && goal.soil(p)
            && !wp.communicated_soil()
            && wp.has_soil_sample()
        {
            for store in state.stores_of(rover) {
                if !state.store(store).is_full() {
                    out.push(Action::SampleSoil { rover, store, waypoint: p });
                }
            }
        }

        // 3. sample_rock, analogously
        if state.rover(rover).equipped_rock()
            && state.rover(rover).energy() >= 5
            && goal.rock(p)
            && !wp.communicated_rock()
            && wp.has_rock_sample()
        {
            for store in state.stores_of(rover) {
                if !state.store(store).is_full() {
                    out.push(Action::SampleRock { rover, store, waypoint: p });
                }
            }
        }

        // 4. calibrate and take_image, across cameras / objectives / modes
        if state.rover(rover).equipped_imaging() {
            for camera in state.cameras_of(rover) {
                let cam = state.camera(camera);
                for objective in state.objective_ids() {
                    if cam.targets(objective)
                        && state.objective(objective).visible_from(p)
                        && state.rover(rover).energy() >= 2
                        && !cam.calibrated()
                    {
                        out.push(Action::Calibrate {
                            rover,
                            camera,
                            objective,
                            waypoint: p,
                        });
                    }
                    if cam.calibrated() && state.objective(objective).visible_from(p) {
                        for &mode in Mode::ALL.iter() {
                            if cam.supports(mode)
                                && state.rover(rover).energy() >= 1
                                && goal.image(objective, mode)
                                && !state.objective(objective).communicated_image(mode)
                            {
                                out.push(Action::TakeImage {
                                    rover,
                                    waypoint: p,
                                    objective,
                                    camera,
                                    mode,
                                });
                            }
                        }
                    }
                }
            }
        }

        // 5. communicate_soil / communicate_rock / communicate_image
        if state.lander().channel_free() && wp.sees(state.lander().position()) && state.rover(rover).energy() >= 4 {
            for w in state.waypoint_ids() {
                if goal.soil(w) && !state.waypoint(w).communicated_soil() && state.rover(rover).has_soil_analysis(w) {
                    out.push(Action::CommunicateSoil {
                        rover,
                        sample_waypoint: w,
                        rover_waypoint: p,
                        lander_waypoint: state.lander().position(),
                    });
                }
                if goal.rock(w) && !state.waypoint(w).communicated_rock() && state.rover(rover).has_rock_analysis(w) {
                    out.push(Action::CommunicateRock {
                        rover,
                        sample_waypoint: w,
                        rover_waypoint: p,
                        lander_waypoint: state.lander().position(),
                    });
                }
            }
        }
        if state.lander().channel_free() && wp.sees(state.lander().position()) && state.rover(rover).energy() >= 6 {
            for objective in state.objective_ids() {
                for &mode in Mode::ALL.iter() {
                    if goal.image(objective, mode)
                        && !state.objective(objective).communicated_image(mode)
                        && state.rover(rover).have_image(objective, mode)
                    {
                        out.push(Action::CommunicateImage {
                            rover,
                            objective,
                            mode,
                            rover_waypoint: p,
                            lander_waypoint: state.lander().position(),
                        });
                    }
                }
            }
        }

        // 6. drop, for each full store owned by the rover
        for store in state.stores_of(rover) {
            if state.store(store).is_full() {
                out.push(Action::Drop { rover, store });
            }
        }

        // 7. navigate, to every waypoint with sufficient energy, visibility and traversal right
        if state.rover(rover).energy() >= 8 {
            for to in state.waypoint_ids() {
                if to != p && wp.sees(to) && state.rover(rover).can_traverse(p, to, state.num_waypoints()) {
                    out.push(Action::Navigate { rover, from: p, to });
                }
            }
        }
    }
    out
}
