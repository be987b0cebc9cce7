//! In-memory world state for the Rover domain.
//!
//! `State` is cheap to clone (a handful of `FixedBitSet`s and small
//! `Vec`s, a few KB at the dimensional caps) and is cloned on every
//! successful action application rather than undone, the same way a
//! STRIPS state bitset is handled elsewhere in this codebase.

use fixedbitset::FixedBitSet;

use crate::ids::{CameraId, Mode, ObjectiveId, RoverId, StoreId, WaypointId};

#[derive(Clone, Debug)]
pub struct Rover {
    pub(crate) position: WaypointId,
    pub(crate) energy: u32,
    pub(crate) available: bool,
    pub(crate) equipped_soil: bool,
    pub(crate) equipped_rock: bool,
    pub(crate) equipped_imaging: bool,
    /// Indexed by `WaypointId`.
    pub(crate) has_soil_analysis: FixedBitSet,
    /// Indexed by `WaypointId`.
    pub(crate) has_rock_analysis: FixedBitSet,
    /// Indexed by `objective.index() * MAX_MODES + mode.index()`.
    pub(crate) have_image: FixedBitSet,
    /// Immutable after parse. Indexed by `from.index() * num_waypoints + to.index()`.
    pub(crate) can_traverse: FixedBitSet,
}

impl Rover {
    pub fn position(&self) -> WaypointId {
        self.position
    }
    pub fn energy(&self) -> u32 {
        self.energy
    }
    pub fn available(&self) -> bool {
        self.available
    }
    pub fn equipped_soil(&self) -> bool {
        self.equipped_soil
    }
    pub fn equipped_rock(&self) -> bool {
        self.equipped_rock
    }
    pub fn equipped_imaging(&self) -> bool {
        self.equipped_imaging
    }
    pub fn has_soil_analysis(&self, w: WaypointId) -> bool {
        self.has_soil_analysis.contains(w.index())
    }
    pub fn has_rock_analysis(&self, w: WaypointId) -> bool {
        self.has_rock_analysis.contains(w.index())
    }
    pub fn have_image(&self, obj: ObjectiveId, mode: Mode) -> bool {
        self.have_image.contains(image_index(obj, mode))
    }
    pub fn can_traverse(&self, from: WaypointId, to: WaypointId, num_waypoints: usize) -> bool {
        self.can_traverse.contains(from.index() * num_waypoints + to.index())
    }
}

fn image_index(obj: ObjectiveId, mode: Mode) -> usize {
    obj.index() * crate::limits::MAX_MODES + mode.index()
}

#[derive(Clone, Debug)]
pub struct Waypoint {
    pub(crate) has_soil_sample: bool,
    pub(crate) has_rock_sample: bool,
    pub(crate) communicated_soil: bool,
    pub(crate) communicated_rock: bool,
    pub(crate) in_sun: bool,
    /// Immutable after parse. Indexed by `WaypointId`.
    pub(crate) visible_waypoints: FixedBitSet,
}

impl Waypoint {
    pub fn has_soil_sample(&self) -> bool {
        self.has_soil_sample
    }
    pub fn has_rock_sample(&self) -> bool {
        self.has_rock_sample
    }
    pub fn communicated_soil(&self) -> bool {
        self.communicated_soil
    }
    pub fn communicated_rock(&self) -> bool {
        self.communicated_rock
    }
    pub fn in_sun(&self) -> bool {
        self.in_sun
    }
    pub fn sees(&self, other: WaypointId) -> bool {
        self.visible_waypoints.contains(other.index())
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub(crate) calibrated: bool,
    pub(crate) rover_id: RoverId,
    /// Immutable after parse. Indexed by `ObjectiveId`.
    pub(crate) calibration_targets: FixedBitSet,
    /// Immutable after parse.
    pub(crate) modes_supported: [bool; crate::limits::MAX_MODES],
}

impl Camera {
    pub fn calibrated(&self) -> bool {
        self.calibrated
    }
    pub fn rover_id(&self) -> RoverId {
        self.rover_id
    }
    pub fn targets(&self, obj: ObjectiveId) -> bool {
        self.calibration_targets.contains(obj.index())
    }
    pub fn supports(&self, mode: Mode) -> bool {
        self.modes_supported[mode.index()]
    }
}

#[derive(Clone, Debug)]
pub struct Store {
    pub(crate) is_full: bool,
    pub(crate) rover_id: RoverId,
}

impl Store {
    pub fn is_full(&self) -> bool {
        self.is_full
    }
    pub fn rover_id(&self) -> RoverId {
        self.rover_id
    }
}

#[derive(Clone, Debug)]
pub struct Objective {
    /// Indexed by `Mode`.
    pub(crate) communicated_image: [bool; crate::limits::MAX_MODES],
    /// Immutable after parse. Indexed by `WaypointId`.
    pub(crate) visible_waypoints: FixedBitSet,
}

impl Objective {
    pub fn communicated_image(&self, mode: Mode) -> bool {
        self.communicated_image[mode.index()]
    }
    pub fn visible_from(&self, w: WaypointId) -> bool {
        self.visible_waypoints.contains(w.index())
    }
}

#[derive(Clone, Debug)]
pub struct Lander {
    pub(crate) position: WaypointId,
    pub(crate) channel_free: bool,
}

impl Lander {
    pub fn position(&self) -> WaypointId {
        self.position
    }
    pub fn channel_free(&self) -> bool {
        self.channel_free
    }
}

/// The complete world state.
#[derive(Clone, Debug)]
pub struct State {
    pub(crate) rovers: Vec<Rover>,
    pub(crate) waypoints: Vec<Waypoint>,
    pub(crate) cameras: Vec<Camera>,
    pub(crate) stores: Vec<Store>,
    pub(crate) objectives: Vec<Objective>,
    pub(crate) lander: Lander,
    pub(crate) recharges: u32,
}

impl State {
    pub fn num_rovers(&self) -> usize {
        self.rovers.len()
    }
    pub fn num_waypoints(&self) -> usize {
        self.waypoints.len()
    }
    pub fn num_cameras(&self) -> usize {
        self.cameras.len()
    }
    pub fn num_stores(&self) -> usize {
        self.stores.len()
    }
    pub fn num_objectives(&self) -> usize {
        self.objectives.len()
    }

    pub fn rover(&self, id: RoverId) -> &Rover {
        &self.rovers[id.index()]
    }
    pub fn waypoint(&self, id: WaypointId) -> &Waypoint {
        &self.waypoints[id.index()]
    }
    pub fn camera(&self, id: CameraId) -> &Camera {
        &self.cameras[id.index()]
    }
    pub fn store(&self, id: StoreId) -> &Store {
        &self.stores[id.index()]
    }
    pub fn objective(&self, id: ObjectiveId) -> &Objective {
        &self.objectives[id.index()]
    }
    pub fn lander(&self) -> &Lander {
        &self.lander
    }
    pub fn recharges(&self) -> u32 {
        self.recharges
    }

    pub fn rover_ids(&self) -> impl Iterator<Item = RoverId> {
        (0..self.rovers.len()).map(RoverId::new)
    }
    pub fn waypoint_ids(&self) -> impl Iterator<Item = WaypointId> {
        (0..self.waypoints.len()).map(WaypointId::new)
    }
    pub fn camera_ids(&self) -> impl Iterator<Item = CameraId> {
        (0..self.cameras.len()).map(CameraId::new)
    }
    pub fn store_ids(&self) -> impl Iterator<Item = StoreId> {
        (0..self.stores.len()).map(StoreId::new)
    }
    pub fn objective_ids(&self) -> impl Iterator<Item = ObjectiveId> {
        (0..self.objectives.len()).map(ObjectiveId::new)
    }

    /// Cameras owned by a given rover.
    pub fn cameras_of(&self, rover: RoverId) -> impl Iterator<Item = CameraId> + '_ {
        self.camera_ids().filter(move |&c| self.camera(c).rover_id() == rover)
    }
    /// Stores owned by a given rover.
    pub fn stores_of(&self, rover: RoverId) -> impl Iterator<Item = StoreId> + '_ {
        self.store_ids().filter(move |&s| self.store(s).rover_id() == rover)
    }

    pub fn is_goal(&self, goal: &Goal) -> bool {
        self.waypoint_ids().all(|w| !goal.soil(w) || self.waypoint(w).communicated_soil)
            && self.waypoint_ids().all(|w| !goal.rock(w) || self.waypoint(w).communicated_rock)
            && self.objective_ids().all(|o| {
                Mode::ALL
                    .iter()
                    .all(|&m| !goal.image(o, m) || self.objective(o).communicated_image(m))
            })
    }
}

/// The set of communication goals a plan must satisfy; immutable after parse.
#[derive(Clone, Debug)]
pub struct Goal {
    /// Indexed by `WaypointId`.
    pub(crate) communicated_soil: FixedBitSet,
    /// Indexed by `WaypointId`.
    pub(crate) communicated_rock: FixedBitSet,
    /// Indexed by `objective.index() * MAX_MODES + mode.index()`.
    pub(crate) communicated_image: FixedBitSet,
}

impl Goal {
    pub fn new(num_waypoints: usize, num_objectives: usize) -> Self {
        Goal {
            communicated_soil: FixedBitSet::with_capacity(num_waypoints),
            communicated_rock: FixedBitSet::with_capacity(num_waypoints),
            communicated_image: FixedBitSet::with_capacity(num_objectives * crate::limits::MAX_MODES),
        }
    }

    pub fn set_soil(&mut self, w: WaypointId) {
        self.communicated_soil.insert(w.index());
    }
    pub fn set_rock(&mut self, w: WaypointId) {
        self.communicated_rock.insert(w.index());
    }
    pub fn set_image(&mut self, obj: ObjectiveId, mode: Mode) {
        self.communicated_image.insert(image_index(obj, mode));
    }

    pub fn soil(&self, w: WaypointId) -> bool {
        self.communicated_soil.contains(w.index())
    }
    pub fn rock(&self, w: WaypointId) -> bool {
        self.communicated_rock.contains(w.index())
    }
    pub fn image(&self, obj: ObjectiveId, mode: Mode) -> bool {
        self.communicated_image.contains(image_index(obj, mode))
    }

    pub fn is_empty(&self) -> bool {
        self.communicated_soil.count_ones(..) == 0
            && self.communicated_rock.count_ones(..) == 0
            && self.communicated_image.count_ones(..) == 0
    }
}
