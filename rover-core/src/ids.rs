//! Small `Copy` index newtypes for the domain's entities.
//!
//! The Rover domain's dimensional caps are tiny (at most 30 waypoints),
//! so a `u8` index with zero-cost `From`/`Into<usize>` conversions is
//! enough; there is no need for the interning machinery of a `RefPool`.

use std::fmt;

macro_rules! index_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        pub struct $name(pub u8);

        impl $name {
            pub const fn new(i: usize) -> Self {
                $name(i as u8)
            }

            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<usize> for $name {
            fn from(i: usize) -> Self {
                $name::new(i)
            }
        }

        impl From<$name> for usize {
            fn from(id: $name) -> Self {
                id.index()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", stringify!($name).to_lowercase().trim_end_matches("id"), self.0)
            }
        }
    };
}

index_id!(RoverId, "Identifies a rover by its object index.");
index_id!(WaypointId, "Identifies a waypoint by its object index.");
index_id!(CameraId, "Identifies a camera by its object index.");
index_id!(StoreId, "Identifies a store by its object index.");
index_id!(ObjectiveId, "Identifies an objective by its object index.");

/// The three image modes the domain fixes: colour, high-resolution, low-resolution.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Mode {
    Colour = 0,
    HighRes = 1,
    LowRes = 2,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Colour, Mode::HighRes, Mode::LowRes];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Mode> {
        match i {
            0 => Some(Mode::Colour),
            1 => Some(Mode::HighRes),
            2 => Some(Mode::LowRes),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Colour => "colour",
            Mode::HighRes => "high_res",
            Mode::LowRes => "low_res",
        }
    }

    pub fn from_name(s: &str) -> Option<Mode> {
        match s {
            "colour" => Some(Mode::Colour),
            "high_res" => Some(Mode::HighRes),
            "low_res" => Some(Mode::LowRes),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
