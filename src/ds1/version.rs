//! Stamp format revisions
//!
//! Every field after the version word is gated on a threshold of the
//! version number. The thresholds are resolved once into a
//! [`Capabilities`] set which the parsing stages then consult.

use bitflags::bitflags;
use serde::Serialize;

const VERSION_ENCODES_FILES: i32 = 3;
const VERSION_ENCODES_FLOORS: i32 = 4;
/// Below this, a stamp holds exactly one layer of each kind.
const VERSION_SIMPLE_LAYERS_HIGH: i32 = 4;
const VERSION_REMAPS_DIRECTIONS_HIGH: i32 = 7;
const VERSION_ENCODES_ACT: i32 = 8;
const VERSION_UNKNOWN_BYTES1_LOW: i32 = 9;
const VERSION_ENCODES_SUBSTITUTION_LAYERS: i32 = 10;
const VERSION_ENCODES_SUBSTITUTION_GROUPS: i32 = 12;
const VERSION_UNKNOWN_BYTES1_HIGH: i32 = 13;
const VERSION_ENCODES_NPCS: i32 = 14;
const VERSION_ENCODES_NPC_EXTRA_DATA: i32 = 15;
const VERSION_ENCODES_WALLS: i32 = 16;
const VERSION_HAS_UNKNOWN_BYTES2: i32 = 18;
const VERSION_ENCODES_OBJECTS: i32 = 2;

bitflags! {
    /// Format features present in a given revision
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// Header carries the act number
        const ACT = 1 << 0;
        /// Header carries the substitution type
        const SUBSTITUTION_LAYERS = 1 << 1;
        /// Header carries the file reference table
        const FILES = 1 << 2;
        /// 8 unused bytes follow the file table
        const UNKNOWN_BYTES_1 = 1 << 3;
        /// Header carries the wall layer count
        const FLOOR_LAYERS = 1 << 4;
        /// Header carries the floor layer count
        const WALL_LAYERS = 1 << 5;
        const SUBSTITUTION_GROUPS = 1 << 6;
        /// 4 unused bytes precede the substitution groups
        const UNKNOWN_BYTES_2 = 1 << 7;
        /// Fixed five-layer stream
        const SIMPLE_LAYERS = 1 << 8;
        const NPCS = 1 << 9;
        /// Each NPC waypoint carries an action code
        const NPC_EXTRA_DATA = 1 << 10;
        const OBJECTS = 1 << 11;
        /// Orientation codes go through the legacy remap table
        const REMAPPED_DIRECTIONS = 1 << 12;
    }
}

/// Stamp format revision number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Version(pub i32);

impl Version {
    pub fn capabilities(self) -> Capabilities {
        let v = self.0;
        let mut caps = Capabilities::empty();
        caps.set(Capabilities::ACT, v >= VERSION_ENCODES_ACT);
        caps.set(Capabilities::SUBSTITUTION_LAYERS, v >= VERSION_ENCODES_SUBSTITUTION_LAYERS);
        caps.set(Capabilities::FILES, v >= VERSION_ENCODES_FILES);
        caps.set(
            Capabilities::UNKNOWN_BYTES_1,
            (VERSION_UNKNOWN_BYTES1_LOW..=VERSION_UNKNOWN_BYTES1_HIGH).contains(&v),
        );
        caps.set(Capabilities::FLOOR_LAYERS, v >= VERSION_ENCODES_FLOORS);
        caps.set(Capabilities::WALL_LAYERS, v >= VERSION_ENCODES_WALLS);
        caps.set(Capabilities::SUBSTITUTION_GROUPS, v >= VERSION_ENCODES_SUBSTITUTION_GROUPS);
        caps.set(Capabilities::UNKNOWN_BYTES_2, v >= VERSION_HAS_UNKNOWN_BYTES2);
        caps.set(Capabilities::SIMPLE_LAYERS, v < VERSION_SIMPLE_LAYERS_HIGH);
        caps.set(Capabilities::NPCS, v >= VERSION_ENCODES_NPCS);
        caps.set(Capabilities::NPC_EXTRA_DATA, v >= VERSION_ENCODES_NPC_EXTRA_DATA);
        caps.set(Capabilities::OBJECTS, v >= VERSION_ENCODES_OBJECTS);
        caps.set(Capabilities::REMAPPED_DIRECTIONS, v < VERSION_REMAPS_DIRECTIONS_HIGH);
        caps
    }

    pub fn encodes_act(self) -> bool {
        self.capabilities().contains(Capabilities::ACT)
    }

    pub fn encodes_substitution_layers(self) -> bool {
        self.capabilities().contains(Capabilities::SUBSTITUTION_LAYERS)
    }

    pub fn encodes_files(self) -> bool {
        self.capabilities().contains(Capabilities::FILES)
    }

    pub fn has_unknown_bytes1(self) -> bool {
        self.capabilities().contains(Capabilities::UNKNOWN_BYTES_1)
    }

    pub fn encodes_floor_layers(self) -> bool {
        self.capabilities().contains(Capabilities::FLOOR_LAYERS)
    }

    pub fn encodes_wall_layers(self) -> bool {
        self.capabilities().contains(Capabilities::WALL_LAYERS)
    }

    pub fn encodes_substitution_groups(self) -> bool {
        self.capabilities().contains(Capabilities::SUBSTITUTION_GROUPS)
    }

    pub fn has_unknown_bytes2(self) -> bool {
        self.capabilities().contains(Capabilities::UNKNOWN_BYTES_2)
    }

    pub fn encodes_simple_layers(self) -> bool {
        self.capabilities().contains(Capabilities::SIMPLE_LAYERS)
    }

    pub fn encodes_npcs(self) -> bool {
        self.capabilities().contains(Capabilities::NPCS)
    }

    pub fn encodes_npc_extra_data(self) -> bool {
        self.capabilities().contains(Capabilities::NPC_EXTRA_DATA)
    }
}

impl From<i32> for Version {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}
