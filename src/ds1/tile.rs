//! Per-tile layer records
//!
//! Wall, floor and shadow words share one packing (bit 0 = LSB):
//!
//! ```text
//!   bits  0-7   prop
//!   bits  8-13  sequence
//!   bits 14-19  unknown1
//!   bits 20-25  style
//!   bits 26-30  unknown2
//!   bit  31     hidden
//! ```
//!
//! A wall's orientation arrives in a separate companion layer:
//! bits 0-7 are the tile type, bits 8-31 are kept as `zero`.

use serde::Serialize;

use super::header::Header;

const PROP_MASK: u32 = 0x0000_00FF;
const SEQUENCE_MASK: u32 = 0x0000_3F00;
const UNKNOWN1_MASK: u32 = 0x000F_C000;
const STYLE_MASK: u32 = 0x03F0_0000;
const UNKNOWN2_MASK: u32 = 0x7C00_0000;
const HIDDEN_MASK: u32 = 0x8000_0000;

const TYPE_MASK: u32 = 0x0000_00FF;
const ZERO_MASK: u32 = 0xFFFF_FF00;

/// Raw orientation/tile type code, not interpreted here
pub type TileType = i32;

/// Fields shared by floor and shadow layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FloorShadowRecord {
    pub prop1: u8,
    pub sequence: u8,
    pub unknown1: u8,
    pub style: u8,
    pub unknown2: u8,
    pub hidden: bool,
}

impl FloorShadowRecord {
    pub fn unpack(bits: u32) -> Self {
        Self {
            prop1: (bits & PROP_MASK) as u8,
            sequence: ((bits & SEQUENCE_MASK) >> 8) as u8,
            unknown1: ((bits & UNKNOWN1_MASK) >> 14) as u8,
            style: ((bits & STYLE_MASK) >> 20) as u8,
            unknown2: ((bits & UNKNOWN2_MASK) >> 26) as u8,
            hidden: bits & HIDDEN_MASK != 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WallRecord {
    pub tile_type: TileType,
    /// Upper 24 bits of the orientation word
    pub zero: u32,
    pub prop1: u8,
    pub sequence: u8,
    pub unknown1: u8,
    pub style: u8,
    pub unknown2: u8,
    pub hidden: bool,
}

impl WallRecord {
    /// Fill the fields carried by a wall layer word.
    pub fn set_bits(&mut self, bits: u32) {
        let f = FloorShadowRecord::unpack(bits);
        self.prop1 = f.prop1;
        self.sequence = f.sequence;
        self.unknown1 = f.unknown1;
        self.style = f.style;
        self.unknown2 = f.unknown2;
        self.hidden = f.hidden;
    }

    /// Fill the fields carried by an orientation layer word.
    pub fn set_orientation(&mut self, bits: u32, remap: bool) {
        let code = (bits & TYPE_MASK) as usize;
        self.tile_type = if remap { remap_direction(code) } else { code as TileType };
        self.zero = (bits & ZERO_MASK) >> 8;
    }
}

/// Orientation codes written by stamps older than v7
pub const DIRECTION_LOOKUP: [TileType; 25] = [
    0x00, 0x01, 0x02, 0x01, 0x02, 0x03, 0x03, 0x05, 0x05, 0x06,
    0x06, 0x07, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E,
    0x0F, 0x10, 0x11, 0x12, 0x14,
];

/// Map a legacy orientation code; codes past the table pass through.
pub fn remap_direction(code: usize) -> TileType {
    DIRECTION_LOOKUP.get(code).copied().unwrap_or(code as TileType)
}

/// Opaque substitution layer word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SubstitutionRecord {
    pub unknown: u32,
}

/// Full layer stack of one grid cell
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TileRecord {
    pub walls: Vec<WallRecord>,
    pub floors: Vec<FloorShadowRecord>,
    pub shadows: Vec<FloorShadowRecord>,
    pub substitutions: Vec<SubstitutionRecord>,
}

impl TileRecord {
    fn with_counts(header: &Header) -> Self {
        Self {
            walls: vec![WallRecord::default(); header.num_walls],
            floors: vec![FloorShadowRecord::default(); header.num_floors],
            shadows: vec![FloorShadowRecord::default(); header.num_shadow_layers],
            substitutions: vec![SubstitutionRecord::default(); header.num_substitution_layers],
        }
    }
}

/// Allocate a `height` x `width` grid with every cell sized to the header's layer counts.
pub fn allocate_grid(header: &Header) -> Vec<Vec<TileRecord>> {
    let cell = TileRecord::with_counts(header);
    (0..header.height)
        .map(|_| vec![cell.clone(); header.width])
        .collect()
}
