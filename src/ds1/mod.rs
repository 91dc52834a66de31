//! DS1 map stamp decoding
//!
//! # Stream layout
//!
//! All integers are little-endian `i32` unless noted; bracketed fields
//! depend on the version (see [`Capabilities`]).
//!
//! ```text
//!   version, width - 1, height - 1
//!   [act]                      v8+
//!   [substitution type]        v10+
//!   [file count, C strings]    v3+
//!   [8 unused bytes]           v9..=v13
//!   [wall layer count]         v4+
//!   [floor layer count]        v16+
//!   layer stream               u32 per tile per layer, see `layer`
//!   [object table]             v2+
//!   [substitution groups]      v12+ with substitution type 1 or 2
//!   [npc paths]                v14+
//! ```

pub mod header;
pub mod layer;
pub mod object;
pub mod substitution;
pub mod tile;
pub mod version;

use serde::Serialize;
use tracing::debug;

use crate::codec::BinaryReader;
use crate::config::DecodeOptions;
use crate::error::{Error, Result};

pub use header::Header;
pub use layer::LayerStreamType;
pub use object::{Object, Path};
pub use substitution::SubstitutionGroup;
pub use tile::{FloorShadowRecord, SubstitutionRecord, TileRecord, TileType, WallRecord};
pub use version::{Capabilities, Version};

/// A decoded map stamp
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ds1 {
    #[serde(flatten)]
    pub header: Header,
    /// Indexed `[y][x]`
    pub tiles: Vec<Vec<TileRecord>>,
    pub objects: Vec<Object>,
    pub substitution_groups: Vec<SubstitutionGroup>,
}

impl Ds1 {
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with(data, &DecodeOptions::default())
    }

    pub fn parse_with(data: &[u8], opts: &DecodeOptions) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        let header = Header::read(&mut reader, opts)?;
        let caps = header.version.capabilities();

        layer::ensure_stream(&reader, &header, caps)?;
        let layers = layer::layer_sequence(&header, caps);
        let mut tiles = tile::allocate_grid(&header);
        layer::decode_layers(&mut reader, caps, &layers, &mut tiles)?;

        let mut objects = object::read_objects(&mut reader, caps, opts)?;
        let substitution_groups = substitution::read_substitution_groups(&mut reader, &header, caps, opts)?;
        object::read_npc_paths(&mut reader, caps, &mut objects, opts)?;

        debug!(
            layers = layers.len(),
            objects = objects.len(),
            substitution_groups = substitution_groups.len(),
            trailing = reader.remaining(),
            "decoded stamp"
        );

        Ok(Self { header, tiles, objects, substitution_groups })
    }

    pub fn version(&self) -> Version {
        self.header.version
    }

    pub fn capabilities(&self) -> Capabilities {
        self.header.version.capabilities()
    }

    pub fn width(&self) -> usize {
        self.header.width
    }

    pub fn height(&self) -> usize {
        self.header.height
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&TileRecord> {
        self.tiles.get(y)?.get(x)
    }

    /// Objects that received waypoints from the NPC section.
    pub fn npcs(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter().filter(|o| o.paths.is_some())
    }
}

/// Decode a stamp with no allocation ceilings.
pub fn from_bytes(data: &[u8]) -> Result<Ds1> {
    Ds1::parse(data)
}

/// Read an `i32` count, rejecting negatives.
pub(crate) fn read_count(reader: &mut BinaryReader, field: &'static str) -> Result<usize> {
    let value = reader.read_i32_le()?;
    usize::try_from(value).map_err(|_| Error::InvalidCount { field, value: i64::from(value) })
}
