//! Layer stream ordering and decoding
//!
//! The tile grids follow the header as a run of whole layers, each layer
//! one `u32` per tile in row-major order. Which layers appear, and in what
//! order, is never written down; it has to be rebuilt from the version and
//! the header's layer counts.

use serde::Serialize;
use tracing::trace;

use super::header::Header;
use super::tile::{FloorShadowRecord, SubstitutionRecord, TileRecord};
use super::version::Capabilities;
use crate::codec::BinaryReader;
use crate::error::{Error, Result};

const LAYER_WORD_LEN: usize = 4;

/// One serialized layer; the index selects the record slot within a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LayerStreamType {
    Wall(usize),
    Orientation(usize),
    Floor(usize),
    Shadow,
    Substitution,
}

const SIMPLE_LAYER_COUNT: usize = 5;

/// Number of layers in the stream, or `None` if that overflows `usize`.
pub fn layer_count(header: &Header, caps: Capabilities) -> Option<usize> {
    if caps.contains(Capabilities::SIMPLE_LAYERS) {
        return Some(SIMPLE_LAYER_COUNT);
    }
    header
        .num_walls
        .checked_mul(2)?
        .checked_add(header.num_floors)?
        .checked_add(usize::from(header.num_shadow_layers > 0))?
        .checked_add(usize::from(header.num_substitution_layers > 0))
}

/// Layers in the order the stamp wrote them.
///
/// Run [`ensure_stream`] first; the counts are only bounded by the buffer.
pub fn layer_sequence(header: &Header, caps: Capabilities) -> Vec<LayerStreamType> {
    use LayerStreamType::*;

    if caps.contains(Capabilities::SIMPLE_LAYERS) {
        return vec![Wall(0), Floor(0), Orientation(0), Substitution, Shadow];
    }

    let mut layers = Vec::with_capacity(layer_count(header, caps).unwrap_or(0));
    // one orientation layer per wall layer, interleaved
    for i in 0..header.num_walls {
        layers.push(Wall(i));
        layers.push(Orientation(i));
    }
    layers.extend((0..header.num_floors).map(Floor));
    if header.num_shadow_layers > 0 {
        layers.push(Shadow);
    }
    if header.num_substitution_layers > 0 {
        layers.push(Substitution);
    }
    layers
}

/// Bytes the layer stream occupies, or `None` if that overflows `usize`.
pub fn stream_len(header: &Header, caps: Capabilities) -> Option<usize> {
    layer_count(header, caps)?
        .checked_mul(header.tile_count()?)?
        .checked_mul(LAYER_WORD_LEN)
}

/// Fail before allocating anything if the buffer cannot hold every layer.
pub fn ensure_stream(reader: &BinaryReader, header: &Header, caps: Capabilities) -> Result<()> {
    match stream_len(header, caps) {
        Some(need) => reader.ensure(need),
        None => Err(Error::UnexpectedEof { need: usize::MAX, have: reader.remaining() }),
    }
}

/// Decode every layer into `tiles`.
///
/// A word whose slot does not exist in the tile (simple-mode stamps declare
/// fewer layers than they write) is read and dropped.
pub fn decode_layers(
    reader: &mut BinaryReader,
    caps: Capabilities,
    layers: &[LayerStreamType],
    tiles: &mut [Vec<TileRecord>],
) -> Result<()> {
    let remap = caps.contains(Capabilities::REMAPPED_DIRECTIONS);

    for &layer in layers {
        trace!(?layer, offset = reader.position(), "decoding layer");
        for row in tiles.iter_mut() {
            for tile in row.iter_mut() {
                let bits = reader.read_u32_le()?;
                apply_word(tile, layer, bits, remap);
            }
        }
    }
    Ok(())
}

fn apply_word(tile: &mut TileRecord, layer: LayerStreamType, bits: u32, remap: bool) {
    match layer {
        LayerStreamType::Wall(i) => {
            if let Some(wall) = tile.walls.get_mut(i) {
                wall.set_bits(bits);
            }
        }
        LayerStreamType::Orientation(i) => {
            if let Some(wall) = tile.walls.get_mut(i) {
                wall.set_orientation(bits, remap);
            }
        }
        LayerStreamType::Floor(i) => {
            if let Some(floor) = tile.floors.get_mut(i) {
                *floor = FloorShadowRecord::unpack(bits);
            }
        }
        LayerStreamType::Shadow => {
            if let Some(shadow) = tile.shadows.first_mut() {
                *shadow = FloorShadowRecord::unpack(bits);
            }
        }
        LayerStreamType::Substitution => {
            if let Some(sub) = tile.substitutions.first_mut() {
                *sub = SubstitutionRecord { unknown: bits };
            }
        }
    }
}
