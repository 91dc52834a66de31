use serde::Serialize;
use tracing::debug;

use super::header::Header;
use super::read_count;
use super::version::Capabilities;
use crate::codec::BinaryReader;
use crate::config::{check_limit, DecodeOptions};
use crate::error::Result;

const GROUP_RECORD_LEN: usize = 20;
const UNKNOWN_BYTES2_LEN: usize = 4;

/// Rectangle of tiles tied to the substitution layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SubstitutionGroup {
    pub tile_x: i32,
    pub tile_y: i32,
    pub width_in_tiles: i32,
    pub height_in_tiles: i32,
    pub unknown: i32,
}

pub fn read_substitution_groups(
    reader: &mut BinaryReader,
    header: &Header,
    caps: Capabilities,
    opts: &DecodeOptions,
) -> Result<Vec<SubstitutionGroup>> {
    if !caps.contains(Capabilities::SUBSTITUTION_GROUPS) || !header.has_substitutions() {
        return Ok(Vec::new());
    }

    if caps.contains(Capabilities::UNKNOWN_BYTES_2) {
        reader.skip(UNKNOWN_BYTES2_LEN)?;
    }

    let count = read_count(reader, "substitution group count")?;
    check_limit("substitution groups", count, opts.max_substitution_groups)?;

    let mut groups = Vec::with_capacity(count.min(reader.remaining() / GROUP_RECORD_LEN));
    for _ in 0..count {
        groups.push(SubstitutionGroup {
            tile_x: reader.read_i32_le()?,
            tile_y: reader.read_i32_le()?,
            width_in_tiles: reader.read_i32_le()?,
            height_in_tiles: reader.read_i32_le()?,
            unknown: reader.read_i32_le()?,
        });
    }
    debug!(count, "parsed substitution groups");
    Ok(groups)
}
