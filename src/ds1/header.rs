use serde::Serialize;
use tracing::debug;

use super::read_count;
use super::version::{Capabilities, Version};
use crate::codec::BinaryReader;
use crate::config::{check_limit, DecodeOptions};
use crate::error::{Error, Result};

const UNKNOWN_BYTES1_LEN: usize = 8;

/// Everything that precedes the layer stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub version: Version,
    /// Width in tiles, always the declared value + 1
    pub width: usize,
    /// Height in tiles, always the declared value + 1
    pub height: usize,
    /// Act 1-5, selects the act's object table
    pub act: i32,
    /// 0 when the stamp has no substitution layer, else 1 or 2
    pub substitution_type: i32,
    /// File references; these point at files that no longer exist
    pub files: Vec<String>,
    pub num_walls: usize,
    pub num_floors: usize,
    pub num_shadow_layers: usize,
    pub num_substitution_layers: usize,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            version: Version::default(),
            width: 1,
            height: 1,
            act: 1,
            substitution_type: 0,
            files: Vec::new(),
            num_walls: 0,
            num_floors: 1,
            num_shadow_layers: 1,
            num_substitution_layers: 0,
        }
    }
}

impl Header {
    pub fn read(reader: &mut BinaryReader, opts: &DecodeOptions) -> Result<Self> {
        let version = Version(reader.read_i32_le()?);
        let caps = version.capabilities();
        let mut header = Self { version, ..Self::default() };

        header.width = read_dimension(reader, "width")?;
        header.height = read_dimension(reader, "height")?;
        check_limit("tiles", header.tile_count().unwrap_or(usize::MAX), opts.max_tiles)?;

        if caps.contains(Capabilities::ACT) {
            header.act = reader.read_i32_le()?;
        }

        if caps.contains(Capabilities::SUBSTITUTION_LAYERS) {
            header.substitution_type = reader.read_i32_le()?;
            if header.has_substitutions() {
                header.num_substitution_layers = 1;
            }
        }

        if caps.contains(Capabilities::FILES) {
            let count = read_count(reader, "file count")?;
            check_limit("files", count, opts.max_files)?;
            // every name costs at least its terminator
            let mut files = Vec::with_capacity(count.min(reader.remaining()));
            for _ in 0..count {
                files.push(reader.read_cstring()?);
            }
            header.files = files;
        }

        if caps.contains(Capabilities::UNKNOWN_BYTES_1) {
            reader.skip(UNKNOWN_BYTES1_LEN)?;
        }

        if caps.contains(Capabilities::FLOOR_LAYERS) {
            header.num_walls = read_count(reader, "wall layer count")?;
            check_limit("wall layers", header.num_walls, opts.max_layers)?;
        }

        if caps.contains(Capabilities::WALL_LAYERS) {
            header.num_floors = read_count(reader, "floor layer count")?;
            check_limit("floor layers", header.num_floors, opts.max_layers)?;
        }

        debug!(
            version = header.version.0,
            width = header.width,
            height = header.height,
            act = header.act,
            substitution_type = header.substitution_type,
            files = header.files.len(),
            walls = header.num_walls,
            floors = header.num_floors,
            "parsed stamp header"
        );

        Ok(header)
    }

    pub fn has_substitutions(&self) -> bool {
        matches!(self.substitution_type, 1 | 2)
    }

    /// `width * height`, or `None` if that overflows `usize`.
    pub fn tile_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

/// Dimensions are stored one less than the real tile count.
fn read_dimension(reader: &mut BinaryReader, field: &'static str) -> Result<usize> {
    let declared = reader.read_i32_le()?;
    declared
        .checked_add(1)
        .filter(|_| declared >= 0)
        .and_then(|v| usize::try_from(v).ok())
        .ok_or(Error::InvalidCount { field, value: i64::from(declared) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::BinaryWriter;

    fn parse(data: &[u8]) -> Result<Header> {
        Header::read(&mut BinaryReader::new(data), &DecodeOptions::default())
    }

    #[test]
    fn test_version1_defaults() {
        let mut w = BinaryWriter::new();
        w.write_i32_le(1).write_i32_le(0).write_i32_le(0);
        let header = parse(&w.into_vec()).unwrap();

        assert_eq!(header.width, 1);
        assert_eq!(header.height, 1);
        assert_eq!(header.act, 1);
        assert_eq!(header.substitution_type, 0);
        assert!(header.files.is_empty());
        assert_eq!(header.num_walls, 0);
        assert_eq!(header.num_floors, 1);
        assert_eq!(header.num_shadow_layers, 1);
        assert_eq!(header.num_substitution_layers, 0);
    }

    #[test]
    fn test_dimensions_add_one() {
        for declared in [0, 1, 7, 63] {
            let mut w = BinaryWriter::new();
            w.write_i32_le(1).write_i32_le(declared).write_i32_le(declared * 2);
            let header = parse(&w.into_vec()).unwrap();
            assert_eq!(header.width, declared as usize + 1);
            assert_eq!(header.height, declared as usize * 2 + 1);
        }
    }

    #[test]
    fn test_tile_count_overflow() {
        let header = Header { width: 3, height: 4, ..Header::default() };
        assert_eq!(header.tile_count(), Some(12));
        let header = Header { width: usize::MAX, height: 2, ..Header::default() };
        assert_eq!(header.tile_count(), None);
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let mut w = BinaryWriter::new();
        w.write_i32_le(1).write_i32_le(-4).write_i32_le(0);
        match parse(&w.into_vec()) {
            Err(Error::InvalidCount { field: "width", value: -4 }) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_version13_full_header() {
        let mut w = BinaryWriter::new();
        w.write_i32_le(13)
            .write_i32_le(3)
            .write_i32_le(5)
            .write_i32_le(2) // act
            .write_i32_le(2) // substitution type
            .write_i32_le(2)
            .write_cstring("a.ds1")
            .write_cstring("")
            .write_bytes(&[0xAA; 8])
            .write_i32_le(4);
        let data = w.into_vec();
        let mut reader = BinaryReader::new(&data);
        let header = Header::read(&mut reader, &DecodeOptions::default()).unwrap();

        assert!(reader.is_empty());
        assert_eq!(header.act, 2);
        assert_eq!(header.files, vec!["a.ds1".to_string(), String::new()]);
        assert_eq!(header.num_substitution_layers, 1);
        assert_eq!(header.num_walls, 4);
        // floor count not encoded before v16
        assert_eq!(header.num_floors, 1);
    }

    #[test]
    fn test_version16_reads_floor_count() {
        let mut w = BinaryWriter::new();
        w.write_i32_le(16)
            .write_i32_le(0)
            .write_i32_le(0)
            .write_i32_le(5)
            .write_i32_le(7) // unrecognised substitution type
            .write_i32_le(0)
            .write_i32_le(2)
            .write_i32_le(2);
        let header = parse(&w.into_vec()).unwrap();
        assert_eq!(header.act, 5);
        assert!(!header.has_substitutions());
        assert_eq!(header.num_substitution_layers, 0);
        assert_eq!(header.num_walls, 2);
        assert_eq!(header.num_floors, 2);
    }

    #[test]
    fn test_truncated_header() {
        let mut w = BinaryWriter::new();
        w.write_i32_le(18).write_i32_le(0);
        assert!(matches!(parse(&w.into_vec()), Err(Error::UnexpectedEof { .. })));
        assert!(matches!(parse(&[0x01, 0x00]), Err(Error::UnexpectedEof { .. })));
    }

    #[test]
    fn test_tile_limit() {
        let mut w = BinaryWriter::new();
        w.write_i32_le(1).write_i32_le(99).write_i32_le(99);
        let opts = DecodeOptions { max_tiles: Some(100), ..DecodeOptions::default() };
        let data = w.into_vec();
        match Header::read(&mut BinaryReader::new(&data), &opts) {
            Err(Error::LimitExceeded { what: "tiles", requested: 10000, limit: 100 }) => {}
            other => panic!("unexpected {other:?}"),
        }
    }
}
