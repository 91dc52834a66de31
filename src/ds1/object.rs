use serde::Serialize;
use tracing::debug;

use super::read_count;
use super::version::Capabilities;
use crate::codec::{BinaryReader, Vector2};
use crate::config::{check_limit, DecodeOptions};
use crate::error::Result;

const OBJECT_RECORD_LEN: usize = 20;
/// Bytes skipped for an NPC entry that matches no object
const UNMATCHED_NPC_LEN: usize = 2;

/// Object placed in the stamp
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Object {
    pub object_type: i32,
    pub id: i32,
    pub x: i32,
    pub y: i32,
    pub flags: i32,
    /// Assigned by the NPC section, `None` for objects no NPC entry names
    pub paths: Option<Vec<Path>>,
}

/// NPC waypoint
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Path {
    pub position: Vector2,
    /// Only stored from v15 on
    pub action: Option<i32>,
}

pub fn read_objects(
    reader: &mut BinaryReader,
    caps: Capabilities,
    opts: &DecodeOptions,
) -> Result<Vec<Object>> {
    if !caps.contains(Capabilities::OBJECTS) {
        return Ok(Vec::new());
    }

    let count = read_count(reader, "object count")?;
    check_limit("objects", count, opts.max_objects)?;

    let mut objects = Vec::with_capacity(count.min(reader.remaining() / OBJECT_RECORD_LEN));
    for _ in 0..count {
        objects.push(Object {
            object_type: reader.read_i32_le()?,
            id: reader.read_i32_le()?,
            x: reader.read_i32_le()?,
            y: reader.read_i32_le()?,
            flags: reader.read_i32_le()?,
            paths: None,
        });
    }
    debug!(count, "parsed objects");
    Ok(objects)
}

/// Read the NPC section and attach each entry's waypoints to the first
/// object standing on the same tile.
pub fn read_npc_paths(
    reader: &mut BinaryReader,
    caps: Capabilities,
    objects: &mut [Object],
    opts: &DecodeOptions,
) -> Result<()> {
    if !caps.contains(Capabilities::NPCS) {
        return Ok(());
    }
    let extra_data = caps.contains(Capabilities::NPC_EXTRA_DATA);

    let count = read_count(reader, "npc count")?;
    check_limit("npcs", count, opts.max_npcs)?;

    for npc in 0..count {
        let num_paths = read_count(reader, "npc path count")?;
        check_limit("path points", num_paths, opts.max_path_points)?;
        let x = reader.read_i32_le()?;
        let y = reader.read_i32_le()?;

        match objects.iter_mut().find(|o| o.x == x && o.y == y) {
            Some(object) => read_paths(reader, object, num_paths, extra_data)?,
            None => {
                debug!(npc, x, y, "npc entry matches no object");
                let skip = UNMATCHED_NPC_LEN + usize::from(extra_data);
                reader.skip(skip)?;
            }
        }
    }
    Ok(())
}

fn read_paths(
    reader: &mut BinaryReader,
    object: &mut Object,
    num_paths: usize,
    extra_data: bool,
) -> Result<()> {
    let record_len = if extra_data { 12 } else { 8 };
    let paths = object
        .paths
        .get_or_insert_with(|| Vec::with_capacity(num_paths.min(reader.remaining() / record_len)));

    for i in 0..num_paths {
        let x = reader.read_i32_le()?;
        let y = reader.read_i32_le()?;
        let action = if extra_data { Some(reader.read_i32_le()?) } else { None };
        let path = Path { position: Vector2::from_tiles(x, y), action };

        // a later entry for the same object overwrites by index
        match paths.get_mut(i) {
            Some(slot) => *slot = path,
            None => paths.push(path),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::BinaryWriter;
    use crate::ds1::version::Version;
    use crate::error::Error;

    fn object_at(x: i32, y: i32) -> Object {
        Object { x, y, ..Object::default() }
    }

    fn caps(version: i32) -> Capabilities {
        Version(version).capabilities()
    }

    #[test]
    fn test_no_objects_before_v2() {
        let mut reader = BinaryReader::new(&[]);
        let objects = read_objects(&mut reader, caps(1), &DecodeOptions::default()).unwrap();
        assert!(objects.is_empty());
    }

    #[test]
    fn test_read_objects() {
        let mut w = BinaryWriter::new();
        w.write_i32_le(2);
        for v in [1, 10, 3, 4, 0, 2, 11, 5, 6, 0x80] {
            w.write_i32_le(v);
        }
        let data = w.into_vec();
        let mut reader = BinaryReader::new(&data);
        let objects = read_objects(&mut reader, caps(2), &DecodeOptions::default()).unwrap();

        assert_eq!(objects.len(), 2);
        assert_eq!(objects[1].object_type, 2);
        assert_eq!(objects[1].id, 11);
        assert_eq!((objects[1].x, objects[1].y), (5, 6));
        assert_eq!(objects[1].flags, 0x80);
        assert!(objects[1].paths.is_none());
        assert!(reader.is_empty());
    }

    #[test]
    fn test_truncated_object_fails() {
        let mut w = BinaryWriter::new();
        w.write_i32_le(1).write_i32_le(1).write_i32_le(2);
        let data = w.into_vec();
        let result = read_objects(&mut BinaryReader::new(&data), caps(2), &DecodeOptions::default());
        assert!(matches!(result, Err(Error::UnexpectedEof { .. })));
    }

    #[test]
    fn test_npc_attaches_to_matching_object() {
        let mut objects = vec![object_at(1, 1), object_at(8, 9)];

        let mut w = BinaryWriter::new();
        w.write_i32_le(1) // npc count
            .write_i32_le(2) // path count
            .write_i32_le(8)
            .write_i32_le(9)
            .write_i32_le(10)
            .write_i32_le(11)
            .write_i32_le(1) // action
            .write_i32_le(12)
            .write_i32_le(13)
            .write_i32_le(2);
        let data = w.into_vec();
        let mut reader = BinaryReader::new(&data);
        read_npc_paths(&mut reader, caps(15), &mut objects, &DecodeOptions::default()).unwrap();

        assert!(reader.is_empty());
        assert!(objects[0].paths.is_none());
        let paths = objects[1].paths.as_ref().unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].position, Vector2::new(10.0, 11.0));
        assert_eq!(paths[0].action, Some(1));
        assert_eq!(paths[1].position, Vector2::new(12.0, 13.0));
        assert_eq!(paths[1].action, Some(2));
    }

    #[test]
    fn test_npc_first_match_wins() {
        let mut objects = vec![object_at(3, 3), object_at(3, 3)];

        let mut w = BinaryWriter::new();
        w.write_i32_le(1).write_i32_le(1).write_i32_le(3).write_i32_le(3);
        w.write_i32_le(4).write_i32_le(5);
        let data = w.into_vec();
        read_npc_paths(&mut BinaryReader::new(&data), caps(14), &mut objects, &DecodeOptions::default())
            .unwrap();

        let paths = objects[0].paths.as_ref().unwrap();
        assert_eq!(paths[0].action, None);
        assert!(objects[1].paths.is_none());
    }

    #[test]
    fn test_unmatched_npcs_keep_alignment() {
        let mut objects = vec![object_at(0, 0)];

        // v14: each unmatched entry is followed by 2 filler bytes
        let mut w = BinaryWriter::new();
        w.write_i32_le(2);
        w.write_i32_le(5).write_i32_le(7).write_i32_le(7).write_bytes(&[0xEE; 2]);
        w.write_i32_le(5).write_i32_le(9).write_i32_le(9).write_bytes(&[0xEE; 2]);
        let data = w.into_vec();
        let mut reader = BinaryReader::new(&data);
        read_npc_paths(&mut reader, caps(14), &mut objects, &DecodeOptions::default()).unwrap();
        assert!(reader.is_empty());
        assert!(objects[0].paths.is_none());

        // v15: 3 filler bytes
        let mut w = BinaryWriter::new();
        w.write_i32_le(2);
        w.write_i32_le(1).write_i32_le(7).write_i32_le(7).write_bytes(&[0xEE; 3]);
        w.write_i32_le(1).write_i32_le(9).write_i32_le(9).write_bytes(&[0xEE; 3]);
        let data = w.into_vec();
        let mut reader = BinaryReader::new(&data);
        read_npc_paths(&mut reader, caps(15), &mut objects, &DecodeOptions::default()).unwrap();
        assert!(reader.is_empty());
    }

    #[test]
    fn test_repeated_npc_overwrites_then_appends() {
        let mut objects = vec![object_at(2, 2)];

        let mut w = BinaryWriter::new();
        w.write_i32_le(2);
        w.write_i32_le(1).write_i32_le(2).write_i32_le(2);
        w.write_i32_le(1).write_i32_le(1);
        w.write_i32_le(2).write_i32_le(2).write_i32_le(2);
        w.write_i32_le(5).write_i32_le(5).write_i32_le(6).write_i32_le(6);
        let data = w.into_vec();
        read_npc_paths(&mut BinaryReader::new(&data), caps(14), &mut objects, &DecodeOptions::default())
            .unwrap();

        let paths = objects[0].paths.as_ref().unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].position, Vector2::new(5.0, 5.0));
        assert_eq!(paths[1].position, Vector2::new(6.0, 6.0));
    }

    #[test]
    fn test_no_npc_section_before_v14() {
        let mut objects = vec![object_at(0, 0)];
        let mut reader = BinaryReader::new(&[]);
        read_npc_paths(&mut reader, caps(13), &mut objects, &DecodeOptions::default()).unwrap();
        assert!(objects[0].paths.is_none());
    }

    #[test]
    fn test_npc_limit() {
        let mut w = BinaryWriter::new();
        w.write_i32_le(5);
        let data = w.into_vec();
        let opts = DecodeOptions { max_npcs: Some(4), ..DecodeOptions::default() };
        let result = read_npc_paths(&mut BinaryReader::new(&data), caps(14), &mut [], &opts);
        assert!(matches!(result, Err(Error::LimitExceeded { what: "npcs", .. })));
    }
}
