//! DS1 map stamp decoder
//!
//! Decodes the binary "stamp" files that describe a tile-based level:
//! wall/floor/shadow/substitution layers, placed objects, substitution
//! groups and NPC paths, across every known revision of the format.

pub mod codec;
pub mod config;
pub mod ds1;
pub mod error;

pub use config::DecodeOptions;
pub use ds1::{
    from_bytes, Capabilities, Ds1, FloorShadowRecord, Header, LayerStreamType, Object, Path,
    SubstitutionGroup, SubstitutionRecord, TileRecord, TileType, Version, WallRecord,
};
pub use codec::Vector2;
pub use error::{Error, Result};
