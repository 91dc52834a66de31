//! Decode-time resource ceilings
//!
//! A stamp header declares its own dimensions and record counts and
//! nothing in the format bounds them. Every ceiling here is optional and
//! unset by default, which decodes whatever the header asks for.

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeOptions {
    /// Maximum width * height
    pub max_tiles: Option<usize>,
    /// Maximum wall or floor layer count
    pub max_layers: Option<usize>,
    pub max_files: Option<usize>,
    pub max_objects: Option<usize>,
    pub max_substitution_groups: Option<usize>,
    pub max_npcs: Option<usize>,
    /// Maximum waypoints in a single NPC entry
    pub max_path_points: Option<usize>,
}

impl DecodeOptions {
    /// Ceilings comfortably above anything the shipped game data uses.
    pub fn strict() -> Self {
        Self {
            max_tiles: Some(1 << 20),
            max_layers: Some(16),
            max_files: Some(4096),
            max_objects: Some(1 << 16),
            max_substitution_groups: Some(1 << 12),
            max_npcs: Some(1 << 12),
            max_path_points: Some(1 << 12),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidOptions(e.to_string()))
    }
}

pub(crate) fn check_limit(what: &'static str, requested: usize, limit: Option<usize>) -> Result<()> {
    match limit {
        Some(limit) if requested > limit => Err(Error::LimitExceeded { what, requested, limit }),
        _ => Ok(()),
    }
}
