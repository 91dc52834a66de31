use serde::Serialize;

/// Floating-point 2D position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_tiles(x: i32, y: i32) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}
