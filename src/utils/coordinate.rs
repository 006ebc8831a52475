use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate2D {
    pub x: f32,
    pub y: f32,
}

impl Coordinate2D {
    pub fn new(x: f32, y: f32) -> Self {
        Coordinate2D { x, y }
    }

    /// dist returns the Euclidean distance to the other coordinate
    /// in the same normalized image space.
    pub fn dist(&self, other: &Coordinate2D) -> f32 {
        let v = Vector2::new(self.x - other.x, self.y - other.y);
        v.norm()
    }
}
