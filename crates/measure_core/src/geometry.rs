use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{MeasureError, MeasureResult};

/// A user-placed point in world space (meters).
///
/// Coordinates are fixed at construction; use [`MarkerPoint::to_glam`] for math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPoint {
    x: f32,
    y: f32,
    z: f32,
}

impl MarkerPoint {
    pub const ORIGIN: MarkerPoint = MarkerPoint::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Build a point from host-provided coordinates, rejecting NaN and infinities.
    pub fn try_new(x: f32, y: f32, z: f32) -> MeasureResult<Self> {
        if x.is_finite() && y.is_finite() && z.is_finite() {
            Ok(Self::new(x, y, z))
        } else {
            Err(MeasureError::NonFinite { x, y, z })
        }
    }

    pub const fn x(&self) -> f32 {
        self.x
    }

    pub const fn y(&self) -> f32 {
        self.y
    }

    pub const fn z(&self) -> f32 {
        self.z
    }

    pub fn to_glam(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn from_glam(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: MarkerPoint) -> MarkerPoint {
        Self::from_glam(self.to_glam().lerp(other.to_glam(), 0.5))
    }
}

impl From<[f32; 3]> for MarkerPoint {
    fn from(value: [f32; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<Vec3> for MarkerPoint {
    fn from(value: Vec3) -> Self {
        Self::from_glam(value)
    }
}

impl std::ops::Sub for MarkerPoint {
    type Output = Vec3;

    fn sub(self, other: Self) -> Vec3 {
        self.to_glam() - other.to_glam()
    }
}

/// Straight-line distance between two markers.
pub fn euclidean_distance(a: MarkerPoint, b: MarkerPoint) -> f32 {
    (a - b).length()
}

/// Angle of the segment `b -> a` in the horizontal (x, z) plane, in `(-π, π]`.
///
/// The vertical component is ignored. Coincident points yield `0.0`.
pub fn bearing_angle(a: MarkerPoint, b: MarkerPoint) -> f32 {
    // +0.0 folds -0.0 into +0.0: no -π, and coincident points give 0.
    let dz = a.z - b.z + 0.0;
    let dx = a.x - b.x + 0.0;
    dz.atan2(dx)
}
