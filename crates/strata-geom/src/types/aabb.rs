// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

use crate::types::vec3::Vec3;

/// Error returned when an [`Aabb`] cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeomError {
    /// A corner component is NaN or infinite.
    #[error("AABB corner is not finite: {0:?}")]
    NonFiniteCorner(Vec3),
    /// An extent is negative, NaN or infinite.
    #[error("AABB extents must be finite and non-negative: width={width}, height={height}, depth={depth}")]
    InvalidExtents {
        /// Requested X extent.
        width: f32,
        /// Requested Y extent.
        height: f32,
        /// Requested Z extent.
        depth: f32,
    },
}

/// Axis-aligned bounding box stored as a minimum corner plus extents.
///
/// Invariants:
/// - `min` components are finite.
/// - `width`, `height` and `depth` are finite and `>= 0`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawAabb"))]
pub struct Aabb {
    min: Vec3,
    width: f32,
    height: f32,
    depth: f32,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawAabb {
    min: Vec3,
    width: f32,
    height: f32,
    depth: f32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawAabb> for Aabb {
    type Error = GeomError;

    fn try_from(raw: RawAabb) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.width, raw.height, raw.depth)
    }
}

fn valid_extent(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}

/// Closed-interval overlap of `[a0, a1]` and `[b0, b1]`.
///
/// Spelled out as the four cases: `b0` inside `a`, `b1` inside `a`, `b`
/// inside `a`, `a` inside `b`.
fn intervals_overlap(a0: f32, a1: f32, b0: f32, b1: f32) -> bool {
    (a0 <= b0 && b0 <= a1)
        || (a0 <= b1 && b1 <= a1)
        || (a0 <= b0 && b1 <= a1)
        || (b0 <= a0 && a1 <= b1)
}

impl Aabb {
    /// Constructs a box from its minimum corner and extents.
    pub fn new(min: Vec3, width: f32, height: f32, depth: f32) -> Result<Self, GeomError> {
        if !min.is_finite() {
            return Err(GeomError::NonFiniteCorner(min));
        }
        if !(valid_extent(width) && valid_extent(height) && valid_extent(depth)) {
            return Err(GeomError::InvalidExtents { width, height, depth });
        }
        Ok(Self { min, width, height, depth })
    }

    /// Constructs a cube-shaped box with the same extent on every axis.
    pub fn cube(min: Vec3, size: f32) -> Result<Self, GeomError> {
        Self::new(min, size, size, size)
    }

    /// Builds the box spanning two arbitrary corners.
    pub fn from_min_max(a: Vec3, b: Vec3) -> Result<Self, GeomError> {
        let lo = a.min(&b);
        let hi = a.max(&b);
        Self::new(lo, hi.x - lo.x, hi.y - lo.y, hi.z - lo.z)
    }

    /// Minimum corner.
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner (`min + extents`).
    pub fn max(&self) -> Vec3 {
        self.min.add(&Vec3::new(self.width, self.height, self.depth))
    }

    /// Extent along X.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Extent along Y.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Extent along Z.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Centre of the bottom face (`y = min.y`).
    pub fn bottom_center(&self) -> Vec3 {
        Vec3::new(self.min.x + self.width / 2.0, self.min.y, self.min.z + self.depth / 2.0)
    }

    /// The eight corner points.
    pub fn corners(&self) -> [Vec3; 8] {
        let [x0, y0, z0] = self.min.to_array();
        let [x1, y1, z1] = self.max().to_array();
        [
            Vec3::new(x0, y0, z0),
            Vec3::new(x1, y0, z0),
            Vec3::new(x0, y1, z0),
            Vec3::new(x0, y0, z1),
            Vec3::new(x1, y1, z0),
            Vec3::new(x1, y0, z1),
            Vec3::new(x0, y1, z1),
            Vec3::new(x1, y1, z1),
        ]
    }

    /// Returns this box moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self { min: self.min.add(&offset), ..*self }
    }

    /// Returns this box with `min.y` replaced.
    pub fn with_min_y(&self, y: f32) -> Self {
        Self { min: Vec3::new(self.min.x, y, self.min.z), ..*self }
    }

    /// Closed-interval overlap on X.
    pub fn overlaps_x(&self, other: &Self) -> bool {
        intervals_overlap(self.min.x, self.min.x + self.width, other.min.x, other.min.x + other.width)
    }

    /// Closed-interval overlap on Y.
    pub fn overlaps_y(&self, other: &Self) -> bool {
        intervals_overlap(
            self.min.y,
            self.min.y + self.height,
            other.min.y,
            other.min.y + other.height,
        )
    }

    /// Closed-interval overlap on Z.
    pub fn overlaps_z(&self, other: &Self) -> bool {
        intervals_overlap(self.min.z, self.min.z + self.depth, other.min.z, other.min.z + other.depth)
    }

    /// Returns `true` if this box overlaps another on all three axes (inclusive on faces).
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other) && self.overlaps_z(other)
    }
}
