//! Stateless geometric predicates used by the rasterizer and the batch driver.

use crate::math::Vec3;

/// An axis-aligned bounding box given by its minimum and maximum corners.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Bounding box of a triangle.
    pub fn from_triangle(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let (min, max) = triangle_bounds(a, b, c);
        Self { min, max }
    }

    /// Bounding box of a point set, or `None` when it is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |acc, p| {
            Self::new(acc.min.min(p), acc.max.max(p))
        }))
    }

    /// Inclusive overlap test, touching boxes overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        bounds_overlap(self.min, self.max, other.min, other.max)
    }

    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Component-wise min/max of the three triangle vertices.
pub fn triangle_bounds(a: Vec3, b: Vec3, c: Vec3) -> (Vec3, Vec3) {
    (a.min(b).min(c), a.max(b).max(c))
}

/// True iff the boxes `(min_a, max_a)` and `(min_b, max_b)` intersect on all
/// three axes. Comparisons are inclusive.
pub fn bounds_overlap(min_a: Vec3, max_a: Vec3, min_b: Vec3, max_b: Vec3) -> bool {
    min_a.x <= max_b.x
        && min_b.x <= max_a.x
        && min_a.y <= max_b.y
        && min_b.y <= max_a.y
        && min_a.z <= max_b.z
        && min_b.z <= max_a.z
}

/// Returns true if the incline of triangle `abc` is within the walkable limit
/// given by `cos_max_slope`.
///
/// With the unnormalized normal `n = (b - a) x (c - a)`, the test is
/// `n.x² + n.z² <= n.y² · cos²`. Winding does not matter. A flat triangle
/// passes for any positive cosine, a vertical wall (`n.y == 0`) never does.
#[inline]
pub fn slope_within_limit(a: Vec3, b: Vec3, c: Vec3, cos_max_slope: f32) -> bool {
    let normal = (b - a).cross(c - a);
    let horizontal = normal.x * normal.x + normal.z * normal.z;
    let vertical = normal.y * normal.y;
    horizontal <= vertical * cos_max_slope * cos_max_slope
}
