//! Splitting convex polygons against axis-aligned planes.
//!
//! A split produces two polygons: the **row** polygon on the low side of the
//! plane (`coordinate <= value`) and the **remainder** on the high side
//! (`coordinate >= value`). Vertices lying exactly on the plane belong to
//! both.
//!
//! ```text
//!            row      |  remainder
//!                     |
//!        a .----------x------. b
//!           \         |     /
//!            \        |    /
//!             \       |   /
//!              \      |  /
//!               '-----x-'
//!                     c
//!                  split
//! ```

use arrayvec::ArrayVec;

use crate::math::{Axis, Vec3};

/// Upper bound on the vertex count of any polygon produced while rasterizing.
///
/// A triangle peeled along Z gains at most two vertices (5), the resulting
/// row peeled along X gains at most two more (7).
pub const MAX_POLYGON_VERTICES: usize = 7;

/// The plane `axis = value`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitPlane {
    pub axis: Axis,
    pub value: f32,
}

impl SplitPlane {
    pub const fn new(axis: Axis, value: f32) -> Self {
        Self { axis, value }
    }

    /// Signed distance from `v` to this plane.
    /// Positive or zero = row side, negative = remainder side.
    #[inline]
    pub fn signed_distance(&self, v: Vec3) -> f32 {
        self.value - v[self.axis]
    }
}

/// A convex polygon held in a fixed-capacity buffer.
///
/// Pushing past [`MAX_POLYGON_VERTICES`] panics: for convex input and two
/// split axes it cannot happen, so an overflow is a logic error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipPolygon {
    vertices: ArrayVec<Vec3, MAX_POLYGON_VERTICES>,
}

impl ClipPolygon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a polygon from a triangle (3 vertices).
    pub fn from_triangle(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let mut polygon = Self::new();
        polygon.set_triangle(a, b, c);
        polygon
    }

    /// Overwrite the contents with a triangle.
    pub fn set_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        self.vertices.clear();
        self.vertices.push(a);
        self.vertices.push(b);
        self.vertices.push(c);
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// A polygon with fewer than 3 vertices covers no area.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    #[inline]
    pub fn push(&mut self, v: Vec3) {
        self.vertices.push(v);
    }

    /// Minimum and maximum coordinate along `axis`, or `None` if empty.
    pub fn extent(&self, axis: Axis) -> Option<(f32, f32)> {
        let (first, rest) = self.vertices.split_first()?;
        let start = first[axis];
        Some(rest.iter().fold((start, start), |(lo, hi), v| {
            (lo.min(v[axis]), hi.max(v[axis]))
        }))
    }

    /// Split this polygon against `plane`, writing the low side into `row` and
    /// the high side into `remainder`. Both outputs are overwritten.
    ///
    /// Edges are walked in the original winding order, so both outputs keep
    /// it. Polygons with fewer than 3 vertices produce two empty outputs.
    pub fn split(&self, plane: SplitPlane, row: &mut ClipPolygon, remainder: &mut ClipPolygon) {
        row.clear();
        remainder.clear();

        let n = self.vertices.len();
        if n < 3 {
            return;
        }

        let mut deltas = [0.0f32; MAX_POLYGON_VERTICES];
        for (delta, v) in deltas.iter_mut().zip(&self.vertices) {
            *delta = plane.signed_distance(*v);
        }

        let mut prev = n - 1;
        for curr in 0..n {
            let prev_delta = deltas[prev];
            let curr_delta = deltas[curr];
            let vertex = self.vertices[curr];

            if (prev_delta >= 0.0) != (curr_delta >= 0.0) {
                // An on-plane `prev` is already in both outputs.
                if prev_delta != 0.0 {
                    let t = prev_delta / (prev_delta - curr_delta);
                    let crossing = self.vertices[prev].lerp(vertex, t);
                    row.push(crossing);
                    remainder.push(crossing);
                }
                if curr_delta > 0.0 {
                    row.push(vertex);
                } else if curr_delta < 0.0 {
                    remainder.push(vertex);
                }
                // curr_delta == 0 is the crossing itself.
            } else if curr_delta > 0.0 {
                row.push(vertex);
            } else if curr_delta < 0.0 {
                remainder.push(vertex);
            } else {
                row.push(vertex);
                remainder.push(vertex);
            }

            prev = curr;
        }
    }
}

/// Split `polygon` against the plane `axis = value`.
///
/// Convenience wrapper over [`ClipPolygon::split`] returning fresh outputs as
/// `(row, remainder)`.
pub fn split_polygon(polygon: &ClipPolygon, axis: Axis, value: f32) -> (ClipPolygon, ClipPolygon) {
    let mut row = ClipPolygon::new();
    let mut remainder = ClipPolygon::new();
    polygon.split(SplitPlane::new(axis, value), &mut row, &mut remainder);
    (row, remainder)
}
