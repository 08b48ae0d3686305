//! Triangle voxelization by axis-aligned slicing.
//!
//! A triangle is cut into Z rows, each row into X cells, by peeling one slab
//! at a time off a working polygon and carrying the rest forward:
//!
//! ```text
//!   z ^      |    |    |
//!     |  ----+----+----+---- row 2: peel at z_end, keep the remainder
//!     |      | /\ |    |
//!     |  ----+/--\+----+---- row 1
//!     |      /    \    |
//!     |  ---/+----+\---+---- row 0
//!     |    /_|____|_\  |
//!     +---------------------> x
//! ```
//!
//! Each per-cell piece has at most 7 vertices; its vertical extent becomes a
//! span in that cell's pillar. The number of splits is linear in the number of
//! covered rows and columns.

use std::mem;

use crate::clipper::{ClipPolygon, SplitPlane};
use crate::field::{AreaId, VoxelField};
use crate::geometry::{bounds_overlap, triangle_bounds};
use crate::math::{Axis, Vec3};

/// Scratch space for rasterizing triangles into a [`VoxelField`].
///
/// The buffers are overwritten on every call and carry nothing between
/// triangles; reusing one rasterizer across a batch only avoids
/// re-initializing them. A rasterizer serves one call at a time.
#[derive(Clone, Debug, Default)]
pub struct TriangleRasterizer {
    /// Polygon still to be sliced into rows.
    z_input: ClipPolygon,
    /// Current row; sliced into cells, then reused as the cell remainder.
    z_row: ClipPolygon,
    z_remainder: ClipPolygon,
    x_cell: ClipPolygon,
    x_remainder: ClipPolygon,
}

impl TriangleRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Voxelize triangle `abc` into `field`, tagging every span with `area`.
    ///
    /// Triangles whose bounds miss the field are skipped. Geometry past the
    /// upper X/Z bound is discarded, geometry before the lower bound folds into
    /// the first row or column. Returns the number of spans inserted.
    pub fn rasterize(
        &mut self,
        field: &mut VoxelField,
        a: Vec3,
        b: Vec3,
        c: Vec3,
        area: AreaId,
        merge_threshold: u32,
    ) -> usize {
        let (tri_min, tri_max) = triangle_bounds(a, b, c);
        let field_min = field.min_bound();
        let field_max = field.max_bound();
        if !bounds_overlap(tri_min, tri_max, field_min, field_max) {
            log::trace!("triangle {tri_min:?}..{tri_max:?} misses the field");
            return 0;
        }

        let x_cell_size = field.x_cell_size();
        let z_cell_size = field.z_cell_size();
        let inverse_x = 1.0 / x_cell_size;
        let inverse_y = 1.0 / field.y_cell_size();
        let inverse_z = 1.0 / z_cell_size;

        let z_first = column_index(tri_min.z, field_min.z, inverse_z, field.z_width());
        let z_last = column_index(tri_max.z, field_min.z, inverse_z, field.z_width());

        self.z_input.set_triangle(a, b, c);

        let mut written = 0;
        for z in z_first..=z_last {
            let z_end = field_min.z + z as f32 * z_cell_size + z_cell_size;
            self.z_input.split(
                SplitPlane::new(Axis::Z, z_end),
                &mut self.z_row,
                &mut self.z_remainder,
            );
            mem::swap(&mut self.z_input, &mut self.z_remainder);

            // A sliver along the row boundary.
            if self.z_row.is_degenerate() {
                continue;
            }
            let Some((row_min_x, row_max_x)) = self.z_row.extent(Axis::X) else {
                continue;
            };
            let x_first = column_index(row_min_x, field_min.x, inverse_x, field.x_width());
            let x_last = column_index(row_max_x, field_min.x, inverse_x, field.x_width());


            for x in x_first..=x_last {
                let x_end = field_min.x + x as f32 * x_cell_size + x_cell_size;
                self.z_row.split(
                    SplitPlane::new(Axis::X, x_end),
                    &mut self.x_cell,
                    &mut self.x_remainder,
                );
                mem::swap(&mut self.z_row, &mut self.x_remainder);

                if self.x_cell.is_degenerate() {
                    continue;
                }
                let Some((min_y, max_y)) = self.x_cell.extent(Axis::Y) else {
                    continue;
                };
                let min_y = min_y.max(field_min.y);
                let max_y = max_y.min(field_max.y);
                if min_y > max_y {
                    continue;
                }

                let bottom = ((min_y - field_min.y) * inverse_y) as u32;
                let top = ((max_y - field_min.y) * inverse_y) as u32;
                field.add_span(x, z, bottom, top, area, merge_threshold);
                written += 1;
            }
        }
        written
    }
}

/// Cell index of `coord` along one horizontal axis, clamped into `0..width`.
#[inline]
fn column_index(coord: f32, origin: f32, inverse_cell_size: f32, width: usize) -> usize {
    (((coord - origin) * inverse_cell_size).max(0.0) as usize).min(width - 1)
}

impl VoxelField {
    /// Voxelize a single triangle. See [`TriangleRasterizer::rasterize`].
    pub fn rasterize_triangle(
        &mut self,
        a: Vec3,
        b: Vec3,
        c: Vec3,
        area: AreaId,
        merge_threshold: u32,
    ) -> usize {
        TriangleRasterizer::new().rasterize(self, a, b, c, area, merge_threshold)
    }
}
