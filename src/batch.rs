//! Rasterizing whole triangle sets with slope-based walkability.

use crate::error::FieldError;
use crate::field::{AreaId, VoxelField};
use crate::geometry::slope_within_limit;
use crate::math::cos_degrees;
use crate::rasterizer::TriangleRasterizer;
use crate::triangles::MarkedTriangleSet;

/// Parameters of a rasterization run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RasterConfig {
    /// Walkable slope angle in degrees within `[0, 90]`. A triangle keeps its
    /// area while the tangent of its incline is at most the cosine of this
    /// angle.
    pub walkable_slope_degrees: f32,
    /// Largest gap, in cells, across which spans are merged when the field
    /// uses [`SpanMergePolicy::Merge`](crate::SpanMergePolicy::Merge).
    pub merge_threshold: u32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            walkable_slope_degrees: 45.0,
            merge_threshold: 1,
        }
    }
}

impl RasterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_walkable_slope_degrees(&mut self, degrees: f32) -> &mut Self {
        self.walkable_slope_degrees = degrees;
        self
    }

    pub fn set_merge_threshold(&mut self, cells: u32) -> &mut Self {
        self.merge_threshold = cells;
        self
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if (0.0..=90.0).contains(&self.walkable_slope_degrees) {
            Ok(())
        } else {
            Err(FieldError::InvalidWalkableSlope(self.walkable_slope_degrees))
        }
    }
}

impl VoxelField {
    /// Rasterize every triangle of `triangles`.
    ///
    /// A triangle failing [`slope_within_limit`] for `walkable_slope_degrees`
    /// is rasterized as [`AreaId::NOT_WALKABLE`], any other keeps its own
    /// area. Returns the number of spans inserted.
    pub fn rasterize_triangles(
        &mut self,
        triangles: &MarkedTriangleSet,
        walkable_slope_degrees: f32,
        merge_threshold: u32,
    ) -> Result<usize, FieldError> {
        self.rasterize_with(
            triangles,
            &RasterConfig {
                walkable_slope_degrees,
                merge_threshold,
            },
        )
    }

    /// Rasterize every triangle of `triangles` using `config`.
    pub fn rasterize_with(
        &mut self,
        triangles: &MarkedTriangleSet,
        config: &RasterConfig,
    ) -> Result<usize, FieldError> {
        config.validate()?;
        let cos_max_slope = cos_degrees(config.walkable_slope_degrees);

        let mut rasterizer = TriangleRasterizer::new();
        let mut unwalkable = 0usize;
        let mut written = 0usize;
        for ([a, b, c], area) in triangles.iter() {
            let area = if slope_within_limit(a, b, c, cos_max_slope) {
                area
            } else {
                unwalkable += 1;
                AreaId::NOT_WALKABLE
            };
            written += rasterizer.rasterize(self, a, b, c, area, config.merge_threshold);
        }

        log::debug!(
            "rasterized {} triangles ({unwalkable} unwalkable) into {written} spans",
            triangles.len()
        );
        Ok(written)
    }
}
