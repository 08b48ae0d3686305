//! The voxel field: a regular XZ grid of pillars, each holding vertical spans.
//!
//! ```text
//!        y
//!        |   .---.
//!        |   |   |  <- span [min_y, max_y]
//!        |   '---'
//!        |   .---.
//!        |   |   |
//!        |   '---'
//!        +-----------x
//!       /  pillar (x, z)
//!      z
//! ```
//!
//! The field is sized once and never resized; rasterization only appends
//! spans to its pillars.

mod span;

pub use span::{AreaId, Pillar, SpanMergePolicy, VoxelHeightSpan};

use crate::error::FieldError;
use crate::geometry::Aabb;
use crate::math::Vec3;

/// A heightfield of `x_width * z_width` pillars covering `min_bound..max_bound`.
#[derive(Clone, Debug)]
pub struct VoxelField {
    x_width: usize,
    z_width: usize,
    x_cell_size: f32,
    y_cell_size: f32,
    z_cell_size: f32,
    min_bound: Vec3,
    max_bound: Vec3,
    merge_policy: SpanMergePolicy,
    /// Row-major by z: pillar (x, z) lives at `z * x_width + x`.
    pillars: Vec<Pillar>,
}

impl VoxelField {
    /// Create an empty field.
    ///
    /// Note that the horizontal cell sizes come before the vertical one.
    pub fn new(
        x_width: usize,
        z_width: usize,
        min_bound: Vec3,
        max_bound: Vec3,
        x_cell_size: f32,
        z_cell_size: f32,
        y_cell_size: f32,
    ) -> Result<Self, FieldError> {
        if x_width == 0 || z_width == 0 {
            return Err(FieldError::InvalidDimensions { x_width, z_width });
        }
        check_geometry(min_bound, max_bound, x_cell_size, z_cell_size, y_cell_size)?;

        log::debug!(
            "voxel field {x_width}x{z_width}, cell ({x_cell_size}, {y_cell_size}, {z_cell_size}), bounds {min_bound:?}..{max_bound:?}"
        );

        Ok(Self {
            x_width,
            z_width,
            x_cell_size,
            y_cell_size,
            z_cell_size,
            min_bound,
            max_bound,
            merge_policy: SpanMergePolicy::default(),
            pillars: vec![Pillar::default(); x_width * z_width],
        })
    }

    /// Create a field just large enough to cover `min_bound..max_bound` with
    /// cells of the given size. Widths are rounded up.
    pub fn from_bounds(
        min_bound: Vec3,
        max_bound: Vec3,
        x_cell_size: f32,
        z_cell_size: f32,
        y_cell_size: f32,
    ) -> Result<Self, FieldError> {
        check_geometry(min_bound, max_bound, x_cell_size, z_cell_size, y_cell_size)?;
        let columns = |extent: f32, cell: f32| ((extent / cell).ceil() as usize).max(1);
        Self::new(
            columns(max_bound.x - min_bound.x, x_cell_size),
            columns(max_bound.z - min_bound.z, z_cell_size),
            min_bound,
            max_bound,
            x_cell_size,
            z_cell_size,
            y_cell_size,
        )
    }

    /// Select how spans landing in the same pillar are combined.
    pub fn with_merge_policy(mut self, policy: SpanMergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    pub fn merge_policy(&self) -> SpanMergePolicy {
        self.merge_policy
    }

    // ============ Metadata ============

    /// Number of columns along X.
    pub fn x_width(&self) -> usize {
        self.x_width
    }

    /// Number of columns along Z.
    pub fn z_width(&self) -> usize {
        self.z_width
    }

    pub fn x_cell_size(&self) -> f32 {
        self.x_cell_size
    }

    pub fn y_cell_size(&self) -> f32 {
        self.y_cell_size
    }

    pub fn z_cell_size(&self) -> f32 {
        self.z_cell_size
    }

    pub fn min_bound(&self) -> Vec3 {
        self.min_bound
    }

    pub fn max_bound(&self) -> Vec3 {
        self.max_bound
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.min_bound, self.max_bound)
    }

    // ============ Pillar Access ============

    fn index(&self, x: usize, z: usize) -> Option<usize> {
        (x < self.x_width && z < self.z_width).then(|| z * self.x_width + x)
    }

    /// The pillar at column `(x, z)`, or `None` outside the grid.
    pub fn pillar(&self, x: usize, z: usize) -> Option<&Pillar> {
        self.index(x, z).map(|i| &self.pillars[i])
    }

    /// Spans of column `(x, z)`; empty outside the grid.
    pub fn spans(&self, x: usize, z: usize) -> &[VoxelHeightSpan] {
        self.pillar(x, z).map(Pillar::spans).unwrap_or_default()
    }

    /// Iterate over all pillars as `(x, z, pillar)`, x varying fastest.
    pub fn pillars(&self) -> impl Iterator<Item = (usize, usize, &Pillar)> {
        let x_width = self.x_width;
        self.pillars
            .iter()
            .enumerate()
            .map(move |(i, p)| (i % x_width, i / x_width, p))
    }

    /// Total number of spans across all pillars.
    pub fn span_count(&self) -> usize {
        self.pillars.iter().map(Pillar::len).sum()
    }

    /// World-space centre of voxel `(x, y, z)`.
    pub fn voxel_center(&self, x: usize, y: u32, z: usize) -> Vec3 {
        Vec3::new(
            self.min_bound.x + self.x_cell_size * (x as f32 + 0.5),
            self.min_bound.y + self.y_cell_size * (y as f32 + 0.5),
            self.min_bound.z + self.z_cell_size * (z as f32 + 0.5),
        )
    }

    /// Drop every span, keeping dimensions and bounds.
    pub fn clear(&mut self) {
        self.pillars.iter_mut().for_each(Pillar::clear);
    }

    /// Insert span `min_y..=max_y` into column `(x, z)` following the field's
    /// merge policy.
    pub(crate) fn add_span(
        &mut self,
        x: usize,
        z: usize,
        min_y: u32,
        max_y: u32,
        area: AreaId,
        merge_threshold: u32,
    ) {
        let index = self.index(x, z);
        debug_assert!(index.is_some(), "column ({x}, {z}) outside the field");
        if let Some(i) = index {
            let policy = self.merge_policy;
            self.pillars[i].insert(VoxelHeightSpan::new(min_y, max_y, area), policy, merge_threshold);
        }
    }
}

fn check_geometry(
    min_bound: Vec3,
    max_bound: Vec3,
    x_cell_size: f32,
    z_cell_size: f32,
    y_cell_size: f32,
) -> Result<(), FieldError> {
    let valid_size = |s: f32| s.is_finite() && s > 0.0;
    if !(valid_size(x_cell_size) && valid_size(y_cell_size) && valid_size(z_cell_size)) {
        return Err(FieldError::InvalidCellSize {
            x: x_cell_size,
            y: y_cell_size,
            z: z_cell_size,
        });
    }
    if !(min_bound.is_finite()
        && max_bound.is_finite()
        && min_bound.x < max_bound.x
        && min_bound.y < max_bound.y
        && min_bound.z < max_bound.z)
    {
        return Err(FieldError::InvertedBounds {
            min: min_bound,
            max: max_bound,
        });
    }
    Ok(())
}
