//! Triangle-to-heightfield voxelization.
//!
//! This crate rasterizes triangle soup into a [`VoxelField`]: a 2D grid of
//! pillars over the XZ plane, each holding vertical spans of solid space
//! tagged with an area id. It is the first stage of navigation mesh
//! generation.
//!
//! # Quick Start
//!
//! ```no_run
//! use voxfield::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let level = MarkedTriangleSet::from_obj("level.obj", AreaId::WALKABLE)?;
//! let Some(bounds) = level.bounds() else {
//!     return Ok(());
//! };
//! let mut field = VoxelField::from_bounds(bounds.min, bounds.max, 0.3, 0.3, 0.2)?;
//! field.rasterize_with(&level, &RasterConfig::default())?;
//! # Ok(())
//! # }
//! ```

// Public API - exposed to library consumers
pub mod batch;
pub mod clipper;
pub mod error;
pub mod field;
pub mod geometry;
pub mod math;
pub mod rasterizer;
pub mod triangles;

// Re-export commonly needed types at crate root for convenience
pub use batch::RasterConfig;
pub use clipper::ClipPolygon;
pub use error::{FieldError, LoadError};
pub use field::{AreaId, Pillar, SpanMergePolicy, VoxelField, VoxelHeightSpan};
pub use geometry::Aabb;
pub use math::{Axis, Vec3};
pub use rasterizer::TriangleRasterizer;
pub use triangles::{MarkedTriangle, MarkedTriangleSet};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use voxfield::prelude::*;
/// ```
pub mod prelude {
    // Field
    pub use crate::field::{AreaId, Pillar, SpanMergePolicy, VoxelField, VoxelHeightSpan};

    // Input
    pub use crate::triangles::{MarkedTriangle, MarkedTriangleSet};

    // Rasterization
    pub use crate::batch::RasterConfig;
    pub use crate::rasterizer::TriangleRasterizer;

    // Errors
    pub use crate::error::{FieldError, LoadError};

    // Math
    pub use crate::geometry::Aabb;
    pub use crate::math::vec3::Vec3;
}
