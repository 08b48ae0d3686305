//! Error types.

use crate::math::Vec3;

/// Invalid parameters for a [`VoxelField`](crate::VoxelField) or a
/// rasterization run.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq)]
pub enum FieldError {
    #[error("field dimensions must be positive, got {x_width} x {z_width} columns")]
    InvalidDimensions { x_width: usize, z_width: usize },
    #[error("cell sizes must be positive and finite, got x: {x}, y: {y}, z: {z}")]
    InvalidCellSize { x: f32, y: f32, z: f32 },
    #[error("field bounds must satisfy min < max on every axis, got min {min:?}, max {max:?}")]
    InvertedBounds { min: Vec3, max: Vec3 },
    #[error("walkable slope must be within [0, 90] degrees, got {0}")]
    InvalidWalkableSlope(f32),
}

/// Error produced while building a triangle set.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to load OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("triangle {triangle} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
}
