//! Minimal vector math used by the voxelizer.

pub mod vec3;

pub use vec3::Vec3;

/// A world axis. The heightfield grid lies in the XZ plane, Y is up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * 180.0 / std::f32::consts::PI
}

/// Cosine of an angle given in degrees.
#[inline]
pub fn cos_degrees(degrees: f32) -> f32 {
    degrees_to_radians(degrees).cos()
}
