//! Vectors, matrices, and color types shared by the softgl rasterizer.
//!
//! Layouts follow OpenGL convention rather than anything more general: matrices are
//! column-major and colors pack to the same little-endian RGBA word the framebuffer stores.

mod color;
mod matrix;
mod vector;

pub use color::Color;
pub use matrix::Mat4;
pub use vector::{Vec2, Vec3, Vec4};

/// Linearly interpolates between `a` and `b` by `t`. Not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
