use softgl_math::{Color, Vec2, Vec3, Vec4};

/// Everything the pipeline carries per vertex from transform through rasterization.
///
/// `position` is whatever space the vertex is currently in (clip space before the divide,
/// screen space with `w = 1/w_clip` after it — see [`crate::clip::perspective_divide`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec4,
    pub color: Color,
    pub texcoord: Vec2,
    pub normal: Vec3,
    pub eye_pos: Vec3,
    pub eye_normal: Vec3,
    pub eye_z: f32,
}

impl Vertex {
    pub fn lerp(a: &Vertex, b: &Vertex, t: f32) -> Vertex {
        Vertex {
            position: a.position.lerp(b.position, t),
            color: a.color.lerp(b.color, t),
            texcoord: a.texcoord.lerp(b.texcoord, t),
            normal: a.normal.lerp(b.normal, t),
            eye_pos: a.eye_pos.lerp(b.eye_pos, t),
            eye_normal: a.eye_normal.lerp(b.eye_normal, t),
            eye_z: softgl_math::lerp(a.eye_z, b.eye_z, t),
        }
    }

    pub fn barycentric(w0: f32, w1: f32, w2: f32, v0: &Vertex, v1: &Vertex, v2: &Vertex) -> Vertex {
        Vertex {
            position: Vec4::new(0.0, 0.0, 0.0, 0.0), // caller overwrites; weights don't apply to screen position
            color: Color::barycentric(w0, w1, w2, v0.color, v1.color, v2.color),
            texcoord: Vec2::new(
                v0.texcoord.x * w0 + v1.texcoord.x * w1 + v2.texcoord.x * w2,
                v0.texcoord.y * w0 + v1.texcoord.y * w1 + v2.texcoord.y * w2,
            ),
            normal: Vec3::barycentric(w0, w1, w2, v0.normal, v1.normal, v2.normal),
            eye_pos: Vec3::barycentric(w0, w1, w2, v0.eye_pos, v1.eye_pos, v2.eye_pos),
            eye_normal: Vec3::barycentric(w0, w1, w2, v0.eye_normal, v1.eye_normal, v2.eye_normal),
            eye_z: v0.eye_z * w0 + v1.eye_z * w1 + v2.eye_z * w2,
        }
    }
}

impl Default for Vertex {
    fn default() -> Vertex {
        Vertex {
            position: Vec4::new(0.0, 0.0, 0.0, 1.0),
            color: Color::WHITE,
            texcoord: Vec2::ZERO,
            normal: Vec3::new(0.0, 0.0, 1.0),
            eye_pos: Vec3::ZERO,
            eye_normal: Vec3::new(0.0, 0.0, 1.0),
            eye_z: 0.0,
        }
    }
}
