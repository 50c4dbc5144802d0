//! Pure helpers shared by the triangle and line rasterizers in [`crate::context`]. Kept
//! free of `Context` so they can be unit tested without building a whole pipeline state.

use softgl_math::{Color, Vec2};

use crate::enums::{BlendFactor, TexEnvMode};

/// Twice the signed area of triangle `(a, b, p)`; the edge function used both for the
/// inside test and for barycentric weights.
pub fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Below this absolute signed area (in pixels-squared) a triangle is treated as degenerate
/// and rasterizes nothing. The original implementation this was distilled from uses the
/// same 0.5-pixel threshold; it still satisfies "zero-area triangles write nothing" since
/// 0 < 0.5.
pub const DEGENERATE_AREA_THRESHOLD: f32 = 0.5;

/// Per-channel blend multiplier for `factor`, given the source and destination colors and
/// the constant blend color. `src-alpha-saturate` is only meaningful as a source factor;
/// callers are responsible for rejecting it as a destination factor at validation time.
pub fn blend_multiplier(factor: BlendFactor, src: Color, dst: Color, constant: Color) -> Color {
    match factor {
        BlendFactor::Zero => Color::new(0.0, 0.0, 0.0, 0.0),
        BlendFactor::One => Color::new(1.0, 1.0, 1.0, 1.0),
        BlendFactor::SrcColor => src,
        BlendFactor::OneMinusSrcColor => Color::new(1.0 - src.r, 1.0 - src.g, 1.0 - src.b, 1.0 - src.a),
        BlendFactor::DstColor => dst,
        BlendFactor::OneMinusDstColor => Color::new(1.0 - dst.r, 1.0 - dst.g, 1.0 - dst.b, 1.0 - dst.a),
        BlendFactor::SrcAlpha => Color::new(src.a, src.a, src.a, src.a),
        BlendFactor::OneMinusSrcAlpha => Color::new(1.0 - src.a, 1.0 - src.a, 1.0 - src.a, 1.0 - src.a),
        BlendFactor::DstAlpha => Color::new(dst.a, dst.a, dst.a, dst.a),
        BlendFactor::OneMinusDstAlpha => Color::new(1.0 - dst.a, 1.0 - dst.a, 1.0 - dst.a, 1.0 - dst.a),
        BlendFactor::ConstantColor => constant,
        BlendFactor::OneMinusConstantColor => Color::new(1.0 - constant.r, 1.0 - constant.g, 1.0 - constant.b, 1.0 - constant.a),
        BlendFactor::ConstantAlpha => Color::new(constant.a, constant.a, constant.a, constant.a),
        BlendFactor::OneMinusConstantAlpha => {
            let f = 1.0 - constant.a;
            Color::new(f, f, f, f)
        },
        BlendFactor::SrcAlphaSaturate => {
            let f = src.a.min(1.0 - dst.a);
            Color::new(f, f, f, 1.0)
        },
    }
}

/// Triangle-wide LOD estimate (§4.8): half the log2 ratio of texel area to screen area,
/// clamped to be non-negative (never magnifies past level 0).
pub fn estimate_lod(texel_area: f32, screen_area: f32) -> f32 {
    if texel_area <= 0.0 || screen_area <= 0.0 {
        return 0.0;
    }
    (0.5 * (texel_area / screen_area).log2()).max(0.0)
}

/// Combines a fragment's incoming color with a sampled texel per the bound texture
/// environment mode (§4.12), using the standard fixed-function formulas.
pub fn texenv_combine(mode: TexEnvMode, fragment: Color, texel: Color, env_color: Color) -> Color {
    match mode {
        TexEnvMode::Replace => texel,
        TexEnvMode::Modulate => fragment.mul(texel),
        TexEnvMode::Decal => Color::new(
            fragment.r * (1.0 - texel.a) + texel.r * texel.a,
            fragment.g * (1.0 - texel.a) + texel.g * texel.a,
            fragment.b * (1.0 - texel.a) + texel.b * texel.a,
            fragment.a,
        ),
        TexEnvMode::Blend => Color::new(
            fragment.r * (1.0 - texel.r) + env_color.r * texel.r,
            fragment.g * (1.0 - texel.g) + env_color.g * texel.g,
            fragment.b * (1.0 - texel.b) + env_color.b * texel.b,
            fragment.a * texel.a,
        ),
        TexEnvMode::Add => Color::new(
            (fragment.r + texel.r).min(1.0),
            (fragment.g + texel.g).min(1.0),
            (fragment.b + texel.b).min(1.0),
            fragment.a * texel.a,
        ),
    }
}

/// Fog blend factor for eye-space `z` (already passed as `-eye_z`, i.e. positive in front of
/// the camera), clamped to `[0, 1]`.
pub fn fog_factor(mode: crate::enums::FogMode, z: f32, start: f32, end: f32, density: f32) -> f32 {
    use crate::enums::FogMode::*;
    let f = match mode {
        Linear => (end - z) / (end - start),
        Exp => (-density * z).exp(),
        Exp2 => (-(density * z) * (density * z)).exp(),
    };
    f.clamp(0.0, 1.0)
}
