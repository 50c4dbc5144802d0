//! Small closed enums standing in for the `GLenum` argument tables of §6. Every front-end
//! setter that takes one of these already rejects values outside the set at the type level;
//! the handful of calls that still take a raw integer (e.g. light/material parameter names
//! shared across `f` and `fv` variants) validate against the matching table by hand and latch
//! [`crate::GlError::InvalidEnum`] on mismatch.

/// Topology consumed by the primitive assembler (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveMode {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
    Quads,
    QuadStrip,
    Polygon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixMode {
    Modelview,
    Projection,
    Texture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
    FrontAndBack,
}

/// Flat and smooth are the two OpenGL 1.x modes; `Phong` selects per-fragment evaluation
/// (§4.8, §4.11) rather than a real fixed-function enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadeModel {
    Flat,
    Smooth,
    Phong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestFunc {
    Never,
    Less,
    Equal,
    Lequal,
    Greater,
    NotEqual,
    Gequal,
    Always,
}

impl TestFunc {
    /// Evaluates `incoming OP stored` per the table this enum names.
    pub fn eval(self, incoming: f32, stored: f32) -> bool {
        match self {
            TestFunc::Never => false,
            TestFunc::Less => incoming < stored,
            TestFunc::Equal => incoming == stored,
            TestFunc::Lequal => incoming <= stored,
            TestFunc::Greater => incoming > stored,
            TestFunc::NotEqual => incoming != stored,
            TestFunc::Gequal => incoming >= stored,
            TestFunc::Always => true,
        }
    }

    /// Integer form used by the stencil test, which compares masked reference and stored
    /// values rather than depths.
    pub fn eval_int(self, incoming: i32, stored: i32) -> bool {
        match self {
            TestFunc::Never => false,
            TestFunc::Less => incoming < stored,
            TestFunc::Equal => incoming == stored,
            TestFunc::Lequal => incoming <= stored,
            TestFunc::Greater => incoming > stored,
            TestFunc::NotEqual => incoming != stored,
            TestFunc::Gequal => incoming >= stored,
            TestFunc::Always => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    ConstantColor,
    OneMinusConstantColor,
    ConstantAlpha,
    OneMinusConstantAlpha,
    SrcAlphaSaturate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    Incr,
    Decr,
    IncrWrap,
    DecrWrap,
    Invert,
}

impl StencilOp {
    /// Applies the op given the reference value and the currently stored stencil value.
    /// Both are taken (and the result kept) as 8-bit; the caller masks with the write mask.
    pub fn apply(self, reference: u8, stored: u8) -> u8 {
        match self {
            StencilOp::Keep => stored,
            StencilOp::Zero => 0,
            StencilOp::Replace => reference,
            StencilOp::Incr => stored.saturating_add(1),
            StencilOp::Decr => stored.saturating_sub(1),
            StencilOp::IncrWrap => stored.wrapping_add(1),
            StencilOp::DecrWrap => stored.wrapping_sub(1),
            StencilOp::Invert => !stored,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexWrap {
    Repeat,
    Clamp,
    ClampToEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl MinFilter {
    pub fn uses_mipmap(self) -> bool {
        !matches!(self, MinFilter::Nearest | MinFilter::Linear)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagFilter {
    Nearest,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexEnvMode {
    Modulate,
    Decal,
    Replace,
    Blend,
    Add,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FogMode {
    Linear,
    Exp,
    Exp2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    StaticDraw,
    DynamicDraw,
    StreamDraw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    Compile,
    CompileAndExecute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba,
    Rgb,
    Luminance,
    LuminanceAlpha,
}

impl PixelFormat {
    pub fn components(self) -> usize {
        match self {
            PixelFormat::Rgba => 4,
            PixelFormat::Rgb => 3,
            PixelFormat::Luminance => 1,
            PixelFormat::LuminanceAlpha => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Point,
    Line,
    Fill,
}

/// Hint for the perspective-correction/texture-quality tradeoff. `DontCare` is treated as
/// `Nicest`: correct interpolation unless the caller explicitly asks for the cheap affine path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintMode {
    Fastest,
    Nicest,
    DontCare,
}

/// Enable/disable capabilities (§4.1). Lights are addressed by index, validated against
/// [`crate::limits::MAX_LIGHTS`] at the call site rather than enumerated as eight variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cap {
    DepthTest,
    StencilTest,
    AlphaTest,
    Blend,
    ScissorTest,
    CullFace,
    Texture2D,
    Lighting,
    Light(u8),
    ColorMaterial,
    Fog,
    Normalize,
}
