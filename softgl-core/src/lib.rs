//! A software implementation of the OpenGL 1.x fixed-function pipeline: immediate-mode
//! vertex/state commands in, a packed-RGBA8 framebuffer out. No windowing, no host event
//! loop, no file I/O — see the `softgl` binary crate for demo programs that wrap this in
//! something that writes a PNG.

pub mod buffer;
pub mod clip;
pub mod context;
pub mod enums;
pub mod error;
pub mod framebuffer;
pub mod lighting;
pub mod limits;
pub mod list;
pub mod raster;
pub mod texture;
pub mod vertex;

pub use context::{ArrayVertex, Context};
pub use enums::{
    BlendFactor, BufferTarget, BufferUsage, Cap, Face, FogMode, HintMode, ListMode, MagFilter, MatrixMode, MinFilter, PixelFormat,
    PolygonMode, PrimitiveMode, ShadeModel, StencilOp, TestFunc, TexEnvMode, TexWrap,
};
pub use error::GlError;
pub use framebuffer::Framebuffer;
pub use lighting::{LightParam, MaterialParam};
