//! Fixed implementation limits (§6), exposed to applications via [`crate::Context::get_integer`].

pub const MATRIX_STACK_DEPTH: usize = 24;
pub const MAX_LIGHTS: usize = 8;
pub const MAX_TEXTURE_SIZE: u32 = 2048;
pub const MAX_FRAMEBUFFER_DIM: u32 = 16384;
pub const DEPTH_BITS: u32 = 32;
pub const STENCIL_BITS: u32 = 8;
pub const MAX_LISTS: u32 = 1024;
pub const MAX_LIST_RECURSION: u32 = 64;
pub const MAX_TEXTURES: u32 = 256;
pub const MAX_BUFFERS: u32 = 256;

pub const VENDOR: &str = "softgl";
pub const RENDERER: &str = "softgl software rasterizer";
pub const VERSION: &str = "1.5 softgl";
pub const EXTENSIONS: &str = "";
