//! Shared plumbing for the demo binaries in `src/bin/`: none of this is part of the
//! rasterizer itself, just the PNG-writing and error-checking glue a real windowed
//! application would otherwise provide via its display surface.

use std::path::Path;

use softgl_core::Context;

/// Copies the context's color buffer out as a PNG. The framebuffer's packed byte layout
/// (R, G, B, A per pixel) is already what `image::RgbaImage` expects.
pub fn save_png(ctx: &Context, path: impl AsRef<Path>) {
    let fb = ctx.framebuffer();
    let (width, height) = (fb.width() as u32, fb.height() as u32);
    let bytes = fb.color_bytes().to_vec();
    let image = image::RgbaImage::from_raw(width, height, bytes).expect("framebuffer byte length is always width * height * 4");
    if let Err(e) = image.save(path.as_ref()) {
        log::error!("failed to write {}: {e}", path.as_ref().display());
    } else {
        log::info!("wrote {}", path.as_ref().display());
    }
}

/// Drains and logs any errors latched since the last call, the way a debug build would
/// sprinkle `glGetError` checks through a sample program.
pub fn check_errors(ctx: &mut Context, where_: &str) {
    while let Some(err) = ctx.get_error() {
        log::warn!("{where_}: {err}");
    }
}

pub fn init_logging() {
    simple_logger::SimpleLogger::new().with_level(log::LevelFilter::Info).init().ok();
}
