//! The simplest possible frame: set a clear color and flush it to a PNG. No geometry at all.

use softgl_core::Context;
use softgl_math::Color;

fn main() {
    softgl::init_logging();

    let mut ctx = Context::new(640, 480).expect("640x480 is well within the framebuffer size limit");
    ctx.clear_color(Color::new(0.1, 0.2, 0.35, 1.0));
    ctx.clear_color_buffer();

    softgl::check_errors(&mut ctx, "clear_screen");
    softgl::save_png(&ctx, "clear_screen.png");
}
