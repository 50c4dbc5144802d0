//! A colorized triangle under an orthographic projection — the first real draw call most
//! people try against a new GL implementation.

use softgl_core::{Context, MatrixMode, PrimitiveMode};
use softgl_math::Color;

fn main() {
    softgl::init_logging();

    let mut ctx = Context::new(640, 480).expect("640x480 is well within the framebuffer size limit");
    ctx.viewport(0, 0, 640, 480);

    ctx.matrix_mode(MatrixMode::Projection);
    ctx.load_identity();
    ctx.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
    ctx.matrix_mode(MatrixMode::Modelview);
    ctx.load_identity();

    ctx.clear_color(Color::BLACK);
    ctx.clear_color_buffer();

    ctx.begin(PrimitiveMode::Triangles);
    ctx.color(1.0, 0.0, 0.0, 1.0);
    ctx.vertex(-0.8, -0.8, 0.0);
    ctx.color(0.0, 1.0, 0.0, 1.0);
    ctx.vertex(0.8, -0.8, 0.0);
    ctx.color(0.0, 0.0, 1.0, 1.0);
    ctx.vertex(0.0, 0.8, 0.0);
    ctx.end();

    softgl::check_errors(&mut ctx, "hello_triangle");
    softgl::save_png(&ctx, "hello_triangle.png");
}
