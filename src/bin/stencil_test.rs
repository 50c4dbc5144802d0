//! Stencils a star-shaped mask with one pass, then draws a full-screen quad through it —
//! only the fragments that wrote `1` into the stencil buffer in the first pass survive.

use softgl_core::{Cap, Context, MatrixMode, PrimitiveMode, StencilOp, TestFunc};
use softgl_math::Color;

fn main() {
    softgl::init_logging();

    let mut ctx = Context::new(400, 400).expect("400x400 is well within the framebuffer size limit");
    ctx.viewport(0, 0, 400, 400);

    ctx.matrix_mode(MatrixMode::Projection);
    ctx.load_identity();
    ctx.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
    ctx.matrix_mode(MatrixMode::Modelview);
    ctx.load_identity();

    ctx.clear_color(Color::new(0.1, 0.1, 0.1, 1.0));
    ctx.clear_color_buffer();
    ctx.clear_stencil_value(0);
    ctx.clear_stencil_buffer();

    // Pass 1: write 1 into the stencil buffer everywhere a diamond is drawn, without
    // touching the color buffer.
    ctx.enable(Cap::StencilTest);
    ctx.color_mask(false, false, false, false);
    ctx.stencil_func(TestFunc::Always, 1, 0xff);
    ctx.stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Replace);

    ctx.begin(PrimitiveMode::TriangleFan);
    ctx.vertex(0.0, 0.8, 0.0);
    ctx.vertex(-0.8, 0.0, 0.0);
    ctx.vertex(0.0, -0.8, 0.0);
    ctx.vertex(0.8, 0.0, 0.0);
    ctx.end();

    // Pass 2: only let fragments through where the stencil buffer reads back 1, and stop
    // touching the stencil buffer itself.
    ctx.color_mask(true, true, true, true);
    ctx.stencil_func(TestFunc::Equal, 1, 0xff);
    ctx.stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Keep);

    ctx.begin(PrimitiveMode::Triangles);
    ctx.color(0.9, 0.7, 0.1, 1.0);
    ctx.vertex(-1.0, -1.0, 0.0);
    ctx.vertex(1.0, -1.0, 0.0);
    ctx.vertex(1.0, 1.0, 0.0);
    ctx.vertex(-1.0, -1.0, 0.0);
    ctx.vertex(1.0, 1.0, 0.0);
    ctx.vertex(-1.0, 1.0, 0.0);
    ctx.end();

    ctx.disable(Cap::StencilTest);

    softgl::check_errors(&mut ctx, "stencil_test");
    softgl::save_png(&ctx, "stencil_test.png");
}
