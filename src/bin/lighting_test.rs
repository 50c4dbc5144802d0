//! A single directional-lit cube under a perspective projection, exercising the fixed-function
//! Blinn-Phong path: one enabled positional light, a shiny material, smooth shading.

use softgl_core::{Cap, Context, Face, LightParam, MaterialParam, MatrixMode, PrimitiveMode};
use softgl_math::Color;

/// One cube face: four CCW (as seen from outside) corners sharing a flat normal.
const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
    ([1.0, 0.0, 0.0], [[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]]),
    ([-1.0, 0.0, 0.0], [[-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0]]),
    ([0.0, 1.0, 0.0], [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]]),
    ([0.0, -1.0, 0.0], [[-1.0, -1.0, 1.0], [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0]]),
    ([0.0, 0.0, 1.0], [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]]),
    ([0.0, 0.0, -1.0], [[1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0]]),
];

fn main() {
    softgl::init_logging();

    let mut ctx = Context::new(640, 480).expect("640x480 is well within the framebuffer size limit");
    ctx.viewport(0, 0, 640, 480);

    ctx.matrix_mode(MatrixMode::Projection);
    ctx.load_identity();
    ctx.frustum(-1.0, 1.0, -0.75, 0.75, 1.0, 50.0);
    ctx.matrix_mode(MatrixMode::Modelview);
    ctx.load_identity();
    ctx.translate(0.0, 0.0, -6.0);
    ctx.rotate(25.0, 1.0, 0.0, 0.0);
    ctx.rotate(35.0, 0.0, 1.0, 0.0);

    ctx.enable(Cap::DepthTest);
    ctx.enable(Cap::Lighting);
    ctx.enable(Cap::Light(0));
    ctx.enable(Cap::Normalize);

    ctx.light_fv(0, LightParam::Position, [4.0, 5.0, 6.0, 1.0]);
    ctx.light_fv(0, LightParam::Diffuse, [0.9, 0.85, 0.7, 1.0]);
    ctx.light_fv(0, LightParam::Specular, [1.0, 1.0, 1.0, 1.0]);
    ctx.light_model_ambient(Color::new(0.15, 0.15, 0.2, 1.0));

    ctx.material_fv(Face::FrontAndBack, MaterialParam::Diffuse, [0.7, 0.2, 0.2, 1.0]);
    ctx.material_fv(Face::FrontAndBack, MaterialParam::Specular, [0.6, 0.6, 0.6, 1.0]);
    ctx.material_f(Face::FrontAndBack, MaterialParam::Shininess, 40.0);

    ctx.clear_color(Color::new(0.05, 0.05, 0.08, 1.0));
    ctx.clear_color_buffer();
    ctx.clear_depth_value(1.0);
    ctx.clear_depth_buffer();

    ctx.begin(PrimitiveMode::Quads);
    for (normal, corners) in FACES {
        ctx.normal(normal[0], normal[1], normal[2]);
        for corner in corners {
            ctx.vertex(corner[0], corner[1], corner[2]);
        }
    }
    ctx.end();

    softgl::check_errors(&mut ctx, "lighting_test");
    softgl::save_png(&ctx, "lighting_test.png");
}
