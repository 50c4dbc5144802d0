//! A checkerboard-textured, spinning cube. The texture is generated in memory rather than
//! loaded from a file — texture file I/O is host-application glue, not this crate's job.

use softgl_core::{Cap, Context, MagFilter, MatrixMode, MinFilter, PixelFormat, PrimitiveMode, TexEnvMode, TexWrap};
use softgl_math::Color;

const CHECKER_SIZE: u32 = 64;

fn checkerboard() -> Vec<u8> {
    let mut data = Vec::with_capacity((CHECKER_SIZE * CHECKER_SIZE * 3) as usize);
    for y in 0..CHECKER_SIZE {
        for x in 0..CHECKER_SIZE {
            let tile = ((x / 8) + (y / 8)) % 2;
            let (r, g, b) = if tile == 0 { (230u8, 230, 230) } else { (40u8, 60, 160) };
            data.extend_from_slice(&[r, g, b]);
        }
    }
    data
}

/// Corners and texcoords for one cube face, wound CCW as seen from outside.
const FACES: [[([f32; 3], [f32; 2]); 4]; 6] = [
    [
        ([1.0, -1.0, -1.0], [0.0, 0.0]),
        ([1.0, 1.0, -1.0], [1.0, 0.0]),
        ([1.0, 1.0, 1.0], [1.0, 1.0]),
        ([1.0, -1.0, 1.0], [0.0, 1.0]),
    ],
    [
        ([-1.0, -1.0, 1.0], [0.0, 0.0]),
        ([-1.0, 1.0, 1.0], [1.0, 0.0]),
        ([-1.0, 1.0, -1.0], [1.0, 1.0]),
        ([-1.0, -1.0, -1.0], [0.0, 1.0]),
    ],
    [
        ([-1.0, 1.0, -1.0], [0.0, 0.0]),
        ([-1.0, 1.0, 1.0], [1.0, 0.0]),
        ([1.0, 1.0, 1.0], [1.0, 1.0]),
        ([1.0, 1.0, -1.0], [0.0, 1.0]),
    ],
    [
        ([-1.0, -1.0, 1.0], [0.0, 0.0]),
        ([-1.0, -1.0, -1.0], [1.0, 0.0]),
        ([1.0, -1.0, -1.0], [1.0, 1.0]),
        ([1.0, -1.0, 1.0], [0.0, 1.0]),
    ],
    [
        ([-1.0, -1.0, 1.0], [0.0, 0.0]),
        ([1.0, -1.0, 1.0], [1.0, 0.0]),
        ([1.0, 1.0, 1.0], [1.0, 1.0]),
        ([-1.0, 1.0, 1.0], [0.0, 1.0]),
    ],
    [
        ([1.0, -1.0, -1.0], [0.0, 0.0]),
        ([-1.0, -1.0, -1.0], [1.0, 0.0]),
        ([-1.0, 1.0, -1.0], [1.0, 1.0]),
        ([1.0, 1.0, -1.0], [0.0, 1.0]),
    ],
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
    ctx.translate(0.0, 0.0, -5.0);
    ctx.rotate(20.0, 1.0, 0.0, 0.0);
    ctx.rotate(-30.0, 0.0, 1.0, 0.0);

    let names = ctx.gen_textures(1);
    let tex = names[0];
    ctx.bind_texture(tex);
    ctx.tex_image_2d(CHECKER_SIZE, CHECKER_SIZE, PixelFormat::Rgb, &checkerboard());
    ctx.tex_parameter_min_filter(MinFilter::LinearMipmapLinear);
    ctx.tex_parameter_mag_filter(MagFilter::Linear);
    ctx.tex_parameter_wrap(TexWrap::Repeat, TexWrap::Repeat);
    ctx.tex_env_mode(TexEnvMode::Modulate);

    ctx.enable(Cap::DepthTest);
    ctx.enable(Cap::Texture2D);

    ctx.clear_color(Color::new(0.02, 0.02, 0.05, 1.0));
    ctx.clear_color_buffer();
    ctx.clear_depth_value(1.0);
    ctx.clear_depth_buffer();

    ctx.color(1.0, 1.0, 1.0, 1.0);
    ctx.begin(PrimitiveMode::Quads);
    for face in FACES {
        for (pos, uv) in face {
            ctx.tex_coord(uv[0], uv[1]);
            ctx.vertex(pos[0], pos[1], pos[2]);
        }
    }
    ctx.end();

    softgl::check_errors(&mut ctx, "textured_cube");
    softgl::save_png(&ctx, "textured_cube.png");
}
