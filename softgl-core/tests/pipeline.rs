//! End-to-end scenarios from the pipeline's testable-properties list: whole
//! command streams in, framebuffer contents checked out. Complements the
//! `#[cfg(test)]` modules colocated with each stage, which check one stage in
//! isolation.

use softgl_core::{
    BlendFactor, Cap, Context, Face, ListMode, MagFilter, MatrixMode, MinFilter, PixelFormat, PolygonMode, PrimitiveMode, ShadeModel,
    TestFunc,
};
use softgl_math::Color;

fn perspective_ctx(w: i32, h: i32, fov_deg: f32, near: f32, far: f32) -> Context {
    let mut ctx = Context::new(w, h).unwrap();
    ctx.viewport(0, 0, w, h);
    let top = near * (fov_deg.to_radians() / 2.0).tan();
    let right = top * (w as f32 / h as f32);
    ctx.matrix_mode(MatrixMode::Projection);
    ctx.load_identity();
    ctx.frustum(-right, right, -top, top, near, far);
    ctx.matrix_mode(MatrixMode::Modelview);
    ctx.load_identity();
    ctx
}

fn draw_quad_at(ctx: &mut Context, z: f32, color: Color) {
    ctx.color(color.r, color.g, color.b, color.a);
    ctx.begin(PrimitiveMode::Triangles);
    ctx.vertex(-5.0, -5.0, z);
    ctx.vertex(5.0, -5.0, z);
    ctx.vertex(5.0, 5.0, z);
    ctx.vertex(-5.0, -5.0, z);
    ctx.vertex(5.0, 5.0, z);
    ctx.vertex(-5.0, 5.0, z);
    ctx.end();
}

/// Scenario 2: perspective triangle depth ordering. A farther red quad is drawn
/// first and an overlapping nearer green quad second; every pixel in the
/// intersection must end up green once depth testing is enabled.
#[test]
fn perspective_depth_ordering_favors_the_nearer_quad() {
    let mut ctx = perspective_ctx(100, 100, 60.0, 1.0, 100.0);
    ctx.enable(Cap::DepthTest);
    ctx.depth_func(TestFunc::Less);
    ctx.clear_depth_value(1.0);
    ctx.clear_depth_buffer();
    ctx.clear_color(Color::BLACK);
    ctx.clear_color_buffer();

    draw_quad_at(&mut ctx, -5.0, Color::new(1.0, 0.0, 0.0, 1.0));
    draw_quad_at(&mut ctx, -3.0, Color::new(0.0, 1.0, 0.0, 1.0));

    let want = Color::new(0.0, 1.0, 0.0, 1.0).pack();
    for y in 20..80 {
        for x in 20..80 {
            assert_eq!(ctx.framebuffer().get_pixel(x, y), want, "pixel ({x}, {y}) should be green");
        }
    }
}

/// Scenario 6 (reduced): perspective-correct texturing. A quad tilted away from
/// the camera samples a 2x2 checker texture; since the quad recedes in depth,
/// naive affine interpolation would sample the wrong half partway across,
/// while perspective-correct interpolation keeps the boundary where the UVs
/// say it should be.
#[test]
fn perspective_correct_texturing_samples_the_right_checker_cell() {
    let mut ctx = perspective_ctx(64, 64, 90.0, 1.0, 10.0);

    let name = ctx.gen_textures(1)[0];
    ctx.bind_texture(name);
    ctx.tex_parameter_min_filter(MinFilter::Nearest);
    ctx.tex_parameter_mag_filter(MagFilter::Nearest);
    // Red / white / white / red checker, row-major top-to-bottom.
    #[rustfmt::skip]
    let texels: [u8; 16] = [
        255, 0, 0, 255,    255, 255, 255, 255,
        255, 255, 255, 255, 255, 0, 0, 255,
    ];
    ctx.tex_image_2d(2, 2, PixelFormat::Rgba, &texels);
    ctx.enable(Cap::Texture2D);

    // A quad tilted so its far edge recedes from the camera: near-left/near-right
    // close to the eye, far-left/far-right further away and narrower in NDC.
    ctx.color(1.0, 1.0, 1.0, 1.0);
    ctx.begin(PrimitiveMode::Triangles);
    ctx.tex_coord(0.0, 0.0);
    ctx.vertex(-3.0, -1.0, -2.0);
    ctx.tex_coord(1.0, 0.0);
    ctx.vertex(1.0, -1.0, -2.0);
    ctx.tex_coord(1.0, 1.0);
    ctx.vertex(0.3, 1.0, -8.0);
    ctx.tex_coord(0.0, 0.0);
    ctx.vertex(-3.0, -1.0, -2.0);
    ctx.tex_coord(1.0, 1.0);
    ctx.vertex(0.3, 1.0, -8.0);
    ctx.tex_coord(0.0, 1.0);
    ctx.vertex(-0.3, 1.0, -8.0);
    ctx.end();

    // Somewhere in the near-left portion of the quad should land in the red
    // (u < 0.5, v < 0.5) checker cell.
    let c = Color::unpack(ctx.framebuffer().get_pixel(20, 40));
    assert!(c.r > 0.5 && c.g < 0.5, "expected the red checker cell, got {c:?}");
}

/// Display-list recording preserves semantics: running a command sequence
/// through `new_list`/`end_list`/`call_list` must produce the same
/// framebuffer as running it directly.
#[test]
fn display_list_playback_matches_direct_execution() {
    fn paint(ctx: &mut Context) {
        ctx.color(0.0, 0.5, 1.0, 1.0);
        ctx.begin(PrimitiveMode::Triangles);
        ctx.vertex(-0.8, -0.8, 0.0);
        ctx.vertex(0.8, -0.8, 0.0);
        ctx.vertex(0.0, 0.8, 0.0);
        ctx.end();
    }

    let mut direct = Context::new(32, 32).unwrap();
    direct.viewport(0, 0, 32, 32);
    direct.matrix_mode(MatrixMode::Projection);
    direct.load_identity();
    direct.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
    direct.matrix_mode(MatrixMode::Modelview);
    direct.load_identity();
    direct.clear_color(Color::BLACK);
    direct.clear_color_buffer();
    paint(&mut direct);

    let mut recorded = Context::new(32, 32).unwrap();
    recorded.viewport(0, 0, 32, 32);
    recorded.matrix_mode(MatrixMode::Projection);
    recorded.load_identity();
    recorded.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
    recorded.matrix_mode(MatrixMode::Modelview);
    recorded.load_identity();
    recorded.clear_color(Color::BLACK);
    recorded.clear_color_buffer();

    let name = recorded.gen_lists(1);
    recorded.new_list(name, ListMode::Compile);
    paint(&mut recorded);
    recorded.end_list();
    recorded.call_list(name);

    for y in 0..32 {
        for x in 0..32 {
            assert_eq!(
                direct.framebuffer().get_pixel(x, y),
                recorded.framebuffer().get_pixel(x, y),
                "mismatch at ({x}, {y})"
            );
        }
    }
}

/// Matrix pushes and pops are inverses: any sequence of mutations between a
/// push and its matching pop must leave the top of the stack unchanged.
#[test]
fn push_pop_restores_the_matrix() {
    let mut ctx = Context::new(4, 4).unwrap();
    ctx.matrix_mode(MatrixMode::Modelview);
    ctx.load_identity();
    ctx.translate(1.0, 2.0, 3.0);
    let before = ctx.modelview_matrix();

    ctx.push_matrix();
    ctx.translate(10.0, -5.0, 2.0);
    ctx.rotate(45.0, 0.0, 1.0, 0.0);
    ctx.scale(2.0, 2.0, 2.0);
    ctx.pop_matrix();

    assert_eq!(ctx.modelview_matrix(), before);
}

/// `glDrawElements`: the same triangle drawn via an index list into a shared
/// vertex array must match the immediate-mode equivalent drawn directly.
#[test]
fn draw_elements_matches_begin_end() {
    use softgl_core::ArrayVertex;
    use softgl_math::Vec3;

    fn new_ortho(w: i32, h: i32) -> Context {
        let mut ctx = Context::new(w, h).unwrap();
        ctx.viewport(0, 0, w, h);
        ctx.matrix_mode(MatrixMode::Projection);
        ctx.load_identity();
        ctx.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
        ctx.matrix_mode(MatrixMode::Modelview);
        ctx.load_identity();
        ctx
    }

    let mut immediate = new_ortho(32, 32);
    immediate.clear_color(Color::BLACK);
    immediate.clear_color_buffer();
    immediate.color(1.0, 1.0, 0.0, 1.0);
    immediate.begin(PrimitiveMode::Triangles);
    immediate.vertex(-0.8, -0.8, 0.0);
    immediate.vertex(0.8, -0.8, 0.0);
    immediate.vertex(0.0, 0.8, 0.0);
    immediate.end();

    let mut indexed = new_ortho(32, 32);
    indexed.clear_color(Color::BLACK);
    indexed.clear_color_buffer();
    indexed.color(1.0, 1.0, 0.0, 1.0);
    let verts = [
        ArrayVertex { position: Vec3::new(-0.8, -0.8, 0.0), ..Default::default() },
        ArrayVertex { position: Vec3::new(0.8, -0.8, 0.0), ..Default::default() },
        ArrayVertex { position: Vec3::new(0.0, 0.8, 0.0), ..Default::default() },
    ];
    indexed.draw_elements(PrimitiveMode::Triangles, &[0, 1, 2], &verts);

    for y in 0..32 {
        for x in 0..32 {
            assert_eq!(immediate.framebuffer().get_pixel(x, y), indexed.framebuffer().get_pixel(x, y));
        }
    }
}

/// Flat-masked color writes never touch the destination channel (§8: "for any
/// color written through a fully masked channel, the destination channel is
/// unchanged").
#[test]
fn fully_masked_color_channel_is_preserved() {
    let mut ctx = Context::new(8, 8).unwrap();
    ctx.viewport(0, 0, 8, 8);
    ctx.matrix_mode(MatrixMode::Projection);
    ctx.load_identity();
    ctx.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
    ctx.matrix_mode(MatrixMode::Modelview);
    ctx.load_identity();

    ctx.clear_color(Color::new(0.25, 0.5, 0.75, 1.0));
    ctx.clear_color_buffer();

    // Mask out red entirely; green/blue/alpha stay writable.
    ctx.color_mask(false, true, true, true);
    ctx.color(1.0, 0.0, 0.0, 1.0);
    ctx.begin(PrimitiveMode::Triangles);
    ctx.vertex(-1.0, -1.0, 0.0);
    ctx.vertex(1.0, -1.0, 0.0);
    ctx.vertex(1.0, 1.0, 0.0);
    ctx.vertex(-1.0, -1.0, 0.0);
    ctx.vertex(1.0, 1.0, 0.0);
    ctx.vertex(-1.0, 1.0, 0.0);
    ctx.end();

    let c = Color::unpack(ctx.framebuffer().get_pixel(4, 4));
    assert!((c.r - 0.25).abs() < 1e-3, "red channel should be untouched by the masked write, got {c:?}");
    assert_eq!(c.g, 0.0);
    assert_eq!(c.b, 0.0);
}

/// Degenerate (zero screen-space area) triangles write no pixels.
#[test]
fn zero_area_triangle_writes_nothing() {
    let mut ctx = Context::new(16, 16).unwrap();
    ctx.viewport(0, 0, 16, 16);
    ctx.matrix_mode(MatrixMode::Projection);
    ctx.load_identity();
    ctx.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
    ctx.matrix_mode(MatrixMode::Modelview);
    ctx.load_identity();
    ctx.clear_color(Color::BLACK);
    ctx.clear_color_buffer();

    ctx.color(1.0, 1.0, 1.0, 1.0);
    ctx.begin(PrimitiveMode::Triangles);
    // All three vertices collinear (in fact identical in x), zero signed area.
    ctx.vertex(0.0, -0.5, 0.0);
    ctx.vertex(0.0, 0.0, 0.0);
    ctx.vertex(0.0, 0.5, 0.0);
    ctx.end();

    for y in 0..16 {
        for x in 0..16 {
            assert_eq!(ctx.framebuffer().get_pixel(x, y), Color::BLACK.pack());
        }
    }
}

/// Wireframe polygon mode rasterizes the triangle's edges as lines rather than
/// filling its interior.
#[test]
fn line_polygon_mode_draws_edges_not_interior() {
    let mut ctx = Context::new(32, 32).unwrap();
    ctx.viewport(0, 0, 32, 32);
    ctx.matrix_mode(MatrixMode::Projection);
    ctx.load_identity();
    ctx.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
    ctx.matrix_mode(MatrixMode::Modelview);
    ctx.load_identity();
    ctx.clear_color(Color::BLACK);
    ctx.clear_color_buffer();

    ctx.polygon_mode(Face::FrontAndBack, PolygonMode::Line);
    ctx.color(1.0, 1.0, 1.0, 1.0);
    ctx.begin(PrimitiveMode::Triangles);
    ctx.vertex(-0.8, -0.8, 0.0);
    ctx.vertex(0.8, -0.8, 0.0);
    ctx.vertex(0.0, 0.8, 0.0);
    ctx.end();

    // Centroid of the triangle must stay untouched; the interior is not filled.
    assert_eq!(ctx.framebuffer().get_pixel(16, 20), Color::BLACK.pack());
}

/// Gouraud (smooth) shading interpolates vertex colors rather than taking a
/// single flat provoking-vertex color.
#[test]
fn smooth_shading_interpolates_between_vertex_colors() {
    let mut ctx = Context::new(64, 64).unwrap();
    ctx.viewport(0, 0, 64, 64);
    ctx.matrix_mode(MatrixMode::Projection);
    ctx.load_identity();
    ctx.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
    ctx.matrix_mode(MatrixMode::Modelview);
    ctx.load_identity();
    ctx.clear_color(Color::BLACK);
    ctx.clear_color_buffer();
    ctx.shade_model(ShadeModel::Smooth);

    ctx.begin(PrimitiveMode::Triangles);
    ctx.color(1.0, 0.0, 0.0, 1.0);
    ctx.vertex(-0.9, -0.9, 0.0);
    ctx.color(0.0, 1.0, 0.0, 1.0);
    ctx.vertex(0.9, -0.9, 0.0);
    ctx.color(0.0, 0.0, 1.0, 1.0);
    ctx.vertex(0.0, 0.9, 0.0);
    ctx.end();

    let near_red_corner = Color::unpack(ctx.framebuffer().get_pixel(8, 56));
    let near_blue_corner = Color::unpack(ctx.framebuffer().get_pixel(32, 6));
    assert!(near_red_corner.r > near_red_corner.b, "{near_red_corner:?}");
    assert!(near_blue_corner.b > near_blue_corner.r, "{near_blue_corner:?}");
}

/// Blend `source-alpha-saturate` is only meaningful as the source factor;
/// `one`/`constant-color` style destination factors should be left unaffected
/// by the saturate clamp, exercised here via a straightforward additive blend.
#[test]
fn additive_blend_accumulates_past_the_clear_color() {
    let mut ctx = Context::new(4, 4).unwrap();
    ctx.viewport(0, 0, 4, 4);
    ctx.matrix_mode(MatrixMode::Projection);
    ctx.load_identity();
    ctx.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
    ctx.matrix_mode(MatrixMode::Modelview);
    ctx.load_identity();
    ctx.clear_color(Color::new(0.2, 0.2, 0.2, 1.0));
    ctx.clear_color_buffer();
    ctx.enable(Cap::Blend);
    ctx.blend_func(BlendFactor::One, BlendFactor::One);

    ctx.color(0.3, 0.0, 0.0, 1.0);
    ctx.begin(PrimitiveMode::Triangles);
    ctx.vertex(-1.0, -1.0, 0.0);
    ctx.vertex(1.0, -1.0, 0.0);
    ctx.vertex(1.0, 1.0, 0.0);
    ctx.vertex(-1.0, -1.0, 0.0);
    ctx.vertex(1.0, 1.0, 0.0);
    ctx.vertex(-1.0, 1.0, 0.0);
    ctx.end();

    let c = Color::unpack(ctx.framebuffer().get_pixel(2, 2));
    assert!((c.r - 0.5).abs() < 1e-2, "{c:?}");
}
