use softgl_math::{Color, Mat4, Vec2, Vec3, Vec4};

use crate::buffer::BufferStore;
use crate::enums::{
    BlendFactor, BufferUsage, Cap, Face, FogMode, HintMode, MagFilter, MatrixMode, MinFilter, PixelFormat, PolygonMode, PrimitiveMode,
    ShadeModel, StencilOp, TestFunc, TexEnvMode, TexWrap,
};
use crate::error::{ErrorLatch, GlError};
use crate::framebuffer::Framebuffer;
use crate::lighting::{Light, LightParam, Material, MaterialParam};
use crate::limits::{self, MATRIX_STACK_DEPTH, MAX_LIST_RECURSION};
use crate::list::{Command, ListStore};
use crate::texture::TextureStore;
use crate::vertex::Vertex;

/// A matrix stack with a fixed maximum depth (24 for every mode). Push copies the top;
/// pop discards it; over/underflow latch the corresponding error and leave the stack
/// unchanged, matching §3's "Matrix stacks" invariant.
struct MatrixStack {
    stack: Vec<Mat4>,
}

impl MatrixStack {
    fn new() -> MatrixStack {
        MatrixStack { stack: vec![Mat4::IDENTITY] }
    }

    fn top(&self) -> Mat4 {
        *self.stack.last().expect("matrix stack is never empty")
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        self.stack.last_mut().expect("matrix stack is never empty")
    }

    fn push(&mut self) -> Result<(), GlError> {
        if self.stack.len() >= MATRIX_STACK_DEPTH {
            return Err(GlError::StackOverflow);
        }
        self.stack.push(self.top());
        Ok(())
    }

    fn pop(&mut self) -> Result<(), GlError> {
        if self.stack.len() <= 1 {
            return Err(GlError::StackUnderflow);
        }
        self.stack.pop();
        Ok(())
    }
}

/// Stencil test/op parameters for one face (OpenGL 1.x has only one, unlike later separate
/// front/back stencil state, but keeping it as its own struct mirrors the grouping the blend
/// and depth parameters get).
#[derive(Clone, Copy)]
struct StencilState {
    func: TestFunc,
    reference: i32,
    read_mask: u8,
    write_mask: u8,
    fail: StencilOp,
    zfail: StencilOp,
    zpass: StencilOp,
}

impl Default for StencilState {
    fn default() -> StencilState {
        StencilState {
            func: TestFunc::Always,
            reference: 0,
            read_mask: 0xff,
            write_mask: 0xff,
            fail: StencilOp::Keep,
            zfail: StencilOp::Keep,
            zpass: StencilOp::Keep,
        }
    }
}

/// Client-side vertex the application hands to [`Context::draw_arrays`]; stands in for the
/// enabled-pointer-plus-stride vertex array descriptors of the real API (kept pointer-free
/// since this crate never holds borrowed references across a frame).
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayVertex {
    pub position: Vec3,
    pub color: Option<Color>,
    pub texcoord: Option<Vec2>,
    pub normal: Option<Vec3>,
}

/// A single software OpenGL 1.x context: framebuffer, object stores, and the entire current
/// pipeline state. Every front-end entry point is an inherent `&mut self` method; there is no
/// process-wide "current context".
pub struct Context {
    pub(crate) framebuffer: Framebuffer,
    pub(crate) textures: TextureStore,
    pub(crate) buffers: BufferStore,
    pub(crate) lists: ListStore,
    error: ErrorLatch,

    modelview: MatrixStack,
    projection: MatrixStack,
    texture_matrix: MatrixStack,
    matrix_mode: MatrixMode,

    current_color: Color,
    current_texcoord: Vec2,
    current_normal: Vec3,

    inside_begin_end: bool,
    current_mode: Option<PrimitiveMode>,
    vertex_buffer: Vec<Vertex>,

    pub(crate) depth_test: bool,
    pub(crate) stencil_test: bool,
    pub(crate) alpha_test: bool,
    pub(crate) blend: bool,
    pub(crate) scissor_test: bool,
    cull_face: bool,
    pub(crate) texture_2d: bool,
    lighting: bool,
    color_material: bool,
    pub(crate) fog: bool,
    normalize: bool,

    pub(crate) depth_func: TestFunc,
    pub(crate) depth_write_mask: bool,
    depth_clear: f32,

    stencil: StencilState,
    stencil_clear: u8,

    pub(crate) alpha_func: TestFunc,
    pub(crate) alpha_ref: f32,

    pub(crate) blend_src: BlendFactor,
    pub(crate) blend_dst: BlendFactor,
    pub(crate) blend_color: Color,

    pub(crate) color_mask: [bool; 4],
    clear_color: Color,

    cull_face_mode: Face,
    front_face_ccw: bool,

    pub(crate) shade_model: ShadeModel,
    polygon_mode_front: PolygonMode,
    polygon_mode_back: PolygonMode,

    lights: [Light; limits::MAX_LIGHTS],
    material_front: Material,
    material_back: Material,
    light_model_ambient: Color,
    local_viewer: bool,
    color_material_face: Face,
    color_material_param: MaterialParam,

    pub(crate) fog_mode: FogMode,
    pub(crate) fog_start: f32,
    pub(crate) fog_end: f32,
    pub(crate) fog_density: f32,
    pub(crate) fog_color: Color,

    pub(crate) bound_texture: u32,
    pub(crate) tex_env_mode: TexEnvMode,
    pub(crate) tex_env_color: Color,

    viewport: (i32, i32, i32, i32),
    pub(crate) scissor: (i32, i32, i32, i32),

    depth_near: f32,
    depth_far: f32,

    point_size: f32,
    line_width: f32,

    light_model_two_side: bool,
    perspective_hint: HintMode,

    raster_pos: Option<(i32, i32)>,
    raster_color: Color,

    list_recording: Option<(u32, crate::enums::ListMode)>,
    list_call_depth: u32,
}

impl Context {
    pub fn new(width: i32, height: i32) -> Option<Context> {
        let framebuffer = Framebuffer::new(width, height)?;
        let viewport = (0, 0, width, height);
        Some(Context {
            framebuffer,
            textures: TextureStore::new(),
            buffers: BufferStore::new(),
            lists: ListStore::new(),
            error: ErrorLatch::new(),

            modelview: MatrixStack::new(),
            projection: MatrixStack::new(),
            texture_matrix: MatrixStack::new(),
            matrix_mode: MatrixMode::Modelview,

            current_color: Color::WHITE,
            current_texcoord: Vec2::ZERO,
            current_normal: Vec3::new(0.0, 0.0, 1.0),

            inside_begin_end: false,
            current_mode: None,
            vertex_buffer: Vec::new(),

            depth_test: false,
            stencil_test: false,
            alpha_test: false,
            blend: false,
            scissor_test: false,
            cull_face: false,
            texture_2d: false,
            lighting: false,
            color_material: false,
            fog: false,
            normalize: false,

            depth_func: TestFunc::Less,
            depth_write_mask: true,
            depth_clear: 1.0,

            stencil: StencilState::default(),
            stencil_clear: 0,

            alpha_func: TestFunc::Always,
            alpha_ref: 0.0,

            blend_src: BlendFactor::One,
            blend_dst: BlendFactor::Zero,
            blend_color: Color::TRANSPARENT,

            color_mask: [true; 4],
            clear_color: Color::BLACK,

            cull_face_mode: Face::Back,
            front_face_ccw: true,

            shade_model: ShadeModel::Smooth,
            polygon_mode_front: PolygonMode::Fill,
            polygon_mode_back: PolygonMode::Fill,

            lights: std::array::from_fn(Light::new),
            material_front: Material::default(),
            material_back: Material::default(),
            light_model_ambient: Color::new(0.2, 0.2, 0.2, 1.0),
            local_viewer: false,
            color_material_face: Face::FrontAndBack,
            color_material_param: MaterialParam::Ambient,

            fog_mode: FogMode::Exp,
            fog_start: 0.0,
            fog_end: 1.0,
            fog_density: 1.0,
            fog_color: Color::BLACK,

            bound_texture: 0,
            tex_env_mode: TexEnvMode::Modulate,
            tex_env_color: Color::TRANSPARENT,

            viewport,
            scissor: viewport,

            depth_near: 0.0,
            depth_far: 1.0,

            point_size: 1.0,
            line_width: 1.0,

            light_model_two_side: false,
            perspective_hint: HintMode::DontCare,

            raster_pos: Some((0, 0)),
            raster_color: Color::WHITE,

            list_recording: None,
            list_call_depth: 0,
        })
    }

    // ---- error handling -------------------------------------------------

    pub fn get_error(&mut self) -> Option<GlError> {
        self.error.take()
    }

    fn set_error(&mut self, err: GlError) {
        self.error.set(err);
    }

    /// `true` if recording into a display list and the call should be diverted instead of
    /// (or, for compile-and-execute, in addition to) running directly.
    fn recording(&self) -> bool {
        self.list_recording.is_some()
    }

    fn record(&mut self, cmd: Command) {
        if let Some((name, _)) = self.list_recording {
            self.lists.push(name, cmd);
        }
    }

    fn should_execute(&self) -> bool {
        match self.list_recording {
            None => true,
            Some((_, crate::enums::ListMode::CompileAndExecute)) => true,
            Some((_, crate::enums::ListMode::Compile)) => false,
        }
    }

    /// State mutators call this first; returns `false` (call should no-op) if a display list
    /// is recording in compile-only mode, or if inside begin/end where only the four vertex
    /// attribute setters are legal.
    fn guard_mutator(&mut self) -> bool {
        if self.inside_begin_end {
            self.set_error(GlError::InvalidOperation);
            return false;
        }
        true
    }

    // ---- queries ----------------------------------------------------------

    pub fn get_integer(&self, what: &str) -> Option<i64> {
        Some(match what {
            "matrix_stack_depth" => limits::MATRIX_STACK_DEPTH as i64,
            "max_lights" => limits::MAX_LIGHTS as i64,
            "max_texture_size" => limits::MAX_TEXTURE_SIZE as i64,
            "max_framebuffer_dim" => limits::MAX_FRAMEBUFFER_DIM as i64,
            "depth_bits" => limits::DEPTH_BITS as i64,
            "stencil_bits" => limits::STENCIL_BITS as i64,
            "max_list_names" => limits::MAX_LISTS as i64,
            "max_list_recursion" => limits::MAX_LIST_RECURSION as i64,
            "max_textures" => limits::MAX_TEXTURES as i64,
            "max_buffers" => limits::MAX_BUFFERS as i64,
            _ => return None,
        })
    }

    pub fn get_string(&self, what: &str) -> Option<&'static str> {
        Some(match what {
            "vendor" => limits::VENDOR,
            "renderer" => limits::RENDERER,
            "version" => limits::VERSION,
            "extensions" => limits::EXTENSIONS,
            _ => return None,
        })
    }

    pub fn is_enabled(&self, cap: Cap) -> bool {
        match cap {
            Cap::DepthTest => self.depth_test,
            Cap::StencilTest => self.stencil_test,
            Cap::AlphaTest => self.alpha_test,
            Cap::Blend => self.blend,
            Cap::ScissorTest => self.scissor_test,
            Cap::CullFace => self.cull_face,
            Cap::Texture2D => self.texture_2d,
            Cap::Lighting => self.lighting,
            Cap::Light(i) => (i as usize) < limits::MAX_LIGHTS && self.lights[i as usize].enabled,
            Cap::ColorMaterial => self.color_material,
            Cap::Fog => self.fog,
            Cap::Normalize => self.normalize,
        }
    }

    pub fn enable(&mut self, cap: Cap) {
        if !self.guard_mutator() {
            return;
        }
        if self.recording() {
            self.record(Command::Enable(cap));
        }
        if !self.should_execute() {
            return;
        }
        self.set_enable(cap, true);
    }

    pub fn disable(&mut self, cap: Cap) {
        if !self.guard_mutator() {
            return;
        }
        if self.recording() {
            self.record(Command::Disable(cap));
        }
        if !self.should_execute() {
            return;
        }
        self.set_enable(cap, false);
    }

    fn set_enable(&mut self, cap: Cap, value: bool) {
        match cap {
            Cap::DepthTest => self.depth_test = value,
            Cap::StencilTest => self.stencil_test = value,
            Cap::AlphaTest => self.alpha_test = value,
            Cap::Blend => self.blend = value,
            Cap::ScissorTest => self.scissor_test = value,
            Cap::CullFace => self.cull_face = value,
            Cap::Texture2D => self.texture_2d = value,
            Cap::Lighting => self.lighting = value,
            Cap::ColorMaterial => self.color_material = value,
            Cap::Fog => self.fog = value,
            Cap::Normalize => self.normalize = value,
            Cap::Light(i) => {
                if (i as usize) < limits::MAX_LIGHTS {
                    self.lights[i as usize].enabled = value;
                } else {
                    self.set_error(GlError::InvalidValue);
                }
            },
        }
    }

    // ---- clears -------------------------------------------------------

    pub fn clear_color(&mut self, c: Color) {
        self.clear_color = coerce_color(c);
    }

    pub fn clear_color_buffer(&mut self) {
        self.framebuffer.clear_color(self.clear_color);
    }

    pub fn clear_depth_value(&mut self, d: f32) {
        self.depth_clear = d.clamp(0.0, 1.0);
    }

    pub fn clear_depth_buffer(&mut self) {
        self.framebuffer.clear_depth(self.depth_clear);
    }

    pub fn clear_stencil_value(&mut self, s: u8) {
        self.stencil_clear = s;
    }

    pub fn clear_stencil_buffer(&mut self) {
        self.framebuffer.clear_stencil(self.stencil_clear);
    }

    /// Clears only inside the scissor rectangle when scissor testing is enabled, per the
    /// "scissor clamps clear" scenario.
    pub fn clear_color_buffer_scissored(&mut self) {
        if !self.scissor_test {
            return self.clear_color_buffer();
        }
        let (sx, sy, sw, sh) = self.scissor;
        let packed = self.clear_color.pack();
        for y in sy..sy + sh {
            for x in sx..sx + sw {
                self.framebuffer.put_pixel(x, y, packed);
            }
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// The top of the modelview stack (the `glGetFloatv(GL_MODELVIEW_MATRIX)` analogue).
    pub fn modelview_matrix(&self) -> Mat4 {
        self.modelview.top()
    }

    // ---- viewport / scissor -------------------------------------------

    pub fn viewport(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w < 0 || h < 0 {
            self.set_error(GlError::InvalidValue);
            return;
        }
        self.viewport = (x, y, w, h);
    }

    pub fn scissor_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w < 0 || h < 0 {
            self.set_error(GlError::InvalidValue);
            return;
        }
        self.scissor = (x, y, w, h);
    }

    // ---- matrix stack ---------------------------------------------------

    pub fn matrix_mode(&mut self, mode: MatrixMode) {
        if !self.guard_mutator() {
            return;
        }
        self.record(Command::MatrixMode(mode));
        if !self.should_execute() {
            return;
        }
        self.matrix_mode = mode;
    }

    fn active_stack(&mut self) -> &mut MatrixStack {
        match self.matrix_mode {
            MatrixMode::Modelview => &mut self.modelview,
            MatrixMode::Projection => &mut self.projection,
            MatrixMode::Texture => &mut self.texture_matrix,
        }
    }

    pub fn push_matrix(&mut self) {
        if !self.guard_mutator() {
            return;
        }
        self.record(Command::PushMatrix);
        if !self.should_execute() {
            return;
        }
        if let Err(e) = self.active_stack().push() {
            self.set_error(e);
        }
    }

    pub fn pop_matrix(&mut self) {
        if !self.guard_mutator() {
            return;
        }
        self.record(Command::PopMatrix);
        if !self.should_execute() {
            return;
        }
        if let Err(e) = self.active_stack().pop() {
            self.set_error(e);
        }
    }

    pub fn load_identity(&mut self) {
        if !self.guard_mutator() {
            return;
        }
        self.record(Command::LoadIdentity);
        if !self.should_execute() {
            return;
        }
        *self.active_stack().top_mut() = Mat4::IDENTITY;
    }

    pub fn load_matrix(&mut self, m: Mat4) {
        if !self.guard_mutator() {
            return;
        }
        self.record(Command::LoadMatrix(m));
        if !self.should_execute() {
            return;
        }
        *self.active_stack().top_mut() = m;
    }

    /// `top := top . m` (last-on-right composition, matching OpenGL's convention that
    /// transforms applied later in user code apply first to the object).
    pub fn mult_matrix(&mut self, m: Mat4) {
        if !self.guard_mutator() {
            return;
        }
        self.record(Command::MultMatrix(m));
        if !self.should_execute() {
            return;
        }
        let top = self.active_stack().top();
        *self.active_stack().top_mut() = top * m;
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.record(Command::Translate(x, y, z));
        if self.guard_mutator() && self.should_execute() {
            self.mult_matrix_unrecorded(Mat4::translation(x, y, z));
        }
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.record(Command::Scale(x, y, z));
        if self.guard_mutator() && self.should_execute() {
            self.mult_matrix_unrecorded(Mat4::scaling(x, y, z));
        }
    }

    pub fn rotate(&mut self, angle_deg: f32, x: f32, y: f32, z: f32) {
        self.record(Command::Rotate(angle_deg, x, y, z));
        if self.guard_mutator() && self.should_execute() {
            self.mult_matrix_unrecorded(Mat4::rotation(angle_deg, x, y, z));
        }
    }

    fn mult_matrix_unrecorded(&mut self, m: Mat4) {
        let top = self.active_stack().top();
        *self.active_stack().top_mut() = top * m;
    }

    pub fn ortho(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.record(Command::Ortho(left, right, bottom, top, near, far));
        if self.guard_mutator() && self.should_execute() {
            self.mult_matrix_unrecorded(Mat4::ortho(left, right, bottom, top, near, far));
        }
    }

    pub fn frustum(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.record(Command::Frustum(left, right, bottom, top, near, far));
        if self.guard_mutator() && self.should_execute() {
            self.mult_matrix_unrecorded(Mat4::frustum(left, right, bottom, top, near, far));
        }
    }

    // ---- immediate mode vertex submission ------------------------------

    pub fn begin(&mut self, mode: PrimitiveMode) {
        self.record(Command::Begin(mode));
        if !self.should_execute() {
            return;
        }
        if self.inside_begin_end {
            self.set_error(GlError::InvalidOperation);
            return;
        }
        self.inside_begin_end = true;
        self.current_mode = Some(mode);
        self.vertex_buffer.clear();
    }

    pub fn end(&mut self) {
        self.record(Command::End);
        if !self.should_execute() {
            return;
        }
        if !self.inside_begin_end {
            self.set_error(GlError::InvalidOperation);
            return;
        }
        self.inside_begin_end = false;
        let mode = self.current_mode.take().expect("begin always sets current_mode");
        let verts = std::mem::take(&mut self.vertex_buffer);
        self.assemble_and_draw(mode, &verts);
    }

    pub fn color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Command::Color(r, g, b, a));
        if self.should_execute() {
            self.current_color = coerce_color(Color::new(r, g, b, a));
        }
    }

    pub fn tex_coord(&mut self, s: f32, t: f32) {
        self.record(Command::TexCoord(s, t));
        if self.should_execute() {
            self.current_texcoord = Vec2::new(s, t);
        }
    }

    pub fn normal(&mut self, x: f32, y: f32, z: f32) {
        self.record(Command::Normal(x, y, z));
        if self.should_execute() {
            self.current_normal = Vec3::new(x, y, z);
        }
    }

    pub fn vertex(&mut self, x: f32, y: f32, z: f32) {
        self.record(Command::Vertex(x, y, z));
        if !self.should_execute() {
            return;
        }
        if !self.inside_begin_end {
            self.set_error(GlError::InvalidOperation);
            return;
        }
        let v = self.transform_vertex(Vec3::new(x, y, z));
        self.vertex_buffer.push(v);
    }

    /// Per-vertex transform (§4.4): modelview, normal matrix, projection, texture matrix,
    /// and (for flat/smooth shading) the Gouraud lighting evaluation.
    fn transform_vertex(&self, object_pos: Vec3) -> Vertex {
        let modelview = self.modelview.top();
        let eye_pos4 = modelview.mul_vec4(object_pos.to4(1.0));
        let eye_pos = eye_pos4.xyz();

        let mut eye_normal = modelview.normal_matrix().mul_vec4(self.current_normal.to4(0.0)).xyz();
        if self.normalize || self.lighting {
            eye_normal = eye_normal.normalize();
        }

        let clip_pos = self.projection.top().mul_vec4(eye_pos4);

        let tex = self.texture_matrix.top().mul_vec4(self.current_texcoord.x_y_0_1());
        let texcoord = if tex.w != 0.0 && tex.w != 1.0 { Vec2::new(tex.x / tex.w, tex.y / tex.w) } else { Vec2::new(tex.x, tex.y) };

        let mut vertex = Vertex {
            position: clip_pos,
            color: self.current_color,
            texcoord,
            normal: self.current_normal,
            eye_pos,
            eye_normal,
            eye_z: -eye_pos.z,
        };

        if self.lighting && self.shade_model != ShadeModel::Phong {
            vertex.color = self.evaluate_lighting(eye_pos, eye_normal, false);
        }

        vertex
    }

    pub(crate) fn evaluate_lighting(&self, eye_pos: Vec3, eye_normal: Vec3, back_facing: bool) -> Color {
        let mut material = if back_facing { self.material_back } else { self.material_front };
        if self.color_material {
            let face_matches = matches!(
                (self.color_material_face, back_facing),
                (Face::FrontAndBack, _) | (Face::Front, false) | (Face::Back, true)
            );
            if face_matches {
                apply_color_material(&mut material, self.color_material_param, self.current_color.clamp());
            }
        }
        let normal = if back_facing { -eye_normal } else { eye_normal };
        crate::lighting::compute_lighting(eye_pos, normal, &material, &self.lights, self.light_model_ambient, self.local_viewer)
    }

    // ---- primitive assembly ---------------------------------------------

    fn assemble_and_draw(&mut self, mode: PrimitiveMode, verts: &[Vertex]) {
        let n = verts.len();
        match mode {
            PrimitiveMode::Points => {
                for v in verts {
                    self.draw_point(v);
                }
            },
            PrimitiveMode::Lines => {
                let mut i = 0;
                while i + 1 < n {
                    self.draw_line(&verts[i], &verts[i + 1]);
                    i += 2;
                }
            },
            PrimitiveMode::LineStrip => {
                for w in verts.windows(2) {
                    self.draw_line(&w[0], &w[1]);
                }
            },
            PrimitiveMode::LineLoop => {
                for w in verts.windows(2) {
                    self.draw_line(&w[0], &w[1]);
                }
                if n >= 2 {
                    self.draw_line(&verts[n - 1], &verts[0]);
                }
            },
            PrimitiveMode::Triangles => {
                let mut i = 0;
                while i + 2 < n {
                    self.draw_triangle(&verts[i], &verts[i + 1], &verts[i + 2]);
                    i += 3;
                }
            },
            PrimitiveMode::TriangleStrip => {
                for (i, w) in verts.windows(3).enumerate() {
                    if i % 2 == 0 {
                        self.draw_triangle(&w[0], &w[1], &w[2]);
                    } else {
                        self.draw_triangle(&w[1], &w[0], &w[2]);
                    }
                }
            },
            PrimitiveMode::TriangleFan | PrimitiveMode::Polygon => {
                if n >= 3 {
                    for i in 1..n - 1 {
                        self.draw_triangle(&verts[0], &verts[i], &verts[i + 1]);
                    }
                }
            },
            PrimitiveMode::Quads => {
                let mut i = 0;
                while i + 3 < n {
                    self.draw_triangle(&verts[i], &verts[i + 1], &verts[i + 2]);
                    self.draw_triangle(&verts[i], &verts[i + 2], &verts[i + 3]);
                    i += 4;
                }
            },
            PrimitiveMode::QuadStrip => {
                let mut i = 0;
                while i + 3 < n {
                    self.draw_triangle(&verts[i], &verts[i + 1], &verts[i + 3]);
                    self.draw_triangle(&verts[i], &verts[i + 3], &verts[i + 2]);
                    i += 2;
                }
            },
        }
    }

    /// Draws via explicit client-supplied vertex data instead of begin/vertex/end (the
    /// `glDrawArrays` analogue); each `ArrayVertex` is transformed exactly as `vertex()` would.
    pub fn draw_arrays(&mut self, mode: PrimitiveMode, verts: &[ArrayVertex]) {
        if self.inside_begin_end {
            self.set_error(GlError::InvalidOperation);
            return;
        }
        let transformed: Vec<Vertex> = verts
            .iter()
            .map(|av| {
                if let Some(c) = av.color {
                    self.current_color = coerce_color(c);
                }
                if let Some(t) = av.texcoord {
                    self.current_texcoord = t;
                }
                if let Some(n) = av.normal {
                    self.current_normal = n;
                }
                self.transform_vertex(av.position)
            })
            .collect();
        self.assemble_and_draw(mode, &transformed);
    }

    /// Draws via an index list into `verts` (the `glDrawElements` analogue); each index is
    /// resolved and transformed independently, so shared vertices are re-transformed per
    /// use rather than cached — matching `draw_arrays`' no-cache behaviour.
    pub fn draw_elements(&mut self, mode: PrimitiveMode, indices: &[u32], verts: &[ArrayVertex]) {
        if self.inside_begin_end {
            self.set_error(GlError::InvalidOperation);
            return;
        }
        let mut transformed = Vec::with_capacity(indices.len());
        for &i in indices {
            let Some(av) = verts.get(i as usize) else {
                self.set_error(GlError::InvalidValue);
                return;
            };
            if let Some(c) = av.color {
                self.current_color = coerce_color(c);
            }
            if let Some(t) = av.texcoord {
                self.current_texcoord = t;
            }
            if let Some(n) = av.normal {
                self.current_normal = n;
            }
            transformed.push(self.transform_vertex(av.position));
        }
        self.assemble_and_draw(mode, &transformed);
    }

    // ---- point / line / triangle rasterization -------------------------

    fn ndc_to_screen(&self, ndc_x: f32, ndc_y: f32) -> (i32, i32) {
        let (vx, vy, vw, vh) = self.viewport;
        let x = (((ndc_x + 1.0) / 2.0) * vw as f32 + vx as f32).floor() as i32;
        // Y-flip: NDC y-up maps to a top-down row index, matching the framebuffer's
        // row-major storage (row 0 at the top).
        let y = (((1.0 - ndc_y) / 2.0) * vh as f32 + vy as f32).floor() as i32;
        (x, y)
    }

    fn map_depth(&self, ndc_z: f32) -> f32 {
        (((ndc_z + 1.0) / 2.0) * (self.depth_far - self.depth_near) + self.depth_near).clamp(0.0, 1.0)
    }

    /// Draws a single point (§4.9). Vertices outside the clip-space box are dropped outright
    /// rather than clipped, since a point has no extent to clip against.
    fn draw_point(&mut self, v: &Vertex) {
        let p = v.position;
        if p.w <= 0.0 || p.x < -p.w || p.x > p.w || p.y < -p.w || p.y > p.w || p.z < -p.w || p.z > p.w {
            return;
        }
        let mut vv = *v;
        crate::clip::perspective_divide(&mut vv);
        let (cx, cy) = self.ndc_to_screen(vv.position.x, vv.position.y);
        self.point_screen(cx, cy, vv.position.z, vv.color, vv.texcoord, vv.eye_z);
    }

    /// Rasterizes a point as a `point_size`-wide square of fragments (§4.9), each merged
    /// independently. `eye_z` is already the fog coordinate (`-eye_pos.z`).
    fn point_screen(&mut self, cx: i32, cy: i32, ndc_z: f32, color: Color, texcoord: Vec2, eye_z: f32) {
        let depth = self.map_depth(ndc_z);
        let size = ((self.point_size + 0.5).floor() as i32).max(1);
        let half = size / 2;
        let tc = if self.texture_2d && self.bound_texture != 0 { Some(texcoord) } else { None };
        for dy in 0..size {
            for dx in 0..size {
                self.merge_fragment(cx - half + dx, cy - half + dy, depth, color, tc, 0.0, eye_z);
            }
        }
    }

    /// Draws a single line segment (§4.9), clipping against the view volume first.
    fn draw_line(&mut self, v0: &Vertex, v1: &Vertex) {
        let Some((mut a, mut b)) = crate::clip::clip_line(*v0, *v1) else { return };
        crate::clip::perspective_divide(&mut a);
        crate::clip::perspective_divide(&mut b);
        let (x0, y0) = self.ndc_to_screen(a.position.x, a.position.y);
        let (x1, y1) = self.ndc_to_screen(b.position.x, b.position.y);
        self.line_screen(x0, y0, a.position.z, a.color, a.texcoord, a.eye_z, x1, y1, b.position.z, b.color, b.texcoord, b.eye_z);
    }

    /// Bresenham walk between two already screen-mapped endpoints, replicated
    /// perpendicular to the dominant axis when `line_width > 1` (§4.9).
    #[allow(clippy::too_many_arguments)]
    fn line_screen(
        &mut self,
        x0: i32,
        y0: i32,
        z0: f32,
        c0: Color,
        uv0: Vec2,
        ez0: f32,
        x1: i32,
        y1: i32,
        z1: f32,
        c1: Color,
        uv1: Vec2,
        ez1: f32,
    ) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let adx = dx.abs();
        let ady = dy.abs();
        let sx = if dx < 0 { -1 } else { 1 };
        let sy = if dy < 0 { -1 } else { 1 };
        let mut err = adx - ady;
        let total_steps = adx.max(ady).max(1);

        let width = ((self.line_width + 0.5).floor() as i32).max(1);
        let half_width = width / 2;
        // Replicate across Y for mostly-horizontal lines, across X for mostly-vertical ones.
        let (expand_x, expand_y) = if adx > ady { (0, 1) } else { (1, 0) };

        let tex_active = self.texture_2d && self.bound_texture != 0;

        let mut cur_x = x0;
        let mut cur_y = y0;
        let mut step = 0;
        loop {
            let t = step as f32 / total_steps as f32;
            let depth = self.map_depth(softgl_math::lerp(z0, z1, t));
            let color = c0.lerp(c1, t);
            let uv = uv0.lerp(uv1, t);
            let ez = softgl_math::lerp(ez0, ez1, t);
            let tc = if tex_active { Some(uv) } else { None };

            if width <= 1 {
                self.merge_fragment(cur_x, cur_y, depth, color, tc, 0.0, ez);
            } else {
                for w in -half_width..(width - half_width) {
                    self.merge_fragment(cur_x + w * expand_x, cur_y + w * expand_y, depth, color, tc, 0.0, ez);
                }
            }

            if cur_x == x1 && cur_y == y1 {
                break;
            }
            let e2 = err * 2;
            if e2 > -ady {
                err -= ady;
                cur_x += sx;
            }
            if e2 < adx {
                err += adx;
                cur_y += sy;
            }
            step += 1;
        }
    }

    /// Clips, perspective-divides, and fan-triangulates a triangle, dispatching each
    /// resulting sub-triangle to `emit_clipped_triangle` (§4.5, §4.7, §4.8).
    fn draw_triangle(&mut self, v0: &Vertex, v1: &Vertex, v2: &Vertex) {
        let polygon = [*v0, *v1, *v2];
        let mut clipped = crate::clip::clip_polygon(&polygon);
        if clipped.len() < 3 {
            return;
        }
        for v in clipped.iter_mut() {
            crate::clip::perspective_divide(v);
        }
        for j in 1..clipped.len() - 1 {
            self.emit_clipped_triangle(&clipped[0], &clipped[j], &clipped[j + 1]);
        }
    }

    /// Culls, determines back-facing-ness, and dispatches to the point/line/fill renderer
    /// per the active `polygon_mode` for the facing side (§4.7).
    fn emit_clipped_triangle(&mut self, a: &Vertex, b: &Vertex, c: &Vertex) {
        let (x0, y0) = self.ndc_to_screen(a.position.x, a.position.y);
        let (x1, y1) = self.ndc_to_screen(b.position.x, b.position.y);
        let (x2, y2) = self.ndc_to_screen(c.position.x, c.position.y);

        let signed_area = (x1 - x0) as f32 * (y2 - y0) as f32 - (x2 - x0) as f32 * (y1 - y0) as f32;

        // CCW winding (the default front face) yields a negative signed area in this
        // Y-down screen space; a front face is one whose winding matches `front_face_ccw`.
        let is_front = if self.front_face_ccw { signed_area < 0.0 } else { signed_area > 0.0 };

        if self.cull_face {
            let culled = match self.cull_face_mode {
                Face::Front => is_front,
                Face::Back => !is_front,
                Face::FrontAndBack => true,
            };
            if culled {
                return;
            }
        }

        let back_facing = !is_front;
        let mode = if back_facing { self.polygon_mode_back } else { self.polygon_mode_front };

        match mode {
            PolygonMode::Point => {
                self.point_screen(x0, y0, a.position.z, a.color, a.texcoord, a.eye_z);
                self.point_screen(x1, y1, b.position.z, b.color, b.texcoord, b.eye_z);
                self.point_screen(x2, y2, c.position.z, c.color, c.texcoord, c.eye_z);
            },
            PolygonMode::Line => {
                self.line_screen(x0, y0, a.position.z, a.color, a.texcoord, a.eye_z, x1, y1, b.position.z, b.color, b.texcoord, b.eye_z);
                self.line_screen(x1, y1, b.position.z, b.color, b.texcoord, b.eye_z, x2, y2, c.position.z, c.color, c.texcoord, c.eye_z);
                self.line_screen(x2, y2, c.position.z, c.color, c.texcoord, c.eye_z, x0, y0, a.position.z, a.color, a.texcoord, a.eye_z);
            },
            PolygonMode::Fill => {
                self.rasterize_fill(x0, y0, a, x1, y1, b, x2, y2, c, back_facing);
            },
        }
    }

    /// The triangle scan-fill proper: bounding-box setup, per-pixel edge-function inside
    /// test with a top-left tie-break, perspective-correct attribute interpolation,
    /// triangle-wide LOD, and flat/smooth/Phong shading dispatch (§4.7, §4.8, §4.11).
    #[allow(clippy::too_many_arguments)]
    fn rasterize_fill(&mut self, x0: i32, y0: i32, a: &Vertex, x1: i32, y1: i32, b: &Vertex, x2: i32, y2: i32, c: &Vertex, back_facing: bool) {
        let (vx, vy, vw, vh) = self.viewport;
        let mut min_x = x0.min(x1).min(x2).max(vx);
        let mut min_y = y0.min(y1).min(y2).max(vy);
        let mut max_x = x0.max(x1).max(x2).min(vx + vw - 1);
        let mut max_y = y0.max(y1).max(y2).min(vy + vh - 1);

        if self.scissor_test {
            let (sx, sy, sw, sh) = self.scissor;
            min_x = min_x.max(sx);
            min_y = min_y.max(sy);
            max_x = max_x.min(sx + sw - 1);
            max_y = max_y.min(sy + sh - 1);
        }
        if min_x > max_x || min_y > max_y {
            return;
        }

        let p0 = Vec2::new(x0 as f32, y0 as f32);
        let p1 = Vec2::new(x1 as f32, y1 as f32);
        let p2 = Vec2::new(x2 as f32, y2 as f32);

        let area = crate::raster::edge_function(p0, p1, p2);
        if area.abs() < crate::raster::DEGENERATE_AREA_THRESHOLD {
            return;
        }
        let inv_area = 1.0 / area;

        // Top-left fill rule: an edge owns the pixels exactly on it only if it is a "top"
        // edge (horizontal, going right in the triangle's winding) or a "left" edge (going
        // down); the third, trailing edge yields its shared pixels to whichever neighbor
        // triangle has them as top/left. This is what keeps adjacent triangles from either
        // double-writing or leaving a one-pixel gap along a shared edge.
        let top_left_bias = |from: Vec2, to: Vec2| -> f32 {
            let is_top = from.y == to.y && to.x > from.x;
            let is_left = to.y > from.y;
            if (area > 0.0 && (is_top || is_left)) || (area < 0.0 && !(is_top || is_left)) {
                0.0
            } else {
                -1e-4
            }
        };
        let bias0 = top_left_bias(p1, p2);
        let bias1 = top_left_bias(p2, p0);
        let bias2 = top_left_bias(p0, p1);

        let tex_bound = self.texture_2d && self.bound_texture != 0;
        let mut lod = 0.0f32;
        let mut u0w = 0.0;
        let mut v0w = 0.0;
        let mut u1w = 0.0;
        let mut v1w = 0.0;
        let mut u2w = 0.0;
        let mut v2w = 0.0;
        let correct_perspective = !matches!(self.perspective_hint, HintMode::Fastest);

        if tex_bound {
            if correct_perspective {
                u0w = a.texcoord.x * a.position.w;
                v0w = a.texcoord.y * a.position.w;
                u1w = b.texcoord.x * b.position.w;
                v1w = b.texcoord.y * b.position.w;
                u2w = c.texcoord.x * c.position.w;
                v2w = c.texcoord.y * c.position.w;
            }
            if let Some((tw, th)) = self.textures.get(self.bound_texture).and_then(|t| t.base_size()) {
                let du1 = (b.texcoord.x - a.texcoord.x) * tw as f32;
                let dv1 = (b.texcoord.y - a.texcoord.y) * th as f32;
                let du2 = (c.texcoord.x - a.texcoord.x) * tw as f32;
                let dv2 = (c.texcoord.y - a.texcoord.y) * th as f32;
                let texel_area = (du1 * dv2 - du2 * dv1).abs() * 0.5;
                lod = crate::raster::estimate_lod(texel_area, area.abs() * 0.5);
            }
        }

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32, y as f32);
                let e0 = crate::raster::edge_function(p1, p2, p) + bias0;
                let e1 = crate::raster::edge_function(p2, p0, p) + bias1;
                let e2 = crate::raster::edge_function(p0, p1, p) + bias2;

                let inside = if area > 0.0 { e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0 } else { e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0 };
                if !inside {
                    continue;
                }

                let w0 = e0 * inv_area;
                let w1 = e1 * inv_area;
                let w2 = e2 * inv_area;

                let ndc_z = w0 * a.position.z + w1 * b.position.z + w2 * c.position.z;
                let depth = self.map_depth(ndc_z);

                let interpolated = Vertex::barycentric(w0, w1, w2, a, b, c);

                // Flat shading takes the last vertex of the primitive as the provoking vertex.
                let mut color = if self.shade_model == ShadeModel::Flat { c.color } else { interpolated.color };

                if self.lighting {
                    let flip = back_facing && self.light_model_two_side;
                    let eye_normal = if flip { -interpolated.eye_normal } else { interpolated.eye_normal };
                    if self.shade_model == ShadeModel::Phong {
                        color = self.evaluate_lighting(interpolated.eye_pos, eye_normal, flip);
                    } else if flip {
                        // Gouraud lighting was already baked into vertex colors assuming the
                        // front face; only back-facing, two-sided triangles need recomputing.
                        color = self.evaluate_lighting(interpolated.eye_pos, eye_normal, true);
                    }
                }

                let texcoord = if tex_bound {
                    if correct_perspective {
                        let one_over_w = w0 * a.position.w + w1 * b.position.w + w2 * c.position.w;
                        let w = 1.0 / one_over_w;
                        Vec2::new((w0 * u0w + w1 * u1w + w2 * u2w) * w, (w0 * v0w + w1 * v1w + w2 * v2w) * w)
                    } else {
                        interpolated.texcoord
                    }
                } else {
                    Vec2::ZERO
                };

                let tc = if tex_bound { Some(texcoord) } else { None };
                self.merge_fragment(x, y, depth, color, tc, lod, interpolated.eye_z);
            }
        }
    }

    /// The ordered per-fragment merge pipeline (§4.10): scissor, stencil, depth, texture
    /// sample + alpha test + texenv combine, fog, depth write, blend, then the masked
    /// framebuffer write. Shared by point, line, and triangle rasterization.
    #[allow(clippy::too_many_arguments)]
    fn merge_fragment(&mut self, x: i32, y: i32, depth: f32, mut color: Color, texcoord: Option<Vec2>, lod: f32, fog_z: f32) {
        if x < 0 || x >= self.framebuffer.width() || y < 0 || y >= self.framebuffer.height() {
            return;
        }
        if self.scissor_test {
            let (sx, sy, sw, sh) = self.scissor;
            if x < sx || x >= sx + sw || y < sy || y >= sy + sh {
                return;
            }
        }

        let stencil_val = self.framebuffer.get_stencil(x, y);
        if self.stencil_test {
            let masked_ref = self.stencil.reference & (self.stencil.read_mask as i32);
            let masked_val = (stencil_val & self.stencil.read_mask) as i32;
            if !self.stencil.func.eval_int(masked_ref, masked_val) {
                let new_val = self.stencil.fail.apply(self.stencil.reference as u8, stencil_val);
                self.write_stencil_masked(x, y, new_val);
                return;
            }
        }

        if self.depth_test {
            let stored = self.framebuffer.get_depth(x, y);
            if !self.depth_func.eval(depth, stored) {
                if self.stencil_test {
                    let new_val = self.stencil.zfail.apply(self.stencil.reference as u8, stencil_val);
                    self.write_stencil_masked(x, y, new_val);
                }
                return;
            }
        }

        if self.stencil_test {
            let new_val = self.stencil.zpass.apply(self.stencil.reference as u8, stencil_val);
            self.write_stencil_masked(x, y, new_val);
        }

        if let Some(uv) = texcoord {
            if self.texture_2d && self.bound_texture != 0 {
                let texel = match self.textures.get_mut(self.bound_texture) {
                    Some(tex) => tex.sample(uv.x, uv.y, lod),
                    None => Color::WHITE,
                };
                if self.alpha_test && !self.alpha_func.eval(texel.a, self.alpha_ref) {
                    return;
                }
                color = crate::raster::texenv_combine(self.tex_env_mode, color, texel, self.tex_env_color);
            } else if self.alpha_test && !self.alpha_func.eval(color.a, self.alpha_ref) {
                return;
            }
        } else if self.alpha_test && !self.alpha_func.eval(color.a, self.alpha_ref) {
            return;
        }

        if self.fog {
            let f = crate::raster::fog_factor(self.fog_mode, fog_z, self.fog_start, self.fog_end, self.fog_density);
            color = Color::new(
                softgl_math::lerp(self.fog_color.r, color.r, f),
                softgl_math::lerp(self.fog_color.g, color.g, f),
                softgl_math::lerp(self.fog_color.b, color.b, f),
                color.a,
            );
        }

        if self.depth_test && self.depth_write_mask {
            self.framebuffer.put_depth(x, y, depth);
        }

        if self.blend {
            let dst = Color::unpack(self.framebuffer.get_pixel(x, y));
            let sf = crate::raster::blend_multiplier(self.blend_src, color, dst, self.blend_color);
            let df = crate::raster::blend_multiplier(self.blend_dst, color, dst, self.blend_color);
            color = Color::new(
                color.r * sf.r + dst.r * df.r,
                color.g * sf.g + dst.g * df.g,
                color.b * sf.b + dst.b * df.b,
                color.a * sf.a + dst.a * df.a,
            )
            .clamp();
        } else {
            color = color.clamp();
        }

        self.write_masked(x, y, color);
    }

    fn write_stencil_masked(&mut self, x: i32, y: i32, new_value: u8) {
        let mask = self.stencil.write_mask;
        if mask == 0xff {
            self.framebuffer.put_stencil(x, y, new_value);
        } else if mask != 0 {
            let old = self.framebuffer.get_stencil(x, y);
            self.framebuffer.put_stencil(x, y, (old & !mask) | (new_value & mask));
        }
    }

    // ---- display lists ---------------------------------------------------

    pub fn gen_lists(&mut self, range: u32) -> u32 {
        self.lists.gen_range(range)
    }

    pub fn is_list(&self, name: u32) -> bool {
        self.lists.is_list(name)
    }

    pub fn delete_list(&mut self, name: u32) {
        self.lists.delete(name);
    }

    pub fn new_list(&mut self, name: u32, mode: crate::enums::ListMode) {
        if self.inside_begin_end || self.list_recording.is_some() || !self.lists.is_list(name) {
            self.set_error(GlError::InvalidOperation);
            return;
        }
        self.lists.clear(name);
        self.list_recording = Some((name, mode));
    }

    pub fn end_list(&mut self) {
        let Some((name, _)) = self.list_recording.take() else {
            self.set_error(GlError::InvalidOperation);
            return;
        };
        self.lists.finish(name);
    }

    pub fn call_list(&mut self, name: u32) {
        self.record(Command::CallList(name));
        if !self.should_execute() {
            return;
        }
        self.invoke_list(name);
    }

    fn invoke_list(&mut self, name: u32) {
        if self.list_call_depth >= MAX_LIST_RECURSION {
            self.set_error(GlError::StackOverflow);
            return;
        }
        let Some(list) = self.lists.get(name) else { return };
        if !list.is_valid() {
            return;
        }
        let commands = list.commands().to_vec();
        self.list_call_depth += 1;
        let saved_recording = self.list_recording.take();
        for cmd in commands {
            self.execute_command(cmd);
        }
        self.list_recording = saved_recording;
        self.list_call_depth -= 1;
    }

    fn execute_command(&mut self, cmd: Command) {
        match cmd {
            Command::Begin(m) => self.begin(m),
            Command::End => self.end(),
            Command::Vertex(x, y, z) => self.vertex(x, y, z),
            Command::Color(r, g, b, a) => self.color(r, g, b, a),
            Command::TexCoord(s, t) => self.tex_coord(s, t),
            Command::Normal(x, y, z) => self.normal(x, y, z),
            Command::Translate(x, y, z) => self.translate(x, y, z),
            Command::Rotate(a, x, y, z) => self.rotate(a, x, y, z),
            Command::Scale(x, y, z) => self.scale(x, y, z),
            Command::PushMatrix => self.push_matrix(),
            Command::PopMatrix => self.pop_matrix(),
            Command::LoadIdentity => self.load_identity(),
            Command::MultMatrix(m) => self.mult_matrix(m),
            Command::LoadMatrix(m) => self.load_matrix(m),
            Command::MatrixMode(m) => self.matrix_mode(m),
            Command::Ortho(l, r, b, t, n, f) => self.ortho(l, r, b, t, n, f),
            Command::Frustum(l, r, b, t, n, f) => self.frustum(l, r, b, t, n, f),
            Command::Enable(c) => self.enable(c),
            Command::Disable(c) => self.disable(c),
            Command::BindTexture(name) => self.bind_texture(name),
            Command::BlendFunc(s, d) => self.blend_func(s, d),
            Command::DepthFunc(f) => self.depth_func(f),
            Command::DepthMask(b) => self.depth_mask(b),
            Command::CullFace(f) => self.cull_face(f),
            Command::ShadeModel(m) => self.shade_model(m),
            Command::LightF(i, p, v) => self.light_f(i, p, v),
            Command::LightFv(i, p, v) => self.light_fv(i, p, v),
            Command::MaterialF(f, p, v) => self.material_f(f, p, v),
            Command::MaterialFv(f, p, v) => self.material_fv(f, p, v),
            Command::CallList(name) => self.invoke_list(name),
        }
    }

    // ---- misc state setters ---------------------------------------------

    pub fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        if dst == BlendFactor::SrcAlphaSaturate {
            self.set_error(GlError::InvalidEnum);
            return;
        }
        self.record(Command::BlendFunc(src, dst));
        if self.should_execute() {
            self.blend_src = src;
            self.blend_dst = dst;
        }
    }

    pub fn blend_color(&mut self, c: Color) {
        self.blend_color = coerce_color(c);
    }

    pub fn depth_func(&mut self, f: TestFunc) {
        self.record(Command::DepthFunc(f));
        if self.should_execute() {
            self.depth_func = f;
        }
    }

    pub fn depth_mask(&mut self, flag: bool) {
        self.record(Command::DepthMask(flag));
        if self.should_execute() {
            self.depth_write_mask = flag;
        }
    }

    pub fn alpha_func(&mut self, func: TestFunc, reference: f32) {
        self.alpha_func = func;
        self.alpha_ref = reference.clamp(0.0, 1.0);
    }

    pub fn stencil_func(&mut self, func: TestFunc, reference: i32, mask: u8) {
        self.stencil.func = func;
        self.stencil.reference = reference;
        self.stencil.read_mask = mask;
    }

    pub fn stencil_op(&mut self, fail: StencilOp, zfail: StencilOp, zpass: StencilOp) {
        self.stencil.fail = fail;
        self.stencil.zfail = zfail;
        self.stencil.zpass = zpass;
    }

    pub fn stencil_mask(&mut self, mask: u8) {
        self.stencil.write_mask = mask;
    }

    pub fn color_mask(&mut self, r: bool, g: bool, b: bool, a: bool) {
        self.color_mask = [r, g, b, a];
    }

    pub fn cull_face(&mut self, face: Face) {
        self.record(Command::CullFace(face));
        if self.should_execute() {
            self.cull_face_mode = face;
        }
    }

    pub fn front_face(&mut self, ccw: bool) {
        self.front_face_ccw = ccw;
    }

    pub fn shade_model(&mut self, model: ShadeModel) {
        self.record(Command::ShadeModel(model));
        if self.should_execute() {
            self.shade_model = model;
        }
    }

    pub fn polygon_mode(&mut self, face: Face, mode: PolygonMode) {
        match face {
            Face::Front => self.polygon_mode_front = mode,
            Face::Back => self.polygon_mode_back = mode,
            Face::FrontAndBack => {
                self.polygon_mode_front = mode;
                self.polygon_mode_back = mode;
            },
        }
    }

    pub fn tex_env_mode(&mut self, mode: TexEnvMode) {
        self.tex_env_mode = mode;
    }

    pub fn tex_env_color(&mut self, c: Color) {
        self.tex_env_color = coerce_color(c);
    }

    /// `glDepthRange` analogue; both bounds are clamped to `[0, 1]` and never latch an error.
    pub fn depth_range(&mut self, near: f32, far: f32) {
        self.depth_near = near.clamp(0.0, 1.0);
        self.depth_far = far.clamp(0.0, 1.0);
    }

    pub fn point_size(&mut self, size: f32) {
        if !size.is_finite() || size <= 0.0 {
            self.set_error(GlError::InvalidValue);
            return;
        }
        self.point_size = size;
    }

    pub fn line_width(&mut self, width: f32) {
        if !width.is_finite() || width <= 0.0 {
            self.set_error(GlError::InvalidValue);
            return;
        }
        self.line_width = width;
    }

    pub fn light_model_two_side(&mut self, two_sided: bool) {
        self.light_model_two_side = two_sided;
    }

    pub fn hint_perspective_correction(&mut self, mode: HintMode) {
        self.perspective_hint = mode;
    }

    pub fn fog_mode(&mut self, mode: FogMode) {
        self.fog_mode = mode;
    }

    pub fn fog_params(&mut self, start: f32, end: f32, density: f32, color: Color) {
        self.fog_start = start;
        self.fog_end = end;
        self.fog_density = density;
        self.fog_color = coerce_color(color);
    }

    pub fn light_model_ambient(&mut self, c: Color) {
        self.light_model_ambient = coerce_color(c);
    }

    pub fn light_model_local_viewer(&mut self, local: bool) {
        self.local_viewer = local;
    }

    pub fn color_material(&mut self, face: Face, param: MaterialParam) {
        self.color_material_face = face;
        self.color_material_param = param;
    }

    pub fn light_f(&mut self, light: u8, param: LightParam, value: f32) {
        self.record(Command::LightF(light, param, value));
        if !self.should_execute() {
            return;
        }
        let Some(l) = self.light_mut(light) else { return };
        match param {
            LightParam::SpotExponent => l.spot_exponent = value,
            LightParam::SpotCutoff => l.spot_cutoff = value,
            LightParam::ConstantAttenuation => l.constant_attenuation = value,
            LightParam::LinearAttenuation => l.linear_attenuation = value,
            LightParam::QuadraticAttenuation => l.quadratic_attenuation = value,
            _ => self.set_error(GlError::InvalidOperation),
        }
    }

    pub fn light_fv(&mut self, light: u8, param: LightParam, values: [f32; 4]) {
        self.record(Command::LightFv(light, param, values));
        if !self.should_execute() {
            return;
        }
        let modelview = self.modelview.top();
        let Some(l) = self.light_mut(light) else { return };
        match param {
            LightParam::Ambient => l.ambient = Color::new(values[0], values[1], values[2], values[3]),
            LightParam::Diffuse => l.diffuse = Color::new(values[0], values[1], values[2], values[3]),
            LightParam::Specular => l.specular = Color::new(values[0], values[1], values[2], values[3]),
            LightParam::Position => {
                let obj = Vec4::new(values[0], values[1], values[2], values[3]);
                l.position = modelview.mul_vec4(obj);
            },
            LightParam::SpotDirection => {
                let obj = Vec3::new(values[0], values[1], values[2]).to4(0.0);
                l.spot_direction = modelview.mul_vec4(obj).xyz();
            },
            _ => self.set_error(GlError::InvalidOperation),
        }
    }

    fn light_mut(&mut self, index: u8) -> Option<&mut Light> {
        if (index as usize) >= limits::MAX_LIGHTS {
            self.set_error(GlError::InvalidValue);
            return None;
        }
        Some(&mut self.lights[index as usize])
    }

    pub fn material_f(&mut self, face: Face, param: MaterialParam, value: f32) {
        self.record(Command::MaterialF(face, param, value));
        if !self.should_execute() {
            return;
        }
        if param != MaterialParam::Shininess {
            self.set_error(GlError::InvalidOperation);
            return;
        }
        self.for_material_faces(face, |m| m.shininess = value);
    }

    pub fn material_fv(&mut self, face: Face, param: MaterialParam, values: [f32; 4]) {
        self.record(Command::MaterialFv(face, param, values));
        if !self.should_execute() {
            return;
        }
        let c = Color::new(values[0], values[1], values[2], values[3]);
        self.for_material_faces(face, |m| match param {
            MaterialParam::Ambient => m.ambient = c,
            MaterialParam::Diffuse => m.diffuse = c,
            MaterialParam::Specular => m.specular = c,
            MaterialParam::Emission => m.emission = c,
            MaterialParam::Shininess => m.shininess = c.r,
        });
    }

    fn for_material_faces(&mut self, face: Face, mut f: impl FnMut(&mut Material)) {
        if matches!(face, Face::Front | Face::FrontAndBack) {
            f(&mut self.material_front);
        }
        if matches!(face, Face::Back | Face::FrontAndBack) {
            f(&mut self.material_back);
        }
    }

    // ---- textures ---------------------------------------------------------

    pub fn gen_textures(&mut self, n: u32) -> Vec<u32> {
        self.textures.gen(n).unwrap_or_else(|| {
            Vec::new()
        })
    }

    pub fn delete_texture(&mut self, name: u32) {
        self.textures.delete(name);
    }

    pub fn is_texture(&self, name: u32) -> bool {
        self.textures.is_texture(name)
    }

    pub fn bind_texture(&mut self, name: u32) {
        self.record(Command::BindTexture(name));
        if !self.should_execute() {
            return;
        }
        if name != 0 && !self.textures.is_texture(name) {
            self.set_error(GlError::InvalidOperation);
            return;
        }
        self.bound_texture = name;
    }

    pub fn tex_parameter_min_filter(&mut self, filter: MinFilter) {
        if let Some(t) = self.textures.get_mut(self.bound_texture) {
            t.min_filter = filter;
        }
    }

    pub fn tex_parameter_mag_filter(&mut self, filter: MagFilter) {
        if let Some(t) = self.textures.get_mut(self.bound_texture) {
            t.mag_filter = filter;
        }
    }

    pub fn tex_parameter_wrap(&mut self, s: TexWrap, t: TexWrap) {
        if let Some(tex) = self.textures.get_mut(self.bound_texture) {
            tex.wrap_s = s;
            tex.wrap_t = t;
        }
    }

    pub fn tex_image_2d(&mut self, width: u32, height: u32, format: PixelFormat, data: &[u8]) {
        let Some(tex) = self.textures.get_mut(self.bound_texture) else {
            self.set_error(GlError::InvalidOperation);
            return;
        };
        if !tex.upload(width, height, format, data) {
            self.set_error(GlError::InvalidValue);
        }
    }

    // ---- buffers ------------------------------------------------------

    pub fn gen_buffers(&mut self, n: u32) -> Vec<u32> {
        self.buffers.gen(n).unwrap_or_default()
    }

    pub fn delete_buffer(&mut self, name: u32) {
        self.buffers.delete(name);
    }

    pub fn is_buffer(&self, name: u32) -> bool {
        self.buffers.is_buffer(name)
    }

    pub fn buffer_data(&mut self, name: u32, bytes: &[u8], usage: BufferUsage) {
        if !self.buffers.is_buffer(name) {
            self.set_error(GlError::InvalidOperation);
            return;
        }
        self.buffers.data(name, bytes, usage);
    }

    pub fn buffer_sub_data(&mut self, name: u32, offset: usize, bytes: &[u8]) {
        if !self.buffers.sub_data(name, offset, bytes) {
            self.set_error(GlError::InvalidValue);
        }
    }

    // ---- raster position / pixel rectangles ----------------------------

    /// Transforms an object-space point through modelview-projection and stores the result
    /// as the raster position (§4.13). Marked invalid (future draw_pixels/bitmap calls
    /// become no-ops) if the clip-space `w` is non-positive.
    pub fn raster_pos(&mut self, x: f32, y: f32, z: f32) {
        let mvp = self.projection.top() * self.modelview.top();
        let clip = mvp.mul_vec4(Vec4::new(x, y, z, 1.0));
        if clip.w <= 0.0 {
            self.raster_pos = None;
            return;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let (vx, vy, vw, vh) = self.viewport;
        let win_x = (((ndc_x + 1.0) / 2.0) * vw as f32 + vx as f32).floor() as i32;
        // Y-flip: NDC y-up maps to a top-down row index, matching the triangle rasterizer and
        // the framebuffer's row-major (row 0 at the top) storage used for presentation.
        let win_y = (((1.0 - ndc_y) / 2.0) * vh as f32 + vy as f32).floor() as i32;
        self.raster_pos = Some((win_x, win_y));
        self.raster_color = self.current_color;
    }

    /// `glDrawPixels` analogue: writes `image` (row-major, bottom-up per `format`) anchored
    /// at the raster position's lower-left corner. A no-op if the raster position is invalid.
    pub fn draw_pixels(&mut self, width: u32, height: u32, format: PixelFormat, image: &[u8]) {
        let Some((rx, ry)) = self.raster_pos else { return };
        let comps = format.components();
        if image.len() < width as usize * height as usize * comps {
            self.set_error(GlError::InvalidValue);
            return;
        }
        for row in 0..height as i32 {
            for col in 0..width as i32 {
                let src_row = height as i32 - 1 - row;
                let idx = (src_row as usize * width as usize + col as usize) * comps;
                let chunk = &image[idx..idx + comps];
                let color = decode_pixel(format, chunk);
                let x = rx + col;
                let y = ry - row;
                self.write_pixel_rect_fragment(x, y, color);
            }
        }
    }

    fn write_pixel_rect_fragment(&mut self, x: i32, y: i32, color: Color) {
        if self.alpha_test && !self.alpha_func.eval(color.a, self.alpha_ref) {
            return;
        }
        // Fixed depth of 0 per spec §4.13.
        if self.depth_test && !self.depth_func.eval(0.0, self.framebuffer.get_depth(x, y)) {
            return;
        }
        let final_color = if self.blend {
            let dst = Color::unpack(self.framebuffer.get_pixel(x, y));
            let sf = crate::raster::blend_multiplier(self.blend_src, color, dst, self.blend_color);
            let df = crate::raster::blend_multiplier(self.blend_dst, color, dst, self.blend_color);
            Color::new(
                color.r * sf.r + dst.r * df.r,
                color.g * sf.g + dst.g * df.g,
                color.b * sf.b + dst.b * df.b,
                color.a * sf.a + dst.a * df.a,
            )
            .clamp()
        } else {
            color
        };
        self.write_masked(x, y, final_color);
    }

    pub(crate) fn write_masked(&mut self, x: i32, y: i32, color: Color) {
        if self.color_mask == [true; 4] {
            self.framebuffer.put_pixel(x, y, color.pack());
        } else if self.color_mask == [false; 4] {
            // nothing
        } else {
            let existing = Color::unpack(self.framebuffer.get_pixel(x, y));
            let merged = Color::new(
                if self.color_mask[0] { color.r } else { existing.r },
                if self.color_mask[1] { color.g } else { existing.g },
                if self.color_mask[2] { color.b } else { existing.b },
                if self.color_mask[3] { color.a } else { existing.a },
            );
            self.framebuffer.put_pixel(x, y, merged.pack());
        }
    }

    /// `glReadPixels` analogue: copies the color plane into `out`, flipped to OpenGL's
    /// bottom-up row order and packed per `format`.
    pub fn read_pixels(&self, x: i32, y: i32, width: u32, height: u32, format: PixelFormat, out: &mut Vec<u8>) {
        out.clear();
        let comps = format.components();
        out.resize(width as usize * height as usize * comps, 0);
        for row in 0..height as i32 {
            let src_y = y + (height as i32 - 1 - row);
            for col in 0..width as i32 {
                let src_x = x + col;
                let color = Color::unpack(self.framebuffer.get_pixel(src_x, src_y));
                let idx = (row as usize * width as usize + col as usize) * comps;
                encode_pixel(format, color, &mut out[idx..idx + comps]);
            }
        }
    }
}

fn decode_pixel(format: PixelFormat, chunk: &[u8]) -> Color {
    match format {
        PixelFormat::Rgba => Color::new(chunk[0] as f32 / 255.0, chunk[1] as f32 / 255.0, chunk[2] as f32 / 255.0, chunk[3] as f32 / 255.0),
        PixelFormat::Rgb => Color::new(chunk[0] as f32 / 255.0, chunk[1] as f32 / 255.0, chunk[2] as f32 / 255.0, 1.0),
        PixelFormat::Luminance => {
            let l = chunk[0] as f32 / 255.0;
            Color::new(l, l, l, 1.0)
        },
        PixelFormat::LuminanceAlpha => {
            let l = chunk[0] as f32 / 255.0;
            Color::new(l, l, l, chunk[1] as f32 / 255.0)
        },
    }
}

fn encode_pixel(format: PixelFormat, c: Color, out: &mut [u8]) {
    let c = c.clamp();
    match format {
        PixelFormat::Rgba => {
            out[0] = (c.r * 255.0).round() as u8;
            out[1] = (c.g * 255.0).round() as u8;
            out[2] = (c.b * 255.0).round() as u8;
            out[3] = (c.a * 255.0).round() as u8;
        },
        PixelFormat::Rgb => {
            out[0] = (c.r * 255.0).round() as u8;
            out[1] = (c.g * 255.0).round() as u8;
            out[2] = (c.b * 255.0).round() as u8;
        },
        PixelFormat::Luminance => {
            out[0] = (c.r * 255.0).round() as u8;
        },
        PixelFormat::LuminanceAlpha => {
            out[0] = (c.r * 255.0).round() as u8;
            out[1] = (c.a * 255.0).round() as u8;
        },
    }
}

fn apply_color_material(material: &mut Material, param: MaterialParam, color: Color) {
    match param {
        MaterialParam::Ambient => material.ambient = color,
        MaterialParam::Diffuse => material.diffuse = color,
        MaterialParam::Specular => material.specular = color,
        MaterialParam::Emission => material.emission = color,
        MaterialParam::Shininess => {},
    }
}

/// Coerces non-finite color components to 0 (alpha to 1), per §7's permissive-at-the-boundary
/// policy for NaN/infinity.
fn coerce_color(c: Color) -> Color {
    Color::new(
        if c.r.is_finite() { c.r } else { 0.0 },
        if c.g.is_finite() { c.g } else { 0.0 },
        if c.b.is_finite() { c.b } else { 0.0 },
        if c.a.is_finite() { c.a } else { 1.0 },
    )
}

trait Vec2Ext {
    fn x_y_0_1(self) -> Vec4;
}

impl Vec2Ext for Vec2 {
    fn x_y_0_1(self) -> Vec4 {
        Vec4::new(self.x, self.y, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ortho_ctx(w: i32, h: i32) -> Context {
        let mut ctx = Context::new(w, h).unwrap();
        ctx.viewport(0, 0, w, h);
        ctx.matrix_mode(MatrixMode::Projection);
        ctx.load_identity();
        ctx.ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
        ctx.matrix_mode(MatrixMode::Modelview);
        ctx.load_identity();
        ctx
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut ctx = ortho_ctx(8, 8);
        ctx.clear_color(Color::new(0.2, 0.4, 0.6, 1.0));
        ctx.clear_color_buffer();
        let want = Color::new(0.2, 0.4, 0.6, 1.0).pack();
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(ctx.framebuffer().get_pixel(x, y), want);
            }
        }
    }

    #[test]
    fn scissored_clear_only_touches_the_rect() {
        let mut ctx = ortho_ctx(8, 8);
        ctx.clear_color(Color::BLACK);
        ctx.clear_color_buffer();
        ctx.enable(Cap::ScissorTest);
        ctx.scissor_rect(2, 2, 3, 3);
        ctx.clear_color(Color::new(1.0, 1.0, 1.0, 1.0));
        ctx.clear_color_buffer_scissored();

        let white = Color::new(1.0, 1.0, 1.0, 1.0).pack();
        let black = Color::BLACK.pack();
        for y in 0..8 {
            for x in 0..8 {
                let inside = (2..5).contains(&x) && (2..5).contains(&y);
                assert_eq!(ctx.framebuffer().get_pixel(x, y), if inside { white } else { black });
            }
        }
    }

    #[test]
    fn triangle_covers_its_centroid() {
        let mut ctx = ortho_ctx(64, 64);
        ctx.clear_color(Color::BLACK);
        ctx.clear_color_buffer();
        ctx.color(1.0, 0.0, 0.0, 1.0);
        ctx.begin(PrimitiveMode::Triangles);
        ctx.vertex(-0.8, -0.8, 0.0);
        ctx.vertex(0.8, -0.8, 0.0);
        ctx.vertex(0.0, 0.8, 0.0);
        ctx.end();

        // Centroid of the triangle, which is always interior to it.
        let c = Color::unpack(ctx.framebuffer().get_pixel(32, 40));
        assert!(c.r > 0.5 && c.g < 0.2 && c.b < 0.2);
    }

    #[test]
    fn depth_test_keeps_the_nearer_fragment() {
        let mut ctx = ortho_ctx(16, 16);
        ctx.enable(Cap::DepthTest);
        ctx.depth_func(TestFunc::Less);
        ctx.clear_depth_value(1.0);
        ctx.clear_depth_buffer();
        ctx.clear_color(Color::BLACK);
        ctx.clear_color_buffer();

        // Far (red) quad first, covering the whole viewport.
        ctx.color(1.0, 0.0, 0.0, 1.0);
        ctx.begin(PrimitiveMode::Triangles);
        ctx.vertex(-1.0, -1.0, 0.5);
        ctx.vertex(1.0, -1.0, 0.5);
        ctx.vertex(1.0, 1.0, 0.5);
        ctx.vertex(-1.0, -1.0, 0.5);
        ctx.vertex(1.0, 1.0, 0.5);
        ctx.vertex(-1.0, 1.0, 0.5);
        ctx.end();

        // Near (green) quad drawn after, should win the depth test everywhere.
        ctx.color(0.0, 1.0, 0.0, 1.0);
        ctx.begin(PrimitiveMode::Triangles);
        ctx.vertex(-1.0, -1.0, -0.5);
        ctx.vertex(1.0, -1.0, -0.5);
        ctx.vertex(1.0, 1.0, -0.5);
        ctx.vertex(-1.0, -1.0, -0.5);
        ctx.vertex(1.0, 1.0, -0.5);
        ctx.vertex(-1.0, 1.0, -0.5);
        ctx.end();

        let c = Color::unpack(ctx.framebuffer().get_pixel(8, 8));
        assert!(c.g > 0.5 && c.r < 0.2);
    }

    #[test]
    fn alpha_blend_mixes_src_and_dst() {
        let mut ctx = ortho_ctx(16, 16);
        ctx.clear_color(Color::BLACK);
        ctx.clear_color_buffer();
        ctx.enable(Cap::Blend);
        ctx.blend_func(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);

        ctx.color(1.0, 1.0, 1.0, 0.5);
        ctx.begin(PrimitiveMode::Triangles);
        ctx.vertex(-1.0, -1.0, 0.0);
        ctx.vertex(1.0, -1.0, 0.0);
        ctx.vertex(1.0, 1.0, 0.0);
        ctx.vertex(-1.0, -1.0, 0.0);
        ctx.vertex(1.0, 1.0, 0.0);
        ctx.vertex(-1.0, 1.0, 0.0);
        ctx.end();

        let c = Color::unpack(ctx.framebuffer().get_pixel(8, 8));
        assert!(c.r > 0.4 && c.r < 0.6);
    }

    #[test]
    fn stencil_write_then_test_masks_a_later_draw() {
        let mut ctx = ortho_ctx(16, 16);
        ctx.clear_color(Color::BLACK);
        ctx.clear_color_buffer();
        ctx.clear_stencil_value(0);
        ctx.clear_stencil_buffer();

        ctx.enable(Cap::StencilTest);
        ctx.color_mask(false, false, false, false);
        ctx.stencil_func(TestFunc::Always, 1, 0xff);
        ctx.stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Replace);
        // Left half of the viewport, as a quad (two triangles).
        ctx.begin(PrimitiveMode::Triangles);
        ctx.vertex(-1.0, -1.0, 0.0);
        ctx.vertex(0.0, -1.0, 0.0);
        ctx.vertex(0.0, 1.0, 0.0);
        ctx.vertex(-1.0, -1.0, 0.0);
        ctx.vertex(0.0, 1.0, 0.0);
        ctx.vertex(-1.0, 1.0, 0.0);
        ctx.end();

        ctx.color_mask(true, true, true, true);
        ctx.stencil_func(TestFunc::Equal, 1, 0xff);
        ctx.stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Keep);
        ctx.color(1.0, 1.0, 1.0, 1.0);
        ctx.begin(PrimitiveMode::Triangles);
        ctx.vertex(-1.0, -1.0, 0.0);
        ctx.vertex(1.0, -1.0, 0.0);
        ctx.vertex(1.0, 1.0, 0.0);
        ctx.vertex(-1.0, -1.0, 0.0);
        ctx.vertex(1.0, 1.0, 0.0);
        ctx.vertex(-1.0, 1.0, 0.0);
        ctx.end();

        // Left quarter and right quarter of the viewport, safely away from the x=0 seam.
        let left = ctx.framebuffer().get_pixel(2, 8);
        let right = ctx.framebuffer().get_pixel(13, 8);
        assert_eq!(left, Color::new(1.0, 1.0, 1.0, 1.0).pack());
        assert_eq!(right, Color::BLACK.pack());
    }

    #[test]
    fn points_and_lines_land_where_expected() {
        let mut ctx = ortho_ctx(16, 16);
        ctx.clear_color(Color::BLACK);
        ctx.clear_color_buffer();

        ctx.color(1.0, 1.0, 1.0, 1.0);
        ctx.begin(PrimitiveMode::Points);
        ctx.vertex(0.0, 0.0, 0.0);
        ctx.end();
        assert_eq!(ctx.framebuffer().get_pixel(8, 8), Color::new(1.0, 1.0, 1.0, 1.0).pack());

        ctx.begin(PrimitiveMode::Lines);
        ctx.vertex(-1.0, 0.0, 0.0);
        ctx.vertex(1.0, 0.0, 0.0);
        ctx.end();
        // The horizontal line runs through the middle row.
        assert_eq!(ctx.framebuffer().get_pixel(2, 8), Color::new(1.0, 1.0, 1.0, 1.0).pack());
        assert_eq!(ctx.framebuffer().get_pixel(14, 8), Color::new(1.0, 1.0, 1.0, 1.0).pack());
    }

    #[test]
    fn back_facing_triangle_is_culled() {
        let mut ctx = ortho_ctx(16, 16);
        ctx.clear_color(Color::BLACK);
        ctx.clear_color_buffer();
        ctx.enable(Cap::CullFace);
        ctx.cull_face(Face::Back);
        ctx.front_face(true);

        // Wound CW in object space (so back-facing under a CCW-front convention), should be culled.
        ctx.color(1.0, 1.0, 1.0, 1.0);
        ctx.begin(PrimitiveMode::Triangles);
        ctx.vertex(-0.8, -0.8, 0.0);
        ctx.vertex(0.0, 0.8, 0.0);
        ctx.vertex(0.8, -0.8, 0.0);
        ctx.end();

        assert_eq!(ctx.framebuffer().get_pixel(8, 8), Color::BLACK.pack());
    }
}
