use std::collections::HashMap;

use softgl_math::Color;

use crate::enums::{MagFilter, MinFilter, PixelFormat, TexWrap};
use crate::limits::{MAX_TEXTURES, MAX_TEXTURE_SIZE};

/// A single RGBA32 image, either the base level or the lazily-built half-resolution level.
#[derive(Clone)]
struct Level {
    width: u32,
    height: u32,
    texels: Vec<Color>,
}

impl Level {
    fn texel(&self, x: u32, y: u32) -> Color {
        self.texels[(y * self.width + x) as usize]
    }
}

pub struct Texture {
    base: Option<Level>,
    mip1: Option<Level>,
    pub min_filter: MinFilter,
    pub mag_filter: MagFilter,
    pub wrap_s: TexWrap,
    pub wrap_t: TexWrap,
}

impl Default for Texture {
    fn default() -> Texture {
        Texture {
            base: None,
            mip1: None,
            min_filter: MinFilter::Nearest,
            mag_filter: MagFilter::Nearest,
            wrap_s: TexWrap::Repeat,
            wrap_t: TexWrap::Repeat,
        }
    }
}

impl Texture {
    /// Uploads `data`, interpreted per `format`, replacing the base level and invalidating
    /// the mip1 level. Returns `false` (no mutation) if `width`/`height` exceed the texture
    /// size limit or `data` is too short.
    pub fn upload(&mut self, width: u32, height: u32, format: PixelFormat, data: &[u8]) -> bool {
        if width == 0 || height == 0 || width > MAX_TEXTURE_SIZE || height > MAX_TEXTURE_SIZE {
            return false;
        }
        let comps = format.components();
        let needed = width as usize * height as usize * comps;
        if data.len() < needed {
            return false;
        }

        let mut texels = Vec::with_capacity(width as usize * height as usize);
        for chunk in data.chunks_exact(comps).take(width as usize * height as usize) {
            let c = match format {
                PixelFormat::Rgba => Color::new(
                    chunk[0] as f32 / 255.0,
                    chunk[1] as f32 / 255.0,
                    chunk[2] as f32 / 255.0,
                    chunk[3] as f32 / 255.0,
                ),
                PixelFormat::Rgb => Color::new(chunk[0] as f32 / 255.0, chunk[1] as f32 / 255.0, chunk[2] as f32 / 255.0, 1.0),
                PixelFormat::Luminance => {
                    let l = chunk[0] as f32 / 255.0;
                    Color::new(l, l, l, 1.0)
                },
                PixelFormat::LuminanceAlpha => {
                    let l = chunk[0] as f32 / 255.0;
                    Color::new(l, l, l, chunk[1] as f32 / 255.0)
                },
            };
            texels.push(c);
        }

        self.base = Some(Level { width, height, texels });
        self.mip1 = None;
        true
    }

    fn ensure_mip1(&mut self) {
        if self.mip1.is_some() {
            return;
        }
        let Some(base) = &self.base else { return };
        if base.width < 2 || base.height < 2 {
            return;
        }
        let w = base.width / 2;
        let h = base.height / 2;
        let mut texels = Vec::with_capacity((w * h) as usize);
        for y in 0..h {
            for x in 0..w {
                let a = base.texel(x * 2, y * 2);
                let b = base.texel(x * 2 + 1, y * 2);
                let c = base.texel(x * 2, y * 2 + 1);
                let d = base.texel(x * 2 + 1, y * 2 + 1);
                let avg = Color::new(
                    (a.r + b.r + c.r + d.r) * 0.25,
                    (a.g + b.g + c.g + d.g) * 0.25,
                    (a.b + b.b + c.b + d.b) * 0.25,
                    (a.a + b.a + c.a + d.a) * 0.25,
                );
                texels.push(avg);
            }
        }
        self.mip1 = Some(Level { width: w, height: h, texels });
    }

    fn wrap_coord(wrap: TexWrap, v: f32, dim: u32) -> f32 {
        match wrap {
            TexWrap::Repeat => v - v.floor(),
            TexWrap::Clamp | TexWrap::ClampToEdge => v.clamp(0.0, 1.0).min((dim as f32 - 0.5) / dim as f32),
        }
    }

    fn nearest_texel(level: &Level, wrap_s: TexWrap, wrap_t: TexWrap, u: f32, v: f32) -> Color {
        let u = Self::wrap_coord(wrap_s, u, level.width);
        let v = Self::wrap_coord(wrap_t, v, level.height);
        let x = ((u * level.width as f32) as i64).clamp(0, level.width as i64 - 1) as u32;
        let y = ((v * level.height as f32) as i64).clamp(0, level.height as i64 - 1) as u32;
        level.texel(x, y)
    }

    fn bilinear_texel(level: &Level, wrap_s: TexWrap, wrap_t: TexWrap, u: f32, v: f32) -> Color {
        let fx = u * level.width as f32 - 0.5;
        let fy = v * level.height as f32 - 0.5;
        let x0f = fx.floor();
        let y0f = fy.floor();
        let tx = fx - x0f;
        let ty = fy - y0f;

        let wrap_idx = |wrap: TexWrap, i: i64, dim: u32| -> u32 {
            match wrap {
                TexWrap::Repeat => i.rem_euclid(dim as i64) as u32,
                TexWrap::Clamp | TexWrap::ClampToEdge => i.clamp(0, dim as i64 - 1) as u32,
            }
        };

        let x0 = wrap_idx(wrap_s, x0f as i64, level.width);
        let x1 = wrap_idx(wrap_s, x0f as i64 + 1, level.width);
        let y0 = wrap_idx(wrap_t, y0f as i64, level.height);
        let y1 = wrap_idx(wrap_t, y0f as i64 + 1, level.height);

        let c00 = level.texel(x0, y0);
        let c10 = level.texel(x1, y0);
        let c01 = level.texel(x0, y1);
        let c11 = level.texel(x1, y1);

        let top = c00.lerp(c10, tx);
        let bottom = c01.lerp(c11, tx);
        top.lerp(bottom, ty)
    }

    fn sample_level(level: &Level, filter_linear: bool, wrap_s: TexWrap, wrap_t: TexWrap, u: f32, v: f32) -> Color {
        if filter_linear {
            Self::bilinear_texel(level, wrap_s, wrap_t, u, v)
        } else {
            Self::nearest_texel(level, wrap_s, wrap_t, u, v)
        }
    }

    /// Dimensions of the base level, if one has been uploaded. Used by the triangle-wide LOD
    /// estimate, which needs real texel counts to turn a UV-space derivative into texels.
    pub fn base_size(&self) -> Option<(u32, u32)> {
        self.base.as_ref().map(|l| (l.width, l.height))
    }

    /// Samples at `(u, v)` with triangle-wide LOD `lod` (§4.12). Returns opaque white if no
    /// base level has ever been uploaded (matches the "no texture bound" no-op convention).
    pub fn sample(&mut self, u: f32, v: f32, lod: f32) -> Color {
        let Some(base) = self.base.clone() else { return Color::WHITE };

        if lod <= 0.0 || !self.min_filter.uses_mipmap() {
            let linear = match (lod <= 0.0, self.mag_filter, self.min_filter) {
                (true, MagFilter::Linear, _) => true,
                (false, _, MinFilter::Linear | MinFilter::LinearMipmapNearest | MinFilter::LinearMipmapLinear) => true,
                _ => false,
            };
            return Self::sample_level(&base, linear, self.wrap_s, self.wrap_t, u, v);
        }

        self.ensure_mip1();
        let mip1 = self.mip1.clone().unwrap_or_else(|| base.clone());
        let linear = matches!(self.min_filter, MinFilter::LinearMipmapNearest | MinFilter::LinearMipmapLinear);

        match self.min_filter {
            MinFilter::NearestMipmapNearest | MinFilter::LinearMipmapNearest => {
                if lod >= 0.5 {
                    Self::sample_level(&mip1, linear, self.wrap_s, self.wrap_t, u, v)
                } else {
                    Self::sample_level(&base, linear, self.wrap_s, self.wrap_t, u, v)
                }
            },
            MinFilter::NearestMipmapLinear | MinFilter::LinearMipmapLinear => {
                let t = lod.clamp(0.0, 1.0);
                let c0 = Self::sample_level(&base, linear, self.wrap_s, self.wrap_t, u, v);
                let c1 = Self::sample_level(&mip1, linear, self.wrap_s, self.wrap_t, u, v);
                c0.lerp(c1, t)
            },
            _ => unreachable!("mipmap filter expected"),
        }
    }
}

/// 1-based name-keyed texture store, slot 0 reserved for "no texture".
#[derive(Default)]
pub struct TextureStore {
    textures: HashMap<u32, Texture>,
    next_name: u32,
}

impl TextureStore {
    pub fn new() -> TextureStore {
        TextureStore { textures: HashMap::new(), next_name: 1 }
    }

    /// Allocates `n` fresh names, returns `None` if doing so would exceed [`MAX_TEXTURES`].
    pub fn gen(&mut self, n: u32) -> Option<Vec<u32>> {
        if self.textures.len() as u32 + n > MAX_TEXTURES {
            return None;
        }
        let mut names = Vec::with_capacity(n as usize);
        for _ in 0..n {
            let name = self.next_name;
            self.next_name += 1;
            self.textures.insert(name, Texture::default());
            names.push(name);
        }
        Some(names)
    }

    pub fn delete(&mut self, name: u32) {
        self.textures.remove(&name);
    }

    pub fn get(&self, name: u32) -> Option<&Texture> {
        self.textures.get(&name)
    }

    pub fn get_mut(&mut self, name: u32) -> Option<&mut Texture> {
        self.textures.get_mut(&name)
    }

    pub fn is_texture(&self, name: u32) -> bool {
        name != 0 && self.textures.contains_key(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_repeat_is_periodic() {
        let mut tex = Texture::default();
        tex.upload(2, 2, PixelFormat::Rgba, &[255, 0, 0, 255, 255, 255, 255, 255, 0, 0, 0, 255, 0, 0, 255, 255]);
        let a = tex.sample(0.25, 0.25, 0.0);
        let b = tex.sample(1.25, 3.25, 0.0);
        assert_eq!(a, b);
    }

    #[test]
    fn mip1_is_average_of_four_texels() {
        let mut tex = Texture::default();
        tex.upload(2, 2, PixelFormat::Rgba, &[255, 255, 255, 255, 0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255]);
        tex.min_filter = MinFilter::NearestMipmapNearest;
        let c = tex.sample(0.5, 0.5, 1.0);
        assert!((c.r - 0.25).abs() < 0.01);
    }

    #[test]
    fn gen_respects_max_textures() {
        let mut store = TextureStore::new();
        assert!(store.gen(MAX_TEXTURES + 1).is_none());
        assert!(store.gen(MAX_TEXTURES).is_some());
    }
}
