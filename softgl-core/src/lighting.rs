use softgl_math::{Color, Vec3, Vec4};

use crate::enums::Face;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightParam {
    Ambient,
    Diffuse,
    Specular,
    Position,
    SpotDirection,
    SpotExponent,
    SpotCutoff,
    ConstantAttenuation,
    LinearAttenuation,
    QuadraticAttenuation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialParam {
    Ambient,
    Diffuse,
    Specular,
    Emission,
    Shininess,
}

/// Per-light state, already in eye space (position/spot direction are transformed by the
/// current modelview at upload time, as OpenGL does).
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub enabled: bool,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    /// `w = 0` directional, `w != 0` positional; eye space.
    pub position: Vec4,
    pub spot_direction: Vec3,
    pub spot_exponent: f32,
    /// Degrees; 180 means "not a spotlight".
    pub spot_cutoff: f32,
    pub constant_attenuation: f32,
    pub linear_attenuation: f32,
    pub quadratic_attenuation: f32,
}

impl Light {
    /// `GL_LIGHT0` defaults to white diffuse/specular; every other light defaults to black,
    /// matching the source's `light_init`.
    pub fn new(index: usize) -> Light {
        let (diffuse, specular) = if index == 0 { (Color::WHITE, Color::WHITE) } else { (Color::BLACK, Color::BLACK) };
        Light {
            enabled: false,
            ambient: Color::BLACK,
            diffuse,
            specular,
            position: Vec4::new(0.0, 0.0, 1.0, 0.0),
            spot_direction: Vec3::new(0.0, 0.0, -1.0),
            spot_exponent: 0.0,
            spot_cutoff: 180.0,
            constant_attenuation: 1.0,
            linear_attenuation: 0.0,
            quadratic_attenuation: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub emission: Color,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            ambient: Color::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Color::new(0.8, 0.8, 0.8, 1.0),
            specular: Color::BLACK,
            emission: Color::BLACK,
            shininess: 0.0,
        }
    }
}

/// Evaluates the fixed-function lighting equation (§4.11) for a single fragment or vertex.
///
/// `local_viewer`: `false` uses the infinite viewer `(0, 0, 1)`; `true` uses
/// `normalize(-eye_pos)`.
#[allow(clippy::too_many_arguments)]
pub fn compute_lighting(
    eye_pos: Vec3,
    eye_normal: Vec3,
    material: &Material,
    lights: &[Light],
    light_model_ambient: Color,
    local_viewer: bool,
) -> Color {
    let n = eye_normal.normalize();
    let mut result = material.emission.add(material.ambient.mul(light_model_ambient));
    result.a = material.diffuse.a;

    let v = if local_viewer { (-eye_pos).normalize() } else { Vec3::new(0.0, 0.0, 1.0) };

    for light in lights.iter().filter(|l| l.enabled) {
        let (l_dir, attenuation_base) = if light.position.w == 0.0 {
            (light.position.xyz().normalize(), 1.0)
        } else {
            let to_light = light.position.xyz() - eye_pos;
            let d = to_light.mag();
            let l = to_light.normalize();
            let denom = (light.constant_attenuation + light.linear_attenuation * d + light.quadratic_attenuation * d * d).max(1e-6);
            (l, 1.0 / denom)
        };

        let spot_scale = if light.spot_cutoff < 180.0 {
            let cos_angle = (-l_dir).dot(light.spot_direction.normalize());
            let cos_cutoff = light.spot_cutoff.to_radians().cos();
            if cos_angle < cos_cutoff {
                0.0
            } else {
                cos_angle.powf(light.spot_exponent)
            }
        } else {
            1.0
        };

        let attenuation = attenuation_base * spot_scale;
        if attenuation <= 0.0 {
            continue;
        }

        result = result.add(material.ambient.mul(light.ambient).scale(attenuation));

        let n_dot_l = n.dot(l_dir);
        if n_dot_l > 0.0 {
            result = result.add(material.diffuse.mul(light.diffuse).scale(n_dot_l * attenuation));

            if material.shininess > 0.0 {
                let h = (l_dir + v).normalize();
                let n_dot_h = n.dot(h);
                if n_dot_h > 0.0 {
                    let spec = n_dot_h.powf(material.shininess);
                    result = result.add(material.specular.mul(light.specular).scale(spec * attenuation));
                }
            }
        }
    }

    result.clamp()
}
