use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};

macro_rules! impl_vector_ops {
    ($name:ident { $($field:ident),+ }) => {
        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Neg for $name {
            type Output = $name;
            fn neg(self) -> $name {
                $name { $($field: -self.$field),+ }
            }
        }

        impl Mul<f32> for $name {
            type Output = $name;
            fn mul(self, rhs: f32) -> $name {
                $name { $($field: self.$field * rhs),+ }
            }
        }

        impl Div<f32> for $name {
            type Output = $name;
            fn div(self, rhs: f32) -> $name {
                $name { $($field: self.$field / rhs),+ }
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: $name) {
                $(self.$field += rhs.$field;)+
            }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: $name) {
                $(self.$field -= rhs.$field;)+
            }
        }

        impl MulAssign<f32> for $name {
            fn mul_assign(&mut self, rhs: f32) {
                $(self.$field *= rhs;)+
            }
        }

        impl DivAssign<f32> for $name {
            fn div_assign(&mut self, rhs: f32) {
                $(self.$field /= rhs;)+
            }
        }
    };
}

/// A two-component vector, used for texture coordinates and 2D screen math.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl_vector_ops!(Vec2 { x, y });

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    pub fn dot(self, rhs: Vec2) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    pub fn mag_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn mag(self) -> f32 {
        self.mag_sq().sqrt()
    }

    pub fn lerp(self, rhs: Vec2, t: f32) -> Vec2 {
        Vec2::new(crate::lerp(self.x, rhs.x, t), crate::lerp(self.y, rhs.y, t))
    }
}

impl Index<usize> for Vec2 {
    type Output = f32;
    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("index {i} out of bounds for Vec2"),
        }
    }
}

/// A three-component vector: positions, normals, and RGB colors in eye/object space.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl_vector_ops!(Vec3 { x, y, z });

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3 { x, y, z }
    }

    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Right-handed cross product.
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    pub fn mag_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn mag(self) -> f32 {
        self.mag_sq().sqrt()
    }

    /// Returns the zero vector if `self` is (numerically) zero-length rather than NaN.
    pub fn normalize(self) -> Vec3 {
        let m = self.mag();
        if m > 1e-10 {
            self / m
        } else {
            Vec3::ZERO
        }
    }

    pub fn lerp(self, rhs: Vec3, t: f32) -> Vec3 {
        Vec3::new(
            crate::lerp(self.x, rhs.x, t),
            crate::lerp(self.y, rhs.y, t),
            crate::lerp(self.z, rhs.z, t),
        )
    }

    /// Combines three values at the vertices of a triangle using barycentric weights.
    pub fn barycentric(w0: f32, w1: f32, w2: f32, v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
        v0 * w0 + v1 * w1 + v2 * w2
    }

    pub const fn to4(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }
}

impl Index<usize> for Vec3 {
    type Output = f32;
    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("index {i} out of bounds for Vec3"),
        }
    }
}

/// A four-component vector: homogeneous clip-space and object-space coordinates.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl_vector_ops!(Vec4 { x, y, z, w });

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Vec4 {
        Vec4 { x, y, z, w }
    }

    pub fn dot(self, rhs: Vec4) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    pub const fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn lerp(self, rhs: Vec4, t: f32) -> Vec4 {
        Vec4::new(
            crate::lerp(self.x, rhs.x, t),
            crate::lerp(self.y, rhs.y, t),
            crate::lerp(self.z, rhs.z, t),
            crate::lerp(self.w, rhs.w, t),
        )
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;
    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("index {i} out of bounds for Vec4"),
        }
    }
}

impl IndexMut<usize> for Vec4 {
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("index {i} out of bounds for Vec4"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp_f32(a: f32, b: f32) {
        assert!((a - b).abs() < 0.001, "{a} != {b}");
    }

    mod vec3 {
        use super::*;

        #[test]
        fn cross_basis_vectors() {
            let x = Vec3::new(1.0, 0.0, 0.0);
            let y = Vec3::new(0.0, 1.0, 0.0);
            let z = x.cross(y);
            cmp_f32(z.x, 0.0);
            cmp_f32(z.y, 0.0);
            cmp_f32(z.z, 1.0);
        }

        #[test]
        fn normalize_zero_is_zero() {
            assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        }

        #[test]
        fn normalize_unit_length() {
            let v = Vec3::new(3.0, 4.0, 0.0).normalize();
            cmp_f32(v.mag(), 1.0);
        }

        #[test]
        fn barycentric_weights_sum_to_one_reproduces_vertex() {
            let v0 = Vec3::new(1.0, 0.0, 0.0);
            let v1 = Vec3::new(0.0, 1.0, 0.0);
            let v2 = Vec3::new(0.0, 0.0, 1.0);
            let p = Vec3::barycentric(1.0, 0.0, 0.0, v0, v1, v2);
            assert_eq!(p, v0);
        }
    }
}
