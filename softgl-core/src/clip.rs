use arrayvec::ArrayVec;

use crate::vertex::Vertex;

/// One of the six homogeneous clip-space half-spaces `-w <= x,y,z <= w`. A small enum plus a
/// dispatch, standing in for function-pointer plane functionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

const PLANES: [ClipPlane; 6] = [ClipPlane::Left, ClipPlane::Right, ClipPlane::Bottom, ClipPlane::Top, ClipPlane::Near, ClipPlane::Far];

impl ClipPlane {
    /// Linear functional `d(v)`, non-negative inside the half-space.
    fn distance(self, v: &Vertex) -> f32 {
        let p = v.position;
        match self {
            ClipPlane::Left => p.w + p.x,
            ClipPlane::Right => p.w - p.x,
            ClipPlane::Bottom => p.w + p.y,
            ClipPlane::Top => p.w - p.y,
            ClipPlane::Near => p.w + p.z,
            ClipPlane::Far => p.w - p.z,
        }
    }

    /// Forces the plane's coordinate to exactly `+-w` so later planes can't misclassify an
    /// intersection vertex due to floating point drift.
    fn snap(self, v: &mut Vertex) {
        match self {
            ClipPlane::Left => v.position.x = -v.position.w,
            ClipPlane::Right => v.position.x = v.position.w,
            ClipPlane::Bottom => v.position.y = -v.position.w,
            ClipPlane::Top => v.position.y = v.position.w,
            ClipPlane::Near => v.position.z = -v.position.w,
            ClipPlane::Far => v.position.z = v.position.w,
        }
    }
}

const MAX_CLIP_VERTS: usize = 12;
const DENOM_EPSILON: f32 = 1e-10;

fn intersect(plane: ClipPlane, prev: &Vertex, curr: &Vertex) -> Option<Vertex> {
    let d_prev = plane.distance(prev);
    let d_curr = plane.distance(curr);
    let denom = d_prev - d_curr;
    if denom.abs() < DENOM_EPSILON {
        return None;
    }
    let t = d_prev / denom;
    let mut v = Vertex::lerp(prev, curr, t);
    plane.snap(&mut v);
    Some(v)
}

/// Sutherland-Hodgman polygon clip against all six planes in sequence. Returns an empty
/// vector once the polygon is fully clipped away.
pub fn clip_polygon(input: &[Vertex]) -> ArrayVec<Vertex, MAX_CLIP_VERTS> {
    let mut current: ArrayVec<Vertex, MAX_CLIP_VERTS> = input.iter().copied().collect();

    for &plane in &PLANES {
        if current.is_empty() {
            break;
        }
        let mut output: ArrayVec<Vertex, MAX_CLIP_VERTS> = ArrayVec::new();
        let n = current.len();
        for i in 0..n {
            let prev = &current[(i + n - 1) % n];
            let curr = &current[i];
            let prev_in = plane.distance(prev) >= 0.0;
            let curr_in = plane.distance(curr) >= 0.0;

            match (prev_in, curr_in) {
                (true, true) => {
                    let _ = output.try_push(*curr);
                },
                (true, false) => {
                    if let Some(v) = intersect(plane, prev, curr) {
                        let _ = output.try_push(v);
                    }
                },
                (false, true) => {
                    if let Some(v) = intersect(plane, prev, curr) {
                        let _ = output.try_push(v);
                    }
                    let _ = output.try_push(*curr);
                },
                (false, false) => {},
            }
        }
        current = output;
    }

    current
}

/// Cohen-Sutherland outcode over the same six half-spaces.
fn outcode(v: &Vertex) -> u8 {
    let mut code = 0u8;
    if ClipPlane::Left.distance(v) < 0.0 {
        code |= 1 << 0;
    }
    if ClipPlane::Right.distance(v) < 0.0 {
        code |= 1 << 1;
    }
    if ClipPlane::Bottom.distance(v) < 0.0 {
        code |= 1 << 2;
    }
    if ClipPlane::Top.distance(v) < 0.0 {
        code |= 1 << 3;
    }
    if ClipPlane::Near.distance(v) < 0.0 {
        code |= 1 << 4;
    }
    if ClipPlane::Far.distance(v) < 0.0 {
        code |= 1 << 5;
    }
    code
}

/// Cohen-Sutherland line clip. Returns `None` if the segment lies entirely outside.
pub fn clip_line(mut a: Vertex, mut b: Vertex) -> Option<(Vertex, Vertex)> {
    let mut code_a = outcode(&a);
    let mut code_b = outcode(&b);

    loop {
        if code_a == 0 && code_b == 0 {
            return Some((a, b));
        }
        if code_a & code_b != 0 {
            return None;
        }

        let out_code = if code_a != 0 { code_a } else { code_b };
        let plane = PLANES[out_code.trailing_zeros() as usize];

        let (prev, curr) = if code_a != 0 { (&b, &a) } else { (&a, &b) };
        let new_vertex = intersect(plane, prev, curr)?;

        if code_a != 0 {
            a = new_vertex;
            code_a = outcode(&a);
        } else {
            b = new_vertex;
            code_b = outcode(&b);
        }
    }
}

/// Divides `x, y, z` by `w` and replaces `w` with `1/w` for perspective-correct interpolation.
/// Vertices with `|w|` below `1e-6` collapse to the origin to avoid blowing up.
pub fn perspective_divide(v: &mut Vertex) {
    let w = v.position.w;
    if w.abs() < 1e-6 {
        v.position = softgl_math::Vec4::new(0.0, 0.0, 0.0, 1.0);
        return;
    }
    let inv_w = 1.0 / w;
    v.position.x *= inv_w;
    v.position.y *= inv_w;
    v.position.z *= inv_w;
    v.position.w = inv_w;
}

#[cfg(test)]
mod tests {
    use softgl_math::Vec4;

    use super::*;

    fn vert_at(x: f32, y: f32, z: f32, w: f32) -> Vertex {
        Vertex { position: Vec4::new(x, y, z, w), ..Default::default() }
    }

    #[test]
    fn fully_inside_triangle_survives_unchanged() {
        let tri = [vert_at(-0.5, -0.5, 0.0, 1.0), vert_at(0.5, -0.5, 0.0, 1.0), vert_at(0.0, 0.5, 0.0, 1.0)];
        let out = clip_polygon(&tri);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn triangle_straddling_right_plane_is_clipped_and_snapped() {
        let tri = [vert_at(0.0, 0.0, 0.0, 1.0), vert_at(2.0, 0.0, 0.0, 1.0), vert_at(0.0, 2.0, 0.0, 1.0)];
        let out = clip_polygon(&tri);
        assert!(out.len() >= 3);
        for v in &out {
            if ClipPlane::Right.distance(v).abs() < 1e-5 {
                assert!((v.position.x - v.position.w).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn fully_outside_triangle_clips_to_nothing() {
        let tri = [vert_at(10.0, 10.0, 0.0, 1.0), vert_at(11.0, 10.0, 0.0, 1.0), vert_at(10.0, 11.0, 0.0, 1.0)];
        assert!(clip_polygon(&tri).is_empty());
    }

    #[test]
    fn line_fully_outside_is_rejected() {
        let a = vert_at(10.0, 0.0, 0.0, 1.0);
        let b = vert_at(11.0, 0.0, 0.0, 1.0);
        assert!(clip_line(a, b).is_none());
    }

    #[test]
    fn perspective_divide_collapses_tiny_w() {
        let mut v = vert_at(5.0, 5.0, 5.0, 1e-8);
        perspective_divide(&mut v);
        assert_eq!(v.position.x, 0.0);
        assert_eq!(v.position.w, 1.0);
    }
}
