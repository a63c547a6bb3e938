/// Plane — a half-space described by a unit normal and a signed distance.
///
/// For a point P, `normal · P + d` is the signed distance from P to the
/// plane: positive in front (the side the normal points to), negative
/// behind. Frustum planes store inward-facing normals, so "in front"
/// means "towards the visible volume".

use glam::{Vec3, Vec4};

/// Half-width of the band around a plane inside which points are
/// classified as [`PlaneSide::Coplanar`].
pub const PLANE_EPSILON: f32 = 1e-5;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Within [`PLANE_EPSILON`] of the plane
    Coplanar,
    /// Positive signed distance
    Front,
    /// Negative signed distance
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Signed distance term
    pub d: f32,
}

impl Plane {
    /// Plane through three points.
    ///
    /// The normal is `normalize((p2 - p1) x (p3 - p1))`, so a counter-clockwise
    /// winding (seen from the front) yields a normal facing the viewer.
    /// Collinear points produce a NaN normal; see [`Plane::is_degenerate`].
    pub fn from_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        let normal = (p2 - p1).cross(p3 - p1).normalize();
        Self { normal, d: -normal.dot(p1) }
    }

    /// Plane with the given normal (normalized here) passing through `point`.
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize();
        Self { normal, d: -normal.dot(point) }
    }

    /// Plane from a raw `(a, b, c, d)` equation, rescaled so that
    /// `(a, b, c)` has unit length. A zero-length normal is kept as is.
    pub fn from_vec4(equation: Vec4) -> Self {
        let normal = equation.truncate();
        let len = normal.length();
        if len > 0.0 {
            Self { normal: normal / len, d: equation.w / len }
        } else {
            Self { normal, d: equation.w }
        }
    }

    /// Signed distance from `point` to the plane.
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    pub fn classify(&self, point: Vec3) -> PlaneSide {
        let distance = self.distance(point);
        if distance > PLANE_EPSILON {
            PlaneSide::Front
        } else if distance < -PLANE_EPSILON {
            PlaneSide::Back
        } else {
            PlaneSide::Coplanar
        }
    }

    /// `(nx, ny, nz, d)`, the layout shaders expect for plane uniforms.
    pub fn to_vec4(&self) -> Vec4 {
        self.normal.extend(self.d)
    }

    /// True when the normal is not a finite unit vector (collinear input).
    pub fn is_degenerate(&self) -> bool {
        !self.normal.is_finite() || !self.d.is_finite() || !self.normal.is_normalized()
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
