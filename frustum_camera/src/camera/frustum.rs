/// Frustum — six clipping planes and eight corner points for visibility culling.
///
/// Every plane normal points inward (toward the visible volume), so a
/// point P is inside the frustum iff `plane.distance(P) >= 0` for all six
/// planes.
///
/// Two constructors are provided:
/// - [`Frustum::from_camera_basis`] builds the corners from the camera
///   position, basis vectors and projection parameters, then derives the
///   planes from corner triples (what [`FrustumCamera`](super::FrustumCamera) uses).
/// - [`Frustum::from_view_projection`] extracts the planes from any
///   view-projection matrix (Gribb & Hartmann).

use bitflags::bitflags;
use glam::{Mat4, Vec3, Vec4};
use crate::math::{AABB, BoundingSphere, BoundingVolume, Plane};
use super::projection::Projection;

/// Result of a 3-way frustum/AABB classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// AABB is entirely outside the frustum
    Outside,
    /// AABB is entirely inside the frustum
    Inside,
    /// AABB partially overlaps the frustum
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Corner indices within `near_points` / `far_points`
pub const CORNER_TOP_LEFT: usize = 0;
pub const CORNER_BOTTOM_LEFT: usize = 1;
pub const CORNER_BOTTOM_RIGHT: usize = 2;
pub const CORNER_TOP_RIGHT: usize = 3;

bitflags! {
    /// Set of frustum planes, one bit per `PLANE_*` index.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PlaneMask: u8 {
        const LEFT   = 1 << 0;
        const RIGHT  = 1 << 1;
        const BOTTOM = 1 << 2;
        const TOP    = 1 << 3;
        const NEAR   = 1 << 4;
        const FAR    = 1 << 5;
    }
}

impl PlaneMask {
    /// Mask holding the single plane `index` (0..6).
    pub fn from_index(index: usize) -> Self {
        PlaneMask::from_bits_truncate(1u8 << index)
    }
}

/// Plane equations packed for a `vec4 FrustumPlanes[6]` shader uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumUniform {
    pub planes: [Vec4; 6],
}

impl FrustumUniform {
    /// Raw bytes, 6 x vec4 of f32 (96 bytes).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.planes[..])
    }
}

/// Six frustum planes plus the corner points they were built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Planes indexed by `PLANE_*`
    pub planes: [Plane; 6],
    /// Near rectangle, indexed by `CORNER_*`
    pub near_points: [Vec3; 4],
    /// Far rectangle, indexed by `CORNER_*`
    pub far_points: [Vec3; 4],
}

impl Frustum {
    /// Build the frustum of a perspective camera.
    ///
    /// `look`, `up` and `right` must be an orthonormal basis with
    /// `right = look x up`. Corners are `center +/- up * half_height +/- right * half_width`
    /// on the near and far planes; each side plane is spanned by two near
    /// corners and one far corner, wound so its normal faces inward.
    pub fn from_camera_basis(
        position: Vec3,
        look: Vec3,
        up: Vec3,
        right: Vec3,
        projection: &Projection,
    ) -> Self {
        let near_center = position + look * projection.z_near;
        let far_center = position + look * projection.z_far;

        let (half_w_near, half_h_near) = projection.half_extents_at(projection.z_near);
        let (half_w_far, half_h_far) = projection.half_extents_at(projection.z_far);

        let rect = |center: Vec3, half_w: f32, half_h: f32| -> [Vec3; 4] {
            [
                center + up * half_h - right * half_w, // top left
                center - up * half_h - right * half_w, // bottom left
                center - up * half_h + right * half_w, // bottom right
                center + up * half_h + right * half_w, // top right
            ]
        };

        let near_points = rect(near_center, half_w_near, half_h_near);
        let far_points = rect(far_center, half_w_far, half_h_far);

        Self {
            planes: Self::planes_from_corners(&near_points, &far_points),
            near_points,
            far_points,
        }
    }

    /// Extract frustum planes from an OpenGL-convention view-projection matrix.
    ///
    /// Corners are recovered by unprojecting the NDC cube through the
    /// inverse matrix, so `vp` must be invertible.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let planes = [
            Plane::from_vec4(row3 + row0), // left
            Plane::from_vec4(row3 - row0), // right
            Plane::from_vec4(row3 + row1), // bottom
            Plane::from_vec4(row3 - row1), // top
            Plane::from_vec4(row3 + row2), // near
            Plane::from_vec4(row3 - row2), // far
        ];

        let inverse = vp.inverse();
        let ndc_rect = |z: f32| -> [Vec3; 4] {
            [
                inverse.project_point3(Vec3::new(-1.0, 1.0, z)),
                inverse.project_point3(Vec3::new(-1.0, -1.0, z)),
                inverse.project_point3(Vec3::new(1.0, -1.0, z)),
                inverse.project_point3(Vec3::new(1.0, 1.0, z)),
            ]
        };

        Self {
            planes,
            near_points: ndc_rect(-1.0),
            far_points: ndc_rect(1.0),
        }
    }

    fn planes_from_corners(near: &[Vec3; 4], far: &[Vec3; 4]) -> [Plane; 6] {
        let (tl, bl, br, tr) = (CORNER_TOP_LEFT, CORNER_BOTTOM_LEFT, CORNER_BOTTOM_RIGHT, CORNER_TOP_RIGHT);
        [
            Plane::from_points(near[tl], near[bl], far[bl]), // left
            Plane::from_points(near[br], near[tr], far[br]), // right
            Plane::from_points(near[bl], near[br], far[br]), // bottom
            Plane::from_points(near[tr], near[tl], far[tl]), // top
            Plane::from_points(near[tl], near[tr], near[br]), // near
            Plane::from_points(far[tr], far[tl], far[bl]),   // far
        ]
    }

    // ===== QUERIES =====

    /// True iff the point is inside or on every plane.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.distance(point) >= 0.0)
    }

    /// Conservative sphere test: rejected only when the sphere lies
    /// entirely behind some plane.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes.iter().all(|plane| plane.distance(center) >= -radius)
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// Uses the "positive vertex" test: for each plane, find the AABB corner
    /// most in the direction of the plane normal. If that corner is outside,
    /// the AABB is fully outside.
    ///
    /// May return false positives for boxes near frustum edges, never
    /// false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance(aabb.positive_vertex(plane.normal)) >= 0.0)
    }

    /// Classify an AABB against the frustum (3-way test).
    ///
    /// - p-vertex outside any plane → `Outside` (early out)
    /// - n-vertex outside any plane → at least `Partial`
    /// - otherwise → `Inside`
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        let mut all_inside = true;

        for plane in &self.planes {
            if plane.distance(aabb.positive_vertex(plane.normal)) < 0.0 {
                return FrustumTest::Outside;
            }
            if plane.distance(aabb.negative_vertex(plane.normal)) < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }

    pub fn is_visible(&self, volume: &BoundingVolume) -> bool {
        match volume {
            BoundingVolume::Point(p) => self.contains_point(*p),
            BoundingVolume::Sphere(BoundingSphere { center, radius }) => {
                self.intersects_sphere(*center, *radius)
            }
            BoundingVolume::Box(aabb) => self.intersects_aabb(aabb),
        }
    }

    /// Every plane that rejects `volume` (no early out).
    ///
    /// Empty exactly when [`Frustum::is_visible`] is true.
    pub fn outside_planes(&self, volume: &BoundingVolume) -> PlaneMask {
        let mut mask = PlaneMask::empty();
        for (index, plane) in self.planes.iter().enumerate() {
            let outside = match volume {
                BoundingVolume::Point(p) => plane.distance(*p) < 0.0,
                BoundingVolume::Sphere(s) => plane.distance(s.center) < -s.radius,
                BoundingVolume::Box(aabb) => plane.distance(aabb.positive_vertex(plane.normal)) < 0.0,
            };
            if outside {
                mask |= PlaneMask::from_index(index);
            }
        }
        mask
    }

    // ===== EXPORT =====

    /// Plane equations `(nx, ny, nz, d)` in `PLANE_*` order.
    pub fn plane_equations(&self) -> [Vec4; 6] {
        self.planes.map(|plane| plane.to_vec4())
    }

    pub fn uniform(&self) -> FrustumUniform {
        FrustumUniform { planes: self.plane_equations() }
    }

    /// All 8 corners: far rectangle first, then near, each in `CORNER_*` order.
    pub fn corners(&self) -> [Vec3; 8] {
        let (far, near) = (&self.far_points, &self.near_points);
        [far[0], far[1], far[2], far[3], near[0], near[1], near[2], near[3]]
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
