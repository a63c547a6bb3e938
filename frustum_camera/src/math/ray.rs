/// Ray — half-line used for picking scene objects under the cursor.

use glam::Vec3;
use super::bounds::{AABB, BoundingSphere};

/// Parametric interval where a ray overlaps a volume.
///
/// `t_near` may be negative when the ray origin is inside the volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub t_near: f32,
    pub t_far: f32,
}

impl RayHit {
    /// First non-negative parameter along the ray.
    pub fn entry(&self) -> f32 {
        self.t_near.max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` along `direction` (normalized here).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction: direction.normalize() }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test against an AABB.
    ///
    /// Zero direction components divide to +/-inf, which the min/max
    /// reduction handles without special cases.
    pub fn intersect_aabb(&self, aabb: &AABB) -> Option<RayHit> {
        let inv_dir = self.direction.recip();
        let t_min = (aabb.min - self.origin) * inv_dir;
        let t_max = (aabb.max - self.origin) * inv_dir;
        let t1 = t_min.min(t_max);
        let t2 = t_min.max(t_max);
        let t_near = t1.max_element();
        let t_far = t2.min_element();

        if t_near < t_far && t_far >= 0.0 {
            Some(RayHit { t_near, t_far })
        } else {
            None
        }
    }

    pub fn intersect_sphere(&self, sphere: &BoundingSphere) -> Option<RayHit> {
        let oc = self.origin - sphere.center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - sphere.radius * sphere.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let t_near = -b - root;
        let t_far = -b + root;
        if t_far >= 0.0 {
            Some(RayHit { t_near, t_far })
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "ray_tests.rs"]
mod tests;
