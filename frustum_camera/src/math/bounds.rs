/// Bounding volumes tested against camera frustums.
///
/// Three shapes are supported, matching the visibility queries a camera
/// answers: bare points, spheres and axis-aligned boxes.

use glam::{Mat4, Vec3};

// ===== AABB =====

/// Axis-Aligned Bounding Box
///
/// `min` must be component-wise <= `max`; [`AABB::new`] sorts the corners
/// so callers can pass them in any order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Box spanning two arbitrary corners.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half_extents = half_extents.abs();
        Self { min: center - half_extents, max: center + half_extents }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Corner most aligned with `normal`, picked per axis by the sign of
    /// the normal component (`>= 0` selects `max`).
    #[inline]
    pub fn positive_vertex(&self, normal: Vec3) -> Vec3 {
        Vec3::new(
            if normal.x >= 0.0 { self.max.x } else { self.min.x },
            if normal.y >= 0.0 { self.max.y } else { self.min.y },
            if normal.z >= 0.0 { self.max.z } else { self.min.z },
        )
    }

    /// Corner least aligned with `normal` (opposite of the positive vertex).
    #[inline]
    pub fn negative_vertex(&self, normal: Vec3) -> Vec3 {
        Vec3::new(
            if normal.x >= 0.0 { self.min.x } else { self.max.x },
            if normal.y >= 0.0 { self.min.y } else { self.max.y },
            if normal.z >= 0.0 { self.min.z } else { self.max.z },
        )
    }

    /// The 8 corners, bit i of the index selecting max on axis i.
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| Vec3::new(
            if i & 1 != 0 { self.max.x } else { self.min.x },
            if i & 2 != 0 { self.max.y } else { self.min.y },
            if i & 4 != 0 { self.max.z } else { self.min.z },
        ))
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Transform this local-space AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for a tight result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }
}

// ===== SPHERE =====

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius: radius.abs() }
    }

    /// Transform by an affine matrix. The radius is scaled by the largest
    /// axis scale so the result still encloses the transformed sphere.
    pub fn transformed(&self, matrix: &Mat4) -> BoundingSphere {
        let scale = matrix.col(0).truncate().length()
            .max(matrix.col(1).truncate().length())
            .max(matrix.col(2).truncate().length());
        BoundingSphere {
            center: matrix.transform_point3(self.center),
            radius: self.radius * scale,
        }
    }
}

// ===== BOUNDING VOLUME =====

/// Any volume a frustum can be asked about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingVolume {
    Point(Vec3),
    Sphere(BoundingSphere),
    Box(AABB),
}

impl BoundingVolume {
    /// Representative position (the point, the sphere center or the box center).
    pub fn center(&self) -> Vec3 {
        match self {
            BoundingVolume::Point(p) => *p,
            BoundingVolume::Sphere(s) => s.center,
            BoundingVolume::Box(b) => b.center(),
        }
    }

    pub fn transformed(&self, matrix: &Mat4) -> BoundingVolume {
        match self {
            BoundingVolume::Point(p) => BoundingVolume::Point(matrix.transform_point3(*p)),
            BoundingVolume::Sphere(s) => BoundingVolume::Sphere(s.transformed(matrix)),
            BoundingVolume::Box(b) => BoundingVolume::Box(b.transformed(matrix)),
        }
    }
}

impl From<Vec3> for BoundingVolume {
    fn from(point: Vec3) -> Self {
        BoundingVolume::Point(point)
    }
}

impl From<BoundingSphere> for BoundingVolume {
    fn from(sphere: BoundingSphere) -> Self {
        BoundingVolume::Sphere(sphere)
    }
}

impl From<AABB> for BoundingVolume {
    fn from(aabb: AABB) -> Self {
        BoundingVolume::Box(aabb)
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
