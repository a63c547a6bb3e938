//! Geometry primitives — planes, bounding volumes and rays.

mod bounds;
mod plane;
mod ray;

pub use bounds::{AABB, BoundingSphere, BoundingVolume};
pub use plane::{Plane, PlaneSide, PLANE_EPSILON};
pub use ray::{Ray, RayHit};
