//! Camera module — perspective camera, projection and view frustum.
//!
//! The camera is a passive tool owned and driven by the caller: it never
//! recomputes derived state on its own, see [`FrustumCamera`].

mod camera;
mod frustum;
mod picking;
mod projection;

pub use camera::{
    FrustumCamera, CameraMode, FreeMode, TargetMode, TargetLimits,
    DEFAULT_FREE_SPEED,
};
pub use frustum::{
    Frustum, FrustumTest, FrustumUniform, PlaneMask,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
    CORNER_TOP_LEFT, CORNER_BOTTOM_LEFT, CORNER_BOTTOM_RIGHT, CORNER_TOP_RIGHT,
};
pub use picking::Viewport;
pub use projection::Projection;
