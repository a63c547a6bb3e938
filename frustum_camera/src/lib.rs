/*!
# Frustum Camera

Perspective camera with an explicit view frustum for visibility culling.

The camera is a passive tool: the caller mutates position and orientation,
then asks it to rebuild its view matrix and frustum planes before running
visibility queries.

## Architecture

- **FrustumCamera**: Euler-angle camera, free-flying or orbiting a target
- **Projection**: Validated perspective parameters
- **Frustum**: Six inward-facing planes and eight corners
- **CullingSet / Culler**: Bounding volumes and visibility passes
- **Ray / Viewport**: Cursor picking

All public types are reachable through the [`frustum3d`] namespace.
*/

// Internal modules
mod error;
mod diagnostics;
pub mod log;
pub mod math;
pub mod camera;
pub mod culling;

// Main frustum3d namespace module
pub mod frustum3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Global logger hub
    pub use crate::diagnostics::Diagnostics;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: camera_* macros live at the crate root (frustum_camera::camera_info!)
    }

    // Geometry sub-module
    pub mod math {
        pub use crate::math::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Culling sub-module
    pub mod culling {
        pub use crate::culling::*;
    }
}

// Re-export math library at crate root
pub use glam;
