/// Projection — symmetric perspective parameters.
///
/// The field of view is stored in degrees (the unit callers work in) and
/// converted to radians only when the matrix is built.

use glam::Mat4;
use crate::camera_bail;
use crate::error::Result;

const SOURCE: &str = "frustum_camera::projection";

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees, in (0, 180)
    pub fov_y_degrees: f32,
    /// Width / height, > 0
    pub aspect_ratio: f32,
    /// Near clip distance, > 0
    pub z_near: f32,
    /// Far clip distance, > z_near
    pub z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            aspect_ratio: 1.0,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }
}

impl Projection {
    /// Validated constructor.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidProjection` if any parameter is non-finite,
    /// the FOV is outside (0, 180), the aspect ratio or near distance is
    /// not positive, or far is not beyond near.
    pub fn new(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Result<Self> {
        let projection = Self { fov_y_degrees, aspect_ratio, z_near, z_far };
        projection.validate()?;
        Ok(projection)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.fov_y_degrees.is_finite()
            && self.aspect_ratio.is_finite()
            && self.z_near.is_finite()
            && self.z_far.is_finite())
        {
            camera_bail!(SOURCE, InvalidProjection,
                "parameters must be finite (fov {}, aspect {}, near {}, far {})",
                self.fov_y_degrees, self.aspect_ratio, self.z_near, self.z_far);
        }
        if self.fov_y_degrees <= 0.0 || self.fov_y_degrees >= 180.0 {
            camera_bail!(SOURCE, InvalidProjection,
                "fov must be in (0, 180) degrees (got {})", self.fov_y_degrees);
        }
        if self.aspect_ratio <= 0.0 {
            camera_bail!(SOURCE, InvalidProjection,
                "aspect ratio must be > 0 (got {})", self.aspect_ratio);
        }
        if self.z_near <= 0.0 {
            camera_bail!(SOURCE, InvalidProjection,
                "near plane must be > 0 (got {})", self.z_near);
        }
        if self.z_far <= self.z_near {
            camera_bail!(SOURCE, InvalidProjection,
                "far plane ({}) must be beyond near plane ({})", self.z_far, self.z_near);
        }
        Ok(())
    }

    /// Right-handed perspective matrix with OpenGL depth range [-1, 1].
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), self.aspect_ratio, self.z_near, self.z_far)
    }

    /// `(half_width, half_height)` of the frustum cross-section at `depth`.
    pub fn half_extents_at(&self, depth: f32) -> (f32, f32) {
        let half_height = (self.fov_y_degrees.to_radians() * 0.5).tan() * depth;
        (half_height * self.aspect_ratio, half_height)
    }
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;
