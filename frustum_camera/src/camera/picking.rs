/// Screen-space picking helpers.
///
/// Converts cursor positions into world-space rays through the camera's
/// current view-projection matrix, and back.

use glam::{Vec2, Vec3};
use crate::camera_bail;
use crate::error::Result;
use crate::math::Ray;
use super::camera::FrustumCamera;

const SOURCE: &str = "frustum_camera::picking";

/// Window-space rectangle, origin at the top-left, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { x: 0.0, y: 0.0, width, height }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Window coordinates to normalized device coordinates (y up).
    pub fn to_ndc(&self, cursor: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * (cursor.x - self.x) / self.width - 1.0,
            1.0 - 2.0 * (cursor.y - self.y) / self.height,
        )
    }

    pub fn from_ndc(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            self.x + (ndc.x + 1.0) * 0.5 * self.width,
            self.y + (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

impl FrustumCamera {
    /// World-space ray from the camera position through `cursor`.
    ///
    /// The direction joins the cursor unprojected onto the near and far
    /// planes. Uses the view matrix as of the last `update()`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if the viewport has no area.
    pub fn screen_ray(&self, cursor: Vec2, viewport: &Viewport) -> Result<Ray> {
        if viewport.is_empty() {
            camera_bail!(SOURCE, InvalidParameter,
                "viewport {}x{} has no area", viewport.width, viewport.height);
        }

        let ndc = viewport.to_ndc(cursor);
        let inverse = self.view_projection_matrix().inverse();
        let start = inverse.project_point3(Vec3::new(ndc.x, ndc.y, -1.0));
        let end = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));

        Ok(Ray::new(self.position(), end - start))
    }

    /// World-space point under `cursor` at window depth `depth`.
    ///
    /// `depth` is a depth-buffer value in [0, 1]: 0 lands on the near plane,
    /// 1 on the far plane.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if the viewport has no area or `depth` is
    /// outside [0, 1].
    pub fn unproject(&self, cursor: Vec2, depth: f32, viewport: &Viewport) -> Result<Vec3> {
        if viewport.is_empty() {
            camera_bail!(SOURCE, InvalidParameter,
                "viewport {}x{} has no area", viewport.width, viewport.height);
        }
        if !(0.0..=1.0).contains(&depth) {
            camera_bail!(SOURCE, InvalidParameter, "depth must be in [0, 1] (got {})", depth);
        }

        let ndc = viewport.to_ndc(cursor);
        let inverse = self.view_projection_matrix().inverse();
        Ok(inverse.project_point3(Vec3::new(ndc.x, ndc.y, depth * 2.0 - 1.0)))
    }

    /// Window coordinates of a world-space point, or `None` when the point
    /// is behind the camera.
    pub fn project_to_screen(&self, point: Vec3, viewport: &Viewport) -> Option<Vec2> {
        let clip = self.view_projection_matrix() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
        Some(viewport.from_ndc(ndc))
    }
}

#[cfg(test)]
#[path = "picking_tests.rs"]
mod tests;
