/// FrustumCamera — perspective camera with Euler-angle orientation.
///
/// The camera owns its derived state (basis vectors, view and projection
/// matrices, frustum) but never recomputes it behind the caller's back:
///
/// 1. mutate position / orientation
/// 2. [`FrustumCamera::update`] rebuilds the basis and the view matrix
/// 3. [`FrustumCamera::calc_frustum_planes`] rebuilds corners and planes
/// 4. query `is_*_in_frustum`
///
/// [`FrustumCamera::refresh`] performs steps 2 and 3 together. Operations
/// that mirror an input action (`rotate`, `walk`, `pan`, `zoom`, ...) call
/// `update()` themselves but leave the frustum to the caller.
///
/// The two camera variants are a closed set, modelled by [`CameraMode`]:
/// a free-flying camera and a camera orbiting a target point.

use glam::{Mat3, Mat4, Vec3, Vec4};
use crate::camera_bail;
use crate::camera_debug;
use crate::camera_warn;
use crate::error::Result;
use crate::math::AABB;
use super::frustum::Frustum;
use super::projection::Projection;

const SOURCE: &str = "frustum_camera::camera";

/// Canonical look axis before rotation
const LOOK_AXIS: Vec3 = Vec3::Z;
/// Canonical up axis before rotation
const UP_AXIS: Vec3 = Vec3::Y;

/// Default free-camera movement speed (units per second)
pub const DEFAULT_FREE_SPEED: f32 = 0.5;

// ===== MODES =====

/// State of a free-flying camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeMode {
    /// Movement speed in units per second
    pub speed: f32,
    /// Displacement added to the position on every `update()`.
    ///
    /// Not reset after being applied: the caller decides when movement
    /// stops (typically by damping it each idle frame).
    pub translation: Vec3,
}

impl Default for FreeMode {
    fn default() -> Self {
        Self { speed: DEFAULT_FREE_SPEED, translation: Vec3::ZERO }
    }
}

/// Distance and pitch limits of a target camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Degrees
    pub min_pitch: f32,
    /// Degrees
    pub max_pitch: f32,
}

impl Default for TargetLimits {
    fn default() -> Self {
        Self {
            min_distance: 1.0,
            max_distance: 10.0,
            min_pitch: -60.0,
            max_pitch: 60.0,
        }
    }
}

impl TargetLimits {
    /// # Errors
    ///
    /// `Error::InvalidParameter` if a range is inverted, non-finite, or the
    /// minimum distance is not positive.
    pub fn new(min_distance: f32, max_distance: f32, min_pitch: f32, max_pitch: f32) -> Result<Self> {
        if !(min_distance.is_finite() && max_distance.is_finite() && min_pitch.is_finite() && max_pitch.is_finite()) {
            camera_bail!(SOURCE, InvalidParameter, "target limits must be finite");
        }
        if min_distance <= 0.0 || min_distance > max_distance {
            camera_bail!(SOURCE, InvalidParameter,
                "distance range [{}, {}] is invalid", min_distance, max_distance);
        }
        if min_pitch > max_pitch {
            camera_bail!(SOURCE, InvalidParameter,
                "pitch range [{}, {}] is inverted", min_pitch, max_pitch);
        }
        Ok(Self { min_distance, max_distance, min_pitch, max_pitch })
    }

    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    pub fn clamp_pitch(&self, pitch_degrees: f32) -> f32 {
        pitch_degrees.clamp(self.min_pitch, self.max_pitch)
    }
}

/// State of a camera orbiting a target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetMode {
    pub target: Vec3,
    /// Always within `[limits.min_distance, limits.max_distance]`
    pub distance: f32,
    pub limits: TargetLimits,
}

/// How position and look direction are derived before the view is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    /// Position moves along the camera's own axes
    Free(FreeMode),
    /// Position orbits `target` at a clamped distance
    Target(TargetMode),
}

impl CameraMode {
    pub fn name(&self) -> &'static str {
        match self {
            CameraMode::Free(_) => "free",
            CameraMode::Target(_) => "target",
        }
    }
}

// ===== CAMERA =====

#[derive(Debug, Clone)]
pub struct FrustumCamera {
    position: Vec3,
    /// Radians
    yaw: f32,
    /// Radians
    pitch: f32,
    /// Radians
    roll: f32,

    look: Vec3,
    up: Vec3,
    right: Vec3,

    projection: Projection,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    frustum: Frustum,

    mode: CameraMode,
}

impl FrustumCamera {
    /// Free camera at `position` looking down +Z, default projection.
    ///
    /// Derived state (view, projection, frustum) is valid on return.
    pub fn new_free(position: Vec3) -> Self {
        Self::with_mode(position, CameraMode::Free(FreeMode::default()))
    }

    /// Target camera orbiting `target` from `position`.
    ///
    /// The orbit distance is `|position - target|` clamped to `limits`;
    /// orientation starts at zero, so after construction the camera sits
    /// on the +Z side of the target.
    pub fn new_target(position: Vec3, target: Vec3, limits: TargetLimits) -> Self {
        let distance = limits.clamp_distance(position.distance(target));
        Self::with_mode(position, CameraMode::Target(TargetMode { target, distance, limits }))
    }

    fn with_mode(position: Vec3, mode: CameraMode) -> Self {
        let projection = Projection::default();
        let mut camera = Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            look: LOOK_AXIS,
            up: UP_AXIS,
            right: LOOK_AXIS.cross(UP_AXIS),
            projection,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: projection.matrix(),
            frustum: Frustum::from_camera_basis(position, LOOK_AXIS, UP_AXIS, LOOK_AXIS.cross(UP_AXIS), &projection),
            mode,
        };
        camera.refresh();
        camera
    }

    // ===== PROJECTION =====

    /// Store projection parameters and rebuild the projection matrix.
    ///
    /// # Errors
    ///
    /// `Error::InvalidProjection` (camera unchanged) if the parameters fail
    /// [`Projection::validate`].
    pub fn setup_projection(&mut self, fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Result<()> {
        self.set_projection(Projection::new(fov_y_degrees, aspect_ratio, z_near, z_far)?);
        Ok(())
    }

    /// [`setup_projection`](Self::setup_projection) with near 0.1 and far 1000.
    pub fn setup_projection_default(&mut self, fov_y_degrees: f32, aspect_ratio: f32) -> Result<()> {
        let defaults = Projection::default();
        self.setup_projection(fov_y_degrees, aspect_ratio, defaults.z_near, defaults.z_far)
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        self.projection_matrix = projection.matrix();
        camera_debug!(SOURCE, "projection: fov {} deg, aspect {}, near {}, far {}",
            projection.fov_y_degrees, projection.aspect_ratio, projection.z_near, projection.z_far);
    }

    /// Change the vertical FOV, keeping aspect ratio and clip distances.
    pub fn set_fov(&mut self, fov_degrees: f32) -> Result<()> {
        let p = self.projection;
        self.setup_projection(fov_degrees, p.aspect_ratio, p.z_near, p.z_far)
    }

    /// Change the aspect ratio (window resize), keeping FOV and clip distances.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) -> Result<()> {
        let p = self.projection;
        self.setup_projection(p.fov_y_degrees, aspect_ratio, p.z_near, p.z_far)
    }

    // ===== ORIENTATION / POSITION =====

    /// Set the orientation from Euler angles in degrees, then `update()`.
    ///
    /// Target cameras clamp the pitch to their limits first.
    pub fn rotate(&mut self, yaw: f32, pitch: f32, roll: f32) {
        let pitch = match &self.mode {
            CameraMode::Target(t) => t.limits.clamp_pitch(pitch),
            CameraMode::Free(_) => pitch,
        };
        self.yaw = yaw.to_radians();
        self.pitch = pitch.to_radians();
        self.roll = roll.to_radians();
        self.update();
    }

    /// Set the position. Does not recompute anything; call `update()`.
    ///
    /// For a target camera the position is re-derived from the target on
    /// the next `update()`; use `set_target()` afterwards to adopt the new
    /// distance.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Rebuild `look`, `up`, `right` and the view matrix from the current
    /// orientation and mode.
    pub fn update(&mut self) {
        match &self.mode {
            CameraMode::Free(free) => {
                let rotation = Mat3::from_rotation_y(self.yaw)
                    * Mat3::from_rotation_x(self.pitch)
                    * Mat3::from_rotation_z(self.roll);

                self.position += free.translation;

                self.look = rotation * LOOK_AXIS;
                self.up = rotation * UP_AXIS;
                self.right = self.look.cross(self.up);
                self.view_matrix = Mat4::look_at_rh(self.position, self.position + self.look, self.up);
            }
            CameraMode::Target(target) => {
                // Target cameras ignore roll
                let rotation = Mat3::from_rotation_y(self.yaw) * Mat3::from_rotation_x(self.pitch);

                self.position = target.target + rotation * Vec3::new(0.0, 0.0, target.distance);

                self.look = (target.target - self.position).normalize();
                self.up = rotation * UP_AXIS;
                self.right = self.look.cross(self.up);
                self.view_matrix = Mat4::look_at_rh(self.position, target.target, self.up);
            }
        }
    }

    /// Rebuild the frustum corners and planes from the current basis.
    pub fn calc_frustum_planes(&mut self) {
        self.frustum = Frustum::from_camera_basis(self.position, self.look, self.up, self.right, &self.projection);
    }

    /// `update()` followed by `calc_frustum_planes()`.
    pub fn refresh(&mut self) {
        self.update();
        self.calc_frustum_planes();
    }

    // ===== VISIBILITY =====

    pub fn is_point_in_frustum(&self, point: Vec3) -> bool {
        self.frustum.contains_point(point)
    }

    pub fn is_sphere_in_frustum(&self, center: Vec3, radius: f32) -> bool {
        self.frustum.intersects_sphere(center, radius)
    }

    pub fn is_box_in_frustum(&self, min: Vec3, max: Vec3) -> bool {
        self.frustum.intersects_aabb(&AABB { min, max })
    }

    // ===== FREE CAMERA =====

    fn free_mut(&mut self, operation: &str) -> Result<&mut FreeMode> {
        match &mut self.mode {
            CameraMode::Free(free) => Ok(free),
            CameraMode::Target(_) => {
                camera_bail!(SOURCE, UnsupportedOperation, "{}() requires a free camera", operation)
            }
        }
    }

    fn free(&self) -> Option<&FreeMode> {
        match &self.mode {
            CameraMode::Free(free) => Some(free),
            CameraMode::Target(_) => None,
        }
    }

    fn accumulate_translation(&mut self, operation: &str, axis: Vec3, dt: f32) -> Result<()> {
        let free = self.free_mut(operation)?;
        free.translation += axis * free.speed * dt;
        self.update();
        Ok(())
    }

    /// Move along `look` by `speed * dt`.
    pub fn walk(&mut self, dt: f32) -> Result<()> {
        self.accumulate_translation("walk", self.look, dt)
    }

    /// Move along `right` by `speed * dt`.
    pub fn strafe(&mut self, dt: f32) -> Result<()> {
        self.accumulate_translation("strafe", self.right, dt)
    }

    /// Move along `up` by `speed * dt`.
    pub fn lift(&mut self, dt: f32) -> Result<()> {
        self.accumulate_translation("lift", self.up, dt)
    }

    /// Replace the persistent translation, then `update()`.
    pub fn set_translation(&mut self, translation: Vec3) -> Result<()> {
        self.free_mut("set_translation")?.translation = translation;
        self.update();
        Ok(())
    }

    /// Persistent translation, `None` for a target camera.
    pub fn translation(&self) -> Option<Vec3> {
        self.free().map(|free| free.translation)
    }

    /// Scale the persistent translation by `factor` without applying it.
    ///
    /// Idle frames typically call this with ~0.95 so motion decays.
    pub fn damp_translation(&mut self, factor: f32) -> Result<()> {
        self.free_mut("damp_translation")?.translation *= factor;
        Ok(())
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<()> {
        Self::ensure_finite("set_speed", &[speed])?;
        self.free_mut("set_speed")?.speed = speed;
        Ok(())
    }

    pub fn speed(&self) -> Option<f32> {
        self.free().map(|free| free.speed)
    }

    // ===== TARGET CAMERA =====

    fn target_mut(&mut self, operation: &str) -> Result<&mut TargetMode> {
        match &mut self.mode {
            CameraMode::Target(target) => Ok(target),
            CameraMode::Free(_) => {
                camera_bail!(SOURCE, UnsupportedOperation, "{}() requires a target camera", operation)
            }
        }
    }

    fn target_state(&self) -> Option<&TargetMode> {
        match &self.mode {
            CameraMode::Target(target) => Some(target),
            CameraMode::Free(_) => None,
        }
    }

    fn ensure_finite(operation: &str, values: &[f32]) -> Result<()> {
        if values.iter().any(|v| !v.is_finite()) {
            camera_bail!(SOURCE, InvalidParameter, "{}() arguments must be finite (got {:?})", operation, values);
        }
        Ok(())
    }

    /// Set the orbit target; the distance becomes `|position - target|`,
    /// clamped. Call `update()` to move the camera.
    pub fn set_target(&mut self, target_point: Vec3) -> Result<()> {
        let position = self.position;
        let target = self.target_mut("set_target")?;
        let requested = position.distance(target_point);
        target.target = target_point;
        target.distance = target.limits.clamp_distance(requested);
        if target.distance != requested {
            camera_warn!(SOURCE, "target distance {} clamped to {}", requested, target.distance);
        }
        Ok(())
    }

    /// Orbit target, `None` for a free camera.
    pub fn target(&self) -> Option<Vec3> {
        self.target_state().map(|target| target.target)
    }

    pub fn distance(&self) -> Option<f32> {
        self.target_state().map(|target| target.distance)
    }

    pub fn limits(&self) -> Option<TargetLimits> {
        self.target_state().map(|target| target.limits)
    }

    /// Translate camera and target along `right * dx + up * dy`, then `update()`.
    pub fn pan(&mut self, dx: f32, dy: f32) -> Result<()> {
        Self::ensure_finite("pan", &[dx, dy])?;
        let offset = self.right * dx + self.up * dy;
        self.target_mut("pan")?.target += offset;
        self.position += offset;
        self.update();
        Ok(())
    }

    /// Translate camera and target along `right * dx + look * dz`, then `update()`.
    pub fn move_planar(&mut self, dx: f32, dz: f32) -> Result<()> {
        Self::ensure_finite("move_planar", &[dx, dz])?;
        let offset = self.right * dx + self.look * dz;
        self.target_mut("move_planar")?.target += offset;
        self.position += offset;
        self.update();
        Ok(())
    }

    /// Move toward the target by `amount` (away when negative), then `update()`.
    ///
    /// The resulting distance is clamped to the limits, so repeated large
    /// zooms settle on the boundary.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` (camera unchanged) if `amount` is not finite.
    pub fn zoom(&mut self, amount: f32) -> Result<()> {
        Self::ensure_finite("zoom", &[amount])?;
        let target = self.target_mut("zoom")?;
        target.distance = target.limits.clamp_distance(target.distance - amount);
        self.update();
        Ok(())
    }

    // ===== GETTERS =====

    pub fn mode(&self) -> &CameraMode {
        &self.mode
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look(&self) -> Vec3 {
        self.look
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw.to_degrees()
    }

    pub fn pitch_degrees(&self) -> f32 {
        self.pitch.to_degrees()
    }

    pub fn roll_degrees(&self) -> f32 {
        self.roll.to_degrees()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Vertical field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.projection.fov_y_degrees
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.projection.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.projection.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.projection.z_far
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Frustum as of the last `calc_frustum_planes()`.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Plane equations `(nx, ny, nz, d)` in `PLANE_*` order.
    pub fn frustum_planes(&self) -> [Vec4; 6] {
        self.frustum.plane_equations()
    }

    pub fn near_points(&self) -> &[Vec3; 4] {
        &self.frustum.near_points
    }

    pub fn far_points(&self) -> &[Vec3; 4] {
        &self.frustum.far_points
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
