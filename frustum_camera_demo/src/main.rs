//! Headless view-frustum culling demo.
//!
//! An observed free camera sweeps over a 100 x 100 grid of points while a
//! second camera watches from above. Each frame the observed camera's
//! frustum culls the grid and the visible count is logged.
//!
//! Run with: cargo run -p frustum_camera_demo

use frustum_camera::frustum3d::camera::{FrustumCamera, Viewport};
use frustum_camera::frustum3d::culling::{BruteForceCuller, Culler, CullingSet, FrustumCuller};
use frustum_camera::frustum3d::math::AABB;
use frustum_camera::frustum3d::Result;
use frustum_camera::camera_info;
use frustum_camera::glam::{Vec2, Vec3};

const SOURCE: &str = "frustum_camera_demo";

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 960.0;

const POINTS_X: usize = 100;
const POINTS_Z: usize = 100;

const FRAMES: usize = 240;
const DT: f32 = 1.0 / 60.0;
const LOG_EVERY: usize = 30;
const DAMPING: f32 = 0.95;

/// Everything the loop mutates, owned in one place.
struct DemoState {
    camera: FrustumCamera,
    observer: FrustumCamera,
    points: CullingSet,
    culler: Box<dyn Culler>,
    culling_enabled: bool,
    yaw: f32,
    pitch: f32,
}

impl DemoState {
    fn new() -> Result<Self> {
        let (yaw, pitch) = (-135.0, 45.0);
        let aspect = WIDTH / HEIGHT;

        let mut camera = FrustumCamera::new_free(Vec3::new(2.0, 2.0, 2.0));
        camera.setup_projection(45.0, aspect, 1.0, 10.0)?;
        camera.rotate(yaw, pitch, 0.0);
        camera.calc_frustum_planes();

        let mut observer = FrustumCamera::new_free(Vec3::new(10.0, 10.0, 10.0));
        observer.setup_projection(45.0, aspect, 0.1, 100.0)?;
        observer.rotate(yaw, pitch, 0.0);
        observer.calc_frustum_planes();

        let mut points = CullingSet::new();
        for j in 0..POINTS_Z {
            for i in 0..POINTS_X {
                let x = i as f32 / (POINTS_X - 1) as f32;
                let z = j as f32 / (POINTS_Z - 1) as f32;
                points.insert(Vec3::new(x, 0.0, z));
            }
        }

        Ok(Self {
            camera,
            observer,
            points,
            culler: Box::new(FrustumCuller::new()),
            culling_enabled: true,
            yaw,
            pitch,
        })
    }

    fn toggle_culling(&mut self) {
        self.culling_enabled = !self.culling_enabled;
        self.culler = if self.culling_enabled {
            Box::new(FrustumCuller::new())
        } else {
            Box::new(BruteForceCuller::new())
        };
        camera_info!(SOURCE, "culling {}", if self.culling_enabled { "enabled" } else { "disabled" });
    }

    /// Scripted input: walk forward for a second, turn, back off, then idle.
    fn apply_input(&mut self, frame: usize) -> Result<()> {
        match frame {
            0..=59 => self.camera.walk(DT)?,
            60..=119 => {
                self.yaw += 1.0;
                self.camera.rotate(self.yaw, self.pitch, 0.0);
            }
            120..=149 => self.camera.walk(-DT)?,
            150..=179 => self.camera.strafe(DT)?,
            _ => {
                self.camera.update();
                self.camera.damp_translation(DAMPING)?;
            }
        }
        Ok(())
    }

    fn frame(&mut self, frame: usize) -> Result<()> {
        if frame == FRAMES / 2 || frame == FRAMES / 2 + LOG_EVERY {
            self.toggle_culling();
        }

        self.apply_input(frame)?;
        self.camera.calc_frustum_planes();

        let visibility = self.culler.cull(self.camera.frustum(), &self.points);

        if frame % LOG_EVERY == 0 {
            let position = self.camera.position();
            let frustum_box = AABB::new(self.camera.near_points()[0], self.camera.far_points()[2]);
            let observed = self.observer.is_box_in_frustum(frustum_box.min, frustum_box.max);
            camera_info!(SOURCE,
                "frame {:>3}: position ({:.2}, {:.2}, {:.2}), {} of {} points visible, frustum {} from observer",
                frame,
                position.x, position.y, position.z,
                visibility.visible_count(),
                visibility.tested_count(),
                if observed { "seen" } else { "hidden" },
            );
        }
        Ok(())
    }

    /// Point under the viewport center, as the observed camera sees it.
    fn report_pick(&self) -> Result<()> {
        let viewport = Viewport::new(WIDTH, HEIGHT);
        let ray = self.camera.screen_ray(Vec2::new(WIDTH * 0.5, HEIGHT * 0.5), &viewport)?;
        let ground = if ray.direction.y.abs() > f32::EPSILON {
            let t = -ray.origin.y / ray.direction.y;
            (t >= 0.0).then(|| ray.at(t))
        } else {
            None
        };
        match ground {
            Some(p) => camera_info!(SOURCE, "center ray meets the ground at ({:.2}, 0, {:.2})", p.x, p.z),
            None => camera_info!(SOURCE, "center ray misses the ground"),
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let mut state = DemoState::new()?;
    camera_info!(SOURCE, "{} points, {} frames", state.points.len(), FRAMES);

    for frame in 0..FRAMES {
        state.frame(frame)?;
    }

    state.report_pick()?;

    let uniform = state.camera.frustum().uniform();
    camera_info!(SOURCE, "frustum uniform: {} bytes", uniform.as_bytes().len());
    Ok(())
}
