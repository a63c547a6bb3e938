use glam::{Mat4, Vec3};
use crate::error::Error;
use super::*;

fn assert_vec_eq(a: Vec3, b: Vec3, tolerance: f32) {
    assert!((a - b).length() < tolerance, "{:?} != {:?}", a, b);
}

fn assert_orthonormal(camera: &FrustumCamera) {
    let (look, up, right) = (camera.look(), camera.up(), camera.right());
    assert!((look.length() - 1.0).abs() < 1e-5, "|look| = {}", look.length());
    assert!((up.length() - 1.0).abs() < 1e-5, "|up| = {}", up.length());
    assert!((right.length() - 1.0).abs() < 1e-5, "|right| = {}", right.length());
    assert!(look.dot(up).abs() < 1e-5);
    assert!(look.dot(right).abs() < 1e-5);
    assert!(up.dot(right).abs() < 1e-5);
    assert_vec_eq(right, look.cross(up).normalize(), 1e-5);
}

fn target_camera() -> FrustumCamera {
    FrustumCamera::new_target(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, TargetLimits::default())
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_free_camera_defaults() {
    let camera = FrustumCamera::new_free(Vec3::new(1.0, 2.0, 3.0));

    assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));
    assert_vec_eq(camera.look(), Vec3::Z, 1e-6);
    assert_vec_eq(camera.up(), Vec3::Y, 1e-6);
    assert_vec_eq(camera.right(), Vec3::NEG_X, 1e-6);
    assert_eq!(camera.fov(), 45.0);
    assert_eq!(camera.z_near(), 0.1);
    assert_eq!(camera.z_far(), 1000.0);
    assert_eq!(camera.speed().unwrap(), DEFAULT_FREE_SPEED);
    assert_eq!(camera.translation().unwrap(), Vec3::ZERO);
    assert_eq!(camera.mode().name(), "free");
}

#[test]
fn test_new_target_camera_clamps_distance() {
    let near = FrustumCamera::new_target(Vec3::new(0.0, 0.0, 0.2), Vec3::ZERO, TargetLimits::default());
    assert_eq!(near.distance().unwrap(), 1.0);

    let far = FrustumCamera::new_target(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO, TargetLimits::default());
    assert_eq!(far.distance().unwrap(), 10.0);
    assert_vec_eq(far.position(), Vec3::new(0.0, 0.0, 10.0), 1e-5);
    assert_eq!(far.mode().name(), "target");
}

#[test]
fn test_target_limits_validation() {
    assert!(TargetLimits::new(1.0, 10.0, -60.0, 60.0).is_ok());
    assert!(matches!(TargetLimits::new(5.0, 1.0, -60.0, 60.0), Err(Error::InvalidParameter(_))));
    assert!(matches!(TargetLimits::new(0.0, 1.0, -60.0, 60.0), Err(Error::InvalidParameter(_))));
    assert!(matches!(TargetLimits::new(1.0, 2.0, 60.0, -60.0), Err(Error::InvalidParameter(_))));
    assert!(matches!(TargetLimits::new(1.0, f32::NAN, -60.0, 60.0), Err(Error::InvalidParameter(_))));
}

// ============================================================================
// Projection
// ============================================================================

#[test]
fn test_setup_projection_rebuilds_matrix() {
    let mut camera = FrustumCamera::new_free(Vec3::ZERO);
    camera.setup_projection(60.0, 2.0, 0.5, 200.0).unwrap();

    let expected = Mat4::perspective_rh_gl(60f32.to_radians(), 2.0, 0.5, 200.0);
    assert!(camera.projection_matrix().abs_diff_eq(expected, 1e-6));
    assert_eq!(camera.aspect_ratio(), 2.0);
}

#[test]
fn test_invalid_projection_leaves_camera_unchanged() {
    let mut camera = FrustumCamera::new_free(Vec3::ZERO);
    camera.setup_projection(45.0, 1.5, 1.0, 100.0).unwrap();
    let before = *camera.projection_matrix();

    assert!(matches!(camera.setup_projection(45.0, 0.0, 1.0, 100.0), Err(Error::InvalidProjection(_))));
    assert!(matches!(camera.setup_projection(45.0, 1.5, 10.0, 1.0), Err(Error::InvalidProjection(_))));
    assert!(camera.set_fov(-5.0).is_err());

    assert_eq!(*camera.projection_matrix(), before);
    assert_eq!(camera.fov(), 45.0);
}

#[test]
fn test_set_fov_and_aspect_keep_other_parameters() {
    let mut camera = FrustumCamera::new_free(Vec3::ZERO);
    camera.setup_projection(45.0, 1.5, 1.0, 100.0).unwrap();

    camera.set_fov(70.0).unwrap();
    assert_eq!(*camera.projection(), Projection { fov_y_degrees: 70.0, aspect_ratio: 1.5, z_near: 1.0, z_far: 100.0 });

    camera.set_aspect_ratio(0.5).unwrap();
    assert_eq!(*camera.projection(), Projection { fov_y_degrees: 70.0, aspect_ratio: 0.5, z_near: 1.0, z_far: 100.0 });
}

#[test]
fn test_setup_projection_default_clip_range() {
    let mut camera = FrustumCamera::new_free(Vec3::ZERO);
    camera.setup_projection(45.0, 1.0, 5.0, 50.0).unwrap();
    camera.setup_projection_default(30.0, 4.0 / 3.0).unwrap();

    assert_eq!(camera.z_near(), 0.1);
    assert_eq!(camera.z_far(), 1000.0);
    assert_eq!(camera.fov(), 30.0);
}

// ============================================================================
// Orientation
// ============================================================================

#[test]
fn test_rotate_yields_orthonormal_basis() {
    let mut camera = FrustumCamera::new_free(Vec3::ZERO);

    for yaw in [-180.0, -95.0, -30.0, 0.0, 45.0, 135.0, 270.0] {
        for pitch in [-89.0, -45.0, 0.0, 12.5, 60.0, 89.0] {
            camera.rotate(yaw, pitch, 0.0);
            assert_orthonormal(&camera);
        }
    }

    camera.rotate(33.0, -20.0, 75.0);
    assert_orthonormal(&camera);
}

#[test]
fn test_rotate_converts_degrees() {
    let mut camera = FrustumCamera::new_free(Vec3::ZERO);

    // Yaw 90 turns +Z toward +X
    camera.rotate(90.0, 0.0, 0.0);
    assert_vec_eq(camera.look(), Vec3::X, 1e-5);
    assert!((camera.yaw_degrees() - 90.0).abs() < 1e-4);

    // Positive pitch tilts the view down
    camera.rotate(0.0, 30.0, 0.0);
    assert!(camera.look().y < 0.0);
    assert!((camera.pitch_degrees() - 30.0).abs() < 1e-4);

    // Roll spins the up vector around look
    camera.rotate(0.0, 0.0, 90.0);
    assert_vec_eq(camera.look(), Vec3::Z, 1e-5);
    assert_vec_eq(camera.up(), Vec3::NEG_X, 1e-5);
    assert!((camera.roll_degrees() - 90.0).abs() < 1e-4);
}

#[test]
fn test_view_matrix_maps_look_to_negative_z() {
    let mut camera = FrustumCamera::new_free(Vec3::new(3.0, -2.0, 7.0));
    camera.rotate(40.0, -15.0, 0.0);

    let view = camera.view_matrix();
    assert_vec_eq(view.transform_point3(camera.position()), Vec3::ZERO, 1e-4);
    assert_vec_eq(view.transform_vector3(camera.look()), Vec3::NEG_Z, 1e-5);
    assert_vec_eq(view.transform_vector3(camera.right()), Vec3::X, 1e-5);
    assert_eq!(camera.view_projection_matrix(), *camera.projection_matrix() * *view);
}

#[test]
fn test_set_position_requires_update() {
    let mut camera = FrustumCamera::new_free(Vec3::ZERO);
    let view_before = *camera.view_matrix();

    camera.set_position(Vec3::new(0.0, 0.0, -10.0));
    assert_eq!(*camera.view_matrix(), view_before);

    camera.update();
    assert_vec_eq(camera.view_matrix().transform_point3(Vec3::new(0.0, 0.0, -10.0)), Vec3::ZERO, 1e-5);
}

// ============================================================================
// Frustum queries
// ============================================================================

#[test]
fn test_point_in_front_inside_behind_outside() {
    let mut camera = FrustumCamera::new_free(Vec3::ZERO);
    camera.setup_projection(45.0, 1.0, 1.0, 100.0).unwrap();
    camera.update();
    camera.calc_frustum_planes();

    let look = camera.look();
    assert!(camera.is_point_in_frustum(camera.position() + look * 50.0));
    assert!(!camera.is_point_in_frustum(camera.position() - look * 10.0));
    assert!(!camera.is_point_in_frustum(camera.position() + look * 150.0));
}

#[test]
fn test_sphere_radius_zero_matches_point() {
    let mut camera = FrustumCamera::new_free(Vec3::new(1.0, 2.0, -3.0));
    camera.setup_projection(60.0, 1.5, 0.5, 80.0).unwrap();
    camera.rotate(-25.0, 10.0, 0.0);
    camera.calc_frustum_planes();

    for x in [-40.0, -5.0, 0.0, 3.0, 25.0] {
        for z in [-20.0, 0.0, 10.0, 60.0, 120.0] {
            let p = Vec3::new(x, 1.0, z);
            assert_eq!(camera.is_sphere_in_frustum(p, 0.0), camera.is_point_in_frustum(p), "{:?}", p);
        }
    }
}

#[test]
fn test_box_in_frustum() {
    let mut camera = FrustumCamera::new_free(Vec3::new(0.0, 0.0, -5.0));
    camera.setup_projection(45.0, 1.0, 1.0, 100.0).unwrap();
    camera.refresh();

    assert!(camera.is_box_in_frustum(Vec3::splat(-0.5), Vec3::splat(0.5)));

    let behind = camera.position() - camera.look() * 1000.0;
    assert!(!camera.is_box_in_frustum(behind - Vec3::splat(0.5), behind + Vec3::splat(0.5)));
}

#[test]
fn test_frustum_is_stale_until_recomputed() {
    let mut camera = FrustumCamera::new_free(Vec3::ZERO);
    camera.setup_projection(45.0, 1.0, 1.0, 100.0).unwrap();
    camera.refresh();

    let ahead = Vec3::new(0.0, 0.0, 20.0);
    assert!(camera.is_point_in_frustum(ahead));

    // Turn around; planes still describe the old view
    camera.rotate(180.0, 0.0, 0.0);
    assert!(camera.is_point_in_frustum(ahead));

    camera.calc_frustum_planes();
    assert!(!camera.is_point_in_frustum(ahead));
}

#[test]
fn test_frustum_accessors_agree() {
    let mut camera = FrustumCamera::new_free(Vec3::new(0.0, 1.0, 0.0));
    camera.setup_projection(50.0, 1.25, 0.5, 40.0).unwrap();
    camera.rotate(15.0, 5.0, 0.0);
    camera.calc_frustum_planes();

    let planes = camera.frustum_planes();
    for (equation, plane) in planes.iter().zip(camera.frustum().planes.iter()) {
        assert_eq!(*equation, plane.to_vec4());
    }
    assert_eq!(camera.near_points(), &camera.frustum().near_points);
    assert_eq!(camera.far_points(), &camera.frustum().far_points);

    // Near corners sit at z_near along look
    let center = camera.near_points().iter().copied().sum::<Vec3>() / 4.0;
    assert_vec_eq(center, camera.position() + camera.look() * 0.5, 1e-4);
}

// ============================================================================
// Free camera
// ============================================================================

#[test]
fn test_translation_persists_across_updates() {
    let mut camera = FrustumCamera::new_free(Vec3::ZERO);

    camera.set_translation(Vec3::new(1.0, 0.0, 0.0)).unwrap();
    assert_vec_eq(camera.position(), Vec3::new(1.0, 0.0, 0.0), 1e-6);

    camera.update();
    camera.update();
    assert_vec_eq(camera.position(), Vec3::new(3.0, 0.0, 0.0), 1e-6);
    assert_eq!(camera.translation().unwrap(), Vec3::new(1.0, 0.0, 0.0));

    camera.set_translation(Vec3::ZERO).unwrap();
    camera.update();
    assert_vec_eq(camera.position(), Vec3::new(3.0, 0.0, 0.0), 1e-6);
}

#[test]
fn test_walk_strafe_lift_accumulate_translation() {
    let mut camera = FrustumCamera::new_free(Vec3::ZERO);
    camera.set_speed(2.0).unwrap();

    camera.walk(0.5).unwrap();
    assert_vec_eq(camera.translation().unwrap(), Vec3::Z, 1e-6);
    assert_vec_eq(camera.position(), Vec3::Z, 1e-6);

    camera.strafe(0.5).unwrap();
    assert_vec_eq(camera.translation().unwrap(), Vec3::new(-1.0, 0.0, 1.0), 1e-6);

    camera.lift(-0.5).unwrap();
    assert_vec_eq(camera.translation().unwrap(), Vec3::new(-1.0, -1.0, 1.0), 1e-6);
    assert_eq!(camera.speed().unwrap(), 2.0);
}

#[test]
fn test_damp_translation_decays_without_applying() {
    let mut camera = FrustumCamera::new_free(Vec3::ZERO);
    camera.set_translation(Vec3::new(0.0, 0.0, 1.0)).unwrap();
    let position = camera.position();

    for _ in 0..10 {
        camera.damp_translation(0.5).unwrap();
    }

    assert_eq!(camera.position(), position);
    assert!(camera.translation().unwrap().length() < 1e-3);
}

#[test]
fn test_free_operations_rejected_on_target_camera() {
    let mut camera = target_camera();
    let position = camera.position();

    assert!(matches!(camera.walk(1.0), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(camera.strafe(1.0), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(camera.lift(1.0), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(camera.set_translation(Vec3::ONE), Err(Error::UnsupportedOperation(_))));
    assert_eq!(camera.translation(), None);
    assert_eq!(camera.speed(), None);

    assert_eq!(camera.position(), position);
}

#[test]
fn test_set_speed_rejects_non_finite() {
    let mut camera = FrustumCamera::new_free(Vec3::ZERO);
    assert!(matches!(camera.set_speed(f32::NAN), Err(Error::InvalidParameter(_))));
    assert_eq!(camera.speed().unwrap(), DEFAULT_FREE_SPEED);
}

// ============================================================================
// Target camera
// ============================================================================

#[test]
fn test_target_camera_looks_at_target() {
    let mut camera = target_camera();

    for (yaw, pitch) in [(0.0, 0.0), (45.0, 20.0), (-120.0, -35.0), (200.0, 59.0)] {
        camera.rotate(yaw, pitch, 0.0);
        let target = camera.target().unwrap();
        let to_target = target - camera.position();

        assert!((to_target.length() - camera.distance().unwrap()).abs() < 1e-4);
        assert_vec_eq(camera.look(), to_target.normalize(), 1e-5);
        assert_orthonormal(&camera);
    }
}

#[test]
fn test_target_rotate_clamps_pitch() {
    let mut camera = target_camera();

    camera.rotate(0.0, 85.0, 0.0);
    assert!((camera.pitch_degrees() - 60.0).abs() < 1e-4);

    camera.rotate(0.0, -400.0, 0.0);
    assert!((camera.pitch_degrees() + 60.0).abs() < 1e-4);
}

#[test]
fn test_zoom_stays_within_limits() {
    let mut camera = target_camera();
    assert_eq!(camera.distance().unwrap(), 5.0);

    camera.zoom(1.5).unwrap();
    assert!((camera.distance().unwrap() - 3.5).abs() < 1e-5);

    for _ in 0..5 {
        camera.zoom(100.0).unwrap();
        assert_eq!(camera.distance().unwrap(), 1.0);
    }
    for _ in 0..5 {
        camera.zoom(-1e6).unwrap();
        assert_eq!(camera.distance().unwrap(), 10.0);
    }
    for amount in [0.3, -7.0, 42.0, -0.01, f32::MAX] {
        camera.zoom(amount).unwrap();
        let distance = camera.distance().unwrap();
        assert!((1.0..=10.0).contains(&distance), "distance {} escaped", distance);
    }
}

#[test]
fn test_zoom_moves_position_along_look() {
    let mut camera = target_camera();
    camera.rotate(30.0, 10.0, 0.0);
    let look = camera.look();
    let before = camera.position();

    camera.zoom(2.0).unwrap();
    assert_vec_eq(camera.position(), before + look * 2.0, 1e-4);
}

#[test]
fn test_pan_moves_camera_and_target() {
    let mut camera = target_camera();
    camera.rotate(25.0, -10.0, 0.0);
    let (right, up) = (camera.right(), camera.up());
    let (position, target) = (camera.position(), camera.target().unwrap());

    camera.pan(2.0, -1.0).unwrap();

    let offset = right * 2.0 - up;
    assert_vec_eq(camera.target().unwrap(), target + offset, 1e-5);
    assert_vec_eq(camera.position(), position + offset, 1e-4);
    assert_eq!(camera.distance().unwrap(), 5.0);
}

#[test]
fn test_move_planar_uses_look_axis() {
    let mut camera = target_camera();
    let look = camera.look();
    let target = camera.target().unwrap();

    camera.move_planar(0.0, 3.0).unwrap();
    assert_vec_eq(camera.target().unwrap(), target + look * 3.0, 1e-5);
}

#[test]
fn test_set_target_recomputes_distance() {
    let mut camera = target_camera();

    camera.set_target(Vec3::new(0.0, 0.0, 2.0)).unwrap();
    assert!((camera.distance().unwrap() - 3.0).abs() < 1e-5);

    camera.set_target(Vec3::new(0.0, 0.0, 100.0)).unwrap();
    assert_eq!(camera.distance().unwrap(), 10.0);
    assert_eq!(camera.limits().unwrap(), TargetLimits::default());
}

#[test]
fn test_target_operations_rejected_on_free_camera() {
    let mut camera = FrustumCamera::new_free(Vec3::ZERO);

    assert!(matches!(camera.zoom(1.0), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(camera.pan(1.0, 1.0), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(camera.move_planar(1.0, 1.0), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(camera.set_target(Vec3::ONE), Err(Error::UnsupportedOperation(_))));
    assert_eq!(camera.target(), None);
    assert_eq!(camera.distance(), None);
    assert_eq!(camera.limits(), None);
    assert_eq!(camera.position(), Vec3::ZERO);
}

#[test]
fn test_non_finite_target_input_leaves_camera_unchanged() {
    let mut camera = target_camera();
    camera.rotate(30.0, 15.0, 0.0);
    let (position, target) = (camera.position(), camera.target().unwrap());

    assert!(matches!(camera.zoom(f32::NAN), Err(Error::InvalidParameter(_))));
    assert!(matches!(camera.zoom(f32::INFINITY), Err(Error::InvalidParameter(_))));
    assert!(matches!(camera.pan(f32::NAN, 0.0), Err(Error::InvalidParameter(_))));
    assert!(matches!(camera.move_planar(0.0, f32::NEG_INFINITY), Err(Error::InvalidParameter(_))));

    assert_eq!(camera.distance().unwrap(), 5.0);
    assert_eq!(camera.position(), position);
    assert_eq!(camera.target().unwrap(), target);

    // Still usable afterwards
    camera.zoom(1.0).unwrap();
    assert!((camera.distance().unwrap() - 4.0).abs() < 1e-5);
    assert!(camera.position().is_finite());
}
