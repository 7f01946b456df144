use glam::DVec3;

use super::*;
use crate::occlusion::test_utils::{axis_box, FixtureCamera};

fn wall_faces() -> [Face; 6] {
  // Projects to the screen rectangle [(0,0), (100,100)] under the fixture
  // camera.
  axis_box(DVec3::new(50.0, 50.0, -10.0), DVec3::new(50.0, 50.0, 1.0)).faces()
}

#[test]
fn only_right_axis_face_survives_the_filter() {
  let camera = FixtureCamera::new();
  let result = visible_face_bounds(
    &wall_faces(),
    &camera,
    BoundsMode::FaceCorners,
    FACING_THRESHOLD,
  );

  // For an axis-aligned box the +X face is the only one whose normal dots
  // positively with the camera right vector.
  assert_eq!(result.visible_faces, 1);
}

#[test]
fn corner_mode_bounds_cover_the_projected_box() {
  let camera = FixtureCamera::new();
  let result = visible_face_bounds(
    &wall_faces(),
    &camera,
    BoundsMode::FaceCorners,
    FACING_THRESHOLD,
  );

  assert!(result.bounds.is_valid());
  assert_eq!(result.bounds.min.x, 0.0);
  assert_eq!(result.bounds.min.y, 0.0);
  assert_eq!(result.bounds.max.x, 100.0);
  assert_eq!(result.bounds.max.y, 100.0);
}

#[test]
fn center_mode_collects_centers_of_filtered_faces_too() {
  // No face passes the filter under a degenerate right vector, yet center
  // mode still produces bounds because centers are collected first.
  let camera = FixtureCamera::with_degenerate_right();
  let result = visible_face_bounds(
    &wall_faces(),
    &camera,
    BoundsMode::FaceCenters,
    FACING_THRESHOLD,
  );

  assert_eq!(result.visible_faces, 0);
  assert!(result.bounds.is_valid());
  assert_eq!(result.bounds.min.x, 0.0);
  assert_eq!(result.bounds.max.x, 100.0);
}

#[test]
fn raising_the_threshold_filters_everything() {
  let camera = FixtureCamera::new();
  let result = visible_face_bounds(&wall_faces(), &camera, BoundsMode::FaceCorners, 1.1);

  assert_eq!(result.visible_faces, 0);
  assert!(!result.bounds.is_valid());
}

#[test]
fn on_screen_point_counting() {
  let camera = FixtureCamera::new();
  let on_screen = axis_box(DVec3::new(50.0, 50.0, -10.0), DVec3::new(20.0, 20.0, 1.0)).corners();
  let off_screen =
    axis_box(DVec3::new(-200.0, 50.0, -10.0), DVec3::new(20.0, 20.0, 1.0)).corners();

  assert_eq!(points_on_screen(&on_screen, &camera), 8);
  assert!(any_point_on_screen(&on_screen, &camera));
  assert_eq!(points_on_screen(&off_screen, &camera), 0);
  assert!(!any_point_on_screen(&off_screen, &camera));
}

#[test]
fn points_behind_the_camera_do_not_count() {
  let camera = FixtureCamera::new();
  // Inside the viewport rectangle in X/Y, but behind the camera plane.
  let behind = axis_box(DVec3::new(50.0, 50.0, 200.0), DVec3::new(20.0, 20.0, 1.0)).corners();

  assert!(!any_point_on_screen(&behind, &camera));
}
