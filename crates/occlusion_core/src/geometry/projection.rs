//! Screen-space projection of box geometry.
//!
//! The visible-face bounding box drives the whole containment test: filter
//! the faces of a box down to the camera-facing ones, project their corners
//! into the viewport and take the axis-aligned min/max.

use glam::DVec3;

use crate::camera::CameraView;
use crate::geometry::Face;
use crate::types::ScreenBounds;

/// Default facing-filter threshold. A face counts as camera-facing when the
/// dot product of its normal with the camera right axis reaches this value.
///
/// Testing against the right axis rather than the view direction is the
/// behavior this engine shipped with; callers relying on which faces pass
/// the filter should treat it as load-bearing.
pub const FACING_THRESHOLD: f64 = 0.1;

/// Which points of a face feed the screen bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundsMode {
  /// Project the four corners of every camera-facing face.
  FaceCorners,
  /// Project only face centers. Centers are collected before the facing
  /// filter runs, so all six contribute to the bounds.
  FaceCenters,
}

/// Screen bounds of the camera-facing faces of a box.
#[derive(Clone, Copy, Debug)]
pub struct FaceBounds {
  /// Min/max over all collected screen points. Invalid (inverted) when no
  /// point was collected.
  pub bounds: ScreenBounds,
  /// Number of faces that survived the facing filter.
  pub visible_faces: usize,
}

/// Compute the screen bounds of the camera-facing faces.
pub fn visible_face_bounds<C: CameraView>(
  faces: &[Face],
  camera: &C,
  mode: BoundsMode,
  threshold: f64,
) -> FaceBounds {
  let right = camera.pose().right;
  let mut bounds = ScreenBounds::empty();
  let mut visible_faces = 0;

  for face in faces {
    if mode == BoundsMode::FaceCenters {
      bounds.encapsulate(camera.project(face.center).position);
    }

    if face.normal.dot(right) < threshold {
      continue;
    }
    visible_faces += 1;

    if mode == BoundsMode::FaceCorners {
      for corner in &face.corners {
        bounds.encapsulate(camera.project(*corner).position);
      }
    }
  }

  FaceBounds {
    bounds,
    visible_faces,
  }
}

/// True when any of the given world points projects on screen.
pub fn any_point_on_screen<C: CameraView>(points: &[DVec3], camera: &C) -> bool {
  points.iter().any(|point| camera.project(*point).on_screen)
}

/// Count of the given world points that project on screen.
pub fn points_on_screen<C: CameraView>(points: &[DVec3], camera: &C) -> usize {
  points
    .iter()
    .filter(|point| camera.project(**point).on_screen)
    .count()
}

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;
