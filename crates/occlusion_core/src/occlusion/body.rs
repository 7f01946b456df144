//! Cached box geometry shared by occluders and occludees.

use glam::DVec3;

use crate::camera::CameraView;
use crate::error::GeometryError;
use crate::geometry::{
  any_point_on_screen, points_on_screen, visible_face_bounds, BoundsMode, Face, FaceBounds,
  OrientedBox,
};

/// World-space geometry of a culled entity, cached between frames.
///
/// Occluders are static, so their cache is filled once at registration.
/// Occludees refresh it every time they come back on screen. Until the first
/// refresh every query reports [`GeometryError::Uninitialized`].
#[derive(Clone, Debug, Default)]
pub struct EntityGeometry {
  cache: Option<GeometryCache>,
}

#[derive(Clone, Debug)]
struct GeometryCache {
  bounding_box: OrientedBox,
  corners: [DVec3; 8],
  faces: [Face; 6],
}

impl EntityGeometry {
  /// Recompute corners and faces from a freshly measured bounding box.
  pub fn refresh(&mut self, bounding_box: OrientedBox) {
    self.cache = Some(GeometryCache {
      bounding_box,
      corners: bounding_box.corners(),
      faces: bounding_box.faces(),
    });
  }

  pub fn is_initialized(&self) -> bool {
    self.cache.is_some()
  }

  pub fn bounding_box(&self) -> Result<&OrientedBox, GeometryError> {
    self
      .cache
      .as_ref()
      .map(|cache| &cache.bounding_box)
      .ok_or(GeometryError::Uninitialized)
  }

  pub fn corners(&self) -> Result<&[DVec3; 8], GeometryError> {
    self
      .cache
      .as_ref()
      .map(|cache| &cache.corners)
      .ok_or(GeometryError::Uninitialized)
  }

  pub fn faces(&self) -> Result<&[Face; 6], GeometryError> {
    self
      .cache
      .as_ref()
      .map(|cache| &cache.faces)
      .ok_or(GeometryError::Uninitialized)
  }

  /// True when any corner of the box projects on screen.
  pub fn is_on_screen<C: CameraView>(&self, camera: &C) -> Result<bool, GeometryError> {
    Ok(any_point_on_screen(self.corners()?, camera))
  }

  /// Number of box corners currently projecting on screen.
  pub fn corners_on_screen<C: CameraView>(&self, camera: &C) -> Result<usize, GeometryError> {
    Ok(points_on_screen(self.corners()?, camera))
  }

  /// Screen bounds of the camera-facing faces.
  pub fn screen_bounds<C: CameraView>(
    &self,
    camera: &C,
    mode: BoundsMode,
    threshold: f64,
  ) -> Result<FaceBounds, GeometryError> {
    Ok(visible_face_bounds(self.faces()?, camera, mode, threshold))
  }
}

#[cfg(test)]
#[path = "body_test.rs"]
mod body_test;
