//! Occludee entity - an object that may be hidden when fully covered by an
//! occluder's screen projection.

use crate::camera::CameraView;
use crate::error::GeometryError;
use crate::geometry::BoundsMode;
use crate::occlusion::EntityGeometry;
use crate::scene::SceneHost;
use crate::types::ScreenBounds;

/// One registered occludee.
///
/// `bounds` is the padded screen rectangle recomputed while the occludee is
/// on screen; it starts as a degenerate rectangle at the origin until the
/// first on-screen measurement. `occluded` mirrors whether the instance is
/// currently detached from the visible scene.
pub struct Occludee<I> {
  pub instance: I,
  pub(crate) geometry: EntityGeometry,
  pub(crate) bounds: ScreenBounds,
  pub(crate) occluded: bool,
}

impl<I: Copy> Occludee<I> {
  pub(crate) fn new(instance: I) -> Self {
    Self {
      instance,
      geometry: EntityGeometry::default(),
      bounds: ScreenBounds::ZERO,
      occluded: false,
    }
  }

  pub fn geometry(&self) -> &EntityGeometry {
    &self.geometry
  }

  /// Current padded screen bounds.
  pub fn bounds(&self) -> ScreenBounds {
    self.bounds
  }

  /// Whether the instance is currently suppressed (detached from the scene).
  pub fn is_occluded(&self) -> bool {
    self.occluded
  }

  /// Flip the suppression state and apply it to the scene graph.
  ///
  /// Callers only invoke this on a state change, which keeps the scene
  /// attach/detach traffic edge-triggered.
  pub(crate) fn set_occluded<S: SceneHost<I>>(&mut self, occluded: bool, scene: &mut S) {
    self.occluded = occluded;
    if occluded {
      scene.detach(self.instance);
    } else {
      scene.attach(self.instance);
    }
  }

  /// Recompute the padded screen bounds from the camera-facing faces.
  ///
  /// Occludees always project face corners, regardless of the occluder
  /// bounds mode. When no face survives the facing filter the previous
  /// bounds are kept and `Ok(false)` is returned.
  pub(crate) fn update_bounds<C: CameraView>(
    &mut self,
    camera: &C,
    padding: f64,
    threshold: f64,
  ) -> Result<bool, GeometryError> {
    let face_bounds = self
      .geometry
      .screen_bounds(camera, BoundsMode::FaceCorners, threshold)?;
    if face_bounds.visible_faces == 0 {
      return Ok(false);
    }
    self.bounds = face_bounds.bounds.expanded(padding);
    Ok(true)
  }
}

#[cfg(test)]
#[path = "occludee_test.rs"]
mod occludee_test;
