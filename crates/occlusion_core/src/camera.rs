//! Camera access - the projection primitive supplied by the host engine.

use glam::{DVec2, DVec3};

use crate::types::Projection;

/// World-space camera pose.
///
/// The basis vectors are expected to be unit length and orthonormal.
#[derive(Clone, Copy, Debug)]
pub struct CameraPose {
  pub position: DVec3,
  /// Lateral axis, pointing to the right of the view.
  pub right: DVec3,
  pub up: DVec3,
  /// View direction.
  pub look: DVec3,
}

/// Engine-supplied camera: pose, viewport size and world-to-viewport
/// projection.
///
/// The engine re-reads all three every frame, so implementations are free to
/// return fresh values as the camera moves or the viewport resizes.
pub trait CameraView {
  fn pose(&self) -> CameraPose;

  /// Current viewport size in pixels.
  fn viewport_size(&self) -> DVec2;

  /// Project a world point into viewport coordinates.
  fn project(&self, world: DVec3) -> Projection;
}
