//! Scene host - the attach/detach and bounding-box primitives supplied by
//! the host engine.

use crate::geometry::OrientedBox;

/// Host-side scene graph access for culled instances.
///
/// `I` is the engine's instance handle type. Detaching an instance removes it
/// from the visible scene (the entire culling payoff); attaching restores it
/// under the scene root.
pub trait SceneHost<I> {
  /// World-space oriented bounding box of the instance, if it has one.
  fn bounding_box(&self, instance: I) -> Option<OrientedBox>;

  /// Reattach the instance to the visible scene graph.
  fn attach(&mut self, instance: I);

  /// Detach the instance from the visible scene graph.
  fn detach(&mut self, instance: I);
}
