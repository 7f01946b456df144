//! Occluder entity - a large box whose screen projection suppresses
//! occludees behind it.

use crate::occlusion::world::OccludeeId;
use crate::occlusion::EntityGeometry;

/// One registered occluder.
///
/// Geometry is measured once at registration; moving occluders are not
/// supported. The suppressed set tracks which occludees this occluder is
/// currently holding out of the scene, so an unrender can release exactly
/// those.
pub struct Occluder<I> {
  pub instance: I,
  pub(crate) geometry: EntityGeometry,
  pub(crate) suppressed: Vec<OccludeeId>,
}

impl<I> Occluder<I> {
  pub(crate) fn new(instance: I) -> Self {
    Self {
      instance,
      geometry: EntityGeometry::default(),
      suppressed: Vec::new(),
    }
  }

  pub fn geometry(&self) -> &EntityGeometry {
    &self.geometry
  }

  /// Occludees currently suppressed by this occluder.
  pub fn suppressed(&self) -> &[OccludeeId] {
    &self.suppressed
  }

  pub fn is_suppressing(&self, occludee: OccludeeId) -> bool {
    self.suppressed.contains(&occludee)
  }
}
