//! Error types for the occlusion engine.

use thiserror::Error;

/// Errors surfaced by entity geometry queries.
///
/// A not-yet-initialized entity is a recoverable condition: the frame pass
/// skips the entity and keeps going, so one bad instance cannot stall the
/// whole culling update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
  /// The entity's box geometry has not been computed yet (the scene host
  /// never produced a bounding box for its instance).
  #[error("box geometry has not been computed")]
  Uninitialized,
}
