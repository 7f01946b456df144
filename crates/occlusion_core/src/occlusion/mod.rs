//! Occlusion engine: occluder/occludee entities, registries and the
//! per-frame visibility pass.

pub mod body;
pub mod occludee;
pub mod occluder;
pub mod overlay;
pub mod world;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-exports
pub use body::EntityGeometry;
pub use occludee::Occludee;
pub use occluder::Occluder;
pub use overlay::{outline_faces, outline_rect, DebugDraw};
pub use world::{OccludeeId, OccluderId, OcclusionConfig, OcclusionWorld};
