//! Oriented-box geometry and screen-space projection helpers.

pub mod obb;
pub mod projection;

// Re-exports
pub use obb::{Face, OrientedBox};
pub use projection::{
  any_point_on_screen, points_on_screen, visible_face_bounds, BoundsMode, FaceBounds,
  FACING_THRESHOLD,
};
