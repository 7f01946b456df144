//! Debug overlay drawing.
//!
//! Purely diagnostic: the overlay visualizes computed screen rectangles and
//! projected box edges, with no effect on culling decisions.

use glam::DVec2;

use crate::camera::CameraView;
use crate::geometry::Face;
use crate::types::{LineColor, ScreenBounds};

/// Occluder rectangles.
pub const OCCLUDER_COLOR: LineColor = [1.0, 0.0, 0.0];
/// Occludee rectangles.
pub const OCCLUDEE_COLOR: LineColor = [0.0, 0.0, 1.0];
/// Projected box edges.
pub const EDGE_COLOR: LineColor = [0.0, 1.0, 0.0];

/// Host-side 2-D line sink for debug visualization.
pub trait DebugDraw {
  fn line(&mut self, from: DVec2, to: DVec2, color: LineColor);
}

/// Null overlay: `world.update(&camera, &mut scene, &mut ())`.
impl DebugDraw for () {
  fn line(&mut self, _from: DVec2, _to: DVec2, _color: LineColor) {}
}

/// Draw the four edges of a screen rectangle.
pub fn outline_rect<D: DebugDraw>(bounds: &ScreenBounds, color: LineColor, draw: &mut D) {
  let [top_left, top_right, bottom_left, bottom_right] = bounds.corners();
  draw.line(top_left, top_right, color);
  draw.line(bottom_left, bottom_right, color);
  draw.line(top_left, bottom_left, color);
  draw.line(top_right, bottom_right, color);
}

/// Draw the projected edges of a box, skipping any edge with an off-screen
/// endpoint.
pub fn outline_faces<C: CameraView, D: DebugDraw>(
  faces: &[Face],
  camera: &C,
  color: LineColor,
  draw: &mut D,
) {
  for face in faces {
    for edge in &face.edges {
      let start = camera.project(edge[0]);
      let finish = camera.project(edge[1]);
      if start.on_screen && finish.on_screen {
        draw.line(start.position, finish.position, color);
      }
    }
  }
}

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;
