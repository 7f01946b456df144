//! Test fixtures for the occlusion engine.
//!
//! The fixture camera is a flat orthographic view: world X/Y map directly to
//! viewport X/Y and the camera looks down -Z, so screen rectangles in tests
//! can be read straight off the world coordinates.

use std::collections::{HashMap, HashSet};

use glam::{DAffine3, DVec2, DVec3};

use crate::camera::{CameraPose, CameraView};
use crate::geometry::OrientedBox;
use crate::occlusion::overlay::DebugDraw;
use crate::scene::SceneHost;
use crate::types::{LineColor, Projection};

/// Orthographic test camera.
///
/// A point is on screen when it lies in front of the camera (smaller Z) and
/// inside the viewport rectangle. Moving the camera along Z re-triggers the
/// movement gate without changing any projected position.
pub struct FixtureCamera {
  pub position: DVec3,
  pub right: DVec3,
  pub up: DVec3,
  pub look: DVec3,
  pub viewport: DVec2,
}

impl FixtureCamera {
  pub fn new() -> Self {
    Self {
      position: DVec3::new(0.0, 0.0, 100.0),
      right: DVec3::X,
      up: DVec3::Y,
      look: DVec3::NEG_Z,
      viewport: DVec2::new(1920.0, 1080.0),
    }
  }

  /// Camera whose right vector is degenerate, so no face ever passes the
  /// facing filter.
  pub fn with_degenerate_right() -> Self {
    Self {
      right: DVec3::ZERO,
      ..Self::new()
    }
  }

  pub fn move_by(&mut self, delta: DVec3) {
    self.position += delta;
  }
}

impl CameraView for FixtureCamera {
  fn pose(&self) -> CameraPose {
    CameraPose {
      position: self.position,
      right: self.right,
      up: self.up,
      look: self.look,
    }
  }

  fn viewport_size(&self) -> DVec2 {
    self.viewport
  }

  fn project(&self, world: DVec3) -> Projection {
    let position = DVec2::new(world.x, world.y);
    let in_front = world.z < self.position.z;
    let on_screen = in_front
      && position.x >= 0.0
      && position.x <= self.viewport.x
      && position.y >= 0.0
      && position.y <= self.viewport.y;
    Projection {
      position,
      on_screen,
    }
  }
}

/// Axis-aligned box helper for fixture scenes.
pub fn axis_box(center: DVec3, half_extents: DVec3) -> OrientedBox {
  OrientedBox::new(DAffine3::from_translation(center), half_extents)
}

/// In-memory scene host that records every attach/detach call.
#[derive(Default)]
pub struct RecordingScene {
  boxes: HashMap<u32, OrientedBox>,
  visible: HashSet<u32>,
  pub attach_calls: Vec<u32>,
  pub detach_calls: Vec<u32>,
}

impl RecordingScene {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_instance(&mut self, instance: u32, bounding_box: OrientedBox) {
    self.boxes.insert(instance, bounding_box);
    self.visible.insert(instance);
  }

  /// Instance registered without a measurable bounding box.
  pub fn add_boxless_instance(&mut self, instance: u32) {
    self.visible.insert(instance);
  }

  pub fn set_box(&mut self, instance: u32, bounding_box: OrientedBox) {
    self.boxes.insert(instance, bounding_box);
  }

  pub fn is_visible(&self, instance: u32) -> bool {
    self.visible.contains(&instance)
  }

  pub fn attach_count(&self, instance: u32) -> usize {
    self.attach_calls.iter().filter(|i| **i == instance).count()
  }

  pub fn detach_count(&self, instance: u32) -> usize {
    self.detach_calls.iter().filter(|i| **i == instance).count()
  }
}

impl SceneHost<u32> for RecordingScene {
  fn bounding_box(&self, instance: u32) -> Option<OrientedBox> {
    self.boxes.get(&instance).copied()
  }

  fn attach(&mut self, instance: u32) {
    self.attach_calls.push(instance);
    self.visible.insert(instance);
  }

  fn detach(&mut self, instance: u32) {
    self.detach_calls.push(instance);
    self.visible.remove(&instance);
  }
}

/// Debug-line sink that records every segment.
#[derive(Default)]
pub struct RecordingDraw {
  pub lines: Vec<(DVec2, DVec2, LineColor)>,
}

impl DebugDraw for RecordingDraw {
  fn line(&mut self, from: DVec2, to: DVec2, color: LineColor) {
    self.lines.push((from, to, color));
  }
}
