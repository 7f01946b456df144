//! Core shared types for screen-space culling.

use glam::DVec2;

/// Result of projecting a world-space point into the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
  /// Viewport coordinates of the projected point.
  ///
  /// Valid even when the point is off screen, matching the usual engine
  /// world-to-viewport primitive.
  pub position: DVec2,
  /// Whether the point lands inside the viewport in front of the camera.
  pub on_screen: bool,
}

/// RGB color for debug overlay lines, components in `[0, 1]`.
pub type LineColor = [f32; 3];

/// Axis-aligned min/max rectangle in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenBounds {
  pub min: DVec2,
  pub max: DVec2,
}

impl ScreenBounds {
  /// Degenerate rectangle at the viewport origin.
  pub const ZERO: Self = Self {
    min: DVec2::ZERO,
    max: DVec2::ZERO,
  };

  /// Create bounds with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: DVec2::INFINITY,
      max: DVec2::NEG_INFINITY,
    }
  }

  /// Create bounds from min/max corners.
  pub fn new(min: DVec2, max: DVec2) -> Self {
    Self { min, max }
  }

  /// Expand bounds to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: DVec2) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }

  /// Check that min <= max on both axes.
  pub fn is_valid(&self) -> bool {
    self.min.x <= self.max.x && self.min.y <= self.max.y
  }

  /// True when the point lies inside the rectangle, borders included.
  #[inline]
  pub fn contains(&self, point: DVec2) -> bool {
    point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
  }

  /// The four corners: top-left, top-right, bottom-left, bottom-right.
  pub fn corners(&self) -> [DVec2; 4] {
    [
      DVec2::new(self.min.x, self.min.y),
      DVec2::new(self.max.x, self.min.y),
      DVec2::new(self.min.x, self.max.y),
      DVec2::new(self.max.x, self.max.y),
    ]
  }

  pub fn width(&self) -> f64 {
    self.max.x - self.min.x
  }

  pub fn height(&self) -> f64 {
    self.max.y - self.min.y
  }

  /// Half the min-to-max diagonal length.
  pub fn half_diagonal(&self) -> f64 {
    (self.max - self.min).length() / 2.0
  }

  /// Grow the rectangle by a size factor, keeping its center.
  ///
  /// A factor of `1.25` grows each extent by a quarter, split evenly between
  /// the two sides.
  pub fn expanded(&self, factor: f64) -> Self {
    let expand_x = (self.width() * factor - self.width()) / 2.0;
    let expand_y = (self.height() * factor - self.height()) / 2.0;
    Self {
      min: DVec2::new(self.min.x - expand_x, self.min.y - expand_y),
      max: DVec2::new(self.max.x + expand_x, self.max.y + expand_y),
    }
  }
}

impl Default for ScreenBounds {
  fn default() -> Self {
    Self::empty()
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
