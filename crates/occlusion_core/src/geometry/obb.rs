//! Oriented bounding boxes: world transform, corners and faces.

use glam::{DAffine3, DVec3};

/// Rectangular prism defined by a rigid transform and half extents.
///
/// Half extents are non-negative; the transform carries rotation and
/// translation only (no skew, no scale).
#[derive(Clone, Copy, Debug)]
pub struct OrientedBox {
  pub transform: DAffine3,
  /// Half sizes along the local axes.
  pub half_extents: DVec3,
}

/// One face of an oriented box.
///
/// The normal is a signed local basis axis of the box. Corner order traces
/// the face outline, which is what the edge list and the debug overlay rely
/// on; the culling math itself only consumes the corner positions.
#[derive(Clone, Copy, Debug)]
pub struct Face {
  pub corners: [DVec3; 4],
  pub normal: DVec3,
  /// Corner pairs tracing the face outline.
  pub edges: [[DVec3; 2]; 4],
  pub center: DVec3,
}

impl OrientedBox {
  pub fn new(transform: DAffine3, half_extents: DVec3) -> Self {
    Self {
      transform,
      half_extents,
    }
  }

  /// Build from a full size instead of half extents.
  pub fn from_size(transform: DAffine3, size: DVec3) -> Self {
    Self::new(transform, size / 2.0)
  }

  /// World-space center of the box.
  pub fn position(&self) -> DVec3 {
    self.transform.translation
  }

  /// Local +X axis in world space.
  #[inline]
  pub fn right(&self) -> DVec3 {
    self.transform.matrix3.x_axis
  }

  /// Local +Y axis in world space.
  #[inline]
  pub fn up(&self) -> DVec3 {
    self.transform.matrix3.y_axis
  }

  /// View-style forward axis in world space (local -Z).
  #[inline]
  pub fn look(&self) -> DVec3 {
    -self.transform.matrix3.z_axis
  }

  /// The eight corners of the box.
  ///
  /// The ordering is fixed: the X sign flips at index 4, the Y sign at
  /// index 2 and the Z sign at index 1. [`faces`](Self::faces) indexes into
  /// this array positionally, so the order must not change.
  pub fn corners(&self) -> [DVec3; 8] {
    let h = self.half_extents;
    [
      self.transform.transform_point3(DVec3::new(-h.x, -h.y, -h.z)),
      self.transform.transform_point3(DVec3::new(-h.x, -h.y, h.z)),
      self.transform.transform_point3(DVec3::new(-h.x, h.y, -h.z)),
      self.transform.transform_point3(DVec3::new(-h.x, h.y, h.z)),
      self.transform.transform_point3(DVec3::new(h.x, -h.y, -h.z)),
      self.transform.transform_point3(DVec3::new(h.x, -h.y, h.z)),
      self.transform.transform_point3(DVec3::new(h.x, h.y, -h.z)),
      self.transform.transform_point3(DVec3::new(h.x, h.y, h.z)),
    ]
  }

  /// The six faces of the box, one per signed local axis.
  pub fn faces(&self) -> [Face; 6] {
    let c = self.corners();
    let right = self.right();
    let up = self.up();
    let look = self.look();
    [
      make_face(&c, [0, 1, 3, 2], -look),  // front
      make_face(&c, [4, 5, 7, 6], look),   // back
      make_face(&c, [0, 1, 5, 4], -up),    // bottom
      make_face(&c, [2, 3, 7, 6], up),     // top
      make_face(&c, [0, 2, 6, 4], -right), // left
      make_face(&c, [1, 3, 7, 5], right),  // right
    ]
  }
}

fn make_face(corners: &[DVec3; 8], indices: [usize; 4], normal: DVec3) -> Face {
  let quad = [
    corners[indices[0]],
    corners[indices[1]],
    corners[indices[2]],
    corners[indices[3]],
  ];
  Face {
    corners: quad,
    normal,
    edges: [
      [quad[0], quad[1]],
      [quad[1], quad[2]],
      [quad[2], quad[3]],
      [quad[3], quad[0]],
    ],
    center: (quad[0] + quad[1] + quad[2] + quad[3]) / 4.0,
  }
}

#[cfg(test)]
#[path = "obb_test.rs"]
mod obb_test;
