//! Region pool for the octree.
//!
//! Regions form a fixed-depth tree of cube cells. They live in a pool and
//! reference each other by index, so upward pruning never needs shared
//! ownership: a region owns its children top-down and keeps a non-owning
//! parent index for the walk back up.

use glam::DVec3;
use smallvec::SmallVec;

use super::OctreeNodeId;

/// Number of subdivision levels, including the top level. Leaf cells sit at
/// this level, with an edge of `top_region_size / 8`.
pub(crate) const MAX_LEVELS: u8 = 4;

/// Index of a region in the pool. Crate-internal; node handles are the only
/// references handed out to callers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct RegionId(pub(crate) u32);

/// A region is a container of either child regions or nodes, never both.
#[derive(Clone, Debug)]
pub(crate) enum RegionKind {
  Interior(SmallVec<[RegionId; 8]>),
  Leaf(Vec<OctreeNodeId>),
}

/// One cube cell of the octree.
///
/// Geometry (center, size, level) is immutable once created; only the child
/// list or node list mutates.
#[derive(Clone, Debug)]
pub(crate) struct Region {
  pub center: DVec3,
  /// Cube edge length.
  pub size: f64,
  /// Radius of the sphere containing the entire cube.
  pub radius: f64,
  pub level: u8,
  pub parent: Option<RegionId>,
  pub kind: RegionKind,
}

impl Region {
  pub fn new(center: DVec3, size: f64, level: u8, parent: Option<RegionId>) -> Self {
    let kind = if level == MAX_LEVELS {
      RegionKind::Leaf(Vec::new())
    } else {
      RegionKind::Interior(SmallVec::new())
    };
    Self {
      center,
      size,
      radius: (size * size * 3.0).sqrt(),
      level,
      parent,
      kind,
    }
  }

  /// Axis-aligned point-in-cube test, borders included on both sides.
  pub fn contains_point(&self, point: DVec3) -> bool {
    let half = self.size / 2.0;
    point.x >= self.center.x - half
      && point.x <= self.center.x + half
      && point.y >= self.center.y - half
      && point.y <= self.center.y + half
      && point.z >= self.center.z - half
      && point.z <= self.center.z + half
  }

  /// Child regions, empty for leaves.
  pub fn children(&self) -> &[RegionId] {
    match &self.kind {
      RegionKind::Interior(children) => children,
      RegionKind::Leaf(_) => &[],
    }
  }

  /// Append a node to a leaf region.
  ///
  /// Reaching this on an interior region means the descent logic is broken;
  /// that is a structural invariant violation, not a recoverable state.
  pub fn push_node(&mut self, node: OctreeNodeId) {
    match &mut self.kind {
      RegionKind::Leaf(nodes) => nodes.push(node),
      RegionKind::Interior(_) => panic!("region does not hold a node list"),
    }
  }
}

/// Pool of regions with slot reuse.
#[derive(Default)]
pub(crate) struct RegionPool {
  slots: Vec<Option<Region>>,
  free: Vec<u32>,
}

impl RegionPool {
  pub fn alloc(&mut self, region: Region) -> RegionId {
    if let Some(index) = self.free.pop() {
      self.slots[index as usize] = Some(region);
      RegionId(index)
    } else {
      self.slots.push(Some(region));
      RegionId((self.slots.len() - 1) as u32)
    }
  }

  /// Release a slot. The caller has already detached the region from its
  /// parent and verified it holds no nodes.
  pub fn free(&mut self, id: RegionId) {
    let slot = &mut self.slots[id.0 as usize];
    debug_assert!(slot.is_some(), "double free of region slot");
    *slot = None;
    self.free.push(id.0);
  }

  pub fn get(&self, id: RegionId) -> &Region {
    self.slots[id.0 as usize]
      .as_ref()
      .expect("region id refers to a live slot")
  }

  pub fn get_mut(&mut self, id: RegionId) -> &mut Region {
    self.slots[id.0 as usize]
      .as_mut()
      .expect("region id refers to a live slot")
  }

  /// Number of live regions, for diagnostics and tests.
  pub fn live_count(&self) -> usize {
    self.slots.len() - self.free.len()
  }

  pub fn clear(&mut self) {
    self.slots.clear();
    self.free.clear();
  }
}

#[cfg(test)]
#[path = "region_test.rs"]
mod region_test;
