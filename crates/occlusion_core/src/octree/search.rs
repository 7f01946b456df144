//! Radius queries over the octree.
//!
//! Candidate leaf discovery picks one of three policies by radius magnitude,
//! then every candidate's nodes are filtered by exact distance. The
//! region-level sphere test (`distance < radius + region.radius`) is a
//! necessary-but-not-sufficient overlap check used purely to prune subtrees,
//! never to accept nodes.

use std::collections::HashSet;

use glam::DVec3;

use super::region::{RegionId, RegionKind};
use super::{Octree, OctreeNodeId};

impl<T> Octree<T> {
  /// Collect the handles of all nodes strictly within `radius` of
  /// `position`. Nodes at exactly `radius` are excluded.
  pub fn search_radius(&self, position: DVec3, radius: f64) -> Vec<OctreeNodeId> {
    let mut found = Vec::new();
    self.for_each_in_radius(position, radius, |id, _, _| found.push(id));
    found
  }

  /// Visit every node strictly within `radius` of `position`.
  pub fn for_each_in_radius<F>(&self, position: DVec3, radius: f64, mut visit: F)
  where
    F: FnMut(OctreeNodeId, DVec3, &T),
  {
    for leaf in self.leaf_regions_in_radius(position, radius) {
      if let RegionKind::Leaf(nodes) = &self.regions.get(leaf).kind {
        for &id in nodes {
          let data = self.stored(id);
          if data.position.distance(position) < radius {
            visit(id, data.position, &data.object);
          }
        }
      }
    }
  }

  /// Nodes within `radius`, sorted nearest first and truncated to
  /// `max_nodes`.
  pub fn nearest(&self, position: DVec3, radius: f64, max_nodes: usize) -> Vec<OctreeNodeId> {
    let mut found = self.search_radius(position, radius);
    found.sort_by(|a, b| {
      let da = self.stored(*a).position.distance_squared(position);
      let db = self.stored(*b).position.distance_squared(position);
      da.partial_cmp(&db).unwrap()
    });
    found.truncate(max_nodes);
    found
  }

  /// Candidate leaf regions whose bounding sphere might intersect the query
  /// sphere.
  fn leaf_regions_in_radius(&self, position: DVec3, radius: f64) -> Vec<RegionId> {
    let mut found = Vec::new();
    let size = self.top_size;
    let max_offset = (radius / size).ceil() as i32;

    if radius < size {
      // Probe the 3x3x3 neighborhood of top cells, offset by the radius
      // itself rather than the cell size.
      let mut seen: HashSet<RegionId> = HashSet::new();
      for x in -1..=1 {
        for y in -1..=1 {
          for z in -1..=1 {
            let offset = DVec3::new(f64::from(x), f64::from(y), f64::from(z)) * radius;
            if let Some(top) = self.top_region_at(position + offset) {
              if seen.insert(top) {
                self.scan_region_children(top, position, radius, &mut found);
              }
            }
          }
        }
      }
    } else if max_offset <= 3 {
      // Exhaustively probe the cube of top cells the radius can span.
      let mut seen: HashSet<RegionId> = HashSet::new();
      for x in -max_offset..=max_offset {
        for y in -max_offset..=max_offset {
          for z in -max_offset..=max_offset {
            let offset = DVec3::new(f64::from(x), f64::from(y), f64::from(z)) * size;
            if let Some(top) = self.top_region_at(position + offset) {
              if seen.insert(top) {
                self.scan_region_children(top, position, radius, &mut found);
              }
            }
          }
        }
      }
    } else {
      // Huge radius: neighbor probing would miss cells, so fall back to
      // scanning every existing top region. Queries this large should be
      // rare, but the answer still has to be right when they happen.
      for &top in self.tops.values() {
        let region = self.regions.get(top);
        if position.distance(region.center) < radius + region.radius {
          self.scan_region_children(top, position, radius, &mut found);
        }
      }
    }

    found
  }

  /// Recursively collect leaf regions under `region` whose bounding sphere
  /// overlaps the query sphere.
  fn scan_region_children(
    &self,
    region: RegionId,
    position: DVec3,
    radius: f64,
    found: &mut Vec<RegionId>,
  ) {
    for &child in self.regions.get(region).children() {
      let sub = self.regions.get(child);
      if position.distance(sub.center) < radius + sub.radius {
        match &sub.kind {
          RegionKind::Leaf(_) => found.push(child),
          RegionKind::Interior(_) => self.scan_region_children(child, position, radius, found),
        }
      }
    }
  }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;
