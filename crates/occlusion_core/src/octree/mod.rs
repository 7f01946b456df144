//! Sparse, lazily-subdivided octree over (position, payload) pairs.
//!
//! Top-level regions tile space on a coarse grid keyed by rounding positions
//! to the nearest grid multiple. Below the top, three further subdivision
//! levels halve the cell edge each step, so leaf cells have an edge of
//! `top_region_size / 8`. Child cells are anchored to their parent's center
//! rather than to world coordinates, which guarantees every ancestor chain
//! tiles space without gaps or overlap - the property the radius query's
//! neighbor probing relies on.
//!
//! The fixed four-level depth trades unbounded subdivision (and rebalancing)
//! for a predictable leaf cell size and an O(1) descent per insertion.
//!
//! Single-writer, single-reader: the tree has no internal synchronization.

use std::collections::HashMap;

use glam::{DVec3, IVec3};

mod region;
mod search;

use region::{Region, RegionId, RegionKind, RegionPool, MAX_LEVELS};

/// Edge length of a top-level region when none is configured.
pub const DEFAULT_TOP_REGION_SIZE: f64 = 512.0;

/// Handle to a stored node.
///
/// Carries a generation counter so handles left over from a removed node (or
/// a cleared tree) are detected instead of silently aliasing a reused slot.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct OctreeNodeId {
  index: u32,
  generation: u32,
}

struct NodeData<T> {
  position: DVec3,
  object: T,
  /// Leaf region currently holding this node. Only the octree itself may
  /// rewrite this.
  region: RegionId,
}

struct NodeSlot<T> {
  generation: u32,
  data: Option<NodeData<T>>,
}

/// Sparse 3-D spatial index mapping positions to payloads.
pub struct Octree<T> {
  top_size: f64,
  /// Top-level regions, keyed by the position rounded to the nearest grid
  /// multiple. Entries persist once created; only lower levels are pruned.
  tops: HashMap<IVec3, RegionId>,
  regions: RegionPool,
  nodes: Vec<NodeSlot<T>>,
  free_nodes: Vec<u32>,
  live: usize,
}

impl<T> Octree<T> {
  pub fn new() -> Self {
    Self::with_top_region_size(DEFAULT_TOP_REGION_SIZE)
  }

  pub fn with_top_region_size(top_size: f64) -> Self {
    Self {
      top_size,
      tops: HashMap::new(),
      regions: RegionPool::default(),
      nodes: Vec::new(),
      free_nodes: Vec::new(),
      live: 0,
    }
  }

  pub fn top_region_size(&self) -> f64 {
    self.top_size
  }

  /// Number of live nodes.
  pub fn count_nodes(&self) -> usize {
    self.live
  }

  pub fn is_empty(&self) -> bool {
    self.live == 0
  }

  /// Store an object at a position, subdividing down to the leaf level as
  /// needed. Returns a handle to the new node.
  pub fn insert(&mut self, position: DVec3, object: T) -> OctreeNodeId {
    let leaf = self.leaf_region_at(position);
    let id = self.alloc_node(position, object, leaf);
    self.regions.get_mut(leaf).push_node(id);
    id
  }

  /// Remove a node, returning its payload. Empty ancestor regions are pruned
  /// up the chain; top-level regions stay indexed forever. A stale handle is
  /// a no-op.
  pub fn remove(&mut self, id: OctreeNodeId) -> Option<T> {
    let data = self.take_node(id)?;
    self.detach_from_region(id, data.region);
    Some(data.object)
  }

  /// Move a node to a new position.
  ///
  /// When the destination resolves to the same leaf region only the stored
  /// position changes. Otherwise the node is inserted into the new leaf
  /// before it is detached from the old one, so it is never lost mid-move.
  /// Returns false for a stale handle.
  pub fn set_position(&mut self, id: OctreeNodeId, position: DVec3) -> bool {
    let old_region = match self.node_data_mut(id) {
      Some(data) => {
        data.position = position;
        data.region
      }
      None => return false,
    };
    let new_region = self.leaf_region_at(position);
    if new_region != old_region {
      self.regions.get_mut(new_region).push_node(id);
      self.detach_from_region(id, old_region);
      if let Some(data) = self.node_data_mut(id) {
        data.region = new_region;
      }
    }
    true
  }

  /// Position of a live node.
  pub fn position(&self, id: OctreeNodeId) -> Option<DVec3> {
    self.node_data(id).map(|data| data.position)
  }

  pub fn get(&self, id: OctreeNodeId) -> Option<&T> {
    self.node_data(id).map(|data| &data.object)
  }

  pub fn get_mut(&mut self, id: OctreeNodeId) -> Option<&mut T> {
    self.node_data_mut(id).map(|data| &mut data.object)
  }

  pub fn contains(&self, id: OctreeNodeId) -> bool {
    self.node_data(id).is_some()
  }

  /// Iterate over all live nodes. No ordering guarantee.
  pub fn iter(&self) -> impl Iterator<Item = (OctreeNodeId, DVec3, &T)> + '_ {
    self.nodes.iter().enumerate().filter_map(|(index, slot)| {
      let data = slot.data.as_ref()?;
      let id = OctreeNodeId {
        index: index as u32,
        generation: slot.generation,
      };
      Some((id, data.position, &data.object))
    })
  }

  /// Find the first node holding an equal payload.
  pub fn find_first(&self, object: &T) -> Option<OctreeNodeId>
  where
    T: PartialEq,
  {
    self
      .iter()
      .find(|(_, _, stored)| *stored == object)
      .map(|(id, _, _)| id)
  }

  /// Drop every node and region. Outstanding handles become stale.
  pub fn clear(&mut self) {
    self.tops.clear();
    self.regions.clear();
    self.free_nodes.clear();
    for (index, slot) in self.nodes.iter_mut().enumerate() {
      if slot.data.take().is_some() {
        slot.generation = slot.generation.wrapping_add(1);
      }
      self.free_nodes.push(index as u32);
    }
    self.live = 0;
  }

  /// Number of live regions across all levels, for diagnostics.
  pub fn live_region_count(&self) -> usize {
    self.regions.live_count()
  }

  /// Number of top-level regions ever touched. Top regions persist until
  /// [`clear`](Self::clear).
  pub fn top_region_count(&self) -> usize {
    self.tops.len()
  }

  // ===========================================================================
  // Node slots
  // ===========================================================================

  fn alloc_node(&mut self, position: DVec3, object: T, region: RegionId) -> OctreeNodeId {
    self.live += 1;
    let data = NodeData {
      position,
      object,
      region,
    };
    if let Some(index) = self.free_nodes.pop() {
      let slot = &mut self.nodes[index as usize];
      slot.data = Some(data);
      OctreeNodeId {
        index,
        generation: slot.generation,
      }
    } else {
      self.nodes.push(NodeSlot {
        generation: 0,
        data: Some(data),
      });
      OctreeNodeId {
        index: (self.nodes.len() - 1) as u32,
        generation: 0,
      }
    }
  }

  fn take_node(&mut self, id: OctreeNodeId) -> Option<NodeData<T>> {
    let slot = self.nodes.get_mut(id.index as usize)?;
    if slot.generation != id.generation {
      return None;
    }
    let data = slot.data.take()?;
    slot.generation = slot.generation.wrapping_add(1);
    self.free_nodes.push(id.index);
    self.live -= 1;
    Some(data)
  }

  fn node_data(&self, id: OctreeNodeId) -> Option<&NodeData<T>> {
    let slot = self.nodes.get(id.index as usize)?;
    if slot.generation != id.generation {
      return None;
    }
    slot.data.as_ref()
  }

  fn node_data_mut(&mut self, id: OctreeNodeId) -> Option<&mut NodeData<T>> {
    let slot = self.nodes.get_mut(id.index as usize)?;
    if slot.generation != id.generation {
      return None;
    }
    slot.data.as_mut()
  }

  /// Node data referenced from a leaf node list. Region lists only ever hold
  /// live ids, so a miss here is a structural invariant violation.
  fn stored(&self, id: OctreeNodeId) -> &NodeData<T> {
    self
      .node_data(id)
      .expect("node referenced by a region is live")
  }

  // ===========================================================================
  // Region descent
  // ===========================================================================

  fn top_key(&self, position: DVec3) -> IVec3 {
    (position / self.top_size).round().as_ivec3()
  }

  /// Look up the top-level region covering a position, without creating it.
  fn top_region_at(&self, position: DVec3) -> Option<RegionId> {
    self.tops.get(&self.top_key(position)).copied()
  }

  fn top_region_or_create(&mut self, position: DVec3) -> RegionId {
    let key = self.top_key(position);
    if let Some(&region) = self.tops.get(&key) {
      return region;
    }
    let center = key.as_dvec3() * self.top_size;
    let region = self
      .regions
      .alloc(Region::new(center, self.top_size, 1, None));
    self.tops.insert(key, region);
    region
  }

  /// Descend from the top-level region to the leaf covering `position`,
  /// creating missing regions along the way.
  fn leaf_region_at(&mut self, position: DVec3) -> RegionId {
    let mut current = self.top_region_or_create(position);
    for level in 2..=MAX_LEVELS {
      current = self.child_region_at(current, level, position);
    }
    current
  }

  fn child_region_at(&mut self, parent: RegionId, level: u8, position: DVec3) -> RegionId {
    for &child in self.regions.get(parent).children() {
      if self.regions.get(child).contains_point(position) {
        return child;
      }
    }

    // No existing child covers the position; synthesize one anchored to the
    // parent cell. The center is offset by a quarter of the parent edge along
    // each axis, toward whichever side of the parent the position falls on.
    let size = self.top_size / f64::from(1u32 << (level - 1));
    let origin = self.regions.get(parent).center;
    let center = origin
      + DVec3::new(
        if position.x > origin.x {
          size / 2.0
        } else {
          -size / 2.0
        },
        if position.y > origin.y {
          size / 2.0
        } else {
          -size / 2.0
        },
        if position.z > origin.z {
          size / 2.0
        } else {
          -size / 2.0
        },
      );
    let child = self
      .regions
      .alloc(Region::new(center, size, level, Some(parent)));
    match &mut self.regions.get_mut(parent).kind {
      RegionKind::Interior(children) => children.push(child),
      RegionKind::Leaf(_) => panic!("leaf region cannot hold child regions"),
    }
    child
  }

  // ===========================================================================
  // Removal and pruning
  // ===========================================================================

  /// Remove a node id from its leaf's list, then prune any ancestor left
  /// without descendants. Top-level regions are never dropped from the map.
  fn detach_from_region(&mut self, id: OctreeNodeId, region_id: RegionId) {
    let empty = match &mut self.regions.get_mut(region_id).kind {
      RegionKind::Leaf(nodes) => {
        if let Some(index) = nodes.iter().position(|node| *node == id) {
          nodes.swap_remove(index);
        }
        nodes.is_empty()
      }
      RegionKind::Interior(_) => panic!("node was attached to an interior region"),
    };
    if !empty {
      return;
    }

    let mut current = Some(region_id);
    while let Some(region) = current {
      let parent = self.regions.get(region).parent;
      if let Some(parent_id) = parent {
        if self.count_in_region(region) == 0 {
          match &mut self.regions.get_mut(parent_id).kind {
            RegionKind::Interior(children) => {
              if let Some(index) = children.iter().position(|child| *child == region) {
                children.swap_remove(index);
              }
            }
            RegionKind::Leaf(_) => panic!("leaf region cannot hold child regions"),
          }
          self.regions.free(region);
        }
      }
      current = parent;
    }
  }

  /// Recursive descendant node count of a region.
  fn count_in_region(&self, region: RegionId) -> usize {
    match &self.regions.get(region).kind {
      RegionKind::Leaf(nodes) => nodes.len(),
      RegionKind::Interior(children) => children
        .iter()
        .map(|child| self.count_in_region(*child))
        .sum(),
    }
  }
}

impl<T> Default for Octree<T> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
