use glam::DVec3;

use super::*;

#[test]
fn count_tracks_live_nodes_across_operations() {
  let mut tree: Octree<u32> = Octree::new();
  assert_eq!(tree.count_nodes(), 0);
  assert!(tree.is_empty());

  let a = tree.insert(DVec3::new(1.0, 2.0, 3.0), 1);
  let b = tree.insert(DVec3::new(-40.0, 9.0, 12.0), 2);
  let c = tree.insert(DVec3::new(700.0, -300.0, 50.0), 3);
  assert_eq!(tree.count_nodes(), 3);

  tree.set_position(b, DVec3::new(900.0, 900.0, 900.0));
  assert_eq!(tree.count_nodes(), 3);

  assert_eq!(tree.remove(a), Some(1));
  assert_eq!(tree.count_nodes(), 2);

  // Removing again through the stale handle changes nothing.
  assert_eq!(tree.remove(a), None);
  assert_eq!(tree.count_nodes(), 2);

  tree.remove(b);
  tree.remove(c);
  assert!(tree.is_empty());
}

#[test]
fn insertion_builds_a_four_level_chain() {
  let mut tree: Octree<&str> = Octree::new();
  tree.insert(DVec3::new(10.0, 10.0, 10.0), "a");

  // One region per level: top plus three subdivisions.
  assert_eq!(tree.live_region_count(), 4);
  assert_eq!(tree.top_region_count(), 1);
}

#[test]
fn siblings_in_one_top_region_share_the_top_only() {
  let mut tree: Octree<&str> = Octree::new();
  // Same top cell (centered at the origin), opposite octants.
  tree.insert(DVec3::new(10.0, 10.0, 10.0), "a");
  tree.insert(DVec3::new(-10.0, -10.0, -10.0), "b");

  assert_eq!(tree.top_region_count(), 1);
  assert_eq!(tree.live_region_count(), 7);
}

#[test]
fn removal_prunes_empty_ancestors_but_keeps_the_top() {
  let mut tree: Octree<&str> = Octree::new();
  let node = tree.insert(DVec3::new(10.0, 10.0, 10.0), "a");
  assert_eq!(tree.live_region_count(), 4);

  tree.remove(node);

  // Subdivisions are gone; the top region stays indexed forever.
  assert_eq!(tree.live_region_count(), 1);
  assert_eq!(tree.top_region_count(), 1);

  // Re-inserting at the same position rebuilds an equivalent chain.
  let again = tree.insert(DVec3::new(10.0, 10.0, 10.0), "b");
  assert_eq!(tree.live_region_count(), 4);
  let hits = tree.search_radius(DVec3::new(10.0, 10.0, 10.0), 1.0);
  assert_eq!(hits, vec![again]);
}

#[test]
fn removal_keeps_ancestors_shared_with_other_nodes() {
  let mut tree: Octree<&str> = Octree::new();
  let a = tree.insert(DVec3::new(10.0, 10.0, 10.0), "a");
  // Same octant chain at every level (both within the same leaf cell).
  let b = tree.insert(DVec3::new(11.0, 11.0, 11.0), "b");
  assert_eq!(tree.live_region_count(), 4);

  tree.remove(a);
  assert_eq!(tree.live_region_count(), 4);
  assert_eq!(tree.get(b), Some(&"b"));
}

#[test]
fn set_position_within_the_same_leaf_updates_in_place() {
  let mut tree: Octree<&str> = Octree::new();
  let node = tree.insert(DVec3::new(10.0, 10.0, 10.0), "a");
  let regions_before = tree.live_region_count();

  assert!(tree.set_position(node, DVec3::new(11.0, 10.0, 10.0)));

  assert_eq!(tree.live_region_count(), regions_before);
  assert_eq!(tree.position(node), Some(DVec3::new(11.0, 10.0, 10.0)));
}

#[test]
fn set_position_across_leaves_migrates_the_node() {
  let mut tree: Octree<&str> = Octree::new();
  let node = tree.insert(DVec3::new(10.0, 10.0, 10.0), "a");

  assert!(tree.set_position(node, DVec3::new(2000.0, 0.0, 0.0)));

  assert_eq!(tree.count_nodes(), 1);
  assert_eq!(tree.position(node), Some(DVec3::new(2000.0, 0.0, 0.0)));
  assert_eq!(tree.get(node), Some(&"a"));
  // The old chain was pruned down to its top region.
  assert_eq!(tree.top_region_count(), 2);
  assert_eq!(tree.live_region_count(), 5);
}

#[test]
fn stale_handles_resolve_to_nothing() {
  let mut tree: Octree<u32> = Octree::new();
  let node = tree.insert(DVec3::ZERO, 7);
  tree.remove(node);

  assert!(!tree.contains(node));
  assert_eq!(tree.get(node), None);
  assert_eq!(tree.position(node), None);
  assert!(!tree.set_position(node, DVec3::ONE));

  // A new node may reuse the slot; the old handle still must not see it.
  let fresh = tree.insert(DVec3::ZERO, 8);
  assert_ne!(fresh, node);
  assert_eq!(tree.get(node), None);
  assert_eq!(tree.get(fresh), Some(&8));
}

#[test]
fn clear_drops_everything_and_invalidates_handles() {
  let mut tree: Octree<u32> = Octree::new();
  let a = tree.insert(DVec3::new(5.0, 5.0, 5.0), 1);
  tree.insert(DVec3::new(600.0, 0.0, 0.0), 2);

  tree.clear();

  assert_eq!(tree.count_nodes(), 0);
  assert_eq!(tree.live_region_count(), 0);
  assert_eq!(tree.top_region_count(), 0);
  assert_eq!(tree.get(a), None);

  let b = tree.insert(DVec3::new(5.0, 5.0, 5.0), 3);
  assert_eq!(tree.get(b), Some(&3));
  assert_eq!(tree.count_nodes(), 1);
}

#[test]
fn iter_visits_every_live_node() {
  let mut tree: Octree<u32> = Octree::new();
  tree.insert(DVec3::new(1.0, 0.0, 0.0), 1);
  let b = tree.insert(DVec3::new(2.0, 0.0, 0.0), 2);
  tree.insert(DVec3::new(3.0, 0.0, 0.0), 3);
  tree.remove(b);

  let mut values: Vec<u32> = tree.iter().map(|(_, _, value)| *value).collect();
  values.sort_unstable();
  assert_eq!(values, vec![1, 3]);
}

#[test]
fn find_first_matches_by_payload() {
  let mut tree: Octree<&str> = Octree::new();
  tree.insert(DVec3::new(1.0, 0.0, 0.0), "red");
  let green = tree.insert(DVec3::new(2.0, 0.0, 0.0), "green");

  assert_eq!(tree.find_first(&"green"), Some(green));
  assert_eq!(tree.find_first(&"purple"), None);
}

#[test]
fn get_mut_updates_the_payload() {
  let mut tree: Octree<u32> = Octree::new();
  let node = tree.insert(DVec3::ZERO, 1);

  *tree.get_mut(node).unwrap() = 9;
  assert_eq!(tree.get(node), Some(&9));
}

#[test]
fn custom_top_region_size_is_respected() {
  let mut tree: Octree<u32> = Octree::with_top_region_size(64.0);
  assert_eq!(tree.top_region_size(), 64.0);

  // Positions a full top cell apart land in distinct top regions.
  tree.insert(DVec3::ZERO, 1);
  tree.insert(DVec3::new(64.0, 0.0, 0.0), 2);
  assert_eq!(tree.top_region_count(), 2);
}
