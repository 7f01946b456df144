//! Headless culling demo.
//!
//! Builds a small scene - one wall occluder in front of a grid of crates -
//! then dollies a software pinhole camera toward the wall and logs how many
//! crates the occlusion pass suppresses each frame. An octree over the crate
//! positions answers a proximity query along the way.
//!
//! Run with `RUST_LOG=info cargo run -p occlusion_demo`.

use std::collections::{HashMap, HashSet};

use glam::{DAffine3, DVec2, DVec3};
use log::info;
use occlusion_core::{
  CameraPose, CameraView, Octree, OcclusionWorld, OrientedBox, Projection, SceneHost,
};

/// Simple pinhole camera looking down -Z.
struct PinholeCamera {
  position: DVec3,
  viewport: DVec2,
}

impl PinholeCamera {
  fn new(position: DVec3) -> Self {
    Self {
      position,
      viewport: DVec2::new(1920.0, 1080.0),
    }
  }
}

impl CameraView for PinholeCamera {
  fn pose(&self) -> CameraPose {
    CameraPose {
      position: self.position,
      right: DVec3::X,
      up: DVec3::Y,
      look: DVec3::NEG_Z,
    }
  }

  fn viewport_size(&self) -> DVec2 {
    self.viewport
  }

  fn project(&self, world: DVec3) -> Projection {
    let rel = world - self.position;
    let depth = -rel.z;
    if depth <= 0.0 {
      return Projection {
        position: DVec2::ZERO,
        on_screen: false,
      };
    }
    let focal = self.viewport.y;
    let position = self.viewport / 2.0 + DVec2::new(rel.x, -rel.y) * (focal / depth);
    let on_screen = position.x >= 0.0
      && position.x <= self.viewport.x
      && position.y >= 0.0
      && position.y <= self.viewport.y;
    Projection {
      position,
      on_screen,
    }
  }
}

/// In-memory stand-in for the engine scene graph.
#[derive(Default)]
struct DemoScene {
  boxes: HashMap<u64, OrientedBox>,
  visible: HashSet<u64>,
}

impl DemoScene {
  fn add(&mut self, id: u64, center: DVec3, size: DVec3) {
    self
      .boxes
      .insert(id, OrientedBox::from_size(DAffine3::from_translation(center), size));
    self.visible.insert(id);
  }

  fn visible_count(&self) -> usize {
    self.visible.len()
  }
}

impl SceneHost<u64> for DemoScene {
  fn bounding_box(&self, instance: u64) -> Option<OrientedBox> {
    self.boxes.get(&instance).copied()
  }

  fn attach(&mut self, instance: u64) {
    self.visible.insert(instance);
  }

  fn detach(&mut self, instance: u64) {
    self.visible.remove(&instance);
  }
}

fn main() {
  env_logger::init();

  let mut scene = DemoScene::default();
  let mut world: OcclusionWorld<u64> = OcclusionWorld::new();
  let mut index: Octree<u64> = Octree::new();

  // One wall between the camera and the crates.
  const WALL: u64 = 1;
  scene.add(WALL, DVec3::new(0.0, 5.0, -40.0), DVec3::new(30.0, 12.0, 1.0));
  world.register_occluder(WALL, &scene);

  // A 4x3 grid of crates behind the wall.
  let mut next_id: u64 = 100;
  for ix in 0..4 {
    for iy in 0..3 {
      let center = DVec3::new(
        -9.0 + f64::from(ix) * 6.0,
        1.0 + f64::from(iy) * 3.0,
        -70.0,
      );
      scene.add(next_id, center, DVec3::splat(2.0));
      world.register_occludee(next_id, &scene);
      index.insert(center, next_id);
      next_id += 1;
    }
  }

  info!(
    "scene ready: {} instances, {} octree nodes",
    scene.visible_count(),
    index.count_nodes()
  );

  // Dolly toward the wall; every step clears the movement gate.
  let mut camera = PinholeCamera::new(DVec3::new(0.0, 5.0, 20.0));
  for frame in 0..24 {
    camera.position.z -= 1.5;
    world.update(&camera, &mut scene, &mut ());

    let nearby = index.search_radius(camera.position, 100.0).len();
    info!(
      "frame {frame:>2}: camera z {:>6.1}, visible {:>2}, suppressed {:>2}, crates within 100u: {nearby}",
      camera.position.z,
      scene.visible_count(),
      world.suppressed_count(),
    );
  }

  info!(
    "done: {} of {} occludees suppressed",
    world.suppressed_count(),
    world.occludee_count()
  );
}
