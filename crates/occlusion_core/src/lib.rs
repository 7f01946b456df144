//! occlusion_core - engine-independent occlusion culling and spatial indexing
//!
//! This crate provides the two spatial subsystems of a streaming game client:
//! a screen-space occlusion engine that hides objects fully covered by large
//! occluders, and a sparse octree for broad-phase proximity queries.
//!
//! # Features
//!
//! - **Occlusion engine**: oriented-box occluders and occludees, projected
//!   screen bounds, edge-triggered suppress/release of scene instances
//! - **Octree**: fixed-depth spatial index with radius queries and incremental
//!   node relocation
//! - **Engine traits**: camera projection, scene attach/detach and debug-line
//!   drawing are supplied by the host through small traits
//!
//! # Example
//!
//! ```ignore
//! use occlusion_core::OcclusionWorld;
//!
//! let mut world: OcclusionWorld<u64> = OcclusionWorld::new();
//! let wall = world.register_occluder(wall_id, &scene);
//! for crate_id in crates {
//!     world.register_occludee(crate_id, &scene);
//! }
//!
//! // Once per rendered frame:
//! world.update(&camera, &mut scene, &mut ());
//! ```

pub mod camera;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use camera::{CameraPose, CameraView};
pub use error::GeometryError;
pub use types::{LineColor, Projection, ScreenBounds};

// Oriented boxes and screen-space projection
pub mod geometry;
pub use geometry::{BoundsMode, Face, FaceBounds, OrientedBox};

// Scene host trait - attach/detach and bounding boxes
pub mod scene;
pub use scene::SceneHost;

// Octree spatial index
pub mod octree;
pub use octree::{Octree, OctreeNodeId};

// Occlusion engine - registries and the per-frame pass
pub mod occlusion;
pub use occlusion::{
  DebugDraw, EntityGeometry, Occludee, OccludeeId, Occluder, OccluderId, OcclusionConfig,
  OcclusionWorld,
};

// Culling metrics collection
pub mod metrics;
pub use metrics::CullingMetrics;
