//! OcclusionWorld - registries and the per-frame visibility pass.
//!
//! All state lives on the world object, so independent worlds (or tests) can
//! run side by side. Entities enter through explicit registration calls and
//! leave through explicit deregistration; the world never discovers them on
//! its own.
//!
//! # Frame pass
//!
//! The pass runs single-threaded in two stages, occluders first, both in
//! ascending registration order. Containment is evaluated per occluder
//! without short-circuiting, so when several occluders disagree about one
//! occludee, the occluder with the highest id is evaluated last and its
//! verdict stands. That ordering is part of the observable contract.

use std::collections::BTreeMap;

use glam::DVec3;

use crate::camera::CameraView;
use crate::geometry::{BoundsMode, FACING_THRESHOLD};
use crate::metrics::CullingMetrics;
use crate::occlusion::overlay::{self, DebugDraw};
use crate::occlusion::{Occludee, Occluder};
use crate::scene::SceneHost;

/// Handle to a registered occluder. Ordered by registration.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct OccluderId(u32);

/// Handle to a registered occludee. Ordered by registration.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct OccludeeId(u32);

/// Tuning knobs for the visibility pass.
#[derive(Clone, Debug)]
pub struct OcclusionConfig {
  /// Minimum camera movement in world units between evaluated frames.
  /// Smaller movements skip the whole pass.
  pub movement_threshold: f64,
  /// Size factor applied to occludee screen bounds before containment
  /// testing.
  pub bounds_padding: f64,
  /// Facing-filter threshold for the visible-face test.
  pub facing_threshold: f64,
  /// Corner collection mode for occluder screen bounds.
  pub bounds_mode: BoundsMode,
  /// Emit debug overlay rectangles for bounds recomputed this frame.
  pub draw_overlay: bool,
}

impl Default for OcclusionConfig {
  fn default() -> Self {
    Self {
      movement_threshold: 1.0,
      bounds_padding: 1.25,
      facing_threshold: FACING_THRESHOLD,
      bounds_mode: BoundsMode::FaceCorners,
      draw_overlay: true,
    }
  }
}

/// Registries and frame state for one independent culling world.
pub struct OcclusionWorld<I> {
  config: OcclusionConfig,
  occluders: BTreeMap<OccluderId, Occluder<I>>,
  occludees: BTreeMap<OccludeeId, Occludee<I>>,
  /// Render state per occluder: true after it produced usable screen bounds,
  /// false once it unrendered.
  rendered_occluders: BTreeMap<OccluderId, bool>,
  /// On-screen state per occludee, written by the occludee stage. The
  /// containment stage tests every entry here, whatever its flag.
  rendered_occludees: BTreeMap<OccludeeId, bool>,
  /// Camera position at the last evaluated frame.
  last_camera_position: Option<DVec3>,
  next_occluder: u32,
  next_occludee: u32,
  metrics: CullingMetrics,
}

impl<I: Copy + Eq> OcclusionWorld<I> {
  pub fn new() -> Self {
    Self::with_config(OcclusionConfig::default())
  }

  pub fn with_config(config: OcclusionConfig) -> Self {
    Self {
      config,
      occluders: BTreeMap::new(),
      occludees: BTreeMap::new(),
      rendered_occluders: BTreeMap::new(),
      rendered_occludees: BTreeMap::new(),
      last_camera_position: None,
      next_occluder: 0,
      next_occludee: 0,
      metrics: CullingMetrics::default(),
    }
  }

  pub fn config(&self) -> &OcclusionConfig {
    &self.config
  }

  pub fn config_mut(&mut self) -> &mut OcclusionConfig {
    &mut self.config
  }

  pub fn metrics(&self) -> &CullingMetrics {
    &self.metrics
  }

  // ===========================================================================
  // Registration
  // ===========================================================================

  /// Register an occluder and measure its geometry once.
  ///
  /// A missing bounding box leaves the occluder uninitialized; it is skipped
  /// by the frame pass until [`refresh_occluder`](Self::refresh_occluder)
  /// succeeds.
  pub fn register_occluder<S: SceneHost<I>>(&mut self, instance: I, scene: &S) -> OccluderId {
    let id = OccluderId(self.next_occluder);
    self.next_occluder += 1;
    let mut occluder = Occluder::new(instance);
    if let Some(bounding_box) = scene.bounding_box(instance) {
      occluder.geometry.refresh(bounding_box);
    }
    self.rendered_occluders.insert(id, false);
    self.occluders.insert(id, occluder);
    id
  }

  /// Register an occludee and measure its geometry.
  ///
  /// The occludee joins the containment stage only after its first on-screen
  /// evaluation.
  pub fn register_occludee<S: SceneHost<I>>(&mut self, instance: I, scene: &S) -> OccludeeId {
    let id = OccludeeId(self.next_occludee);
    self.next_occludee += 1;
    let mut occludee = Occludee::new(instance);
    if let Some(bounding_box) = scene.bounding_box(instance) {
      occludee.geometry.refresh(bounding_box);
    }
    self.occludees.insert(id, occludee);
    id
  }

  /// Remove an occluder, releasing every occludee it was suppressing.
  pub fn deregister_occluder<S: SceneHost<I>>(&mut self, id: OccluderId, scene: &mut S) {
    if let Some(mut occluder) = self.occluders.remove(&id) {
      for occludee_id in occluder.suppressed.drain(..) {
        if let Some(occludee) = self.occludees.get_mut(&occludee_id) {
          if occludee.occluded {
            occludee.set_occluded(false, scene);
          }
        }
      }
      self.rendered_occluders.remove(&id);
    }
  }

  /// Remove an occludee. If it was suppressed, the instance is restored to
  /// the scene before the registry entries are dropped.
  pub fn deregister_occludee<S: SceneHost<I>>(&mut self, id: OccludeeId, scene: &mut S) {
    if let Some(mut occludee) = self.occludees.remove(&id) {
      if occludee.occluded {
        occludee.set_occluded(false, scene);
      }
      self.rendered_occludees.remove(&id);
      for occluder in self.occluders.values_mut() {
        occluder.suppressed.retain(|other| *other != id);
      }
    }
  }

  /// Re-measure an occluder's bounding box, e.g. after the host rebuilt the
  /// instance.
  pub fn refresh_occluder<S: SceneHost<I>>(&mut self, id: OccluderId, scene: &S) {
    if let Some(occluder) = self.occluders.get_mut(&id) {
      if let Some(bounding_box) = scene.bounding_box(occluder.instance) {
        occluder.geometry.refresh(bounding_box);
      }
    }
  }

  // ===========================================================================
  // Accessors
  // ===========================================================================

  pub fn occluder(&self, id: OccluderId) -> Option<&Occluder<I>> {
    self.occluders.get(&id)
  }

  pub fn occludee(&self, id: OccludeeId) -> Option<&Occludee<I>> {
    self.occludees.get(&id)
  }

  pub fn occluder_count(&self) -> usize {
    self.occluders.len()
  }

  pub fn occludee_count(&self) -> usize {
    self.occludees.len()
  }

  /// True after the occluder last produced usable screen bounds.
  pub fn is_occluder_rendered(&self, id: OccluderId) -> bool {
    self.rendered_occluders.get(&id).copied().unwrap_or(false)
  }

  /// On-screen state of an occludee as of the last evaluated frame.
  pub fn was_occludee_on_screen(&self, id: OccludeeId) -> bool {
    self.rendered_occludees.get(&id).copied().unwrap_or(false)
  }

  /// Number of occludees currently suppressed.
  pub fn suppressed_count(&self) -> usize {
    self
      .occludees
      .values()
      .filter(|occludee| occludee.occluded)
      .count()
  }

  // ===========================================================================
  // Frame pass
  // ===========================================================================

  /// Run one visibility pass.
  ///
  /// Skips entirely when either registry is empty, or when the camera moved
  /// less than the movement threshold since the last evaluated frame. The
  /// first frame always evaluates.
  #[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, name = "occlusion::update")
  )]
  pub fn update<C, S, D>(&mut self, camera: &C, scene: &mut S, draw: &mut D)
  where
    C: CameraView,
    S: SceneHost<I>,
    D: DebugDraw,
  {
    if self.occluders.is_empty() || self.occludees.is_empty() {
      return;
    }

    let camera_position = camera.pose().position;
    if let Some(previous) = self.last_camera_position {
      if camera_position.distance(previous) < self.config.movement_threshold {
        self.metrics.record_skipped_frame();
        return;
      }
    }

    let frame_start = crate::metrics::is_enabled().then(web_time::Instant::now);

    let Self {
      config,
      occluders,
      occludees,
      rendered_occluders,
      rendered_occludees,
      ..
    } = self;

    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("occluder_pass").entered();
      for (&occluder_id, occluder) in occluders.iter_mut() {
        update_occluder(
          occluder_id,
          occluder,
          occludees,
          rendered_occluders,
          rendered_occludees,
          config,
          camera,
          scene,
          draw,
        );
      }
    }

    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("occludee_pass").entered();
      for (&occludee_id, occludee) in occludees.iter_mut() {
        update_occludee(
          occludee_id,
          occludee,
          rendered_occludees,
          config,
          camera,
          scene,
          draw,
        );
      }
    }

    self.last_camera_position = Some(camera_position);

    if let Some(start) = frame_start {
      self
        .metrics
        .record_frame(start.elapsed().as_micros() as u64);
      let suppressed = self.suppressed_count();
      self
        .metrics
        .update_gauges(self.occluders.len(), self.occludees.len(), suppressed);
    }
  }
}

impl<I: Copy + Eq> Default for OcclusionWorld<I> {
  fn default() -> Self {
    Self::new()
  }
}

/// Per-occluder update: recompute screen bounds, then test every occludee
/// currently tracked by the on-screen map against them.
#[allow(clippy::too_many_arguments)]
fn update_occluder<I, C, S, D>(
  id: OccluderId,
  occluder: &mut Occluder<I>,
  occludees: &mut BTreeMap<OccludeeId, Occludee<I>>,
  rendered_occluders: &mut BTreeMap<OccluderId, bool>,
  rendered_occludees: &BTreeMap<OccludeeId, bool>,
  config: &OcclusionConfig,
  camera: &C,
  scene: &mut S,
  draw: &mut D,
) where
  I: Copy + Eq,
  C: CameraView,
  S: SceneHost<I>,
  D: DebugDraw,
{
  let face_bounds =
    match occluder
      .geometry
      .screen_bounds(camera, config.bounds_mode, config.facing_threshold)
    {
      Ok(face_bounds) => face_bounds,
      Err(_) => {
        // Recoverable: the entity never got a bounding box. Leave the rest
        // of the frame alone.
        #[cfg(feature = "tracing")]
        tracing::warn!("skipping occluder with uninitialized geometry");
        return;
      }
    };

  if face_bounds.visible_faces == 0 {
    unrender_occluder(id, occluder, occludees, rendered_occluders, scene);
    return;
  }
  let bounds = face_bounds.bounds;

  if config.bounds_mode == BoundsMode::FaceCenters {
    // Center mode keeps the oversized-projection rejection: a box covering
    // more than the whole viewport in both dimensions is dropped.
    let viewport = camera.viewport_size();
    let half_diagonal = bounds.half_diagonal();
    if half_diagonal > viewport.x && half_diagonal > viewport.y {
      unrender_occluder(id, occluder, occludees, rendered_occluders, scene);
      return;
    }
  }

  rendered_occluders.insert(id, true);

  // Containment runs over the whole on-screen map, not just occludees near
  // this occluder. Transitions are edge-triggered on the containment result.
  for &occludee_id in rendered_occludees.keys() {
    let Some(occludee) = occludees.get_mut(&occludee_id) else {
      continue;
    };
    let contained = occludee
      .bounds
      .corners()
      .iter()
      .all(|corner| bounds.contains(*corner));
    if contained != occludee.occluded {
      occludee.set_occluded(contained, scene);
      if contained {
        if !occluder.suppressed.contains(&occludee_id) {
          occluder.suppressed.push(occludee_id);
        }
      } else {
        occluder.suppressed.retain(|other| *other != occludee_id);
      }
    }
  }

  if config.draw_overlay {
    overlay::outline_rect(&bounds, overlay::OCCLUDER_COLOR, draw);
  }
}

/// Drop an occluder out of the rendered set, releasing its suppressed
/// occludees back to the scene. Idempotent via the rendered flag.
fn unrender_occluder<I, S>(
  id: OccluderId,
  occluder: &mut Occluder<I>,
  occludees: &mut BTreeMap<OccludeeId, Occludee<I>>,
  rendered_occluders: &mut BTreeMap<OccluderId, bool>,
  scene: &mut S,
) where
  I: Copy + Eq,
  S: SceneHost<I>,
{
  if !rendered_occluders.get(&id).copied().unwrap_or(false) {
    return;
  }
  rendered_occluders.insert(id, false);

  if occluder.suppressed.is_empty() {
    return;
  }
  for occludee_id in occluder.suppressed.drain(..) {
    if let Some(occludee) = occludees.get_mut(&occludee_id) {
      occludee.set_occluded(false, scene);
    }
  }
}

/// Per-occludee update: track on-screen transitions and refresh the padded
/// screen bounds while visible.
fn update_occludee<I, C, S, D>(
  id: OccludeeId,
  occludee: &mut Occludee<I>,
  rendered_occludees: &mut BTreeMap<OccludeeId, bool>,
  config: &OcclusionConfig,
  camera: &C,
  scene: &mut S,
  draw: &mut D,
) where
  I: Copy + Eq,
  C: CameraView,
  S: SceneHost<I>,
  D: DebugDraw,
{
  let on_screen = match occludee.geometry.is_on_screen(camera) {
    Ok(on_screen) => on_screen,
    Err(_) => {
      #[cfg(feature = "tracing")]
      tracing::warn!("skipping occludee with uninitialized geometry");
      return;
    }
  };
  let was_on_screen = rendered_occludees.get(&id).copied().unwrap_or(false);

  if was_on_screen && !on_screen {
    // Left the screen: make sure it is attached again.
    occludee.set_occluded(false, scene);
  }
  if !was_on_screen && on_screen {
    // Came on screen: re-measure geometry before it gets tested again.
    if let Some(bounding_box) = scene.bounding_box(occludee.instance) {
      occludee.geometry.refresh(bounding_box);
    }
    occludee.set_occluded(false, scene);
  }

  rendered_occludees.insert(id, on_screen);

  if on_screen {
    match occludee.update_bounds(camera, config.bounds_padding, config.facing_threshold) {
      Ok(updated) => {
        if updated && config.draw_overlay {
          overlay::outline_rect(&occludee.bounds, overlay::OCCLUDEE_COLOR, draw);
        }
      }
      Err(_) => {
        #[cfg(feature = "tracing")]
        tracing::warn!("occludee bounds not updated: geometry uninitialized");
      }
    }
  }
}

#[cfg(test)]
#[path = "world_test.rs"]
mod world_test;
