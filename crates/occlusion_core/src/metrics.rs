//! Engine-agnostic culling metrics.
//!
//! Feature-gated and runtime-toggled so the frame pass pays nothing when
//! metrics are off. Compile with `--features metrics`, then flip
//! [`COLLECT_METRICS`] at runtime if needed.

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check whether metrics collection is enabled (compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Rolling window of recent `u64` samples.
#[derive(Clone, Debug)]
pub struct RollingWindow {
  buffer: VecDeque<u64>,
  capacity: usize,
}

impl RollingWindow {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a sample, evicting the oldest at capacity.
  pub fn push(&mut self, value: u64) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Most recent sample.
  pub fn last(&self) -> Option<u64> {
    self.buffer.back().copied()
  }

  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.buffer.iter().sum::<u64>() as f64 / self.buffer.len() as f64
    }
  }
}

impl Default for RollingWindow {
  fn default() -> Self {
    Self::new(128) // ~2 seconds of evaluated frames at 60fps
  }
}

/// Frame-level statistics for one occlusion world.
#[derive(Clone, Debug, Default)]
pub struct CullingMetrics {
  /// Rolling window of evaluated-frame pass times in microseconds.
  pub frame_timings: RollingWindow,
  /// Frames that ran the full pass.
  pub frames_evaluated: u64,
  /// Frames skipped by the camera-movement gate.
  pub frames_skipped: u64,
  /// Registered occluders as of the last evaluated frame.
  pub occluder_count: usize,
  /// Registered occludees as of the last evaluated frame.
  pub occludee_count: usize,
  /// Occludees suppressed as of the last evaluated frame.
  pub suppressed_count: usize,
}

impl CullingMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record_frame(&mut self, timing_us: u64) {
    if is_enabled() {
      self.frame_timings.push(timing_us);
      self.frames_evaluated += 1;
    }
  }

  pub fn record_skipped_frame(&mut self) {
    if is_enabled() {
      self.frames_skipped += 1;
    }
  }

  pub fn update_gauges(&mut self, occluders: usize, occludees: usize, suppressed: usize) {
    if is_enabled() {
      self.occluder_count = occluders;
      self.occludee_count = occludees;
      self.suppressed_count = suppressed;
    }
  }

  pub fn avg_frame_us(&self) -> f64 {
    self.frame_timings.average()
  }
}
