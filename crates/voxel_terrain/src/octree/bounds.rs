//! Axis-aligned bounding cubes for chunk nodes.

use glam::Vec3;

/// World-space axis-aligned cube, stored as center plus edge length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeBounds {
  /// Cube center.
  pub center: Vec3,
  /// Edge length.
  pub size: f32,
}

impl CubeBounds {
  /// Create bounds from center and edge length.
  ///
  /// # Panics
  /// Debug-asserts that the size is positive.
  pub fn new(center: Vec3, size: f32) -> Self {
    debug_assert!(size > 0.0, "cube size must be positive");
    Self { center, size }
  }

  /// Half the edge length.
  #[inline]
  pub fn half_extent(&self) -> f32 {
    self.size / 2.0
  }

  /// Minimum corner (inclusive).
  #[inline]
  pub fn min(&self) -> Vec3 {
    self.center - Vec3::splat(self.half_extent())
  }

  /// Maximum corner (inclusive).
  #[inline]
  pub fn max(&self) -> Vec3 {
    self.center + Vec3::splat(self.half_extent())
  }

  /// Check if this cube contains a point (boundary inclusive).
  #[inline]
  pub fn contains_point(&self, point: Vec3) -> bool {
    let delta = (point - self.center).abs();
    delta.max_element() <= self.half_extent()
  }

  /// Closest point of the cube to `point`; the point itself when inside.
  #[inline]
  pub fn closest_point(&self, point: Vec3) -> Vec3 {
    point.clamp(self.min(), self.max())
  }

  /// Inclusive radius test against the whole cube, not just its center.
  ///
  /// Uses the distance from `point` to the nearest cube surface, so a chunk
  /// partially overlapping the radius still counts as within. Touching the
  /// radius exactly also counts; an exclusive test would flicker for nodes
  /// sitting on the boundary.
  #[inline]
  pub fn within_radius(&self, point: Vec3, radius: f32) -> bool {
    self.closest_point(point).distance_squared(point) <= radius * radius
  }
}
