//! Chunk lattice sampling.
//!
//! Evaluates a [`DensitySource`] over the regular grid of points covering a
//! chunk cube. One lattice is produced per meshing request, consumed by the
//! extractor, then dropped; nothing here is cached.

use glam::Vec3;
use rayon::prelude::*;

use crate::constants::{lattice_coord, lattice_index};
use crate::noise::DensitySource;

/// Sampled (position, density) lattice covering one chunk cube.
///
/// `positions` and `densities` are parallel arrays in
/// [`lattice_index`] order (Z innermost).
pub struct DensityLattice {
  pub positions: Vec<Vec3>,
  pub densities: Vec<f32>,
  points_per_axis: usize,
}

impl DensityLattice {
  /// Points per axis (`resolution + 1`).
  #[inline]
  pub fn points_per_axis(&self) -> usize {
    self.points_per_axis
  }

  /// Total sample count (`points_per_axis³`).
  pub fn len(&self) -> usize {
    self.densities.len()
  }

  pub fn is_empty(&self) -> bool {
    self.densities.is_empty()
  }

  /// Flat index of the lattice point at grid coordinates (x, y, z).
  #[inline]
  pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
    lattice_index(x, y, z, self.points_per_axis)
  }

  #[inline]
  pub fn position(&self, x: usize, y: usize, z: usize) -> Vec3 {
    self.positions[self.index(x, y, z)]
  }

  #[inline]
  pub fn density(&self, x: usize, y: usize, z: usize) -> f32 {
    self.densities[self.index(x, y, z)]
  }
}

/// Evaluate `source` over the `(resolution + 1)³` lattice covering the cube
/// of edge length `size` centered at `center`.
///
/// `position[i] = center - size/2 + coord3d(i) * (size / resolution)`.
/// Lattice points are independent, so evaluation runs parallel over the flat
/// index; the source is only read.
#[cfg_attr(
  feature = "tracing",
  tracing::instrument(skip_all, name = "sampling::sample_chunk")
)]
pub fn sample_chunk<S: DensitySource + ?Sized>(
  source: &S,
  center: Vec3,
  size: f32,
  resolution: u32,
) -> DensityLattice {
  let n = resolution as usize + 1;
  let spacing = size / resolution as f32;
  let min_corner = center - Vec3::splat(size / 2.0);

  let (positions, densities): (Vec<Vec3>, Vec<f32>) = (0..n * n * n)
    .into_par_iter()
    .map(|i| {
      let (x, y, z) = lattice_coord(i, n);
      let position = min_corner + Vec3::new(x as f32, y as f32, z as f32) * spacing;
      (position, source.density(position))
    })
    .unzip();

  DensityLattice {
    positions,
    densities,
    points_per_axis: n,
  }
}

#[cfg(test)]
#[path = "sampling_test.rs"]
mod sampling_test;
