//! Tests for chunk lattice sampling.

use glam::Vec3;

use super::*;

/// Distance-from-origin field, easy to predict per point.
struct RadialDensity;

impl DensitySource for RadialDensity {
  fn density(&self, position: Vec3) -> f32 {
    -position.length()
  }
}

#[test]
fn test_lattice_dimensions() {
  let lattice = sample_chunk(&RadialDensity, Vec3::ZERO, 8.0, 4);
  assert_eq!(lattice.points_per_axis(), 5);
  assert_eq!(lattice.len(), 125);
  assert_eq!(lattice.positions.len(), lattice.densities.len());
  assert!(!lattice.is_empty());
}

/// Lattice corners land exactly on the chunk cube corners.
#[test]
fn test_lattice_spans_chunk_cube() {
  let center = Vec3::new(10.0, -6.0, 2.0);
  let lattice = sample_chunk(&RadialDensity, center, 8.0, 4);

  assert_eq!(lattice.position(0, 0, 0), center - Vec3::splat(4.0));
  assert_eq!(lattice.position(4, 4, 4), center + Vec3::splat(4.0));
  assert_eq!(lattice.position(4, 0, 0), center + Vec3::new(4.0, -4.0, -4.0));
}

/// Grid steps advance the right axis by the lattice spacing.
#[test]
fn test_lattice_axis_strides() {
  let lattice = sample_chunk(&RadialDensity, Vec3::ZERO, 8.0, 4);
  let origin = lattice.position(1, 1, 1);

  assert_eq!(lattice.position(2, 1, 1) - origin, Vec3::new(2.0, 0.0, 0.0));
  assert_eq!(lattice.position(1, 2, 1) - origin, Vec3::new(0.0, 2.0, 0.0));
  assert_eq!(lattice.position(1, 1, 2) - origin, Vec3::new(0.0, 0.0, 2.0));
}

/// Densities are the source evaluated at the stored positions.
#[test]
fn test_densities_match_source() {
  let lattice = sample_chunk(&RadialDensity, Vec3::new(3.0, 1.0, -2.0), 6.0, 3);
  for i in 0..lattice.len() {
    assert_eq!(lattice.densities[i], -lattice.positions[i].length());
  }
}

/// Parallel evaluation produces the same buffer a serial loop would.
#[test]
fn test_parallel_matches_serial() {
  let center = Vec3::new(-5.0, 2.0, 7.0);
  let size = 10.0;
  let resolution = 6;
  let lattice = sample_chunk(&RadialDensity, center, size, resolution);

  let n = resolution as usize + 1;
  let spacing = size / resolution as f32;
  let min_corner = center - Vec3::splat(size / 2.0);
  for x in 0..n {
    for y in 0..n {
      for z in 0..n {
        let position = min_corner + Vec3::new(x as f32, y as f32, z as f32) * spacing;
        assert_eq!(lattice.position(x, y, z), position);
        assert_eq!(
          lattice.density(x, y, z).to_bits(),
          (-position.length()).to_bits()
        );
      }
    }
  }
}

/// Resolution 1 is the minimum: a single cell with 8 corner samples.
#[test]
fn test_single_cell_lattice() {
  let lattice = sample_chunk(&RadialDensity, Vec3::ZERO, 2.0, 1);
  assert_eq!(lattice.points_per_axis(), 2);
  assert_eq!(lattice.len(), 8);
  assert_eq!(lattice.position(0, 0, 0), Vec3::splat(-1.0));
  assert_eq!(lattice.position(1, 1, 1), Vec3::splat(1.0));
}
