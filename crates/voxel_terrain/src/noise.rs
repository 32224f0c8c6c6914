//! Layered-noise density field.
//!
//! The scalar field whose `surface_level` isosurface is the terrain. Positive
//! density is solid ground, negative is air. Built from ridged simplex
//! octaves on top of a horizontal surface plane, with optional terracing,
//! bedrock and map-edge solidification.

use glam::Vec3;
use noise::{NoiseFn, Simplex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{NoiseConfig, TerrainConfig};

/// Density forced at points outside the map bounds when edge solidification
/// is enabled. Deep air, far below any surface threshold in use.
pub const AIR_SENTINEL: f32 = -100.0;

/// Octave offsets are drawn uniformly from `[-OFFSET_RANGE, OFFSET_RANGE]`.
const OFFSET_RANGE: f32 = 1000.0;

/// A scalar density field over world space.
///
/// Implementations must be pure: the same position always yields the same
/// density. `Send + Sync` so samplers can share one source across the worker
/// pool.
pub trait DensitySource: Send + Sync {
  fn density(&self, position: Vec3) -> f32;
}

/// The production terrain field: seeded layered simplex noise.
///
/// All parameters, the octave offset table and the map bounds are baked in
/// at construction; evaluation is lock-free and shared read-only across
/// worker threads.
pub struct TerrainDensity {
  params: NoiseConfig,
  simplex: Simplex,
  octave_offsets: Vec<Vec3>,
  /// Global sample-position offset (scrolls the noise, not the plane).
  offset: Vec3,
  /// Map extent for edge solidification, centered on the origin.
  map_size: Vec3,
}

impl TerrainDensity {
  /// Build a field from noise parameters plus the global sample offset and
  /// map extent.
  ///
  /// The offset table is drawn from a PRNG seeded with `seed`; identical
  /// seeds give identical terrain on every platform.
  pub fn new(params: &NoiseConfig, offset: Vec3, map_size: Vec3) -> Self {
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed as u64);
    let octave_offsets = (0..params.octaves)
      .map(|_| {
        Vec3::new(
          rng.random_range(-OFFSET_RANGE..=OFFSET_RANGE),
          rng.random_range(-OFFSET_RANGE..=OFFSET_RANGE),
          rng.random_range(-OFFSET_RANGE..=OFFSET_RANGE),
        )
      })
      .collect();

    Self {
      simplex: Simplex::new(params.seed),
      params: params.clone(),
      octave_offsets,
      offset,
      map_size,
    }
  }

  /// Build the field a [`TerrainConfig`] describes.
  pub fn from_config(config: &TerrainConfig) -> Self {
    Self::new(&config.noise, config.density_offset, config.map_size())
  }

  /// The precomputed per-octave offset vectors.
  pub fn octave_offsets(&self) -> &[Vec3] {
    &self.octave_offsets
  }

  #[inline]
  fn sample_simplex(&self, p: Vec3) -> f32 {
    self.simplex.get([p.x as f64, p.y as f64, p.z as f64]) as f32
  }
}

impl DensitySource for TerrainDensity {
  fn density(&self, position: Vec3) -> f32 {
    let p = &self.params;

    // Ridged octave accumulation. The running octave weight feeds each
    // octave's contribution back into the next, carving sharper features.
    let mut density = 0.0f32;
    let mut frequency = p.scale / 100.0;
    let mut amplitude = 1.0f32;
    let mut octave_weight = 1.0f32;

    for octave_offset in &self.octave_offsets {
      let sample = position * frequency + *octave_offset + self.offset;
      let mut val = 1.0 - self.sample_simplex(sample).abs();
      val *= val;
      val *= octave_weight;
      density += val * amplitude;

      octave_weight = (val * p.weight_multiplier).clamp(0.0, 1.0);
      amplitude *= p.persistence;
      frequency *= p.lacunarity;
    }

    // Surface plane with the noise on top.
    density = -(position.y + p.surface_offset) + density * p.weight;

    // Shelves at every terrace_height interval. The remainder keeps the
    // sign of y, so the shelf term flips below the origin.
    if p.terrace_enabled {
      density += (position.y % p.terrace_height) * p.terrace_weight;
    }

    if position.y < p.bedrock_height {
      density += p.bedrock_weight;
    }

    // Everything at or past the map boundary becomes air so the extracted
    // surface closes.
    if p.solidify_edges {
      let edge_offset = position.abs() - self.map_size / 2.0;
      if edge_offset.max_element() >= 0.0 {
        density = AIR_SENTINEL;
      }
    }

    density
  }
}

#[cfg(test)]
#[path = "noise_test.rs"]
mod noise_test;
