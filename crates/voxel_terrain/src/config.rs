//! Terrain and noise configuration.
//!
//! All parameters are validated up front ([`TerrainConfig::validate`]) and
//! immutable for the duration of a generation run; the manager swaps whole
//! configurations via [`crate::manager::ChunkTreeManager::set_config`].

use glam::{UVec3, Vec3};

use crate::error::ConfigError;

/// Layered-noise density field parameters.
///
/// Defaults give four ridged simplex octaves over a surface plane one unit
/// below the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseConfig {
  /// PRNG seed for the octave offset table (and the noise primitive).
  pub seed: u32,

  /// Number of noise octaves accumulated per sample. Range 1..=10.
  pub octaves: u32,

  /// Frequency multiplier between octaves.
  pub lacunarity: f32,

  /// Amplitude multiplier between octaves.
  pub persistence: f32,

  /// Base frequency control; the first octave samples at `scale / 100`.
  pub scale: f32,

  /// Weight of the accumulated noise against the surface plane.
  pub weight: f32,

  /// Feedback factor for the running octave weight.
  pub weight_multiplier: f32,

  /// Vertical shift of the surface plane (surface sits at `y = -offset`).
  pub surface_offset: f32,

  /// Below this height the bedrock weight is added.
  pub bedrock_height: f32,

  /// Density added below `bedrock_height`.
  pub bedrock_weight: f32,

  /// Force air outside the fixed map bounds so the surface closes.
  pub solidify_edges: bool,

  /// Terrace (shelf) effect toggle.
  pub terrace_enabled: bool,

  /// Vertical period of the terraces.
  pub terrace_height: f32,

  /// Strength of the terrace term.
  pub terrace_weight: f32,
}

impl Default for NoiseConfig {
  fn default() -> Self {
    Self {
      seed: 0,
      octaves: 4,
      lacunarity: 2.0,
      persistence: 0.5,
      scale: 1.0,
      weight: 1.0,
      weight_multiplier: 1.0,
      surface_offset: 1.0,
      bedrock_height: 0.0,
      bedrock_weight: 0.0,
      solidify_edges: false,
      terrace_enabled: false,
      terrace_height: 1.0,
      terrace_weight: 1.0,
    }
  }
}

impl NoiseConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_seed(mut self, seed: u32) -> Self {
    self.seed = seed;
    self
  }

  pub fn with_octaves(mut self, octaves: u32) -> Self {
    self.octaves = octaves;
    self
  }

  pub fn with_scale(mut self, scale: f32) -> Self {
    self.scale = scale;
    self
  }

  pub fn with_surface_offset(mut self, offset: f32) -> Self {
    self.surface_offset = offset;
    self
  }

  pub fn with_bedrock(mut self, height: f32, weight: f32) -> Self {
    self.bedrock_height = height;
    self.bedrock_weight = weight;
    self
  }

  pub fn with_solidify_edges(mut self, solidify: bool) -> Self {
    self.solidify_edges = solidify;
    self
  }

  pub fn with_terracing(mut self, height: f32, weight: f32) -> Self {
    self.terrace_enabled = true;
    self.terrace_height = height;
    self.terrace_weight = weight;
    self
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(1..=10).contains(&self.octaves) {
      return Err(ConfigError::Octaves(self.octaves));
    }
    if self.terrace_enabled && self.terrace_height == 0.0 {
      return Err(ConfigError::TerraceHeight);
    }
    check_finite("lacunarity", self.lacunarity)?;
    check_finite("persistence", self.persistence)?;
    check_finite("scale", self.scale)?;
    check_finite("weight", self.weight)?;
    check_finite("weight multiplier", self.weight_multiplier)?;
    check_finite("surface offset", self.surface_offset)?;
    check_finite("bedrock height", self.bedrock_height)?;
    check_finite("bedrock weight", self.bedrock_weight)?;
    check_finite("terrace height", self.terrace_height)?;
    check_finite("terrace weight", self.terrace_weight)?;
    Ok(())
  }
}

/// Chunk geometry and update-loop parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainConfig {
  /// Cube edge length of a chunk at the highest detail. Range 2..=64.
  pub chunk_size: u32,

  /// Voxel cells per chunk axis; the sample lattice has `resolution + 1`
  /// points per axis. Range 1..=64.
  pub resolution: u32,

  /// Density threshold defining the surface.
  pub surface_level: f32,

  /// Subdivision budget of every root chunk. Range 0..=9.
  pub levels_of_detail: u32,

  /// Fixed map dimensions in root chunks per axis. Range 1..=64 each.
  pub chunk_count: UVec3,

  /// Global offset added to noise sample positions (scrolls the terrain).
  pub density_offset: Vec3,

  /// Density field parameters.
  pub noise: NoiseConfig,
}

impl Default for TerrainConfig {
  fn default() -> Self {
    Self {
      chunk_size: 2,
      resolution: 32,
      surface_level: 0.0,
      levels_of_detail: 4,
      chunk_count: UVec3::ONE,
      density_offset: Vec3::ZERO,
      noise: NoiseConfig::default(),
    }
  }
}

impl TerrainConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_chunk_size(mut self, size: u32) -> Self {
    self.chunk_size = size;
    self
  }

  pub fn with_resolution(mut self, resolution: u32) -> Self {
    self.resolution = resolution;
    self
  }

  pub fn with_surface_level(mut self, level: f32) -> Self {
    self.surface_level = level;
    self
  }

  pub fn with_levels_of_detail(mut self, levels: u32) -> Self {
    self.levels_of_detail = levels;
    self
  }

  pub fn with_chunk_count(mut self, count: UVec3) -> Self {
    self.chunk_count = count;
    self
  }

  pub fn with_density_offset(mut self, offset: Vec3) -> Self {
    self.density_offset = offset;
    self
  }

  pub fn with_noise(mut self, noise: NoiseConfig) -> Self {
    self.noise = noise;
    self
  }

  /// Cube edge length of a root chunk: `chunk_size * 2^levels_of_detail`.
  #[inline]
  pub fn root_size(&self) -> f32 {
    (self.chunk_size << self.levels_of_detail) as f32
  }

  /// World-space extent of the whole map, centered on the origin.
  #[inline]
  pub fn map_size(&self) -> Vec3 {
    self.chunk_count.as_vec3() * self.root_size()
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(2..=64).contains(&self.chunk_size) {
      return Err(ConfigError::ChunkSize(self.chunk_size));
    }
    if !(1..=64).contains(&self.resolution) {
      return Err(ConfigError::Resolution(self.resolution));
    }
    if self.levels_of_detail > 9 {
      return Err(ConfigError::LevelsOfDetail(self.levels_of_detail));
    }
    if self.chunk_count.min_element() == 0 || self.chunk_count.max_element() > 64 {
      return Err(ConfigError::ChunkCount(self.chunk_count));
    }
    check_finite("surface level", self.surface_level)?;
    check_finite("density offset x", self.density_offset.x)?;
    check_finite("density offset y", self.density_offset.y)?;
    check_finite("density offset z", self.density_offset.z)?;
    self.noise.validate()
  }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
  if value.is_finite() {
    Ok(())
  } else {
    Err(ConfigError::NonFinite { field, value })
  }
}
