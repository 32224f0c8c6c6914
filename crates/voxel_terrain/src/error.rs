//! Error types for terrain configuration.

use glam::UVec3;
use thiserror::Error;

/// A configuration rejected by [`crate::config::TerrainConfig::validate`].
///
/// Raised at configuration time; generation itself is infallible.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
  #[error("chunk size {0} outside supported range 2..=64")]
  ChunkSize(u32),

  #[error("resolution {0} outside supported range 1..=64")]
  Resolution(u32),

  #[error("levels of detail {0} exceeds maximum 9")]
  LevelsOfDetail(u32),

  #[error("chunk count {0} outside supported range 1..=64 per axis")]
  ChunkCount(UVec3),

  #[error("octave count {0} outside supported range 1..=10")]
  Octaves(u32),

  #[error("terrace height must be nonzero when terracing is enabled")]
  TerraceHeight,

  #[error("{field} must be finite, got {value}")]
  NonFinite { field: &'static str, value: f32 },
}
