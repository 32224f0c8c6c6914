//! Tests for the layered-noise density field.

use glam::Vec3;

use super::*;

fn field(params: &NoiseConfig) -> TerrainDensity {
  TerrainDensity::new(params, Vec3::ZERO, Vec3::splat(64.0))
}

/// A grid of sample positions straddling the origin.
fn sample_positions() -> Vec<Vec3> {
  let mut positions = Vec::new();
  for x in -2..=2 {
    for y in -2..=2 {
      for z in -2..=2 {
        positions.push(Vec3::new(x as f32 * 3.7, y as f32 * 5.1, z as f32 * 2.3));
      }
    }
  }
  positions
}

/// Two fields built from the same parameters agree bit for bit everywhere.
#[test]
fn test_density_is_deterministic() {
  let params = NoiseConfig::default().with_seed(42);
  let a = field(&params);
  let b = field(&params);

  for position in sample_positions() {
    assert_eq!(
      a.density(position).to_bits(),
      b.density(position).to_bits(),
      "density diverged at {position}"
    );
  }
}

/// Different seeds shuffle the octave offsets and therefore the terrain.
#[test]
fn test_seed_changes_terrain() {
  let a = field(&NoiseConfig::default().with_seed(1));
  let b = field(&NoiseConfig::default().with_seed(2));

  let diverged = sample_positions()
    .iter()
    .any(|&p| a.density(p) != b.density(p));
  assert!(diverged, "seeds 1 and 2 produced identical fields");
}

#[test]
fn test_octave_offsets_seeded_in_range() {
  let params = NoiseConfig::default().with_seed(7).with_octaves(10);
  let a = field(&params);
  assert_eq!(a.octave_offsets().len(), 10);
  for offset in a.octave_offsets() {
    assert!(
      offset.abs().max_element() <= 1000.0,
      "offset {offset} outside the documented range"
    );
  }

  let b = field(&params);
  assert_eq!(a.octave_offsets(), b.octave_offsets());

  let c = field(&NoiseConfig::default().with_seed(8).with_octaves(10));
  assert_ne!(a.octave_offsets(), c.octave_offsets());
}

/// With zero noise weight only the surface plane remains.
#[test]
fn test_zero_weight_leaves_surface_plane() {
  let mut params = NoiseConfig::default().with_surface_offset(1.0);
  params.weight = 0.0;
  let plane = field(&params);

  for position in sample_positions() {
    assert_eq!(plane.density(position), -(position.y + 1.0));
  }
}

/// Terracing adds exactly the remainder term on top of the base field.
#[test]
fn test_terrace_adds_remainder_term() {
  let base_params = NoiseConfig::default().with_seed(3);
  let terraced_params = base_params.clone().with_terracing(4.0, 0.5);
  let base = field(&base_params);
  let terraced = field(&terraced_params);

  for position in sample_positions() {
    let expected = base.density(position) + (position.y % 4.0) * 0.5;
    assert_eq!(terraced.density(position), expected, "at {position}");
  }
}

/// Bedrock adds its weight below the bedrock height and nothing above.
#[test]
fn test_bedrock_adds_weight_below_height() {
  let base_params = NoiseConfig::default().with_seed(3);
  let bedrock_params = base_params.clone().with_bedrock(-5.0, 30.0);
  let base = field(&base_params);
  let bedrock = field(&bedrock_params);

  for position in sample_positions() {
    let expected = if position.y < -5.0 {
      base.density(position) + 30.0
    } else {
      base.density(position)
    };
    assert_eq!(bedrock.density(position), expected, "at {position}");
  }
}

/// At or past the map boundary the field is forced to deep air.
#[test]
fn test_solidify_edges_forces_air() {
  let params = NoiseConfig::default().with_solidify_edges(true);
  // Map spans [-16, 16] on every axis.
  let f = TerrainDensity::new(&params, Vec3::ZERO, Vec3::splat(32.0));

  // Any single axis at or beyond the boundary turns the point to air.
  assert_eq!(f.density(Vec3::new(16.0, 0.0, 0.0)), AIR_SENTINEL);
  assert_eq!(f.density(Vec3::new(0.0, -17.0, 0.0)), AIR_SENTINEL);
  assert_eq!(f.density(Vec3::new(0.0, 0.0, 100.0)), AIR_SENTINEL);
  assert_eq!(f.density(Vec3::splat(-16.0)), AIR_SENTINEL);

  // Interior points keep their noise density.
  let interior = f.density(Vec3::new(1.0, -2.0, 3.0));
  assert_ne!(interior, AIR_SENTINEL);

  // Without the flag the boundary point is untouched.
  let open = TerrainDensity::new(&NoiseConfig::default(), Vec3::ZERO, Vec3::splat(32.0));
  assert_ne!(open.density(Vec3::new(16.0, 0.0, 0.0)), AIR_SENTINEL);
}

/// The global offset scrolls the noise without moving the surface plane.
#[test]
fn test_density_offset_scrolls_noise() {
  let params = NoiseConfig::default().with_seed(9);
  let still = TerrainDensity::new(&params, Vec3::ZERO, Vec3::splat(64.0));
  let scrolled = TerrainDensity::new(&params, Vec3::new(50.0, 0.0, 0.0), Vec3::splat(64.0));

  let diverged = sample_positions()
    .iter()
    .any(|&p| still.density(p) != scrolled.density(p));
  assert!(diverged, "sample offset had no effect on the field");
}
