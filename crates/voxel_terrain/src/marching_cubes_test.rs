//! Tests for marching cubes extraction.

use glam::Vec3;

use super::*;
use crate::sampling::sample_chunk;

/// Horizontal half-space: solid below y = 0, air above.
struct PlaneDensity;

impl crate::noise::DensitySource for PlaneDensity {
  fn density(&self, position: Vec3) -> f32 {
    -position.y
  }
}

/// Solid ball of the given radius around the origin.
struct SphereDensity {
  radius: f32,
}

impl crate::noise::DensitySource for SphereDensity {
  fn density(&self, position: Vec3) -> f32 {
    self.radius - position.length()
  }
}

/// Constant field, solid or air everywhere.
struct UniformDensity(f32);

impl crate::noise::DensitySource for UniformDensity {
  fn density(&self, _position: Vec3) -> f32 {
    self.0
  }
}

#[test]
fn test_uniform_solid_lattice_is_empty() {
  let lattice = sample_chunk(&UniformDensity(1.0), Vec3::ZERO, 8.0, 4);
  assert!(extract_mesh(&lattice, 0.0).is_empty());
}

#[test]
fn test_uniform_air_lattice_is_empty() {
  let lattice = sample_chunk(&UniformDensity(-1.0), Vec3::ZERO, 8.0, 4);
  assert!(extract_mesh(&lattice, 0.0).is_empty());
}

/// A flat plane density yields a mesh whose vertices all sit on the plane.
#[test]
fn test_flat_plane_mesh_lies_on_surface() {
  let lattice = sample_chunk(&PlaneDensity, Vec3::ZERO, 8.0, 4);
  let triangles = extract_mesh(&lattice, 0.0);

  assert!(!triangles.is_empty());
  for tri in &triangles {
    for corner in 0..3 {
      let vertex = tri[corner];
      assert!(
        vertex.y.abs() < 1e-5,
        "Vertex off the y = 0 plane: {vertex:?}"
      );
      assert!(vertex.x.abs() <= 4.0 && vertex.z.abs() <= 4.0);
    }
  }
}

/// Cells with all corners on one side of the threshold emit nothing.
#[test]
fn test_homogeneous_cells_emit_nothing() {
  let positions = CORNER_OFFSETS.map(|[x, y, z]| Vec3::new(x as f32, y as f32, z as f32));

  assert!(march_cell(&positions, &[2.0; 8], 0.0).is_empty());
  assert!(march_cell(&positions, &[-2.0; 8], 0.0).is_empty());
}

/// A single solid corner produces exactly one triangle across its edges.
#[test]
fn test_single_solid_corner_cell() {
  let positions = CORNER_OFFSETS.map(|[x, y, z]| Vec3::new(x as f32, y as f32, z as f32));
  let mut densities = [-1.0; 8];
  densities[0] = 1.0;

  let triangles = march_cell(&positions, &densities, 0.0);
  assert_eq!(triangles.len(), 1);
  for corner in 0..3 {
    let vertex = triangles[0][corner];
    // Crossings sit at edge midpoints for the symmetric +1/-1 corners.
    assert!((vertex - Vec3::ZERO).length() <= 0.5 + 1e-6);
  }
}

#[test]
fn test_interpolation_finds_crossing() {
  let positions = CORNER_OFFSETS.map(|[x, y, z]| Vec3::new(x as f32, y as f32, z as f32));
  let mut densities = [0.0; 8];
  densities[0] = 1.0;
  densities[1] = -3.0;

  // Edge 0 runs from corner 0 to corner 1 along +x.
  let vertex = edge_vertex(&positions, &densities, 0, 0.0);
  assert_eq!(vertex, Vec3::new(0.25, 0.0, 0.0));
}

/// A flat edge snaps to its first corner instead of dividing by zero.
#[test]
fn test_flat_edge_guard() {
  let positions = CORNER_OFFSETS.map(|[x, y, z]| Vec3::new(x as f32, y as f32, z as f32));
  let densities = [1.5; 8];

  for edge in 0..12 {
    let vertex = edge_vertex(&positions, &densities, edge, 0.0);
    assert!(vertex.is_finite(), "NaN leaked from flat edge {edge}");
    assert_eq!(vertex, positions[EDGE_CORNERS[edge][0]]);
  }
}

/// A NaN corner density never reaches the emitted vertex positions.
#[test]
fn test_nan_corner_density_keeps_vertices_finite() {
  let positions = CORNER_OFFSETS.map(|[x, y, z]| Vec3::new(x as f32, y as f32, z as f32));
  let mut densities = [-1.0; 8];
  densities[0] = 1.0;
  densities[1] = f32::NAN;

  // NaN compares as air, so the solid corner 0 still cuts edges 0, 3 and 8.
  let triangles = march_cell(&positions, &densities, 0.0);
  assert_eq!(triangles.len(), 1);
  for corner in 0..3 {
    let vertex = triangles[0][corner];
    assert!(vertex.is_finite(), "NaN leaked into vertex {vertex:?}");
  }
  // The crossing on the poisoned edge snaps to its first corner.
  assert_eq!(edge_vertex(&positions, &densities, 0, 0.0), positions[0]);
}

/// Sphere surface vertices land within one cell of the true radius.
#[test]
fn test_sphere_mesh_hugs_radius() {
  let source = SphereDensity { radius: 3.0 };
  let lattice = sample_chunk(&source, Vec3::ZERO, 8.0, 8);
  let triangles = extract_mesh(&lattice, 0.0);

  assert!(
    triangles.len() > 50,
    "Expected a dense sphere shell, got {} triangles",
    triangles.len()
  );
  let cell_diagonal = (8.0 / 8.0) * 3f32.sqrt();
  for tri in &triangles {
    for corner in 0..3 {
      let distance = tri[corner].length();
      assert!(
        (distance - 3.0).abs() <= cell_diagonal,
        "Vertex strayed from the sphere: distance {distance}"
      );
    }
  }
}

/// Parallel extraction matches a serial cell walk exactly.
#[test]
fn test_extraction_matches_serial_walk() {
  let source = SphereDensity { radius: 3.0 };
  let lattice = sample_chunk(&source, Vec3::new(1.0, -2.0, 0.5), 8.0, 6);
  let parallel = extract_mesh(&lattice, 0.0);

  let cells = lattice.points_per_axis() - 1;
  let mut serial = Vec::new();
  for x in 0..cells {
    for y in 0..cells {
      for z in 0..cells {
        serial.extend(march_lattice_cell(&lattice, x, y, z, 0.0));
      }
    }
  }

  assert_eq!(parallel, serial);
}

/// Triangle output stays within the case table's per-cell cap.
#[test]
fn test_cell_triangle_cap() {
  let positions = CORNER_OFFSETS.map(|[x, y, z]| Vec3::new(x as f32, y as f32, z as f32));
  for config in 0..256u32 {
    let densities: [f32; 8] =
      std::array::from_fn(|i| if config & (1 << i) != 0 { 1.0 } else { -1.0 });
    let triangles = march_cell(&positions, &densities, 0.0);
    assert!(triangles.len() <= MAX_TRIANGLES_PER_CELL);
  }
}
