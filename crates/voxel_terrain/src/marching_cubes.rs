//! Marching cubes surface extraction.
//!
//! Converts a sampled density lattice into a triangle soup approximating the
//! `surface_level` isosurface.
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        INPUT                               │
//! │  lattice: DensityLattice  - (resolution+1)³ samples        │
//! │  surface_level: f32       - isosurface threshold           │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │              PER CELL (resolution³, parallel)              │
//! │    Load 8 corner samples                                   │
//! │    Build 8-bit configuration (bit set = corner solid)      │
//! │    Early-out if homogeneous (EDGE_TABLE entry == 0)        │
//! │    Interpolate crossing point on each crossed edge         │
//! │    Emit up to 5 triangles per TRI_TABLE row                │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │                        OUTPUT                              │
//! │  Vec<Triangle>  - unordered across cells, consistent       │
//! │                   winding within each cell                 │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! A corner is *solid* when its density is strictly greater than
//! `surface_level`. The same comparison drives both the configuration bits
//! and the interpolation sign, so crossed edges always have corners on
//! opposite sides of the threshold.

use glam::Vec3;
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::constants::{lattice_index, CORNER_OFFSETS, MAX_TRIANGLES_PER_CELL};
use crate::edge_table::{EDGE_CORNERS, EDGE_TABLE};
use crate::sampling::DensityLattice;
use crate::tri_table::TRI_TABLE;
use crate::types::Triangle;

/// Triangles produced by a single cell. At most 5, so cells stay on the
/// stack until the final collect.
pub type CellTriangles = SmallVec<[Triangle; MAX_TRIANGLES_PER_CELL]>;

/// Extract the isosurface of a sampled lattice as a triangle list.
///
/// Cells are marched in parallel; each worker appends into its own local
/// buffer and the results are concatenated afterwards, so triangle order is
/// unspecified across cells.
#[cfg_attr(
  feature = "tracing",
  tracing::instrument(skip_all, name = "marching_cubes::extract_mesh")
)]
pub fn extract_mesh(lattice: &DensityLattice, surface_level: f32) -> Vec<Triangle> {
  let points = lattice.points_per_axis();
  if points < 2 {
    return Vec::new();
  }
  let cells = points - 1;

  (0..cells * cells * cells)
    .into_par_iter()
    .flat_map_iter(|i| {
      let (x, y, z) = (i / (cells * cells), (i / cells) % cells, i % cells);
      march_lattice_cell(lattice, x, y, z, surface_level)
    })
    .collect()
}

/// March the cell whose minimum corner sits at lattice point `(x, y, z)`.
fn march_lattice_cell(
  lattice: &DensityLattice,
  x: usize,
  y: usize,
  z: usize,
  surface_level: f32,
) -> CellTriangles {
  let points = lattice.points_per_axis();
  let mut positions = [Vec3::ZERO; 8];
  let mut densities = [0.0f32; 8];
  for (corner, offset) in CORNER_OFFSETS.iter().enumerate() {
    let idx = lattice_index(x + offset[0], y + offset[1], z + offset[2], points);
    positions[corner] = lattice.positions[idx];
    densities[corner] = lattice.densities[idx];
  }
  march_cell(&positions, &densities, surface_level)
}

/// Triangulate a single voxel cell from its 8 corner samples.
///
/// Corners follow the [`CORNER_OFFSETS`] ordering. Homogeneous cells (all
/// corners solid or all air) emit nothing.
pub fn march_cell(
  positions: &[Vec3; 8],
  densities: &[f32; 8],
  surface_level: f32,
) -> CellTriangles {
  let mut triangles = CellTriangles::new();

  let config = corner_configuration(densities, surface_level);
  if EDGE_TABLE[config as usize] == 0 {
    return triangles;
  }

  let row = &TRI_TABLE[config as usize];
  let mut i = 0;
  while row[i] >= 0 {
    let a = edge_vertex(positions, densities, row[i] as usize, surface_level);
    let b = edge_vertex(positions, densities, row[i + 1] as usize, surface_level);
    let c = edge_vertex(positions, densities, row[i + 2] as usize, surface_level);
    triangles.push(Triangle::new(a, b, c));
    i += 3;
  }
  triangles
}

/// Build the 8-bit cell configuration: bit `i` set when corner `i` is solid.
#[inline]
fn corner_configuration(densities: &[f32; 8], surface_level: f32) -> u8 {
  let mut config = 0u8;
  for (corner, &density) in densities.iter().enumerate() {
    if density > surface_level {
      config |= 1 << corner;
    }
  }
  config
}

/// Interpolated surface crossing on one of the 12 cell edges.
///
/// A flat edge (`d1 == d0`) would divide by zero, and a NaN corner density
/// poisons the quotient outright; both snap the crossing to the first corner
/// instead of emitting a non-finite vertex.
#[inline]
fn edge_vertex(
  positions: &[Vec3; 8],
  densities: &[f32; 8],
  edge: usize,
  surface_level: f32,
) -> Vec3 {
  let [c0, c1] = EDGE_CORNERS[edge];
  let d0 = densities[c0];
  let d1 = densities[c1];
  let t = if d1 == d0 {
    0.0
  } else {
    // clamp passes NaN through, so the quotient is checked explicitly.
    let t = ((surface_level - d0) / (d1 - d0)).clamp(0.0, 1.0);
    if t.is_finite() {
      t
    } else {
      0.0
    }
  };
  positions[c0].lerp(positions[c1], t)
}

#[cfg(test)]
#[path = "marching_cubes_test.rs"]
mod marching_cubes_test;
