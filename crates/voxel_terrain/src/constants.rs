//! Lattice layout and cell geometry constants.
//!
//! A chunk of `resolution` voxel cells per axis is sampled on a lattice of
//! `resolution + 1` points per axis. Densities and positions are stored in
//! flat parallel arrays with Z as the innermost axis:
//!
//! ```text
//! index = (x * n + y) * n + z        n = points per axis
//! ```
//!
//! # Coordinate System
//!
//! ```text
//!         +Y
//!          │
//!          │
//!          └───────── +X
//!         /
//!        +Z
//!
//! Cell corners walk the bottom ring counter-clockwise, then the top ring:
//!   0 = (0,0,0)    4 = (0,0,1)
//!   1 = (1,0,0)    5 = (1,0,1)
//!   2 = (1,1,0)    6 = (1,1,1)
//!   3 = (0,1,0)    7 = (0,1,1)
//! ```
//!
//! This is the classic marching-cubes corner ring; the edge and triangulation
//! tables in [`crate::edge_table`] and [`crate::tri_table`] assume it.

/// A marching-cubes cell can emit at most 5 triangles.
pub const MAX_TRIANGLES_PER_CELL: usize = 5;

/// Lattice-coordinate offsets of the 8 cell corners, in table order.
pub const CORNER_OFFSETS: [[usize; 3]; 8] = [
  [0, 0, 0],
  [1, 0, 0],
  [1, 1, 0],
  [0, 1, 0],
  [0, 0, 1],
  [1, 0, 1],
  [1, 1, 1],
  [0, 1, 1],
];

/// Convert 3D lattice coordinates to a flat index.
///
/// Layout: X is the major axis (stride n²), Y middle (stride n), Z minor
/// (stride 1).
#[inline(always)]
pub const fn lattice_index(x: usize, y: usize, z: usize, n: usize) -> usize {
  (x * n + y) * n + z
}

/// Convert a flat lattice index back to 3D coordinates.
#[inline(always)]
pub const fn lattice_coord(idx: usize, n: usize) -> (usize, usize, usize) {
  let z = idx % n;
  let y = (idx / n) % n;
  let x = (idx / n) / n;
  (x, y, z)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_index_roundtrip() {
    let n = 5;
    for x in 0..n {
      for y in 0..n {
        for z in 0..n {
          let idx = lattice_index(x, y, z, n);
          assert_eq!(lattice_coord(idx, n), (x, y, z));
        }
      }
    }
  }

  #[test]
  fn test_index_is_z_minor() {
    // Consecutive indices step along Z first.
    let n = 4;
    assert_eq!(lattice_index(0, 0, 0, n), 0);
    assert_eq!(lattice_index(0, 0, 1, n), 1);
    assert_eq!(lattice_index(0, 1, 0, n), n);
    assert_eq!(lattice_index(1, 0, 0, n), n * n);
  }

  #[test]
  fn test_corner_offsets_are_unit_cube() {
    // All 8 distinct corners of the unit cell, each component 0 or 1.
    let mut seen = [false; 8];
    for c in CORNER_OFFSETS {
      assert!(c[0] <= 1 && c[1] <= 1 && c[2] <= 1);
      let key = c[0] | (c[1] << 1) | (c[2] << 2);
      assert!(!seen[key], "duplicate corner {c:?}");
      seen[key] = true;
    }
    assert!(seen.iter().all(|&s| s));
  }
}
