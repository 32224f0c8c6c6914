//! Precomputed edge crossing table for marching cubes.
//!
//! Maps 8-bit corner configurations to 12-bit edge masks indicating which
//! cell edges the surface crosses.
//!
//! # Cube Topology
//!
//! ```text
//!        7────6────6         Corners (ring order, see crate::constants):
//!       /│        /│           0=(0,0,0)  1=(1,0,0)  2=(1,1,0)  3=(0,1,0)
//!      11 7     10 5           4=(0,0,1)  5=(1,0,1)  6=(1,1,1)  7=(0,1,1)
//!     /  │      /  │
//!    4───┼4────5   │         Edges 0-3:  bottom ring (Z=0)
//!    │   3───2─┼───2         Edges 4-7:  top ring    (Z=1)
//!    8  /      9  /          Edges 8-11: verticals   (corner i to i+4)
//!    │ 3       │ 1
//!    │/        │/
//!    0────0────1
//! ```
//!
//! A configuration bit is set when the corner's density is above the surface
//! threshold (solid). An edge is crossed exactly when its two endpoint
//! corners disagree, so the whole table follows from [`EDGE_CORNERS`] and is
//! built at compile time.

/// Edge endpoint corner indices. Each edge connects two corners of the cell.
pub const EDGE_CORNERS: [[usize; 2]; 12] = [
  [0, 1], // Edge 0:  bottom ring
  [1, 2], // Edge 1
  [2, 3], // Edge 2
  [3, 0], // Edge 3
  [4, 5], // Edge 4:  top ring
  [5, 6], // Edge 5
  [6, 7], // Edge 6
  [7, 4], // Edge 7
  [0, 4], // Edge 8:  verticals
  [1, 5], // Edge 9
  [2, 6], // Edge 10
  [3, 7], // Edge 11
];

/// Precomputed edge table.
/// Index: 8-bit corner configuration (which corners are solid)
/// Value: 12-bit edge mask (which edges have surface crossings)
pub const EDGE_TABLE: [u16; 256] = generate_edge_table();

/// Generate the edge table at compile time.
const fn generate_edge_table() -> [u16; 256] {
  let mut table = [0u16; 256];
  let mut config = 0usize;

  while config < 256 {
    let mut edge_mask = 0u16;
    let mut edge = 0;

    while edge < 12 {
      let c0 = EDGE_CORNERS[edge][0];
      let c1 = EDGE_CORNERS[edge][1];

      let solid0 = (config >> c0) & 1;
      let solid1 = (config >> c1) & 1;

      // Edge is crossed if its corners disagree
      if solid0 != solid1 {
        edge_mask |= 1 << edge;
      }

      edge += 1;
    }

    table[config] = edge_mask;
    config += 1;
  }

  table
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_known_configurations() {
    // Values match the published Lorensen-Cline table.
    assert_eq!(EDGE_TABLE[0x00], 0x000, "all air crosses nothing");
    assert_eq!(EDGE_TABLE[0xff], 0x000, "all solid crosses nothing");
    assert_eq!(EDGE_TABLE[0x01], 0x109, "corner 0 cuts edges 0, 3, 8");
    assert_eq!(EDGE_TABLE[0x02], 0x203, "corner 1 cuts edges 0, 1, 9");
    assert_eq!(EDGE_TABLE[0x03], 0x30a, "corners 0+1 cut edges 1, 3, 8, 9");
  }

  #[test]
  fn test_complement_symmetry() {
    // Inverting solid/air crosses the same edges.
    for config in 0..256 {
      assert_eq!(EDGE_TABLE[config], EDGE_TABLE[255 - config]);
    }
  }

  #[test]
  fn test_edge_corners_cover_all_corners() {
    let mut degree = [0usize; 8];
    for [a, b] in EDGE_CORNERS {
      assert_ne!(a, b);
      degree[a] += 1;
      degree[b] += 1;
    }
    // Every cube corner meets exactly 3 edges.
    assert!(degree.iter().all(|&d| d == 3));
  }
}
