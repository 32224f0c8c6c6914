//! Core mesh types shared across the pipeline.

use std::ops::Index;

use glam::Vec3;

/// A single surface triangle: three ordered world-space corners.
///
/// Winding is whatever the triangulation table produced, consistent per
/// case; no global orientation is guaranteed.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Triangle {
  pub a: Vec3,
  pub b: Vec3,
  pub c: Vec3,
}

impl Triangle {
  pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
    Self { a, b, c }
  }
}

impl Index<usize> for Triangle {
  type Output = Vec3;

  /// Corner access by index: 0 = a, 1 = b, 2 = c.
  fn index(&self, corner: usize) -> &Vec3 {
    match corner {
      0 => &self.a,
      1 => &self.b,
      2 => &self.c,
      _ => panic!("triangle corner index out of range: {corner}"),
    }
  }
}

/// Flat vertex/index buffers for a rendering collaborator.
///
/// Indices are sequential (triangle i uses 3i, 3i+1, 3i+2). Vertex welding
/// and normal generation are the consumer's concern; positions are all this
/// pipeline guarantees.
#[derive(Clone, Debug, Default)]
pub struct MeshBuffers {
  pub positions: Vec<Vec3>,
  pub indices: Vec<u32>,
}

impl MeshBuffers {
  /// Unroll a triangle list into flat buffers.
  pub fn from_triangles(triangles: &[Triangle]) -> Self {
    let mut positions = Vec::with_capacity(triangles.len() * 3);
    let mut indices = Vec::with_capacity(triangles.len() * 3);

    for (i, tri) in triangles.iter().enumerate() {
      for corner in 0..3 {
        positions.push(tri[corner]);
        indices.push((i * 3 + corner) as u32);
      }
    }

    Self { positions, indices }
  }

  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  pub fn is_empty(&self) -> bool {
    self.indices.is_empty()
  }
}
