//! ChunkNode - octree node owning its subtree.
//!
//! A node is either a leaf holding a cached mesh or an internal node holding
//! eight children; never both. Children are owned directly, so destroying a
//! subtree is a synchronous drop with no deferred cleanup.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;

use crate::types::Triangle;

use super::bounds::CubeBounds;

/// Atomic counter for generating unique NodeIds.
static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque node identifier.
///
/// Generated atomically - guaranteed unique within process lifetime. Meshing
/// results are addressed by id rather than by reference, so a job finishing
/// after its node was merged away has no live target to corrupt.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(u64);

impl NodeId {
  /// Generate a new unique NodeId.
  pub fn new() -> Self {
    Self(NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
  }

  /// Get the raw ID value.
  pub fn raw(&self) -> u64 {
    self.0
  }
}

impl Default for NodeId {
  fn default() -> Self {
    Self::new()
  }
}

/// Child octant offset signs, indexed by octant.
///
/// Bits 0, 1 and 2 of the octant select the x, y and z sign; a clear bit is
/// the positive half. Octant 0 is the (+,+,+) sub-cube.
pub const OCTANT_SIGNS: [[f32; 3]; 8] = [
  [1.0, 1.0, 1.0],    // 0: (+,+,+)
  [-1.0, 1.0, 1.0],   // 1: (-,+,+)
  [1.0, -1.0, 1.0],   // 2: (+,-,+)
  [-1.0, -1.0, 1.0],  // 3: (-,-,+)
  [1.0, 1.0, -1.0],   // 4: (+,+,-)
  [-1.0, 1.0, -1.0],  // 5: (-,+,-)
  [1.0, -1.0, -1.0],  // 6: (+,-,-)
  [-1.0, -1.0, -1.0], // 7: (-,-,-)
];

/// Octree node: a cube of terrain and, when split, its eight octants.
///
/// `lod` is the remaining subdivision budget: a node at `lod` 0 is a leaf at
/// maximum resolution and can never split. Every newly created node starts
/// as a dirty leaf with an empty mesh.
#[derive(Debug)]
pub struct ChunkNode {
  id: NodeId,
  bounds: CubeBounds,
  lod: u32,
  /// Cached mesh is stale and must be regenerated before next use.
  pub dirty: bool,
  /// Cached surface triangles; meaningful only while a leaf.
  pub mesh: Vec<Triangle>,
  children: Option<Box<[ChunkNode; 8]>>,
}

impl ChunkNode {
  /// Create a dirty leaf covering the given cube.
  pub fn new(center: Vec3, size: f32, lod: u32) -> Self {
    Self {
      id: NodeId::new(),
      bounds: CubeBounds::new(center, size),
      lod,
      dirty: true,
      mesh: Vec::new(),
      children: None,
    }
  }

  pub fn id(&self) -> NodeId {
    self.id
  }

  pub fn bounds(&self) -> CubeBounds {
    self.bounds
  }

  pub fn center(&self) -> Vec3 {
    self.bounds.center
  }

  pub fn size(&self) -> f32 {
    self.bounds.size
  }

  /// Remaining subdivision budget. 0 = finest detail.
  pub fn lod(&self) -> u32 {
    self.lod
  }

  pub fn is_leaf(&self) -> bool {
    self.children.is_none()
  }

  pub fn children(&self) -> Option<&[ChunkNode; 8]> {
    self.children.as_deref()
  }

  pub fn children_mut(&mut self) -> Option<&mut [ChunkNode; 8]> {
    self.children.as_deref_mut()
  }

  /// Split a leaf into 8 octants of half the size and one less detail level.
  ///
  /// Child centers sit at `center + sign * size/4` per axis following
  /// [`OCTANT_SIGNS`], tiling the parent cube exactly. The parent's own mesh
  /// is cleared: an internal node renders through its children.
  ///
  /// Returns `false` without splitting when the node is already internal or
  /// its subdivision budget is spent.
  pub fn split(&mut self) -> bool {
    if self.lod == 0 || self.children.is_some() {
      return false;
    }

    let child_size = self.bounds.size / 2.0;
    let offset = child_size / 2.0;
    let children = std::array::from_fn(|octant| {
      let [sx, sy, sz] = OCTANT_SIGNS[octant];
      let center = self.bounds.center + Vec3::new(sx, sy, sz) * offset;
      ChunkNode::new(center, child_size, self.lod - 1)
    });

    self.children = Some(Box::new(children));
    self.mesh.clear();
    true
  }

  /// Collapse an internal node back into a leaf.
  ///
  /// Dropping the owned children destroys the whole subtree depth-first,
  /// including any grandchildren. The node is marked dirty so its own mesh
  /// regenerates on the next visit. No-op on a leaf.
  pub fn merge(&mut self) {
    if self.children.take().is_some() {
      self.dirty = true;
    }
  }

  /// Find a node in this subtree by id.
  ///
  /// Returns `None` when the node has since been destroyed by a merge.
  pub fn find_mut(&mut self, id: NodeId) -> Option<&mut ChunkNode> {
    if self.id == id {
      return Some(self);
    }
    let children = self.children.as_deref_mut()?;
    children.iter_mut().find_map(|child| child.find_mut(id))
  }

  /// Visit every leaf of this subtree in octant order.
  pub fn visit_leaves<F: FnMut(&ChunkNode)>(&self, visit: &mut F) {
    match self.children.as_deref() {
      Some(children) => {
        for child in children {
          child.visit_leaves(visit);
        }
      }
      None => visit(self),
    }
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
