//! Chunk octree for viewer-driven level of detail.
//!
//! Each root node covers one cell of the fixed map grid. Nodes close to the
//! viewer split into 8 half-size children until their subdivision budget
//! (`lod`) reaches 0; nodes out of range merge back into a single leaf.
//! Only leaves carry meshes.
//!
//! # LOD Convention
//!
//! `lod` counts the subdivisions still allowed below a node, so roots start
//! at the configured maximum and leaves at full detail sit at `lod` 0.
//!
//! ```text
//! node edge length = chunk_size * 2^lod
//! ```
//!
//! # Module Structure
//!
//! - [`bounds`]: `CubeBounds` - cube arithmetic and the view-radius test
//! - [`node`]: `ChunkNode` - owned tree structure, split/merge lifecycle

pub mod bounds;
pub mod node;

pub use bounds::CubeBounds;
pub use node::{ChunkNode, NodeId, OCTANT_SIGNS};
