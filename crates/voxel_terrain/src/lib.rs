//! voxel_terrain - real-time voxel terrain engine core
//!
//! This crate generates a continuous 3D density field from seeded layered
//! noise, partitions space into an octree of chunks, and extracts polygonal
//! surfaces per chunk via marching cubes, adapting detail to the viewer's
//! distance. Sampling and extraction run as job pairs on a worker pool; the
//! control thread never blocks on them.
//!
//! # Features
//!
//! - **Layered noise terrain**: seeded ridged octave noise with surface
//!   plane, bedrock, terracing and map-edge solidification
//! - **Chunk octree**: split/merge driven by viewer distance, with an
//!   inclusive bounding-cube radius test
//! - **Marching cubes**: table-driven extraction, parallel over cells
//! - **Race-free integration**: results addressed by node id and
//!   generation, so late jobs for destroyed chunks are discarded
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use voxel_terrain::{ChunkTreeManager, TerrainConfig};
//!
//! let config = TerrainConfig::new()
//!   .with_chunk_size(4)
//!   .with_resolution(8)
//!   .with_levels_of_detail(2);
//! let mut manager = ChunkTreeManager::new(config).expect("valid config");
//!
//! // Once per frame: adapt the octree and collect finished meshes.
//! let stats = manager.update(Vec3::new(0.0, 10.0, 0.0), 200.0);
//! println!("{} chunk meshes in flight", stats.pending_jobs);
//! ```

pub mod constants;
pub mod edge_table;
pub mod tri_table;
pub mod types;

// Re-export commonly used items
pub use constants::{lattice_coord, lattice_index, CORNER_OFFSETS, MAX_TRIANGLES_PER_CELL};
pub use edge_table::{EDGE_CORNERS, EDGE_TABLE};
pub use tri_table::TRI_TABLE;
pub use types::{MeshBuffers, Triangle};

// Configuration and validation
pub mod config;
pub mod error;
pub use config::{NoiseConfig, TerrainConfig};
pub use error::ConfigError;

// Density field and lattice sampling
pub mod noise;
pub mod sampling;
pub use noise::{DensitySource, TerrainDensity, AIR_SENTINEL};
pub use sampling::{sample_chunk, DensityLattice};

// Marching cubes extraction
pub mod marching_cubes;
pub use marching_cubes::{extract_mesh, march_cell};

// Chunk octree for LOD-based spatial subdivision
pub mod octree;
pub use octree::{ChunkNode, CubeBounds, NodeId};

// Update loop: split/merge policy and the meshing job pipeline
pub mod manager;
pub use manager::{ChunkTreeManager, UpdateStats};
