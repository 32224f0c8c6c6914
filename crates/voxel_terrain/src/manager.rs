//! ChunkTreeManager - drives the octree update loop.
//!
//! Once per tick the manager walks every root chunk, splitting nodes the
//! viewer is close to and merging nodes out of range, then schedules a
//! sample + extract job pair for each dirty leaf and drains whatever
//! completed jobs have arrived since the last tick.
//!
//! # Flow
//!
//! ```text
//! Control Thread                        rayon workers
//! ┌───────────────────┐
//! │ update()          │
//! │  walk roots       │
//! │  split / merge    │
//! │  schedule dirty ──┼────────────►  ┌──────────────────┐
//! └────────┬──────────┘               │ sample_chunk()   │
//!          │                          │ extract_mesh()   │
//!          ▼                          └────────┬─────────┘
//! ┌───────────────────┐    channel             │
//! │ drain results     │◄───────────────────────┘
//! │  live leaf: write │
//! │  else: discard    │
//! └───────────────────┘
//! ```
//!
//! Meshes are only ever written from the control thread, and only to nodes
//! that are still live leaves of the current generation. A job whose node
//! was merged away (or whose configuration was swapped) while it ran still
//! completes, but its result is dropped on arrival.

use std::sync::Arc;

use crossbeam_channel::{self as channel, Receiver, Sender, TryRecvError};
use glam::{UVec3, Vec3};

use crate::config::TerrainConfig;
use crate::error::ConfigError;
use crate::marching_cubes::extract_mesh;
use crate::noise::{DensitySource, TerrainDensity};
use crate::octree::{ChunkNode, NodeId};
use crate::sampling::sample_chunk;
use crate::types::Triangle;

/// Completed meshing job, addressed by node id rather than reference.
struct MeshJobOutput {
  node_id: NodeId,
  generation: u64,
  mesh: Vec<Triangle>,
}

/// Counters for one `update` tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateStats {
  /// Leaves split into octants this tick.
  pub splits: usize,
  /// Internal nodes merged back to leaves this tick.
  pub merges: usize,
  /// Sample + extract job pairs handed to the worker pool.
  pub jobs_scheduled: usize,
  /// Completed meshes written into live leaves.
  pub meshes_applied: usize,
  /// Completed meshes dropped: stale generation, or node destroyed/split.
  pub results_discarded: usize,
  /// Jobs still in flight after this tick.
  pub pending_jobs: usize,
}

/// Octree update loop: split/merge policy, job scheduling, result
/// integration.
///
/// Type parameter `S` is the density field the workers sample. The default
/// [`TerrainDensity`] is the layered-noise terrain; tests and tools can
/// plug in any other [`DensitySource`].
pub struct ChunkTreeManager<S: DensitySource = TerrainDensity> {
  config: TerrainConfig,
  source: Arc<S>,
  /// Bumped on every configuration swap; results stamped with an older
  /// generation are discarded on arrival.
  generation: u64,
  roots: Vec<ChunkNode>,
  sender: Sender<MeshJobOutput>,
  receiver: Receiver<MeshJobOutput>,
  pending_jobs: usize,
}

impl ChunkTreeManager<TerrainDensity> {
  /// Create a manager over the standard layered-noise terrain field.
  pub fn new(config: TerrainConfig) -> Result<Self, ConfigError> {
    let source = TerrainDensity::from_config(&config);
    Self::with_source(config, source)
  }

  /// Swap in a new configuration, rebuilding the density field from it.
  pub fn set_config(&mut self, config: TerrainConfig) -> Result<(), ConfigError> {
    let source = TerrainDensity::from_config(&config);
    self.set_config_with_source(config, source)
  }
}

impl<S: DensitySource + 'static> ChunkTreeManager<S> {
  /// Create a manager over a custom density source.
  pub fn with_source(config: TerrainConfig, source: S) -> Result<Self, ConfigError> {
    config.validate()?;
    let (sender, receiver) = channel::unbounded();
    Ok(Self {
      roots: build_roots(&config),
      config,
      source: Arc::new(source),
      generation: 0,
      sender,
      receiver,
      pending_jobs: 0,
    })
  }

  /// Swap configuration and density source together.
  ///
  /// The root grid is rebuilt from scratch (every node becomes a dirty
  /// leaf again) and the generation counter is bumped, so jobs scheduled
  /// under the old configuration are discarded when they complete. On
  /// validation failure the manager is left untouched.
  pub fn set_config_with_source(
    &mut self,
    config: TerrainConfig,
    source: S,
  ) -> Result<(), ConfigError> {
    config.validate()?;
    self.roots = build_roots(&config);
    self.config = config;
    self.source = Arc::new(source);
    self.generation += 1;
    log::debug!("configuration swapped, now generation {}", self.generation);
    Ok(())
  }

  /// Drive one tick of the octree toward the viewer.
  ///
  /// Walks every root recursively, applying the split/merge policy and
  /// scheduling meshing work for dirty leaves, then integrates whatever
  /// results have completed. Never blocks on in-flight jobs.
  #[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, name = "manager::update")
  )]
  pub fn update(&mut self, viewer_position: Vec3, view_distance: f32) -> UpdateStats {
    let mut stats = UpdateStats::default();

    let mut roots = std::mem::take(&mut self.roots);
    for root in &mut roots {
      self.update_node(root, viewer_position, view_distance, &mut stats);
    }
    self.roots = roots;
    self.pending_jobs += stats.jobs_scheduled;

    self.drain_results(&mut stats);
    stats.pending_jobs = self.pending_jobs;

    if stats.splits + stats.merges + stats.jobs_scheduled + stats.meshes_applied > 0 {
      log::debug!(
        "update: {} splits, {} merges, {} scheduled, {} applied, {} discarded, {} pending",
        stats.splits,
        stats.merges,
        stats.jobs_scheduled,
        stats.meshes_applied,
        stats.results_discarded,
        stats.pending_jobs
      );
    }
    stats
  }

  /// Split/merge policy for one node, recursing into children.
  ///
  /// A node within the view radius that still has subdivision budget is
  /// kept internal and its children visited instead; everything else
  /// collapses to a leaf and regenerates its own mesh when dirty.
  fn update_node(
    &self,
    node: &mut ChunkNode,
    viewer_position: Vec3,
    view_distance: f32,
    stats: &mut UpdateStats,
  ) {
    if node.bounds().within_radius(viewer_position, view_distance) && node.lod() > 0 {
      if node.split() {
        stats.splits += 1;
      }
      if let Some(children) = node.children_mut() {
        for child in children {
          self.update_node(child, viewer_position, view_distance, stats);
        }
      }
      return;
    }

    if !node.is_leaf() {
      node.merge();
      stats.merges += 1;
    }

    if node.dirty {
      self.schedule_remesh(node);
      node.dirty = false;
      stats.jobs_scheduled += 1;
    }
  }

  /// Hand a sample + extract job pair for this node to the worker pool.
  ///
  /// The job owns its buffers for its whole lifetime: the lattice is
  /// allocated on the worker, consumed by extraction, and dropped before
  /// the triangle list is sent back.
  fn schedule_remesh(&self, node: &ChunkNode) {
    let source = Arc::clone(&self.source);
    let sender = self.sender.clone();
    let node_id = node.id();
    let generation = self.generation;
    let center = node.center();
    let size = node.size();
    let resolution = self.config.resolution;
    let surface_level = self.config.surface_level;

    log::trace!(
      "scheduling remesh for node {} (center {center}, size {size})",
      node_id.raw()
    );
    rayon::spawn(move || {
      let lattice = sample_chunk(source.as_ref(), center, size, resolution);
      let mesh = extract_mesh(&lattice, surface_level);
      // Send fails only when the manager itself is gone.
      let _ = sender.send(MeshJobOutput {
        node_id,
        generation,
        mesh,
      });
    });
  }

  /// Integrate every job that has completed since the last tick.
  fn drain_results(&mut self, stats: &mut UpdateStats) {
    loop {
      match self.receiver.try_recv() {
        Ok(output) => {
          self.pending_jobs = self.pending_jobs.saturating_sub(1);
          self.apply_result(output, stats);
        }
        Err(TryRecvError::Empty) => break,
        Err(TryRecvError::Disconnected) => break,
      }
    }
  }

  /// Write a completed mesh into its node, or discard it.
  ///
  /// The result must carry the current generation and resolve to a node
  /// that is still a leaf; anything else ran against state that no longer
  /// exists.
  fn apply_result(&mut self, output: MeshJobOutput, stats: &mut UpdateStats) {
    if output.generation != self.generation {
      log::trace!(
        "discarding mesh for node {}: stale generation {}",
        output.node_id.raw(),
        output.generation
      );
      stats.results_discarded += 1;
      return;
    }

    let target = self
      .roots
      .iter_mut()
      .find_map(|root| root.find_mut(output.node_id));

    match target {
      Some(node) if node.is_leaf() => {
        node.mesh = output.mesh;
        stats.meshes_applied += 1;
      }
      _ => {
        log::trace!(
          "discarding mesh for node {}: destroyed or split",
          output.node_id.raw()
        );
        stats.results_discarded += 1;
      }
    }
  }

  pub fn config(&self) -> &TerrainConfig {
    &self.config
  }

  /// Root chunks of the fixed map grid.
  pub fn roots(&self) -> &[ChunkNode] {
    &self.roots
  }

  /// Jobs handed to the worker pool that have not been drained yet.
  pub fn pending_jobs(&self) -> usize {
    self.pending_jobs
  }

  /// Visit every leaf chunk across all roots.
  ///
  /// Leaves carry the renderable state: the cached mesh and its bounding
  /// cube.
  pub fn visit_leaves<F: FnMut(&ChunkNode)>(&self, mut visit: F) {
    for root in &self.roots {
      root.visit_leaves(&mut visit);
    }
  }

  /// Total triangles cached across all leaf meshes.
  pub fn triangle_count(&self) -> usize {
    let mut count = 0;
    self.visit_leaves(|leaf| count += leaf.mesh.len());
    count
  }
}

/// Lay out the fixed root grid centered on the origin.
///
/// The grid spans `map_size` in total, so the edge solidification region
/// `abs(p) < map_size / 2` lines up exactly with the chunks it covers.
fn build_roots(config: &TerrainConfig) -> Vec<ChunkNode> {
  let root_size = config.root_size();
  let count = config.chunk_count;
  let half_grid = (count.as_vec3() - Vec3::ONE) / 2.0;

  let mut roots = Vec::with_capacity((count.x * count.y * count.z) as usize);
  for x in 0..count.x {
    for y in 0..count.y {
      for z in 0..count.z {
        let grid_index = UVec3::new(x, y, z).as_vec3();
        let center = (grid_index - half_grid) * root_size;
        roots.push(ChunkNode::new(center, root_size, config.levels_of_detail));
      }
    }
  }
  roots
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;
