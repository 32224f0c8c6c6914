//! Terrain report binary - runs the chunk pipeline headless and prints what
//! it produced.
//!
//! Sweeps a viewer across the map so chunks split, merge and remesh along
//! the way, then parks it at the origin, drains the job queue and reports
//! the final octree and mesh totals.
//!
//! Usage: cargo run --release --bin terrain_report -- [OPTIONS]
//!
//! Options:
//!   --seed <SEED>        Noise seed (default: 1337)
//!   --chunk-size <N>     Chunk edge length at full detail (default: 4)
//!   --resolution <N>     Voxel cells per chunk axis (default: 16)
//!   --levels <N>         Levels of detail above the finest (default: 3)
//!   --view-distance <D>  View radius driving split/merge (default: 40)
//!   --ticks <N>          Update ticks for the viewer sweep (default: 120)

use std::thread;
use std::time::{Duration, Instant};

use glam::Vec3;

use voxel_terrain::{ChunkTreeManager, MeshBuffers, NoiseConfig, TerrainConfig};

fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
    .format_timestamp_millis()
    .init();

  let args: Vec<String> = std::env::args().collect();
  let seed = parse_u32_arg(&args, "--seed").unwrap_or(1337);
  let chunk_size = parse_u32_arg(&args, "--chunk-size").unwrap_or(4);
  let resolution = parse_u32_arg(&args, "--resolution").unwrap_or(16);
  let levels = parse_u32_arg(&args, "--levels").unwrap_or(3);
  let view_distance = parse_f32_arg(&args, "--view-distance").unwrap_or(40.0);
  let ticks = parse_u32_arg(&args, "--ticks").unwrap_or(120);

  let config = TerrainConfig::new()
    .with_chunk_size(chunk_size)
    .with_resolution(resolution)
    .with_levels_of_detail(levels)
    .with_noise(NoiseConfig::new().with_seed(seed));

  let mut manager = match ChunkTreeManager::new(config) {
    Ok(manager) => manager,
    Err(err) => {
      eprintln!("invalid configuration: {err}");
      std::process::exit(1);
    }
  };

  let map_size = manager.config().map_size();
  let root_size = manager.config().root_size();
  println!("=== Terrain Report ===");
  println!("Seed:          {seed}");
  println!("Chunk size:    {chunk_size} (root {root_size})");
  println!("Resolution:    {resolution}^3 cells per chunk");
  println!("LOD levels:    {levels}");
  println!("Map size:      {map_size}");
  println!("View distance: {view_distance}");
  println!();

  // Sweep the viewer across the map, one tick per step.
  let start = Instant::now();
  let sweep_from = Vec3::new(-map_size.x / 2.0 - view_distance, 2.0, 0.0);
  let sweep_to = Vec3::new(map_size.x / 2.0 + view_distance, 2.0, 0.0);
  for tick in 0..ticks {
    let t = if ticks > 1 {
      tick as f32 / (ticks - 1) as f32
    } else {
      0.0
    };
    let viewer = sweep_from.lerp(sweep_to, t);
    let stats = manager.update(viewer, view_distance);
    if stats.splits + stats.merges > 0 {
      println!(
        "tick {tick:4}: viewer x {:7.1}, {} splits, {} merges, {} scheduled, {} pending",
        viewer.x, stats.splits, stats.merges, stats.jobs_scheduled, stats.pending_jobs
      );
    }
    thread::sleep(Duration::from_millis(2));
  }

  // Park the viewer at the origin and let the pipeline drain.
  let viewer = Vec3::new(0.0, 2.0, 0.0);
  for _ in 0..10_000 {
    let stats = manager.update(viewer, view_distance);
    if manager.pending_jobs() == 0 && stats.jobs_scheduled == 0 {
      break;
    }
    thread::sleep(Duration::from_millis(1));
  }
  let elapsed = start.elapsed();

  let mut leaves = 0usize;
  let mut lod_counts = [0usize; 10];
  let mut largest: Option<(usize, Vec3)> = None;
  manager.visit_leaves(|leaf| {
    leaves += 1;
    lod_counts[leaf.lod() as usize] += 1;
    let triangles = leaf.mesh.len();
    if largest.map_or(true, |(count, _)| triangles > count) {
      largest = Some((triangles, leaf.center()));
    }
  });

  println!();
  println!("=== Result ===");
  println!("Elapsed:   {:.2}s", elapsed.as_secs_f64());
  println!("Leaves:    {leaves}");
  for (lod, count) in lod_counts.iter().enumerate() {
    if *count > 0 {
      println!("  lod {lod}: {count} chunks");
    }
  }
  println!("Triangles: {}", manager.triangle_count());
  if let Some((count, center)) = largest {
    println!("Largest:   {count} triangles at {center}");
  }

  // Flatten one mesh the way a renderer would.
  let mut flattened = false;
  manager.visit_leaves(|leaf| {
    if !flattened && !leaf.mesh.is_empty() {
      let buffers = MeshBuffers::from_triangles(&leaf.mesh);
      println!(
        "Buffers:   first non-empty chunk has {} vertices / {} indices",
        buffers.positions.len(),
        buffers.indices.len()
      );
      flattened = true;
    }
  });
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
  args
    .iter()
    .position(|a| a == flag)
    .and_then(|i| args.get(i + 1))
    .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
  args
    .iter()
    .position(|a| a == flag)
    .and_then(|i| args.get(i + 1))
    .and_then(|s| s.parse().ok())
}
