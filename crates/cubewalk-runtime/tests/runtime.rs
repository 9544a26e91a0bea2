use cubewalk_blocks::VoxelType;
use cubewalk_chunk::TerrainStrategy;
use cubewalk_mesh_cpu::{ChunkMeshCPU, ChunkMesher, MeshBuilder};
use cubewalk_runtime::{MeshRuntime, RebuildMode, RuntimeConfig};
use cubewalk_world::{ChunkCoord, World, WorldDims};

fn generated_world() -> World {
    let mut w = World::new(WorldDims::cubic([3, 2, 2], 8)).unwrap();
    w.generate(
        0xBEEF,
        &TerrainStrategy::Flat { thickness: 5 },
    );
    // Break up the flat surface so neighbors differ.
    w.set_voxel(3, 4, 3, VoxelType::Air);
    w.set_voxel(8, 5, 8, VoxelType::Planks);
    w.set_voxel(15, 7, 7, VoxelType::Stone);
    w
}

fn runtime(workers: usize) -> MeshRuntime {
    let cfg = RuntimeConfig {
        mode: RebuildMode::Background,
        workers,
    };
    MeshRuntime::new(&cfg, MeshBuilder::default()).unwrap()
}

fn by_coord(world: &World, mut meshes: Vec<ChunkMeshCPU>) -> Vec<ChunkMeshCPU> {
    meshes.sort_by_key(|m| world.chunk_index(m.coord));
    meshes
}

#[test]
fn background_output_matches_sync() {
    let mut sync_world = generated_world();
    let mut bg_world = sync_world.clone();

    let sync = ChunkMesher::default().rebuild_changed(&mut sync_world);

    let mut rt = runtime(3);
    let submitted = rt.schedule_changed(&bg_world);
    assert_eq!(submitted, bg_world.chunk_count());
    let results = rt.wait_all();
    let bg = rt.apply_results(&mut bg_world, results);
    let bg = by_coord(&bg_world, bg);

    assert_eq!(sync.len(), bg.len());
    for (a, b) in sync.iter().zip(bg.iter()) {
        assert_eq!(a.coord, b.coord);
        assert_eq!(a.build, b.build, "chunk {}", a.coord);
    }
    assert_eq!(sync_world.changed_chunks().count(), 0);
    assert_eq!(bg_world.changed_chunks().count(), 0);
    assert_eq!(rt.queued(), 0);
    assert_eq!(rt.inflight(), 0);
    assert_eq!(rt.outstanding(), 0);
}

#[test]
fn unchanged_chunks_are_not_rescheduled() {
    let world = generated_world();
    let mut rt = runtime(2);
    let n = rt.schedule_changed(&world);
    assert!(n > 0);
    assert_eq!(rt.schedule_changed(&world), 0);
    let _ = rt.wait_all();
}

#[test]
fn write_after_snapshot_keeps_chunk_changed() {
    let mut world = generated_world();
    let mut rt = runtime(2);
    rt.schedule_changed(&world);
    let results = rt.wait_all();

    // Interior write in chunk (0,0,0) lands after the snapshot was taken.
    world.set_voxel(2, 6, 2, VoxelType::Sand);
    let meshes = rt.apply_results(&mut world, results);
    assert_eq!(meshes.len(), world.chunk_count());

    let still: Vec<_> = world.changed_chunks().collect();
    assert_eq!(still, vec![ChunkCoord::new(0, 0, 0)]);

    assert_eq!(rt.schedule_changed(&world), 1);
    let results = rt.wait_all();
    let meshes = rt.apply_results(&mut world, results);
    assert_eq!(meshes.len(), 1);
    assert_eq!(world.changed_chunks().count(), 0);
}

#[test]
fn superseded_result_is_dropped() {
    let mut world = generated_world();
    let mut rt = runtime(1);
    let first = rt.schedule_changed(&world);

    world.set_voxel(2, 6, 2, VoxelType::Sand);
    // Only the edited chunk has a newer revision than what is in flight.
    assert_eq!(rt.schedule_changed(&world), 1);

    let results = rt.wait_all();
    assert_eq!(results.len(), first + 1);
    let meshes = rt.apply_results(&mut world, results);
    let edited: Vec<_> = meshes
        .iter()
        .filter(|m| m.coord == ChunkCoord::new(0, 0, 0))
        .collect();
    assert_eq!(edited.len(), 1);
    assert_eq!(world.changed_chunks().count(), 0);

    let fresh = MeshBuilder::default()
        .build(&world, ChunkCoord::new(0, 0, 0))
        .unwrap();
    assert_eq!(edited[0].build, fresh.build);
}

#[test]
fn config_parses_from_toml() {
    let cfg = RuntimeConfig::from_toml_str("mode = \"background\"\nworkers = 3").unwrap();
    assert_eq!(cfg.mode, RebuildMode::Background);
    assert_eq!(cfg.effective_workers(), 3);

    let cfg = RuntimeConfig::from_toml_str("").unwrap();
    assert_eq!(cfg, RuntimeConfig::default());
    assert!(cfg.effective_workers() >= 1);
}
