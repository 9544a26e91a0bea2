use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

use cubewalk_chunk::{TerrainParams, TerrainStrategy};
use cubewalk_mesh_cpu::{MeshBuild, MeshBuilder};
use cubewalk_world::{ChunkCoord, World, WorldDims};

fn bench_mesh_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_flat");
    let mut world = World::new(WorldDims::cubic([1, 2, 1], 32)).unwrap();
    world.generate(0xC0FFEE, &TerrainStrategy::Flat { thickness: 32 });
    let builder = MeshBuilder::default();
    group.bench_function("flat_32x64x32", |b| {
        b.iter(|| {
            let out = builder.build(&world, ChunkCoord::new(0, 0, 0));
            black_box(out);
        })
    });
    group.finish();
}

fn bench_mesh_layered(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_layered");
    group.measurement_time(Duration::from_secs(8));
    let mut world = World::new(WorldDims::cubic([3, 2, 3], 32)).unwrap();
    let strategy = TerrainStrategy::Layered(TerrainParams {
        base_height: 32,
        amplitude: 12.0,
        ..TerrainParams::default()
    });
    world.generate(1337, &strategy);
    let builder = MeshBuilder::default();
    let mut scratch = MeshBuild::default();
    group.bench_function("layered_center_chunk_reuse", |b| {
        b.iter(|| {
            builder.build_into(&mut scratch, &world, ChunkCoord::new(1, 1, 1));
            black_box(scratch.indices.len());
        })
    });
    group.finish();
}

fn bench_mesh_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_random");
    let mut world = World::new(WorldDims::cubic([1, 1, 1], 32)).unwrap();
    world.generate(7, &TerrainStrategy::Random);
    let builder = MeshBuilder::default();
    group.bench_function("random_32", |b| {
        b.iter(|| {
            let out = builder.build(&world, ChunkCoord::new(0, 0, 0));
            black_box(out);
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_mesh_flat,
    bench_mesh_layered,
    bench_mesh_random
);
criterion_main!(benches);
