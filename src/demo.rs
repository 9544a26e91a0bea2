//! Scripted headless session: generate, mesh, then alternate break and place edits.

use std::time::Instant;

use cubewalk_blocks::VoxelType;
use cubewalk_edit::{Edit, break_voxel, place_voxel};
use cubewalk_geom::Vec3;
use cubewalk_mesh_cpu::{ChunkMeshCPU, ChunkMesher, MeshBuilder};
use cubewalk_render::{ChunkRenderSet, HeadlessBackend, UploadStats};
use cubewalk_runtime::{MeshRuntime, PoolError, RebuildMode};
use cubewalk_world::{World, WorldError};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    World(#[from] WorldError),
    #[error("starting mesh workers: {0}")]
    Pool(#[from] PoolError),
}

/// Golden angle, so successive look directions spread evenly around the eye.
const SWEEP_STEP: f32 = 2.399_963;

enum Rebuilder {
    Sync(ChunkMesher),
    Background(MeshRuntime),
}

impl Rebuilder {
    fn rebuild(&mut self, world: &mut World) -> Vec<ChunkMeshCPU> {
        match self {
            Rebuilder::Sync(mesher) => mesher.rebuild_changed(world),
            Rebuilder::Background(rt) => {
                rt.schedule_changed(world);
                let results = rt.wait_all();
                rt.apply_results(world, results)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickStats {
    pub tick: u32,
    pub edit: Option<Edit>,
    pub rebuilt: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DemoSummary {
    pub ticks: u32,
    pub broken: usize,
    pub placed: usize,
    pub chunks_rebuilt: usize,
    pub chunks_drawn: usize,
    pub primitives: usize,
    pub uploads: UploadStats,
}

pub struct Demo {
    world: World,
    rebuilder: Rebuilder,
    backend: HeadlessBackend,
    render: ChunkRenderSet<HeadlessBackend>,
    eye: Vec3,
    reach: f32,
    summary: DemoSummary,
}

impl Demo {
    /// Builds and generates the world, then meshes and uploads every chunk once.
    pub fn new(cfg: &AppConfig) -> Result<Self, DemoError> {
        let mut world = World::new(cfg.world.dims()?)?;
        let t0 = Instant::now();
        world.generate(cfg.world.seed, &cfg.terrain);

        let builder = MeshBuilder::new(cfg.atlas);
        let rebuilder = match cfg.runtime.mode {
            RebuildMode::Sync => Rebuilder::Sync(ChunkMesher::new(builder)),
            RebuildMode::Background => {
                Rebuilder::Background(MeshRuntime::new(&cfg.runtime, builder)?)
            }
        };
        let eye = cfg.demo.eye.map_or_else(
            || {
                Vec3::new(
                    world.width() as f32 * 0.5,
                    world.height() as f32 * 0.9,
                    world.depth() as f32 * 0.5,
                )
            },
            |[x, y, z]| Vec3::new(x, y, z),
        );
        let render = ChunkRenderSet::new(&world);
        let mut demo = Self {
            world,
            rebuilder,
            backend: HeadlessBackend::new(),
            render,
            eye,
            reach: cfg.demo.reach,
            summary: DemoSummary::default(),
        };
        let rebuilt = demo.rebuild_and_upload();
        log::info!(
            "initial mesh: {} chunks, {} primitives in {:.1}ms",
            rebuilt,
            demo.render.primitive_count(),
            t0.elapsed().as_secs_f64() * 1000.0
        );
        Ok(demo)
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn render_set(&self) -> &ChunkRenderSet<HeadlessBackend> {
        &self.render
    }

    #[inline]
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    fn rebuild_and_upload(&mut self) -> usize {
        let meshes = self.rebuilder.rebuild(&mut self.world);
        let n = self.render.apply_all(&mut self.backend, &meshes);
        self.summary.chunks_rebuilt += n;
        n
    }

    /// Look direction for `tick`: a downward cone swept by the golden angle.
    pub fn look_dir(tick: u32) -> Vec3 {
        let a = tick as f32 * SWEEP_STEP;
        Vec3::new(a.cos(), -1.0, a.sin()).normalized()
    }

    /// Even ticks break the voxel under the cursor, odd ticks place one in front of it.
    pub fn tick(&mut self, tick: u32) -> TickStats {
        let dir = Self::look_dir(tick);
        let edit = if tick % 2 == 0 {
            let e = break_voxel(&mut self.world, self.eye, dir, self.reach);
            self.summary.broken += usize::from(e.is_some());
            e
        } else {
            let solids = VoxelType::SOLIDS;
            let voxel = solids[(tick as usize / 2) % solids.len()];
            let e = place_voxel(&mut self.world, self.eye, dir, self.reach, voxel);
            self.summary.placed += usize::from(e.is_some());
            e
        };
        let rebuilt = self.rebuild_and_upload();
        self.summary.ticks += 1;
        match edit {
            Some(e) => log::info!(
                "tick {tick}: {} -> {} at {:?}, rebuilt {rebuilt} chunks",
                e.previous,
                e.placed,
                e.pos
            ),
            None => log::info!("tick {tick}: nothing in reach"),
        }
        TickStats {
            tick,
            edit,
            rebuilt,
        }
    }

    pub fn summary(&self) -> DemoSummary {
        DemoSummary {
            chunks_drawn: self.render.draw_list().count(),
            primitives: self.render.primitive_count(),
            uploads: self.backend.stats(),
            ..self.summary
        }
    }
}

/// Runs `cfg.demo.ticks` scripted ticks and returns the final statistics.
pub fn run(cfg: &AppConfig) -> Result<DemoSummary, DemoError> {
    let mut demo = Demo::new(cfg)?;
    for tick in 0..cfg.demo.ticks {
        demo.tick(tick);
    }
    let summary = demo.summary();
    log::info!(
        "done: {} ticks, {} broken, {} placed, {} chunk rebuilds, {} chunks drawn, {} primitives, {} bytes uploaded",
        summary.ticks,
        summary.broken,
        summary.placed,
        summary.chunks_rebuilt,
        summary.chunks_drawn,
        summary.primitives,
        summary.uploads.bytes_uploaded
    );
    Ok(summary)
}
