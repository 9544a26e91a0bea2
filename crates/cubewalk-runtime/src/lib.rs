//! Background chunk mesh rebuilds over world snapshots.
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, unbounded};
use cubewalk_mesh_cpu::{ChunkMeshCPU, MeshBuilder};
use cubewalk_world::{ChunkCoord, World};
use hashbrown::HashMap;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Deserialize;

pub use rayon::ThreadPoolBuildError as PoolError;

/// How changed chunks get rebuilt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebuildMode {
    /// Rebuild on the caller's thread right after edits.
    #[default]
    Sync,
    /// Rebuild on a worker pool from world snapshots.
    Background,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub mode: RebuildMode,
    /// Worker threads; 0 picks the available parallelism.
    #[serde(default)]
    pub workers: usize,
}

impl RuntimeConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn effective_workers(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }
}

#[derive(Clone, Debug)]
pub struct BuildJob {
    pub coord: ChunkCoord,
    /// Chunk revision in `world` when the job was scheduled.
    pub revision: u64,
    pub job_id: u64,
    pub world: Arc<World>,
}

#[derive(Debug)]
pub struct JobOut {
    pub coord: ChunkCoord,
    pub revision: u64,
    pub job_id: u64,
    pub mesh: Option<ChunkMeshCPU>,
    pub t_mesh_ms: u32,
}

fn process_build_job(job: BuildJob, builder: &MeshBuilder) -> JobOut {
    let BuildJob {
        coord,
        revision,
        job_id,
        world,
    } = job;
    let t0 = Instant::now();
    let mesh = builder.build(world.as_ref(), coord);
    let t_mesh_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    JobOut {
        coord,
        revision,
        job_id,
        mesh,
        t_mesh_ms,
    }
}

/// Schedules rebuilds of changed chunks on a rayon pool and hands finished meshes back.
///
/// Every job carries an `Arc<World>` snapshot, so workers never read voxels that are being
/// written. A chunk's dirty flag is cleared only when the result for its current revision is
/// applied; results for superseded revisions are dropped.
pub struct MeshRuntime {
    job_tx: Sender<BuildJob>,
    res_rx: Receiver<JobOut>,
    _pool: Arc<ThreadPool>,
    queued: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    workers: usize,
    next_job_id: u64,
    /// Newest revision submitted per chunk and not yet applied.
    pending: HashMap<ChunkCoord, u64>,
    /// Jobs sent whose results have not been drained yet.
    outstanding: usize,
}

impl MeshRuntime {
    pub fn new(config: &RuntimeConfig, builder: MeshBuilder) -> Result<Self, PoolError> {
        let (job_tx, job_rx) = unbounded::<BuildJob>();
        let (res_tx, res_rx) = unbounded::<JobOut>();
        let workers = config.effective_workers();
        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("cubewalk-mesh-{i}"))
                .build()?,
        );
        let queued = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));

        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = res_tx.clone();
            let queued = queued.clone();
            let inflight = inflight.clone();
            pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    queued.fetch_sub(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::Relaxed);
                    let out = process_build_job(job, &builder);
                    inflight.fetch_sub(1, Ordering::Relaxed);
                    if tx.send(out).is_err() {
                        break;
                    }
                }
            });
        }
        log::info!("mesh runtime started with {workers} workers");

        Ok(Self {
            job_tx,
            res_rx,
            _pool: pool,
            queued,
            inflight,
            workers,
            next_job_id: 0,
            pending: HashMap::new(),
            outstanding: 0,
        })
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Jobs waiting for a worker.
    #[inline]
    pub fn queued(&self) -> usize {
        self.queued.load(Ordering::Relaxed)
    }

    /// Jobs a worker is currently meshing.
    #[inline]
    pub fn inflight(&self) -> usize {
        self.inflight.load(Ordering::Relaxed)
    }

    /// Jobs submitted whose results have not been drained.
    #[inline]
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Submits one job per changed chunk not already in flight at its current revision.
    /// All jobs of one call share a single snapshot. Returns the number submitted.
    pub fn schedule_changed(&mut self, world: &World) -> usize {
        let todo: Vec<(ChunkCoord, u64)> = world
            .changed_chunks()
            .filter_map(|c| world.chunk_at(c).map(|g| (c, g.revision())))
            .filter(|(c, rev)| self.pending.get(c) != Some(rev))
            .collect();
        if todo.is_empty() {
            return 0;
        }
        let snapshot = Arc::new(world.clone());
        let mut submitted = 0;
        for (coord, revision) in todo {
            let job = BuildJob {
                coord,
                revision,
                job_id: self.next_job_id,
                world: Arc::clone(&snapshot),
            };
            self.queued.fetch_add(1, Ordering::Relaxed);
            if self.job_tx.send(job).is_err() {
                self.queued.fetch_sub(1, Ordering::Relaxed);
                log::warn!("mesh job channel closed; chunk {coord} not scheduled");
                continue;
            }
            self.next_job_id += 1;
            self.outstanding += 1;
            self.pending.insert(coord, revision);
            submitted += 1;
        }
        log::debug!("scheduled {submitted} mesh jobs");
        submitted
    }

    /// Results finished so far, without blocking.
    pub fn drain_worker_results(&mut self) -> Vec<JobOut> {
        let out: Vec<JobOut> = self.res_rx.try_iter().collect();
        self.outstanding = self.outstanding.saturating_sub(out.len());
        out
    }

    /// Blocks until every submitted job has reported back.
    pub fn wait_all(&mut self) -> Vec<JobOut> {
        let mut out = Vec::with_capacity(self.outstanding);
        while self.outstanding > 0 {
            match self.res_rx.recv() {
                Ok(r) => {
                    out.push(r);
                    self.outstanding -= 1;
                }
                Err(_) => break,
            }
        }
        out
    }

    /// Acknowledges each current result against `world` and returns the meshes to hand off.
    ///
    /// A result for a revision that has since been rescheduled is dropped. A result whose chunk
    /// was written after scheduling is still handed off, but the chunk stays changed and is
    /// picked up by the next [`MeshRuntime::schedule_changed`].
    pub fn apply_results(&mut self, world: &mut World, results: Vec<JobOut>) -> Vec<ChunkMeshCPU> {
        let mut meshes = Vec::with_capacity(results.len());
        for r in results {
            if self.pending.get(&r.coord) != Some(&r.revision) {
                log::warn!(
                    "dropping stale mesh for chunk {} rev {} (job {})",
                    r.coord,
                    r.revision,
                    r.job_id
                );
                continue;
            }
            self.pending.remove(&r.coord);
            let cleared = world.acknowledge(r.coord, r.revision);
            log::debug!(
                "chunk {} rev {} meshed in {}ms (cleared={})",
                r.coord,
                r.revision,
                r.t_mesh_ms,
                cleared
            );
            if let Some(mesh) = r.mesh {
                meshes.push(mesh);
            }
        }
        meshes
    }
}
