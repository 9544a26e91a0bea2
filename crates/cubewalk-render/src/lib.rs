//! Renderer boundary: per-chunk GPU buffers fed from CPU meshes.
#![forbid(unsafe_code)]

pub mod headless;

use cubewalk_geom::Aabb;
use cubewalk_mesh_cpu::{ChunkMeshCPU, MeshBuild, Vertex};
use cubewalk_world::{ChunkCoord, World};

pub use headless::{HeadlessBackend, HeadlessBuffer, UploadStats};

/// What the renderer has to provide to receive chunk meshes.
///
/// Buffers are created with a fixed element capacity; uploads never exceed it.
pub trait GpuBackend {
    type VertexBuffer;
    type IndexBuffer;

    fn create_vertex_buffer(&mut self, capacity: usize) -> Self::VertexBuffer;
    fn create_index_buffer(&mut self, capacity: usize) -> Self::IndexBuffer;
    fn upload_vertices(&mut self, buf: &mut Self::VertexBuffer, data: &[Vertex]);
    fn upload_indices(&mut self, buf: &mut Self::IndexBuffer, data: &[u32]);
}

/// GPU-side state of one chunk.
pub struct ChunkRenderSlot<B: GpuBackend> {
    coord: ChunkCoord,
    bbox: Option<Aabb>,
    vb: Option<B::VertexBuffer>,
    ib: Option<B::IndexBuffer>,
    vertex_capacity: usize,
    index_capacity: usize,
    primitive_count: usize,
}

impl<B: GpuBackend> ChunkRenderSlot<B> {
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            bbox: None,
            vb: None,
            ib: None,
            vertex_capacity: 0,
            index_capacity: 0,
            primitive_count: 0,
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn bbox(&self) -> Option<Aabb> {
        self.bbox
    }

    #[inline]
    pub fn primitive_count(&self) -> usize {
        self.primitive_count
    }

    #[inline]
    pub fn vertex_capacity(&self) -> usize {
        self.vertex_capacity
    }

    #[inline]
    pub fn index_capacity(&self) -> usize {
        self.index_capacity
    }

    /// Buffers to draw, if this chunk has anything to draw.
    pub fn buffers(&self) -> Option<(&B::VertexBuffer, &B::IndexBuffer)> {
        if self.primitive_count == 0 {
            return None;
        }
        match (&self.vb, &self.ib) {
            (Some(vb), Some(ib)) => Some((vb, ib)),
            _ => None,
        }
    }

    /// Uploads `build`, reallocating a buffer only when its capacity is too small.
    pub fn apply(&mut self, backend: &mut B, build: &MeshBuild) {
        let nv = build.vertices.len();
        let ni = build.indices.len();

        if nv > self.vertex_capacity {
            self.vb = Some(backend.create_vertex_buffer(nv));
            self.vertex_capacity = nv;
        }
        if ni > self.index_capacity {
            self.ib = Some(backend.create_index_buffer(ni));
            self.index_capacity = ni;
        }
        if nv > 0 {
            if let Some(vb) = self.vb.as_mut() {
                backend.upload_vertices(vb, &build.vertices);
            }
        }
        if ni > 0 {
            if let Some(ib) = self.ib.as_mut() {
                backend.upload_indices(ib, &build.indices);
            }
        }
        self.primitive_count = ni / 3;
    }
}

/// One render slot per chunk, kept in world grid order.
pub struct ChunkRenderSet<B: GpuBackend> {
    chunks: [usize; 3],
    slots: Vec<ChunkRenderSlot<B>>,
}

impl<B: GpuBackend> ChunkRenderSet<B> {
    pub fn new(world: &World) -> Self {
        let slots = world.chunk_coords().map(ChunkRenderSlot::new).collect();
        Self {
            chunks: world.dims().chunks,
            slots,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn index(&self, coord: ChunkCoord) -> Option<usize> {
        let [nx, ny, nz] = self.chunks;
        let cx = usize::try_from(coord.cx).ok().filter(|&c| c < nx)?;
        let cy = usize::try_from(coord.cy).ok().filter(|&c| c < ny)?;
        let cz = usize::try_from(coord.cz).ok().filter(|&c| c < nz)?;
        Some(cx + cy * nx + cz * nx * ny)
    }

    pub fn slot(&self, coord: ChunkCoord) -> Option<&ChunkRenderSlot<B>> {
        self.index(coord).map(|i| &self.slots[i])
    }

    /// Hands one finished mesh to its chunk's slot. Meshes for chunks outside the set are
    /// ignored.
    pub fn apply(&mut self, backend: &mut B, mesh: &ChunkMeshCPU) -> bool {
        let Some(i) = self.index(mesh.coord) else {
            log::warn!("no render slot for chunk {}", mesh.coord);
            return false;
        };
        let slot = &mut self.slots[i];
        slot.apply(backend, &mesh.build);
        slot.bbox = Some(mesh.bbox);
        true
    }

    /// Applies every mesh in order and returns how many landed in a slot.
    pub fn apply_all<'a, I>(&mut self, backend: &mut B, meshes: I) -> usize
    where
        I: IntoIterator<Item = &'a ChunkMeshCPU>,
    {
        meshes
            .into_iter()
            .filter(|m| self.apply(backend, m))
            .count()
    }

    /// Chunks to draw in grid order, skipping those with nothing to draw.
    pub fn draw_list(
        &self,
    ) -> impl Iterator<Item = (ChunkCoord, &B::VertexBuffer, &B::IndexBuffer, usize)> {
        self.slots.iter().filter_map(|s| {
            s.buffers()
                .map(|(vb, ib)| (s.coord, vb, ib, s.primitive_count))
        })
    }

    /// Sum of primitives over all slots.
    pub fn primitive_count(&self) -> usize {
        self.slots.iter().map(|s| s.primitive_count).sum()
    }
}
