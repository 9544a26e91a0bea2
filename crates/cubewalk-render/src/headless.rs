use std::mem::size_of_val;

use cubewalk_mesh_cpu::Vertex;

use crate::GpuBackend;

/// CPU copy of a buffer the headless backend handed out.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessBuffer<T> {
    pub id: u32,
    pub capacity: usize,
    /// Contents of the last upload.
    pub data: Vec<T>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UploadStats {
    pub vertex_allocs: usize,
    pub index_allocs: usize,
    pub vertex_uploads: usize,
    pub index_uploads: usize,
    pub bytes_uploaded: usize,
}

/// Backend without a device. Keeps uploads in memory and counts what happened.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_id: u32,
    stats: UploadStats,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn stats(&self) -> UploadStats {
        self.stats
    }

    fn alloc<T>(&mut self, capacity: usize) -> HeadlessBuffer<T> {
        let id = self.next_id;
        self.next_id += 1;
        HeadlessBuffer {
            id,
            capacity,
            data: Vec::with_capacity(capacity),
        }
    }

    fn write<T: Copy>(buf: &mut HeadlessBuffer<T>, data: &[T]) -> usize {
        debug_assert!(data.len() <= buf.capacity, "upload exceeds buffer capacity");
        buf.data.clear();
        buf.data.extend_from_slice(data);
        size_of_val(data)
    }
}

impl GpuBackend for HeadlessBackend {
    type VertexBuffer = HeadlessBuffer<Vertex>;
    type IndexBuffer = HeadlessBuffer<u32>;

    fn create_vertex_buffer(&mut self, capacity: usize) -> Self::VertexBuffer {
        self.stats.vertex_allocs += 1;
        self.alloc(capacity)
    }

    fn create_index_buffer(&mut self, capacity: usize) -> Self::IndexBuffer {
        self.stats.index_allocs += 1;
        self.alloc(capacity)
    }

    fn upload_vertices(&mut self, buf: &mut Self::VertexBuffer, data: &[Vertex]) {
        self.stats.vertex_uploads += 1;
        self.stats.bytes_uploaded += Self::write(buf, data);
    }

    fn upload_indices(&mut self, buf: &mut Self::IndexBuffer, data: &[u32]) {
        self.stats.index_uploads += 1;
        self.stats.bytes_uploaded += Self::write(buf, data);
    }
}
