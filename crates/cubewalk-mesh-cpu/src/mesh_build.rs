/// Upload-ready vertex: world position, RGBA color, atlas UV.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub color: [u8; 4],
    pub uv: [f32; 2],
}

/// Triangle-list geometry for one chunk. Rebuilt wholesale, never patched.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshBuild {
    /// Clears both arrays but retains capacity for reuse across rebuilds.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Pre-reserve capacity for `n_quads` more quads.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.vertices.reserve(n_quads * 4);
        self.indices.reserve(n_quads * 6);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Triangles in the index list.
    #[inline]
    pub fn primitive_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends four vertices and six indices from `winding`, offset to the new vertices.
    pub fn push_quad(&mut self, quad: [Vertex; 4], winding: &[u32; 6]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&quad);
        self.indices.extend(winding.iter().map(|i| base + i));
    }

    /// Raw vertex bytes for upload.
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        let mut m = MeshBuild::default();
        m.push_quad([Vertex::default(); 4], &[0, 1, 2, 0, 2, 3]);
        assert_eq!(m.vertex_bytes().len(), 4 * 24);
    }

    #[test]
    fn push_quad_offsets_indices() {
        let mut m = MeshBuild::default();
        m.push_quad([Vertex::default(); 4], &[0, 2, 1, 0, 3, 2]);
        m.push_quad([Vertex::default(); 4], &[0, 1, 2, 0, 2, 3]);
        assert_eq!(m.indices, vec![0, 2, 1, 0, 3, 2, 4, 5, 6, 4, 6, 7]);
        assert_eq!(m.quad_count(), 2);
        assert_eq!(m.primitive_count(), 4);

        let cap = m.vertices.capacity();
        m.clear_keep_capacity();
        assert!(m.is_empty());
        assert_eq!(m.vertices.capacity(), cap);
    }
}
