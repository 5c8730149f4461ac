//! Thread-local buffers used by the parallel surface extractors

use crate::mesh::{TriangleMesh3d, VertexWelder};
use std::cell::RefCell;
use thread_local::ThreadLocal;

/// Collection of the thread local buffers filled by a parallel surface extraction.
///
/// Each worker thread welds vertices into its own [`VertexWelder`]; after the
/// parallel region ends the per-thread meshes are merged single-threaded into the
/// final output, welding duplicates along the seams between threads.
#[derive(Default)]
pub(crate) struct ExtractionWorkspace {
    local_buffers: ThreadLocal<RefCell<VertexWelder>>,
}

impl ExtractionWorkspace {
    /// Returns the buffer of the calling thread, creating it on first use
    pub(crate) fn get_local(&self) -> &RefCell<VertexWelder> {
        self.local_buffers.get_or_default()
    }

    /// Merges all thread local meshes into one, welding across thread boundaries
    pub(crate) fn into_merged_mesh(self) -> TriangleMesh3d {
        let local_meshes: Vec<TriangleMesh3d> = self
            .local_buffers
            .into_iter()
            .map(|cell| cell.into_inner().into_mesh())
            .collect();

        if local_meshes.len() == 1 {
            return local_meshes.into_iter().next().expect("one local mesh");
        }

        let mut global = VertexWelder::default();
        for mesh in &local_meshes {
            for triangle in &mesh.triangles {
                let positions = [
                    mesh.vertices[triangle[0] as usize],
                    mesh.vertices[triangle[1] as usize],
                    mesh.vertices[triangle[2] as usize],
                ];
                let normals = [
                    mesh.normals[triangle[0] as usize],
                    mesh.normals[triangle[1] as usize],
                    mesh.normals[triangle[2] as usize],
                ];
                global.add_triangle(&positions, &normals);
            }
        }
        global.into_mesh()
    }
}
