//! Triangle mesh type produced by the surface extractors, vertex welding and STL export

use crate::aabb::Aabb3;
use crate::{FxMap, VoxcutError};
use nalgebra::Vector3;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Quantization cell size for welding vertices by geometric equality, in world units
pub const VERTEX_WELD_EPSILON: f32 = 1e-3;

/// An indexed triangle mesh with per-vertex normals.
///
/// A pure value type: parallel arrays of vertex positions, unit vertex normals and
/// triangle index triples. Once produced it carries no references back to the volume
/// or SDF it was extracted from.
#[derive(Clone, Debug, Default)]
pub struct TriangleMesh3d {
    /// Vertex positions in world units
    pub vertices: Vec<Vector3<f32>>,
    /// Per-vertex normals, unit length
    pub normals: Vec<Vector3<f32>>,
    /// Triangles as triples of indices into the vertex array
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh3d {
    /// Returns the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns whether the mesh contains no triangles
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Removes all vertices and triangles
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.normals.clear();
        self.triangles.clear();
    }

    /// Returns the bounding box of all vertices, `None` for an empty mesh
    pub fn bounding_box(&self) -> Option<Aabb3> {
        Aabb3::from_points(&self.vertices)
    }

    /// Appends all triangles of the other mesh, offsetting its indices.
    ///
    /// Vertices are copied as-is without welding; use a [`VertexWelder`] to merge
    /// coincident vertices across meshes.
    pub fn append(&mut self, other: &TriangleMesh3d) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
        );
    }

    /// Returns the geometric normal of the given triangle (not normalized)
    pub fn face_normal(&self, triangle: &[u32; 3]) -> Vector3<f32> {
        let v0 = &self.vertices[triangle[0] as usize];
        let v1 = &self.vertices[triangle[1] as usize];
        let v2 = &self.vertices[triangle[2] as usize];
        (v1 - v0).cross(&(v2 - v0))
    }

    /// Computes the volume enclosed by the mesh via the divergence theorem.
    ///
    /// Sums the signed volumes of the tetrahedra spanned by each triangle and the
    /// origin. The result is exact for closed meshes with consistent outward
    /// winding; the absolute value is returned so that globally inverted winding
    /// does not flip the sign.
    pub fn enclosed_volume(&self) -> f32 {
        let signed: f32 = self
            .triangles
            .iter()
            .map(|t| {
                let v0 = &self.vertices[t[0] as usize];
                let v1 = &self.vertices[t[1] as usize];
                let v2 = &self.vertices[t[2] as usize];
                v0.dot(&v1.cross(v2)) / 6.0
            })
            .sum();
        signed.abs()
    }
}

/// Builds a mesh incrementally while welding vertices by geometric equality.
///
/// Vertices are merged when they fall into the same quantization cell of side
/// length [`VERTEX_WELD_EPSILON`]; normals contributed for merged vertices are
/// accumulated and normalized once the mesh is finished.
pub struct VertexWelder {
    cell_map: FxMap<[i64; 3], u32>,
    vertices: Vec<Vector3<f32>>,
    normal_sums: Vec<Vector3<f32>>,
    triangles: Vec<[u32; 3]>,
    epsilon: f32,
}

impl Default for VertexWelder {
    fn default() -> Self {
        Self::new(VERTEX_WELD_EPSILON)
    }
}

impl VertexWelder {
    /// Constructs an empty welder with the given quantization cell size
    pub fn new(epsilon: f32) -> Self {
        Self {
            cell_map: FxMap::default(),
            vertices: Vec::new(),
            normal_sums: Vec::new(),
            triangles: Vec::new(),
            epsilon,
        }
    }

    fn quantize(&self, p: &Vector3<f32>) -> [i64; 3] {
        [
            (p.x / self.epsilon).floor() as i64,
            (p.y / self.epsilon).floor() as i64,
            (p.z / self.epsilon).floor() as i64,
        ]
    }

    /// Inserts a vertex with a normal contribution, returns its (possibly shared) index
    pub fn add_vertex(&mut self, position: &Vector3<f32>, normal: &Vector3<f32>) -> u32 {
        let key = self.quantize(position);
        if let Some(&index) = self.cell_map.get(&key) {
            self.normal_sums[index as usize] += normal;
            index
        } else {
            let index = self.vertices.len() as u32;
            self.vertices.push(*position);
            self.normal_sums.push(*normal);
            self.cell_map.insert(key, index);
            index
        }
    }

    /// Inserts a triangle given by three positions and per-vertex normal contributions
    pub fn add_triangle(&mut self, positions: &[Vector3<f32>; 3], normals: &[Vector3<f32>; 3]) {
        let i0 = self.add_vertex(&positions[0], &normals[0]);
        let i1 = self.add_vertex(&positions[1], &normals[1]);
        let i2 = self.add_vertex(&positions[2], &normals[2]);
        // Welding can collapse degenerate triangles onto fewer than three vertices
        if i0 != i1 && i1 != i2 && i0 != i2 {
            self.triangles.push([i0, i1, i2]);
        }
    }

    /// Returns the number of welded vertices inserted so far
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Finishes the mesh, normalizing all accumulated vertex normals
    pub fn into_mesh(self) -> TriangleMesh3d {
        let normals = self
            .normal_sums
            .into_iter()
            .map(|n| {
                let norm = n.norm();
                if norm > 1e-12 {
                    n / norm
                } else {
                    Vector3::new(0.0, 1.0, 0.0)
                }
            })
            .collect();
        TriangleMesh3d {
            vertices: self.vertices,
            normals,
            triangles: self.triangles,
        }
    }
}

/// Writes the mesh in binary STL format: an 80 byte header, a `u32` little-endian
/// triangle count, then one 50 byte record per triangle (normal, three vertices,
/// `u16` attribute count of zero).
pub fn write_binary_stl<W: Write>(mesh: &TriangleMesh3d, writer: &mut W) -> io::Result<()> {
    let mut header = [0u8; 80];
    let tag = b"voxcut binary STL";
    header[..tag.len()].copy_from_slice(tag);
    writer.write_all(&header)?;
    writer.write_all(&(mesh.triangle_count() as u32).to_le_bytes())?;

    for triangle in &mesh.triangles {
        let n = mesh.face_normal(triangle);
        let norm = n.norm();
        let n = if norm > 1e-12 { n / norm } else { n };

        for c in [n.x, n.y, n.z] {
            writer.write_all(&c.to_le_bytes())?;
        }
        for &vi in triangle {
            let v = &mesh.vertices[vi as usize];
            for c in [v.x, v.y, v.z] {
                writer.write_all(&c.to_le_bytes())?;
            }
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }
    Ok(())
}

/// Writes the mesh as binary STL to a new file at the given path
pub fn save_binary_stl(mesh: &TriangleMesh3d, path: impl AsRef<Path>) -> Result<(), VoxcutError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_binary_stl(mesh, &mut writer)?;
    Ok(())
}
