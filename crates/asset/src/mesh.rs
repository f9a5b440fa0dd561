//! CPU-side mesh representation produced by loaders.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use corelib::{Aabb, Vec3};

use crate::normalize::normalize_vertices;

/// Vertex with position/uv. Positions are in object space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }

    #[inline]
    pub fn position_vec(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Non-indexed triangle list: every three consecutive vertices form a triangle.
///
/// Immutable once built. Share it between several owners with
/// [`Mesh::into_shared`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<MeshVertex>,
}

/// Read-only handle for a mesh used by several scene objects.
pub type SharedMesh = Arc<Mesh>;

impl Mesh {
    /// Wraps a triangle list. Returns `None` if the length is not a multiple of 3.
    pub fn from_triangle_list(vertices: Vec<MeshVertex>) -> Option<Self> {
        (vertices.len() % 3 == 0).then_some(Self { vertices })
    }

    /// For loaders that only ever append whole triangles.
    pub(crate) fn from_triangulated(vertices: Vec<MeshVertex>) -> Self {
        debug_assert!(
            vertices.len() % 3 == 0,
            "triangle list has {} vertices",
            vertices.len()
        );
        Self { vertices }
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Iterates triangles in emission order.
    pub fn triangles(&self) -> impl Iterator<Item = &[MeshVertex; 3]> {
        self.vertices
            .chunks_exact(3)
            .filter_map(|tri| <&[MeshVertex; 3]>::try_from(tri).ok())
    }

    /// Bounding box of all positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(MeshVertex::position_vec))
    }

    /// Tightly packed vertex data (`[x, y, z, u, v]` per vertex) for buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Recenters at the origin and scales the longest side to 2 units.
    /// Empty and zero-extent meshes come back unchanged.
    pub fn normalized(mut self) -> Self {
        normalize_vertices(&mut self.vertices);
        self
    }

    pub fn into_shared(self) -> SharedMesh {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(z: f32) -> Vec<MeshVertex> {
        vec![
            MeshVertex::new([0.0, 0.0, z], [0.0, 0.0]),
            MeshVertex::new([1.0, 0.0, z], [1.0, 0.0]),
            MeshVertex::new([0.0, 1.0, z], [0.0, 1.0]),
        ]
    }

    #[test]
    fn rejects_partial_triangles() {
        let mut verts = tri(0.0);
        verts.pop();
        assert!(Mesh::from_triangle_list(verts).is_none());
        assert!(Mesh::from_triangle_list(Vec::new()).is_some());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "triangle list has 2 vertices")]
    fn loader_constructor_catches_partial_triangles() {
        let mut verts = tri(0.0);
        verts.pop();
        Mesh::from_triangulated(verts);
    }

    #[test]
    fn triangle_iteration_and_counts() {
        let mut verts = tri(0.0);
        verts.extend(tri(1.0));
        let mesh = Mesh::from_triangle_list(verts).expect("two triangles");
        assert_eq!(mesh.len(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        let zs: Vec<f32> = mesh.triangles().map(|t| t[0].position[2]).collect();
        assert_eq!(zs, vec![0.0, 1.0]);
    }

    #[test]
    fn byte_view_is_packed() {
        let mesh = Mesh::from_triangle_list(tri(0.0)).expect("triangle");
        assert_eq!(std::mem::size_of::<MeshVertex>(), 5 * 4);
        assert_eq!(mesh.as_bytes().len(), 3 * 5 * 4);
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        let mesh = Mesh::default();
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_none());
        assert_eq!(mesh.clone().normalized(), mesh);
    }

    #[test]
    fn shared_mesh_is_readable_from_threads() {
        let shared = Mesh::from_triangle_list(tri(2.0)).expect("triangle").into_shared();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mesh = SharedMesh::clone(&shared);
                std::thread::spawn(move || mesh.triangle_count())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().expect("thread"), 1);
        }
    }
}
