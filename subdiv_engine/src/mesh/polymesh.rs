// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::Range;

use crate::prelude::*;

/// Canonical edge keys and the edge -> incident faces map shared by both
/// subdivision schemes.
pub mod edge_index;
pub use edge_index::*;

/// Loop refinement of triangle meshes
pub mod loop_subdivision;

/// Catmull-Clark refinement of general polygon meshes
pub mod catmull_clark;

/// Vertex averaging passes that follow a refinement step
pub mod averaging;

/// Primitive shapes, like cubes or tetrahedra
pub mod primitives;

/// Generate vertex and index buffers suitable to be uploaded to the GPU for rendering
pub mod gpu_buffer_generation;
pub use gpu_buffer_generation::*;

/// Import / Export of meshes as RON files
pub mod serialization;
pub use serialization::*;

/// A polygon, as an ordered list of vertex indices. The order defines the
/// winding: `face[i] -> face[i + 1]` is a directed edge, wrapping around.
pub type Face = SVec<u32>;

/// Which subdivision scheme applies to a mesh. Computed once when the mesh is
/// built and never updated afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Topology {
    /// Every face has exactly three vertices. Refined with Loop subdivision.
    Triangular,
    /// At least one face is not a triangle. Refined with Catmull-Clark.
    Polygonal,
}

impl Topology {
    pub fn detect<P: AsRef<[u32]>>(faces: &[P]) -> Self {
        if faces.iter().all(|f| f.as_ref().len() == 3) {
            Topology::Triangular
        } else {
            Topology::Polygonal
        }
    }
}

/// A polygon mesh stored as a vertex array plus a list of faces indexing into
/// it. A vertex's position in the array is its identity.
///
/// Meshes are immutable once built. Every operation that changes geometry or
/// topology returns a fresh `Mesh`, with its own freshly detected
/// [`Topology`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    topology: Topology,
}

impl Mesh {
    /// Builds a mesh by copying the given positions and polygons. Does not
    /// validate the polygons, see [`Mesh::try_build_from_polygons`] for a
    /// checked version.
    pub fn build_from_polygons<P: AsRef<[u32]>>(positions: &[Vec3], polygons: &[P]) -> Self {
        let faces = polygons
            .iter()
            .map(|polygon| polygon.as_ref().iter_cpy().collect_svec())
            .collect();
        Self::from_parts(positions.to_vec(), faces)
    }

    /// Same as [`Mesh::build_from_polygons`], but returns an error when a
    /// polygon has less than three vertices or references a vertex that does
    /// not exist.
    pub fn try_build_from_polygons<P: AsRef<[u32]>>(
        positions: &[Vec3],
        polygons: &[P],
    ) -> Result<Self> {
        validate_polygons(positions.len(), polygons)?;
        Ok(Self::build_from_polygons(positions, polygons))
    }

    pub(crate) fn from_parts(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        let topology = Topology::detect(&faces);
        Mesh {
            vertices,
            faces,
            topology,
        }
    }

    /// Consumes the mesh, returning its vertex and face arrays.
    pub fn into_parts(self) -> (Vec<Vec3>, Vec<Face>) {
        (self.vertices, self.faces)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn is_triangular(&self) -> bool {
        self.topology == Topology::Triangular
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Returns the unweighted average of the positions of the given face's
    /// vertices.
    pub fn face_centroid(&self, face: usize) -> Vec3 {
        average(self.faces[face].iter_cpy().map(|v| self.vertices[v as usize]))
    }

    /// Returns the centroid of every face, in face order.
    pub fn face_centroids(&self) -> Vec<Vec3> {
        (0..self.faces.len())
            .map(|f| self.face_centroid(f))
            .collect()
    }

    pub fn counts(&self) -> MeshCounts {
        MeshCounts {
            num_vertices: self.vertices.len(),
            num_halfedges: self.faces.iter().map(|f| f.len()).sum(),
            num_edges: EdgeIndex::build(&self.faces).len(),
            num_faces: self.faces.len(),
        }
    }

    /// Runs one iteration of subdivision. Triangle meshes are refined with
    /// Loop subdivision, any other mesh with Catmull-Clark.
    ///
    /// Original vertices keep their positions, see
    /// [`Mesh::subdivide_with_averaging`] for the smoothed variant.
    #[profiling::function]
    pub fn subdivide(&self) -> Mesh {
        match self.topology {
            Topology::Triangular => loop_subdivision::subdivide(self),
            Topology::Polygonal => catmull_clark::subdivide(self),
        }
    }

    /// Runs one iteration of subdivision, then moves the original vertices
    /// towards their limit position. The averaging rules are picked from
    /// this mesh's topology, and computed over this mesh's faces.
    #[profiling::function]
    pub fn subdivide_with_averaging(&self) -> Mesh {
        let refined = self.subdivide();
        match self.topology {
            Topology::Triangular => averaging::loop_averaging(self, refined),
            Topology::Polygonal => averaging::catmull_clark_averaging(self, refined),
        }
    }

    /// Applies `iterations` levels of subdivision in sequence. When
    /// `smoothing` is set, every level runs the averaging pass.
    #[profiling::function]
    pub fn subdivide_multi(&self, iterations: usize, smoothing: bool) -> Mesh {
        let mut mesh = self.clone();
        for level in 0..iterations {
            mesh = if smoothing {
                mesh.subdivide_with_averaging()
            } else {
                mesh.subdivide()
            };
            log::debug!(
                "Subdivision level {}: {} vertices, {} faces ({:?})",
                level + 1,
                mesh.num_vertices(),
                mesh.num_faces(),
                mesh.topology()
            );
        }
        mesh
    }
}

fn validate_polygons<P: AsRef<[u32]>>(num_vertices: usize, polygons: &[P]) -> Result<()> {
    for (face_idx, polygon) in polygons.iter().enumerate() {
        let polygon = polygon.as_ref();
        if polygon.len() < 3 {
            bail!(
                "Face {face_idx} has {} vertices, but at least 3 are required",
                polygon.len()
            );
        }
        if let Some(v) = polygon.iter_cpy().find(|&v| v as usize >= num_vertices) {
            bail!("Face {face_idx} references vertex {v}, but the mesh only has {num_vertices} vertices");
        }
    }
    Ok(())
}

/// Layout of the vertex array of a refined mesh. Original vertices come
/// first, then one vertex per edge of the coarse mesh, then one vertex per
/// coarse face. Loop subdivision has no face vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexRanges {
    pub num_original: usize,
    pub num_edges: usize,
    pub num_faces: usize,
}

impl VertexRanges {
    pub fn original(&self) -> Range<usize> {
        0..self.num_original
    }

    pub fn edge(&self) -> Range<usize> {
        self.num_original..self.num_original + self.num_edges
    }

    pub fn face(&self) -> Range<usize> {
        let start = self.num_original + self.num_edges;
        start..start + self.num_faces
    }

    pub fn total(&self) -> usize {
        self.num_original + self.num_edges + self.num_faces
    }

    /// Index in the refined vertex array of the point inserted for edge `edge_id`.
    pub fn edge_point(&self, edge_id: u32) -> u32 {
        (self.num_original + edge_id as usize) as u32
    }

    /// Index in the refined vertex array of the point inserted for face `face`.
    pub fn face_point(&self, face: usize) -> u32 {
        (self.num_original + self.num_edges + face) as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshCounts {
    /// The number of vertices
    pub num_vertices: usize,
    /// The number of face corners, i.e. the sum of all face lengths. For a
    /// closed mesh this is twice the number of edges.
    pub num_halfedges: usize,
    /// The number of distinct edges.
    pub num_edges: usize,
    /// The number of faces
    pub num_faces: usize,
}

impl MeshCounts {
    /// Returns the mesh counts after a single iteration of Loop subdivision.
    /// Only meaningful for triangle meshes.
    pub fn loop_subdiv(&self) -> Self {
        let v_0 = self.num_vertices;
        let e_0 = self.num_edges;
        let f_0 = self.num_faces;

        MeshCounts {
            num_vertices: v_0 + e_0,
            num_halfedges: 12 * f_0,
            num_edges: 2 * e_0 + 3 * f_0,
            num_faces: 4 * f_0,
        }
    }

    /// Returns the mesh counts after a single iteration of Catmull-Clark
    /// subdivision. Every corner of every face spawns one quad.
    pub fn catmull_clark_subdiv(&self) -> Self {
        let h_0 = self.num_halfedges;
        let v_0 = self.num_vertices;
        let f_0 = self.num_faces;
        let e_0 = self.num_edges;

        MeshCounts {
            num_halfedges: h_0 * 4,
            num_faces: h_0,
            num_vertices: v_0 + f_0 + e_0,
            num_edges: 2 * e_0 + h_0,
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    pub fn test_topology_detection() {
        let tri = primitives::Tetrahedron::build();
        assert_eq!(tri.topology(), Topology::Triangular);
        assert!(tri.is_triangular());

        let cube = primitives::Cube::build(Vec3::ZERO, Vec3::splat(2.0));
        assert_eq!(cube.topology(), Topology::Polygonal);

        // A single quad among triangles makes the whole mesh polygonal
        let mixed = Mesh::build_from_polygons(
            &[Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE, Vec3::Z],
            &[&[0u32, 1, 2][..], &[1u32, 3, 2, 4][..]],
        );
        assert_eq!(mixed.topology(), Topology::Polygonal);
    }

    #[test]
    pub fn test_clone_is_independent() {
        let mesh = primitives::Cube::build(Vec3::ZERO, Vec3::splat(2.0));
        let copy = mesh.clone();
        assert_eq!(copy, mesh);

        let (mut vertices, mut faces) = copy.into_parts();
        vertices[0] = Vec3::splat(42.0);
        faces[0][0] = 7;

        assert_eq!(mesh.vertices()[0], Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(mesh.faces()[0].as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    pub fn test_build_copies_input() {
        let mut positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let polygons = vec![vec![0u32, 1, 2]];
        let mesh = Mesh::build_from_polygons(&positions, &polygons);
        positions[0] = Vec3::ONE;
        assert_eq!(mesh.vertices()[0], Vec3::ZERO);
    }

    #[test]
    pub fn test_validation() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
        assert!(Mesh::try_build_from_polygons(&positions, &[[0u32, 1, 2]]).is_ok());
        assert!(Mesh::try_build_from_polygons(&positions, &[[0u32, 1, 3]]).is_err());
        assert!(Mesh::try_build_from_polygons(&positions, &[&[0u32, 1][..]]).is_err());
    }

    #[test]
    pub fn test_loop_output_stays_triangular() {
        let tet = primitives::Tetrahedron::build();
        let level_1 = tet.subdivide();
        let level_2 = level_1.subdivide_with_averaging();
        assert!(level_1.is_triangular());
        assert!(level_2.is_triangular());
        assert_eq!(level_2.num_faces(), 64);
    }

    #[test]
    pub fn test_catmull_clark_output_is_polygonal() {
        let cube = primitives::Cube::build(Vec3::ZERO, Vec3::splat(2.0));
        let refined = cube.subdivide();
        assert!(!refined.is_triangular());
        assert!(refined.faces().iter().all(|f| f.len() == 4));
    }

    #[test]
    pub fn test_subdivide_leaves_input_untouched() {
        let cube = primitives::Cube::build(Vec3::ZERO, Vec3::splat(2.0));
        let before = cube.clone();
        let _ = cube.subdivide_with_averaging();
        assert_eq!(cube, before);
    }

    #[test]
    pub fn test_subdivide_multi() {
        let tet = primitives::Tetrahedron::build();
        assert_eq!(tet.subdivide_multi(0, true), tet);
        assert_eq!(tet.subdivide_multi(2, false), tet.subdivide().subdivide());
        assert_eq!(
            tet.subdivide_multi(2, true),
            tet.subdivide_with_averaging().subdivide_with_averaging()
        );
    }

    #[test]
    pub fn mesh_counts_test() {
        // A cube, after successive levels of subdivision
        let cube_counts = primitives::Cube::build(Vec3::ZERO, Vec3::splat(2.0)).counts();
        assert_eq!(
            cube_counts,
            MeshCounts {
                num_vertices: 8,
                num_halfedges: 24,
                num_edges: 12,
                num_faces: 6,
            }
        );
        let cube_counts_cumulative: Vec<MeshCounts> = (0..3)
            .scan(cube_counts, |acc, _| {
                *acc = acc.catmull_clark_subdiv();
                Some(*acc)
            })
            .collect();

        assert_eq!(
            &cube_counts_cumulative,
            &[
                MeshCounts {
                    num_vertices: 26,
                    num_halfedges: 48 * 2,
                    num_edges: 48,
                    num_faces: 24,
                },
                MeshCounts {
                    num_vertices: 98,
                    num_halfedges: 192 * 2,
                    num_edges: 192,
                    num_faces: 96,
                },
                MeshCounts {
                    num_vertices: 386,
                    num_halfedges: 768 * 2,
                    num_edges: 768,
                    num_faces: 384,
                },
            ]
        );

        // A tetrahedron, under Loop subdivision
        let tet_counts = primitives::Tetrahedron::build().counts();
        let tet_counts_cumulative: Vec<MeshCounts> = (0..3)
            .scan(tet_counts, |acc, _| {
                *acc = acc.loop_subdiv();
                Some(*acc)
            })
            .collect();
        assert_eq!(
            &tet_counts_cumulative,
            &[
                MeshCounts {
                    num_vertices: 10,
                    num_halfedges: 48,
                    num_edges: 24,
                    num_faces: 16,
                },
                MeshCounts {
                    num_vertices: 34,
                    num_halfedges: 192,
                    num_edges: 96,
                    num_faces: 64,
                },
                MeshCounts {
                    num_vertices: 130,
                    num_halfedges: 768,
                    num_edges: 384,
                    num_faces: 256,
                },
            ]
        );

        // A quad, with every edge in the boundary.
        let quad = primitives::Quad::build(Vec3::ZERO, Vec3::Y, Vec3::X, Vec2::ONE);
        assert_eq!(
            quad.counts().catmull_clark_subdiv(),
            MeshCounts {
                num_vertices: 9,
                num_halfedges: 16,
                num_edges: 12,
                num_faces: 4,
            }
        );
        assert_eq!(quad.subdivide().counts(), quad.counts().catmull_clark_subdiv());
    }
}
