// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use smallvec::smallvec;

use super::*;

/// Splits every triangle of `mesh` in four, inserting one vertex at the
/// midpoint of each edge.
///
/// Original vertices are copied unchanged and edge vertices sit exactly at
/// the midpoint. Smoothing is a separate step, see
/// [`averaging::loop_averaging`].
#[profiling::function]
pub fn subdivide(mesh: &Mesh) -> Mesh {
    debug_assert!(
        mesh.is_triangular(),
        "Loop subdivision requires a triangle mesh"
    );

    let positions = mesh.vertices();
    let edges = EdgeIndex::build(mesh.faces());
    let ranges = VertexRanges {
        num_original: positions.len(),
        num_edges: edges.len(),
        num_faces: 0,
    };

    let mut vertices = Vec::with_capacity(ranges.total());
    vertices.extend_from_slice(positions);
    vertices.extend(edges.iter().map(|(_, key, _)| key.midpoint(positions)));

    let mut faces: Vec<Face> = Vec::with_capacity(mesh.num_faces() * 4);
    for face in mesh.faces() {
        let (v0, v1, v2) = (face[0], face[1], face[2]);
        let e01 = ranges.edge_point(edges.edge_id(v0, v1));
        let e12 = ranges.edge_point(edges.edge_id(v1, v2));
        let e20 = ranges.edge_point(edges.edge_id(v2, v0));

        // Three corner triangles, then the center one
        faces.push(smallvec![v0, e01, e20]);
        faces.push(smallvec![v1, e12, e01]);
        faces.push(smallvec![v2, e20, e12]);
        faces.push(smallvec![e01, e12, e20]);
    }

    log::debug!(
        "Loop subdivision: {} -> {} vertices, {} -> {} faces",
        positions.len(),
        vertices.len(),
        mesh.num_faces(),
        faces.len()
    );

    Mesh::from_parts(vertices, faces)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_tetrahedron_counts() {
        let tet = primitives::Tetrahedron::build();
        let refined = subdivide(&tet);
        assert_eq!(refined.num_vertices(), 4 + 6);
        assert_eq!(refined.num_faces(), 4 * 4);
        assert!(refined.faces().iter().all(|f| f.len() == 3));
    }

    #[test]
    fn test_single_triangle() {
        let tri = Mesh::build_from_polygons(
            &[Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)],
            &[[0u32, 1, 2]],
        );
        let refined = subdivide(&tri);

        // Original vertices first, then midpoints in discovery order
        assert_eq!(
            refined.vertices(),
            &[
                Vec3::ZERO,
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(0.0, 2.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ]
        );

        let faces = refined.faces().iter().map(|f| f.to_vec()).collect_vec();
        assert_eq!(
            faces,
            vec![
                vec![0, 3, 5],
                vec![1, 4, 3],
                vec![2, 5, 4],
                vec![3, 4, 5],
            ]
        );
    }

    #[test]
    fn test_shared_edge_gets_one_midpoint() {
        let quad_as_tris = Mesh::build_from_polygons(
            &[Vec3::ZERO, Vec3::X, Vec3::ONE, Vec3::Y],
            &[[0u32, 1, 2], [0, 2, 3]],
        );
        let refined = subdivide(&quad_as_tris);
        // 4 originals plus 5 distinct edges, the diagonal being shared
        assert_eq!(refined.num_vertices(), 9);

        let diagonal_midpoint = Vec3::new(0.5, 0.5, 0.5);
        let copies = refined
            .vertices()
            .iter()
            .filter(|v| **v == diagonal_midpoint)
            .count();
        assert_eq!(copies, 1);

        let distinct: HashSet<Vec3Ord> = refined.vertices().iter().map(|v| v.to_ord()).collect();
        assert_eq!(distinct.len(), refined.num_vertices());
    }
}
