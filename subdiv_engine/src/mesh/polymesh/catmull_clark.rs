// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use smallvec::smallvec;

use super::*;

/// Returns the point inserted for an edge during refinement. An edge with
/// exactly two incident faces gets the average of its endpoints and both
/// face points. Any other edge, including boundary edges, falls back to the
/// plain midpoint.
pub fn edge_point(positions: &[Vec3], face_points: &[Vec3], key: EdgeKey, faces: &[u32]) -> Vec3 {
    match *faces {
        [f0, f1] => {
            let (a, b) = key.vertices();
            (positions[a as usize]
                + positions[b as usize]
                + face_points[f0 as usize]
                + face_points[f1 as usize])
                / 4.0
        }
        _ => key.midpoint(positions),
    }
}

/// Runs one step of Catmull-Clark refinement. Every corner of every face
/// spawns a quad, so the result is always a quad mesh.
///
/// The new vertex array holds the original vertices, then one edge point per
/// edge in discovery order (see [`EdgeIndex`]), then one face point per face.
/// Original vertices are not moved, see
/// [`averaging::catmull_clark_averaging`].
#[profiling::function]
pub fn subdivide(mesh: &Mesh) -> Mesh {
    let positions = mesh.vertices();

    // --- Face points ---
    let face_points = mesh.face_centroids();

    // --- Edge points ---
    let edges = EdgeIndex::build(mesh.faces());
    let ranges = VertexRanges {
        num_original: positions.len(),
        num_edges: edges.len(),
        num_faces: face_points.len(),
    };

    let mut vertices = Vec::with_capacity(ranges.total());
    vertices.extend_from_slice(positions);
    vertices.extend(
        edges
            .iter()
            .map(|(_, key, faces)| edge_point(positions, &face_points, key, faces)),
    );
    vertices.extend_from_slice(&face_points);
    debug_assert_eq!(vertices.len(), ranges.total());

    // --- Quads ---
    let num_corners = mesh.faces().iter().map(|f| f.len()).sum();
    let mut faces: Vec<Face> = Vec::with_capacity(num_corners);
    for (face_idx, face) in mesh.faces().iter().enumerate() {
        let face_point = ranges.face_point(face_idx);
        let n = face.len();
        for i in 0..n {
            let v = face[i];
            let next = face[(i + 1) % n];
            let prev = face[(i + n - 1) % n];

            let outgoing = ranges.edge_point(edges.edge_id(v, next));
            let incoming = ranges.edge_point(edges.edge_id(prev, v));
            faces.push(smallvec![v, outgoing, face_point, incoming]);
        }
    }

    log::debug!(
        "Catmull-Clark subdivision: {} -> {} vertices, {} -> {} faces",
        positions.len(),
        vertices.len(),
        mesh.num_faces(),
        faces.len()
    );

    Mesh::from_parts(vertices, faces)
}
