// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Averaging passes that run after a refinement step. Both passes only move
//! the original vertices, i.e. indices `0..N` of the refined mesh where `N`
//! is the vertex count of the coarse mesh. Their rules are evaluated over the
//! coarse mesh's faces and positions.
//!
//! Inserted edge and face points keep the positions they got during
//! refinement. In particular Loop edge vertices stay at the plain midpoint.

use super::*;

/// Weight given to each neighbor of a vertex of valence `valence` by the Loop
/// averaging rule.
pub fn loop_beta(valence: usize) -> f32 {
    if valence > 3 {
        3.0 / (8.0 * valence as f32)
    } else {
        3.0 / 16.0
    }
}

/// For each vertex, the other vertices that share at least one face with it,
/// in the order they are first found.
pub fn vertex_neighbors(mesh: &Mesh) -> Vec<SVecN<u32, 8>> {
    let mut neighbors = vec![SVecN::<u32, 8>::new(); mesh.num_vertices()];
    for face in mesh.faces() {
        let n = face.len();
        for (i, v) in face.iter_cpy().enumerate() {
            for k in 1..n {
                neighbors[v as usize].insert_unique(face[(i + k) % n]);
            }
        }
    }
    neighbors
}

/// Moves the original vertices of `refined`, a Loop subdivision of
/// `original`, using the Loop vertex rule:
///
/// `p' = (1 - n * beta) * p + beta * sum(neighbors)`
///
/// Vertices that belong to no face are left where they are.
#[profiling::function]
pub fn loop_averaging(original: &Mesh, refined: Mesh) -> Mesh {
    let positions = original.vertices();
    let neighbors = vertex_neighbors(original);
    let (mut vertices, faces) = refined.into_parts();

    for (v, ring) in neighbors.iter().enumerate() {
        if ring.is_empty() {
            continue;
        }
        let beta = loop_beta(ring.len());
        let weight = 1.0 - ring.len() as f32 * beta;
        vertices[v] = ring
            .iter_cpy()
            .fold(weight * positions[v], |acc, w| {
                acc + beta * positions[w as usize]
            });
    }

    Mesh::from_parts(vertices, faces)
}

/// Moves the original vertices of `refined`, a Catmull-Clark subdivision of
/// `original`, using the Catmull-Clark vertex rule:
///
/// `p' = (F + 2R + (n - 3) * p) / n`
///
/// where `n` is the number of distinct edges touching the vertex, `F` the
/// average of the centroids of its faces and `R` the average of the
/// midpoints of its edges.
#[profiling::function]
pub fn catmull_clark_averaging(original: &Mesh, refined: Mesh) -> Mesh {
    let positions = original.vertices();
    let face_points = original.face_centroids();
    let edges = EdgeIndex::build(original.faces());
    let midpoints = edges
        .iter()
        .map(|(_, key, _)| key.midpoint(positions))
        .collect_vec();

    let mut vertex_faces = vec![SVec::<u32>::new(); positions.len()];
    let mut vertex_edges = vec![SVec::<u32>::new(); positions.len()];
    for (face_idx, face) in original.faces().iter().enumerate() {
        let n = face.len();
        for i in 0..n {
            let v = face[i];
            let next = face[(i + 1) % n];
            let prev = face[(i + n - 1) % n];

            vertex_faces[v as usize].push(face_idx as u32);
            vertex_edges[v as usize].insert_unique(edges.edge_id(v, next));
            vertex_edges[v as usize].insert_unique(edges.edge_id(prev, v));
        }
    }

    let (mut vertices, faces) = refined.into_parts();
    for (v, (v_faces, v_edges)) in vertex_faces.iter().zip(vertex_edges.iter()).enumerate() {
        if v_faces.is_empty() {
            continue;
        }
        let n = v_edges.len() as f32;
        let f = average(v_faces.iter_cpy().map(|f| face_points[f as usize]));
        let r = average(v_edges.iter_cpy().map(|e| midpoints[e as usize]));
        vertices[v] = (f + 2.0 * r + (n - 3.0) * positions[v]) / n;
    }

    Mesh::from_parts(vertices, faces)
}
