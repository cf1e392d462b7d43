// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// An undirected edge, stored as `(min, max)` of its two vertex indices. Both
/// windings of an edge map to the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    lo: u32,
    hi: u32,
}

impl EdgeKey {
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b {
            EdgeKey { lo: a, hi: b }
        } else {
            EdgeKey { lo: b, hi: a }
        }
    }

    /// Returns the two vertices, smallest index first.
    pub fn vertices(&self) -> (u32, u32) {
        (self.lo, self.hi)
    }

    pub fn midpoint(&self, positions: &[Vec3]) -> Vec3 {
        (positions[self.lo as usize] + positions[self.hi as usize]) / 2.0
    }
}

/// Iterates the directed edges of a face: `(face[i], face[i + 1])`, wrapping
/// around at the end.
pub fn face_edges(face: &[u32]) -> impl Iterator<Item = (u32, u32)> + '_ {
    face.iter_cpy().circular_tuple_windows()
}

/// Every distinct edge of a face list, with the faces incident to it.
///
/// Edges are numbered in discovery order: faces are visited in order, and
/// the edges of each face starting from `(face[0], face[1])`. Refinement
/// schemes store the point inserted for an edge at a fixed offset plus the
/// edge id, so there is exactly one such point per edge no matter how many
/// faces share it.
#[derive(Debug, Clone, Default)]
pub struct EdgeIndex {
    keys: Vec<EdgeKey>,
    incident_faces: Vec<SVecN<u32, 2>>,
    lookup: HashMap<EdgeKey, u32>,
}

impl EdgeIndex {
    #[profiling::function]
    pub fn build(faces: &[Face]) -> Self {
        let mut index = EdgeIndex::default();
        for (face_idx, face) in faces.iter().enumerate() {
            for (a, b) in face_edges(face) {
                let edge = index.insert(EdgeKey::new(a, b));
                index.incident_faces[edge as usize].push(face_idx as u32);
            }
        }
        index
    }

    fn insert(&mut self, key: EdgeKey) -> u32 {
        if let Some(&id) = self.lookup.get(&key) {
            return id;
        }
        let id = self.keys.len() as u32;
        self.keys.push(key);
        self.incident_faces.push(SVecN::new());
        self.lookup.insert(key, id);
        id
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the id of the edge between `a` and `b`, in either direction.
    pub fn find_edge(&self, a: u32, b: u32) -> Option<u32> {
        self.lookup.get(&EdgeKey::new(a, b)).copied()
    }

    /// Returns the id of the edge between `a` and `b`, in either direction.
    ///
    /// # Panics
    /// When no indexed face has an edge between `a` and `b`.
    pub fn edge_id(&self, a: u32, b: u32) -> u32 {
        self.lookup[&EdgeKey::new(a, b)]
    }

    pub fn key(&self, edge: u32) -> EdgeKey {
        self.keys[edge as usize]
    }

    /// The faces containing this edge, in face order. One face for a
    /// boundary edge, two for an interior one. Non-manifold edges list all
    /// of them.
    pub fn incident_faces(&self, edge: u32) -> &[u32] {
        &self.incident_faces[edge as usize]
    }

    pub fn is_boundary(&self, edge: u32) -> bool {
        self.incident_faces(edge).len() == 1
    }

    /// Iterates `(edge_id, key, incident_faces)` in edge id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, EdgeKey, &[u32])> + '_ {
        self.keys
            .iter()
            .zip(self.incident_faces.iter())
            .enumerate()
            .map(|(id, (key, faces))| (id as u32, *key, faces.as_slice()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_edge_key_is_symmetric() {
        for (a, b) in [(0, 1), (5, 2), (7, 7), (u32::MAX, 0)] {
            assert_eq!(EdgeKey::new(a, b), EdgeKey::new(b, a));
        }
        assert_eq!(EdgeKey::new(9, 4).vertices(), (4, 9));
        assert_ne!(EdgeKey::new(1, 2), EdgeKey::new(1, 3));
    }

    #[test]
    fn test_face_edges() {
        assert_eq!(
            face_edges(&[4, 5, 6, 7]).collect_vec(),
            &[(4, 5), (5, 6), (6, 7), (7, 4)]
        );
    }

    #[test]
    fn test_shared_edge_is_indexed_once() {
        // Two triangles sharing the edge 1-2, with opposite winding
        let faces: Vec<Face> = vec![
            smallvec::smallvec![0, 1, 2],
            smallvec::smallvec![2, 1, 3],
        ];
        let index = EdgeIndex::build(&faces);
        assert_eq!(index.len(), 5);

        let shared = index.edge_id(1, 2);
        assert_eq!(shared, index.edge_id(2, 1));
        assert_eq!(index.incident_faces(shared), &[0, 1]);
        assert!(!index.is_boundary(shared));

        let outer = index.edge_id(0, 1);
        assert_eq!(index.incident_faces(outer), &[0]);
        assert!(index.is_boundary(outer));
        assert_eq!(index.find_edge(0, 3), None);
    }

    #[test]
    fn test_discovery_order() {
        let faces: Vec<Face> = vec![
            smallvec::smallvec![0, 1, 2],
            smallvec::smallvec![2, 1, 3],
        ];
        let index = EdgeIndex::build(&faces);
        let keys = index.iter().map(|(_, key, _)| key.vertices()).collect_vec();
        assert_eq!(keys, &[(0, 1), (1, 2), (0, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_cube_edges() {
        let cube = primitives::Cube::build(Vec3::ZERO, Vec3::splat(2.0));
        let index = EdgeIndex::build(cube.faces());
        assert_eq!(index.len(), 12);
        assert!(index.iter().all(|(_, _, faces)| faces.len() == 2));
    }
}
