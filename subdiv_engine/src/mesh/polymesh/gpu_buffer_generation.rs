// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// The main representation to draw the mesh's faces as triangles on the GPU.
/// This is suitable to be rendered as an indexed triangle list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexIndexBuffers {
    /// Vertex positions, flattened. Three floats per vertex, in vertex order.
    pub positions: Vec<f32>,
    /// Indices: 3*N where N is the number of triangles. Indices point to
    /// vertices, i.e. to triples of `positions`.
    pub indices: Vec<u32>,
}

impl VertexIndexBuffers {
    pub fn num_vertices(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}

/// This representation is suitable to draw the mesh's edges as a wireframe
/// using a line list. Two positions per edge.
#[derive(Clone, Debug, Default)]
pub struct LineBuffers {
    pub positions: Vec<Vec3>,
}

impl Mesh {
    /// Generates the [`VertexIndexBuffers`] for this mesh. Triangles are
    /// emitted as they are, quads are split into `(v0, v1, v2)` and
    /// `(v0, v2, v3)`. Faces with more vertices are not drawn.
    #[profiling::function]
    pub fn generate_triangle_buffers(&self) -> VertexIndexBuffers {
        let positions = bytemuck::cast_slice::<Vec3, f32>(self.vertices()).to_vec();

        let mut indices = Vec::with_capacity(self.num_faces() * 6);
        let mut skipped = 0;
        for face in self.faces() {
            match *face.as_slice() {
                [v0, v1, v2] => indices.extend([v0, v1, v2]),
                [v0, v1, v2, v3] => indices.extend([v0, v1, v2, v0, v2, v3]),
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            log::debug!("Skipped {skipped} faces with more than 4 vertices in triangle buffers");
        }

        VertexIndexBuffers { positions, indices }
    }

    /// Generates the [`LineBuffers`] for this mesh, one line per distinct
    /// edge. Unlike the triangle buffers, this shows the actual polygons.
    pub fn generate_line_buffers(&self) -> LineBuffers {
        let edges = EdgeIndex::build(self.faces());
        let mut positions = Vec::with_capacity(edges.len() * 2);
        for (_, key, _) in edges.iter() {
            let (a, b) = key.vertices();
            positions.push(self.vertices()[a as usize]);
            positions.push(self.vertices()[b as usize]);
        }
        LineBuffers { positions }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_triangle_buffers_flatten_positions() {
        let tet = primitives::Tetrahedron::build();
        let buffers = tet.generate_triangle_buffers();
        assert_eq!(buffers.num_vertices(), 4);
        assert_eq!(&buffers.positions[0..6], &[1.0, 1.0, 1.0, -1.0, -1.0, 1.0]);
        assert_eq!(buffers.indices, vec![0, 1, 2, 0, 3, 1, 0, 2, 3, 1, 3, 2]);
    }

    #[test]
    fn test_quads_are_split() {
        let cube = primitives::Cube::build(Vec3::ZERO, Vec3::splat(2.0));
        let buffers = cube.generate_triangle_buffers();
        assert_eq!(buffers.num_triangles(), 12);
        assert_eq!(&buffers.indices[0..6], &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_large_faces_are_skipped() {
        let pentagon = Mesh::build_from_polygons(
            &[Vec3::ZERO, Vec3::X, Vec3::ONE, Vec3::Y, Vec3::Z, Vec3::NEG_X],
            &[&[0u32, 1, 2, 3, 4][..], &[0, 4, 5][..]],
        );
        let buffers = pentagon.generate_triangle_buffers();
        assert_eq!(buffers.num_vertices(), 6);
        assert_eq!(buffers.indices, vec![0, 4, 5]);
    }

    #[test]
    fn test_line_buffers() {
        let cube = primitives::Cube::build(Vec3::ZERO, Vec3::splat(2.0));
        assert_eq!(cube.generate_line_buffers().positions.len(), 24);
    }
}
