// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::f32::consts::PI;

use super::*;

pub struct Cube;

impl Cube {
    /// An axis-aligned box made of six quads. With a zero center and a size
    /// of 2, its corners are at (±1, ±1, ±1).
    pub fn build(center: Vec3, size: Vec3) -> Mesh {
        let hsize = size * 0.5;

        let v1 = center + Vec3::new(-hsize.x, -hsize.y, -hsize.z);
        let v2 = center + Vec3::new(hsize.x, -hsize.y, -hsize.z);
        let v3 = center + Vec3::new(hsize.x, hsize.y, -hsize.z);
        let v4 = center + Vec3::new(-hsize.x, hsize.y, -hsize.z);

        let v5 = center + Vec3::new(-hsize.x, -hsize.y, hsize.z);
        let v6 = center + Vec3::new(hsize.x, -hsize.y, hsize.z);
        let v7 = center + Vec3::new(hsize.x, hsize.y, hsize.z);
        let v8 = center + Vec3::new(-hsize.x, hsize.y, hsize.z);

        Mesh::try_build_from_polygons(
            &[v1, v2, v3, v4, v5, v6, v7, v8],
            &[
                [0u32, 1, 2, 3],
                [4, 5, 6, 7],
                [0, 1, 5, 4],
                [1, 2, 6, 5],
                [2, 3, 7, 6],
                [3, 0, 4, 7],
            ],
        )
        .expect("Cube construction should not fail")
    }
}

pub struct Tetrahedron;

impl Tetrahedron {
    /// A regular tetrahedron inscribed in the cube with corners at (±1, ±1, ±1).
    pub fn build() -> Mesh {
        Mesh::try_build_from_polygons(
            &[
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(-1.0, -1.0, 1.0),
                Vec3::new(-1.0, 1.0, -1.0),
                Vec3::new(1.0, -1.0, -1.0),
            ],
            &[[0u32, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]],
        )
        .expect("Tetrahedron construction should not fail")
    }
}

pub struct Quad;

impl Quad {
    /// A single quad. Every one of its edges is a boundary edge.
    pub fn build(center: Vec3, normal: Vec3, right: Vec3, size: Vec2) -> Mesh {
        let normal = normal.normalize();
        let right = right.normalize();
        let forward = normal.cross(right);

        let hsize = size * 0.5;

        let v1 = center + hsize.x * right + hsize.y * forward;
        let v2 = center - hsize.x * right + hsize.y * forward;
        let v3 = center - hsize.x * right - hsize.y * forward;
        let v4 = center + hsize.x * right - hsize.y * forward;

        Mesh::try_build_from_polygons(&[v1, v2, v3, v4], &[[0u32, 1, 2, 3]])
            .expect("Quad construction should not fail")
    }
}

pub struct UVSphere;

impl UVSphere {
    /// A sphere with triangle fans at the poles and quads everywhere else.
    pub fn build(center: Vec3, segments: u32, rings: u32, radius: f32) -> Mesh {
        let mut vertices = Vec::<Vec3>::new();
        let mut polygons = Vec::<SVec<u32>>::new();

        let top_vertex = 0;
        vertices.push(center + Vec3::Y * radius);

        for i in 0..rings - 1 {
            let phi = PI * (i + 1) as f32 / rings as f32;
            for j in 0..segments {
                let theta = 2.0 * PI * j as f32 / segments as f32;
                let x = phi.sin() * theta.cos() * radius;
                let y = phi.cos() * radius;
                let z = phi.sin() * theta.sin() * radius;
                vertices.push(center + Vec3::new(x, y, z));
            }
        }

        let bottom_vertex = vertices.len() as u32;
        vertices.push(center - Vec3::Y * radius);

        // Top triangles
        for i in 0..segments {
            let i0 = i + 1;
            let i1 = (i + 1) % segments + 1;
            polygons.push(smallvec::smallvec![top_vertex, i1, i0]);
        }
        // Bottom triangles
        for i in 0..segments {
            let i0 = i + segments * (rings - 2) + 1;
            let i1 = (i + 1) % segments + segments * (rings - 2) + 1;
            polygons.push(smallvec::smallvec![bottom_vertex, i0, i1]);
        }
        // Middle quads
        for j in 0..rings - 2 {
            let j0 = j * segments + 1;
            let j1 = (j + 1) * segments + 1;
            for i in 0..segments {
                let i0 = j0 + i;
                let i1 = j0 + (i + 1) % segments;
                let i2 = j1 + (i + 1) % segments;
                let i3 = j1 + i;
                polygons.push(smallvec::smallvec![i0, i1, i2, i3]);
            }
        }

        Mesh::try_build_from_polygons(&vertices, &polygons)
            .expect("Sphere construction should not fail")
    }
}
