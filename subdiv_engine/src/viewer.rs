// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Highest subdivision level a viewer lets users pick. The face count grows
/// by a factor of four per level.
pub const MAX_SUBDIVISION_LEVEL: u32 = 3;

/// The meshes a viewer can start from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeedMesh {
    /// 8 vertices, 6 quads. Subdivided with Catmull-Clark.
    #[default]
    Cube,
    /// 4 vertices, 4 triangles. Subdivided with Loop.
    Tetrahedron,
}

impl SeedMesh {
    pub fn build(&self) -> Mesh {
        match self {
            SeedMesh::Cube => primitives::Cube::build(Vec3::ZERO, Vec3::splat(2.0)),
            SeedMesh::Tetrahedron => primitives::Tetrahedron::build(),
        }
    }
}

impl fmt::Display for SeedMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedMesh::Cube => write!(f, "cube"),
            SeedMesh::Tetrahedron => write!(f, "tetrahedron"),
        }
    }
}

/// What to show: a seed mesh, subdivided `level` times, with or without the
/// averaging pass at each level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub seed: SeedMesh,
    pub level: u32,
    pub smoothing: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            seed: SeedMesh::Cube,
            level: 0,
            smoothing: true,
        }
    }
}

impl ViewerSettings {
    pub fn validate(&self) -> Result<()> {
        if self.level > MAX_SUBDIVISION_LEVEL {
            bail!(
                "Subdivision level {} is out of range, the maximum is {}",
                self.level,
                MAX_SUBDIVISION_LEVEL
            );
        }
        Ok(())
    }

    pub fn from_ron_str(data: &str) -> Result<Self> {
        let settings: ViewerSettings = ron::de::from_str(data)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        Self::from_ron_str(&data).with_context(|| format!("Invalid settings file {}", path.display()))
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_ron_string()?)
            .with_context(|| format!("Could not write settings to {}", path.display()))
    }

    /// Builds the seed mesh and subdivides it `level` times. Each level is
    /// computed from the previous one.
    #[profiling::function]
    pub fn display_mesh(&self) -> Result<Mesh> {
        self.validate()?;
        log::info!(
            "Subdividing {} {} times (smoothing: {})",
            self.seed,
            self.level,
            self.smoothing
        );
        Ok(self
            .seed
            .build()
            .subdivide_multi(self.level as usize, self.smoothing))
    }
}

/// The summary a viewer shows next to the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshStats {
    pub vertices: usize,
    pub faces: usize,
    pub topology: Topology,
}

impl MeshStats {
    pub fn of(mesh: &Mesh) -> Self {
        Self {
            vertices: mesh.num_vertices(),
            faces: mesh.num_faces(),
            topology: mesh.topology(),
        }
    }

    /// Polygonal meshes are labeled as quadrilateral: every mesh produced by
    /// Catmull-Clark subdivision is a quad mesh.
    pub fn kind(&self) -> &'static str {
        match self.topology {
            Topology::Triangular => "Triangular",
            Topology::Polygonal => "Quadrilateral",
        }
    }
}

impl fmt::Display for MeshStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} faces ({})",
            self.vertices,
            self.faces,
            self.kind()
        )
    }
}
