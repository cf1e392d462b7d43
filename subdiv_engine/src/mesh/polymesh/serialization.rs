// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializationVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SerializationVersion {
    pub fn latest() -> Self {
        Self {
            major: 0,
            minor: 1,
            patch: 0,
        }
    }
}

/// On-disk representation of a [`Mesh`]. The topology is not stored, it is
/// detected again when loading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializedMesh {
    pub version: SerializationVersion,
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Vec<u32>>,
}

impl SerializedMesh {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            version: SerializationVersion::latest(),
            vertices: mesh.vertices().to_vec(),
            faces: mesh.faces().iter().map(|f| f.to_vec()).collect(),
        }
    }

    /// Validates the serialized data and builds a mesh out of it.
    pub fn into_mesh(self) -> Result<Mesh> {
        let latest = SerializationVersion::latest();
        if self.version.major != latest.major {
            bail!(
                "Unsupported mesh file version {}.{}.{}, expected {}.x.x",
                self.version.major,
                self.version.minor,
                self.version.patch,
                latest.major
            );
        }
        Mesh::try_build_from_polygons(&self.vertices, &self.faces)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn from_ron_str(data: &str) -> Result<Self> {
        Ok(ron::de::from_str(data)?)
    }
}

impl Mesh {
    pub fn to_serialized(&self) -> SerializedMesh {
        SerializedMesh::from_mesh(self)
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = self.to_serialized().to_ron_string()?;
        std::fs::write(path, data)
            .with_context(|| format!("Could not write mesh to {}", path.display()))?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Mesh> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read mesh from {}", path.display()))?;
        SerializedMesh::from_ron_str(&data)
            .and_then(SerializedMesh::into_mesh)
            .with_context(|| format!("Invalid mesh file {}", path.display()))
    }
}
