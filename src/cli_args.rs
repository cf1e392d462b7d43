// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use subdiv_engine::viewer::{SeedMesh, ViewerSettings, MAX_SUBDIVISION_LEVEL};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SeedArg {
    /// A cube made of six quads
    Cube,
    /// A tetrahedron made of four triangles
    Tetrahedron,
}

impl From<SeedArg> for SeedMesh {
    fn from(seed: SeedArg) -> Self {
        match seed {
            SeedArg::Cube => SeedMesh::Cube,
            SeedArg::Tetrahedron => SeedMesh::Tetrahedron,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Loads viewer settings from the given `.ron` file. The other flags
    /// override the values in it.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// The mesh to start from
    #[arg(long, value_enum)]
    pub seed: Option<SeedArg>,

    /// How many times to subdivide the seed mesh
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=MAX_SUBDIVISION_LEVEL as i64))]
    pub level: Option<u32>,

    /// Skip the vertex averaging pass after each subdivision
    #[arg(long)]
    pub no_smoothing: bool,

    /// Writes the resulting mesh to the given `.ron` file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Args {
    /// Merges the settings file, if any, with the flags given on the command
    /// line.
    pub fn viewer_settings(&self) -> Result<ViewerSettings> {
        let mut settings = match &self.settings {
            Some(path) => ViewerSettings::load_from_file(path)?,
            None => ViewerSettings::default(),
        };
        if let Some(seed) = self.seed {
            settings.seed = seed.into();
        }
        if let Some(level) = self.level {
            settings.level = level;
        }
        if self.no_smoothing {
            settings.smoothing = false;
        }
        settings.validate()?;
        Ok(settings)
    }
}
