// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::Result;
use clap::Parser;
use subdiv_engine::viewer::MeshStats;

/// Command line arguments and their conversion to viewer settings.
mod cli_args;

fn main() -> Result<()> {
    #[cfg(feature = "tracy")]
    let _client = profiling::tracy_client::Client::start();

    // Setup logging
    env_logger::init();

    let args = cli_args::Args::parse();
    let settings = args.viewer_settings()?;
    let mesh = settings.display_mesh()?;

    let stats = MeshStats::of(&mesh);
    let buffers = mesh.generate_triangle_buffers();
    log::info!(
        "Render buffers: {} positions, {} triangles",
        buffers.num_vertices(),
        buffers.num_triangles()
    );

    println!(
        "{} at level {}{}: {}",
        settings.seed,
        settings.level,
        if settings.smoothing { " (smoothed)" } else { "" },
        stats
    );

    if let Some(path) = &args.export {
        mesh.write_to_file(path)?;
        println!("Exported mesh to {}", path.display());
    }

    Ok(())
}
