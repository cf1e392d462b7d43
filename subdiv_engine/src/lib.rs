// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Some useful re-exports
pub mod prelude;

/// The polygon mesh container and its subdivision schemes
pub mod mesh;

/// Seed selection, subdivision level and smoothing settings, as driven by a
/// viewer front end.
pub mod viewer;
