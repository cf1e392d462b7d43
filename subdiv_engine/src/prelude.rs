pub use anyhow::{anyhow, bail, Context, Result};

pub use glam::{Vec2, Vec3};

pub use itertools::Itertools;
pub use std::collections::{HashMap, HashSet};

pub use crate::mesh::polymesh::*;
pub use crate::mesh::polymesh;

pub use subdiv_commons::math::*;
pub use subdiv_commons::utils::*;
