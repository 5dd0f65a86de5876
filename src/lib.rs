// SPDX-License-Identifier: MIT

//! Loader, validator and static planner for declarative agent swarm
//! configuration documents.

pub mod error;
pub mod swarm;

pub use error::{Result, SwarmConfigError};
pub use swarm::loader::SwarmLoader;
pub use swarm::types::{
    AgentSpec, ModelSpec, OutputType, SwarmArchitecture, SwarmDocument, SwarmType,
};
