// SPDX-License-Identifier: MIT

pub mod loader;
pub mod plan;
pub mod prompts;
pub mod settings;
pub mod types;
pub mod validation;
