// SPDX-License-Identifier: MIT

//! Prompt template registry
//!
//! `system_prompt` values in a swarm document are usually names of prompt
//! templates kept outside the document. Names are matched case-insensitively.
//! A value that names no registered template is taken as literal prompt text.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::types::{AgentSpec, SwarmDocument};
use crate::error::{Result, SwarmConfigError};

/// Resolved system prompt for an agent
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedPrompt<'a> {
    Template { name: String, text: &'a str },
    Literal(&'a str),
}

impl<'a> ResolvedPrompt<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            ResolvedPrompt::Template { text, .. } => *text,
            ResolvedPrompt::Literal(text) => *text,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromptRegistry {
    templates: HashMap<String, String>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every `*.txt` / `*.md` file in `dir` under its file stem
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(SwarmConfigError::FileNotFound(dir.display().to_string()));
        }

        let mut registry = Self::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_prompt = path
                .extension()
                .is_some_and(|ext| ext == "txt" || ext == "md");
            if !is_prompt {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                let text = fs::read_to_string(&path)?;
                log::info!("Registered prompt template: {}", stem);
                registry.register(stem, text);
            }
        }
        Ok(registry)
    }

    /// Register a template; an existing one with the same name is replaced
    pub fn register(&mut self, name: &str, text: impl Into<String>) {
        self.templates
            .insert(name.trim().to_lowercase(), text.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve an agent's system prompt
    pub fn resolve<'a>(&'a self, agent: &'a AgentSpec) -> ResolvedPrompt<'a> {
        match self.get(&agent.system_prompt) {
            Some(text) => ResolvedPrompt::Template {
                name: agent.system_prompt.trim().to_lowercase(),
                text,
            },
            None => ResolvedPrompt::Literal(&agent.system_prompt),
        }
    }

    /// Agents whose prompt looks like a template name but is not registered
    pub fn unresolved<'a>(&self, doc: &'a SwarmDocument) -> Vec<&'a str> {
        doc.agents
            .iter()
            .filter(|a| {
                looks_like_reference(&a.system_prompt) && self.get(&a.system_prompt).is_none()
            })
            .map(|a| {
                log::warn!(
                    "Agent '{}' references unknown prompt template '{}'",
                    a.agent_name,
                    a.system_prompt
                );
                a.agent_name.as_str()
            })
            .collect()
    }
}

/// A single identifier-like token such as `financial_agent_sys_prompt`
fn looks_like_reference(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}
