// SPDX-License-Identifier: MIT

//! YAML schema types for agent and swarm definitions
//!
//! This module contains the data structures used for parsing swarm
//! configuration documents. Optional keys stay `None` when absent so a
//! parsed document re-serializes to exactly the keys it was read from;
//! the effective values (with defaults applied) are exposed through
//! accessor methods instead.
//!
//! Keys outside the schema are kept in each record's `extra` mapping. They
//! are captured from and merged back into the raw YAML tree by
//! [`SwarmLoader`](super::loader::SwarmLoader), so tagged values and
//! non-string keys survive untouched.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::SwarmConfigError;

/// Keys not modelled explicitly, kept so round-trips never drop data
pub type ExtraFields = serde_yaml::Mapping;

/// Schema keys of each record; everything else lands in `extra`
pub const DOCUMENT_KEYS: &[&str] = &["agents", "swarm_architecture"];
pub const AGENT_KEYS: &[&str] = &[
    "agent_name",
    "model",
    "system_prompt",
    "max_loops",
    "autosave",
    "dashboard",
    "verbose",
    "dynamic_temperature_enabled",
    "saved_state_path",
    "user_name",
    "retry_attempts",
    "context_length",
    "return_step_meta",
    "output_type",
    "task",
    "auto_generate_prompt",
    "artifacts_on",
    "artifacts_file_extension",
    "artifacts_output_path",
];
pub const MODEL_KEYS: &[&str] = &["model_name", "temperature", "max_tokens"];
pub const SWARM_KEYS: &[&str] = &[
    "name",
    "description",
    "swarm_type",
    "max_loops",
    "task",
    "flow",
    "autosave",
    "return_json",
    "rules",
];

pub const DEFAULT_MAX_LOOPS: u32 = 1;
pub const DEFAULT_USER_NAME: &str = "default_user";
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_CONTEXT_LENGTH: u64 = 100_000;
pub const DEFAULT_ARTIFACTS_EXTENSION: &str = ".md";

/// Top-level swarm configuration document
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, JsonSchema)]
pub struct SwarmDocument {
    /// Agents in declaration order
    pub agents: Vec<AgentSpec>,
    pub swarm_architecture: SwarmArchitecture,
    #[serde(skip)]
    pub extra: ExtraFields,
}

impl SwarmDocument {
    /// Look up an agent by name
    pub fn agent(&self, name: &str) -> Option<&AgentSpec> {
        self.agents.iter().find(|a| a.agent_name == name)
    }

    /// Agent names in declaration order
    pub fn agent_names(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.agent_name.as_str()).collect()
    }
}

/// A single agent definition
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, JsonSchema)]
pub struct AgentSpec {
    pub agent_name: String,
    #[serde(default, skip_serializing_if = "ModelSpec::is_empty")]
    pub model: ModelSpec,
    /// Name of a registered prompt template, or the literal prompt text
    pub system_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_loops: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autosave: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_temperature_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_state_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_attempts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_step_meta: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_type: Option<OutputType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_generate_prompt: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts_on: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts_file_extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts_output_path: Option<String>,
    #[serde(skip)]
    pub extra: ExtraFields,
}

impl AgentSpec {
    /// Minimal agent with every optional key unset
    pub fn new(agent_name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            model: ModelSpec::default(),
            system_prompt: system_prompt.into(),
            max_loops: None,
            autosave: None,
            dashboard: None,
            verbose: None,
            dynamic_temperature_enabled: None,
            saved_state_path: None,
            user_name: None,
            retry_attempts: None,
            context_length: None,
            return_step_meta: None,
            output_type: None,
            task: None,
            auto_generate_prompt: None,
            artifacts_on: None,
            artifacts_file_extension: None,
            artifacts_output_path: None,
            extra: ExtraFields::new(),
        }
    }

    pub fn max_loops(&self) -> u32 {
        self.max_loops.unwrap_or(DEFAULT_MAX_LOOPS)
    }

    pub fn autosave(&self) -> bool {
        self.autosave.unwrap_or(true)
    }

    pub fn dashboard(&self) -> bool {
        self.dashboard.unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    pub fn dynamic_temperature_enabled(&self) -> bool {
        self.dynamic_temperature_enabled.unwrap_or(false)
    }

    pub fn user_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or(DEFAULT_USER_NAME)
    }

    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS)
    }

    pub fn context_length(&self) -> u64 {
        self.context_length.unwrap_or(DEFAULT_CONTEXT_LENGTH)
    }

    pub fn return_step_meta(&self) -> bool {
        self.return_step_meta.unwrap_or(false)
    }

    pub fn output_type(&self) -> OutputType {
        self.output_type.unwrap_or_default()
    }

    pub fn auto_generate_prompt(&self) -> bool {
        self.auto_generate_prompt.unwrap_or(false)
    }

    pub fn artifacts_on(&self) -> bool {
        self.artifacts_on.unwrap_or(false)
    }

    pub fn artifacts_file_extension(&self) -> &str {
        self.artifacts_file_extension
            .as_deref()
            .unwrap_or(DEFAULT_ARTIFACTS_EXTENSION)
    }

    pub fn artifacts_output_path(&self) -> &str {
        self.artifacts_output_path.as_deref().unwrap_or("")
    }
}

/// Model configuration for an agent
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, JsonSchema)]
pub struct ModelSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// Sampling temperature, must lie in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip)]
    pub extra: ExtraFields,
}

impl ModelSpec {
    pub fn is_empty(&self) -> bool {
        self.model_name.is_none()
            && self.temperature.is_none()
            && self.max_tokens.is_none()
            && self.extra.is_empty()
    }
}

/// Output format an agent returns
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    #[default]
    Str,
    Json,
}

impl OutputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Str => "str",
            OutputType::Json => "json",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Swarm orchestration metadata
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, JsonSchema)]
pub struct SwarmArchitecture {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Orchestration strategy tag, e.g. "SequentialWorkflow"
    pub swarm_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_loops: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    /// Agent flow expression for AgentRearrange, e.g. "A -> B, C"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autosave: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_json: Option<bool>,
    /// Human-readable ordering constraints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
    #[serde(skip)]
    pub extra: ExtraFields,
}

impl SwarmArchitecture {
    /// Parsed orchestration strategy
    pub fn kind(&self) -> Result<SwarmType, SwarmConfigError> {
        self.swarm_type.parse()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn max_loops(&self) -> u32 {
        self.max_loops.unwrap_or(DEFAULT_MAX_LOOPS)
    }

    pub fn autosave(&self) -> bool {
        self.autosave.unwrap_or(true)
    }

    pub fn return_json(&self) -> bool {
        self.return_json.unwrap_or(false)
    }

    pub fn rules(&self) -> &str {
        self.rules.as_deref().unwrap_or("")
    }
}

/// Known orchestration strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwarmType {
    SequentialWorkflow,
    ConcurrentWorkflow,
    AgentRearrange,
    MixtureOfAgents,
    Auto,
}

impl SwarmType {
    pub const ALL: [SwarmType; 5] = [
        SwarmType::SequentialWorkflow,
        SwarmType::ConcurrentWorkflow,
        SwarmType::AgentRearrange,
        SwarmType::MixtureOfAgents,
        SwarmType::Auto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SwarmType::SequentialWorkflow => "SequentialWorkflow",
            SwarmType::ConcurrentWorkflow => "ConcurrentWorkflow",
            SwarmType::AgentRearrange => "AgentRearrange",
            SwarmType::MixtureOfAgents => "MixtureOfAgents",
            SwarmType::Auto => "auto",
        }
    }
}

impl FromStr for SwarmType {
    type Err = SwarmConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SwarmType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| SwarmConfigError::UnknownSwarmType(s.to_string()))
    }
}

impl fmt::Display for SwarmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swarm_type_parse_known() {
        assert_eq!(
            "SequentialWorkflow".parse::<SwarmType>().unwrap(),
            SwarmType::SequentialWorkflow
        );
        assert_eq!("auto".parse::<SwarmType>().unwrap(), SwarmType::Auto);
        assert_eq!(
            " AgentRearrange ".parse::<SwarmType>().unwrap(),
            SwarmType::AgentRearrange
        );
    }

    #[test]
    fn test_swarm_type_parse_unknown() {
        let err = "RoundRobin".parse::<SwarmType>().unwrap_err();
        assert!(matches!(err, SwarmConfigError::UnknownSwarmType(ref s) if s == "RoundRobin"));
        // Tags are case-sensitive
        assert!("sequentialworkflow".parse::<SwarmType>().is_err());
    }

    #[test]
    fn test_agent_defaults() {
        let agent = AgentSpec::new("a", "prompt");
        assert_eq!(agent.max_loops(), 1);
        assert!(agent.autosave());
        assert!(!agent.dashboard());
        assert!(!agent.verbose());
        assert_eq!(agent.user_name(), "default_user");
        assert_eq!(agent.retry_attempts(), 3);
        assert_eq!(agent.context_length(), 100_000);
        assert_eq!(agent.output_type(), OutputType::Str);
        assert_eq!(agent.artifacts_file_extension(), ".md");
        assert_eq!(agent.artifacts_output_path(), "");
        assert!(agent.model.is_empty());
    }

    #[test]
    fn test_output_type_deserialize() {
        let t: OutputType = serde_yaml::from_str("json").unwrap();
        assert_eq!(t, OutputType::Json);
        assert_eq!(t.to_string(), "json");
        assert!(serde_yaml::from_str::<OutputType>("xml").is_err());
    }

    fn schema_properties(schema: &serde_json::Value) -> Vec<String> {
        let mut keys: Vec<String> = schema["properties"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    fn sorted(keys: &[&str]) -> Vec<String> {
        let mut keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_key_lists_match_schema() {
        let schema = serde_json::to_value(schemars::schema_for!(SwarmDocument)).unwrap();
        let defs = &schema["definitions"];

        assert_eq!(schema_properties(&schema), sorted(DOCUMENT_KEYS));
        assert_eq!(schema_properties(&defs["AgentSpec"]), sorted(AGENT_KEYS));
        assert_eq!(schema_properties(&defs["ModelSpec"]), sorted(MODEL_KEYS));
        assert_eq!(
            schema_properties(&defs["SwarmArchitecture"]),
            sorted(SWARM_KEYS)
        );
    }

    #[test]
    fn test_unknown_keys_ignored_by_typed_parse() {
        let yaml = r#"
agent_name: A
system_prompt: p
hint: !custom value
metadata:
  1: one
"#;
        let agent: AgentSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(agent.agent_name, "A");
        assert!(agent.extra.is_empty());
    }

    #[test]
    fn test_absent_keys_not_serialized() {
        let agent = AgentSpec::new("A", "p");
        let out = serde_yaml::to_string(&agent).unwrap();
        assert_eq!(out.trim(), "agent_name: A\nsystem_prompt: p");
    }
}
