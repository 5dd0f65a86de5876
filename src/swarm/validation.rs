// SPDX-License-Identifier: MIT

//! Schema validation for parsed swarm documents
//!
//! Parsing already rejects missing required keys and type mismatches.
//! This pass checks the constraints serde cannot express: value ranges,
//! unique agent names, known swarm types and flow references. All issues
//! are collected; nothing short-circuits.

use std::collections::HashMap;
use std::fmt;

use super::plan::parse_flow;
use super::types::{AgentSpec, SwarmArchitecture, SwarmDocument, SwarmType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Dotted field path, e.g. `agents[1].model.temperature`
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}: {}", level, self.path, self.message)
    }
}

/// Outcome of validating a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        });
    }

    fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}

/// Validate a parsed document against the schema invariants
pub fn validate(doc: &SwarmDocument) -> ValidationReport {
    let mut report = ValidationReport::default();

    if doc.agents.is_empty() {
        report.error("agents", "at least one agent is required");
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (i, agent) in doc.agents.iter().enumerate() {
        let path = format!("agents[{}]", i);
        validate_agent(agent, &path, &mut report);

        if agent.task.is_none() && doc.swarm_architecture.task.is_none() {
            report.warning(
                format!("{}.task", path),
                "no task set on the agent or the swarm",
            );
        }

        let name = agent.agent_name.trim();
        if name.is_empty() {
            continue;
        }
        if let Some(first) = seen.get(name) {
            report.error(
                format!("{}.agent_name", path),
                format!("duplicate agent name '{}' (first defined at agents[{}])", name, first),
            );
        } else {
            seen.insert(name, i);
        }
    }

    validate_swarm(doc, &doc.swarm_architecture, &mut report);

    for issue in &report.issues {
        log::debug!("{}", issue);
    }

    report
}

fn validate_agent(agent: &AgentSpec, path: &str, report: &mut ValidationReport) {
    if agent.agent_name.trim().is_empty() {
        report.error(format!("{}.agent_name", path), "must not be empty");
    }
    if agent.system_prompt.trim().is_empty() {
        report.error(format!("{}.system_prompt", path), "must not be empty");
    }

    if let Some(name) = &agent.model.model_name {
        if name.trim().is_empty() {
            report.error(format!("{}.model.model_name", path), "must not be empty");
        }
    }
    if let Some(t) = agent.model.temperature {
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            report.error(
                format!("{}.model.temperature", path),
                format!("must be within [0, 1], got {}", t),
            );
        }
    }
    if agent.model.max_tokens == Some(0) {
        report.error(format!("{}.model.max_tokens", path), "must be positive");
    }
    if agent.max_loops == Some(0) {
        report.error(format!("{}.max_loops", path), "must be positive");
    }
    if agent.context_length == Some(0) {
        report.error(format!("{}.context_length", path), "must be positive");
    }

    if agent.artifacts_on() && agent.artifacts_output_path().trim().is_empty() {
        report.warning(
            format!("{}.artifacts_output_path", path),
            "artifacts_on is set but no output path is given",
        );
    }
}

fn validate_swarm(doc: &SwarmDocument, swarm: &SwarmArchitecture, report: &mut ValidationReport) {
    if swarm.name.trim().is_empty() {
        report.error("swarm_architecture.name", "must not be empty");
    }
    if swarm.max_loops == Some(0) {
        report.error("swarm_architecture.max_loops", "must be positive");
    }

    let kind = match swarm.kind() {
        Ok(kind) => kind,
        Err(_) => {
            let known: Vec<&str> = SwarmType::ALL.iter().map(|t| t.as_str()).collect();
            report.error(
                "swarm_architecture.swarm_type",
                format!(
                    "unknown swarm type '{}', expected one of: {}",
                    swarm.swarm_type,
                    known.join(", ")
                ),
            );
            return;
        }
    };

    if kind != SwarmType::AgentRearrange {
        return;
    }

    let Some(flow) = swarm.flow.as_deref() else {
        report.error("swarm_architecture.flow", "AgentRearrange requires a flow");
        return;
    };
    match parse_flow(flow) {
        Ok(stages) => {
            for name in stages.iter().flatten() {
                if doc.agent(name).is_none() {
                    report.error(
                        "swarm_architecture.flow",
                        format!("flow references unknown agent '{}'", name),
                    );
                }
            }
        }
        Err(e) => report.error("swarm_architecture.flow", e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swarm::loader::SwarmLoader;

    fn parse(yaml: &str) -> SwarmDocument {
        SwarmLoader::parse_yaml(yaml).unwrap()
    }

    fn paths(report: &ValidationReport) -> Vec<&str> {
        report.errors().map(|i| i.path.as_str()).collect()
    }

    #[test]
    fn test_valid_document() {
        let doc = parse(
            r#"
agents:
  - agent_name: A
    system_prompt: p
    model:
      temperature: 0.0
  - agent_name: B
    system_prompt: p
    model:
      temperature: 1.0
swarm_architecture:
  name: S
  swarm_type: SequentialWorkflow
  task: do it
"#,
        );
        let report = validate(&doc);
        assert!(report.is_valid(), "{}", report);
        assert_eq!(report.warnings().count(), 0);
    }

    #[test]
    fn test_duplicate_agent_names() {
        let doc = parse(
            r#"
agents:
  - agent_name: A
    system_prompt: p
  - agent_name: B
    system_prompt: p
  - agent_name: A
    system_prompt: p
swarm_architecture:
  name: S
  swarm_type: SequentialWorkflow
  task: t
"#,
        );
        let report = validate(&doc);
        assert_eq!(paths(&report), vec!["agents[2].agent_name"]);
        assert!(report.issues[0].message.contains("agents[0]"));
    }

    #[test]
    fn test_out_of_range_values() {
        let doc = parse(
            r#"
agents:
  - agent_name: A
    system_prompt: p
    max_loops: 0
    context_length: 0
    model:
      temperature: 1.5
      max_tokens: 0
swarm_architecture:
  name: S
  swarm_type: SequentialWorkflow
  max_loops: 0
  task: t
"#,
        );
        let report = validate(&doc);
        assert_eq!(
            paths(&report),
            vec![
                "agents[0].model.temperature",
                "agents[0].model.max_tokens",
                "agents[0].max_loops",
                "agents[0].context_length",
                "swarm_architecture.max_loops",
            ]
        );
    }

    #[test]
    fn test_negative_temperature() {
        let doc = parse(
            r#"
agents:
  - agent_name: A
    system_prompt: p
    model:
      temperature: -0.1
swarm_architecture:
  name: S
  swarm_type: SequentialWorkflow
  task: t
"#,
        );
        assert_eq!(paths(&validate(&doc)), vec!["agents[0].model.temperature"]);
    }

    #[test]
    fn test_empty_agents_and_blank_names() {
        let doc = parse(
            r#"
agents: []
swarm_architecture:
  name: " "
  swarm_type: SequentialWorkflow
"#,
        );
        let report = validate(&doc);
        assert_eq!(paths(&report), vec!["agents", "swarm_architecture.name"]);
    }

    #[test]
    fn test_blank_prompt_and_model_name() {
        let doc = parse(
            r#"
agents:
  - agent_name: A
    system_prompt: "  "
    model:
      model_name: ""
swarm_architecture:
  name: S
  swarm_type: SequentialWorkflow
  task: t
"#,
        );
        assert_eq!(
            paths(&validate(&doc)),
            vec!["agents[0].system_prompt", "agents[0].model.model_name"]
        );
    }

    #[test]
    fn test_non_finite_temperature() {
        let doc = parse(
            r#"
agents:
  - agent_name: A
    system_prompt: p
    model:
      temperature: .nan
  - agent_name: B
    system_prompt: p
    model:
      temperature: .inf
swarm_architecture:
  name: S
  swarm_type: SequentialWorkflow
  task: t
"#,
        );
        assert_eq!(
            paths(&validate(&doc)),
            vec!["agents[0].model.temperature", "agents[1].model.temperature"]
        );
    }

    #[test]
    fn test_blank_name_still_warns_about_task() {
        let doc = parse(
            r#"
agents:
  - agent_name: " "
    system_prompt: p
swarm_architecture:
  name: S
  swarm_type: SequentialWorkflow
"#,
        );
        let report = validate(&doc);
        assert_eq!(paths(&report), vec!["agents[0].agent_name"]);
        let warned: Vec<&str> = report.warnings().map(|i| i.path.as_str()).collect();
        assert_eq!(warned, vec!["agents[0].task"]);
    }

    #[test]
    fn test_unknown_swarm_type() {
        let doc = parse(
            r#"
agents:
  - agent_name: A
    system_prompt: p
swarm_architecture:
  name: S
  swarm_type: RoundRobin
  task: t
"#,
        );
        let report = validate(&doc);
        assert_eq!(paths(&report), vec!["swarm_architecture.swarm_type"]);
        assert!(report.issues[0].message.contains("SequentialWorkflow"));
    }

    #[test]
    fn test_rearrange_flow_checks() {
        let missing = parse(
            r#"
agents:
  - agent_name: A
    system_prompt: p
swarm_architecture:
  name: S
  swarm_type: AgentRearrange
  task: t
"#,
        );
        assert_eq!(paths(&validate(&missing)), vec!["swarm_architecture.flow"]);

        let unknown = parse(
            r#"
agents:
  - agent_name: A
    system_prompt: p
swarm_architecture:
  name: S
  swarm_type: AgentRearrange
  flow: "A -> Ghost"
  task: t
"#,
        );
        let report = validate(&unknown);
        assert_eq!(report.error_count(), 1);
        assert!(report.issues[0].message.contains("Ghost"));

        let malformed = parse(
            r#"
agents:
  - agent_name: A
    system_prompt: p
  - agent_name: B
    system_prompt: p
swarm_architecture:
  name: S
  swarm_type: AgentRearrange
  flow: "A -> -> B"
  task: t
"#,
        );
        let report = validate(&malformed);
        assert_eq!(paths(&report), vec!["swarm_architecture.flow"]);
        assert!(report.issues[0].message.contains("empty agent name in stage 2"));
    }

    #[test]
    fn test_missing_task_warns() {
        let doc = parse(
            r#"
agents:
  - agent_name: A
    system_prompt: p
    artifacts_on: true
swarm_architecture:
  name: S
  swarm_type: ConcurrentWorkflow
"#,
        );
        let report = validate(&doc);
        assert!(report.is_valid());
        let warned: Vec<&str> = report.warnings().map(|i| i.path.as_str()).collect();
        assert_eq!(
            warned,
            vec!["agents[0].artifacts_output_path", "agents[0].task"]
        );
    }
}
