// SPDX-License-Identifier: MIT

//! Swarm plan - static view of the ordering a swarm type implies
//!
//! Every strategy is normalized into ordered stages: agents inside a stage
//! are independent of each other, each stage follows the previous one.
//! Nothing here runs an agent; the plan is what a runtime would be handed.

use std::fmt;

use super::types::{AgentSpec, SwarmDocument, SwarmType};
use crate::error::{Result, SwarmConfigError};

/// One agent invocation inside a stage
#[derive(Debug, Clone, PartialEq)]
pub struct PlanStep {
    pub agent_name: String,
    /// Agent task, falling back to the swarm task
    pub task: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stage {
    pub steps: Vec<PlanStep>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// Ordered stages
    Staged(Vec<Stage>),
    /// Strategy chosen by the consuming runtime (`auto`)
    Deferred,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwarmPlan {
    pub name: String,
    pub swarm_type: SwarmType,
    /// Passes over the whole layout
    pub loops: u32,
    pub layout: Layout,
}

impl SwarmPlan {
    /// Normalize a document's swarm architecture into stages
    pub fn from_document(doc: &SwarmDocument) -> Result<Self> {
        let swarm = &doc.swarm_architecture;
        let swarm_type = swarm.kind()?;

        let step = |agent: &AgentSpec| PlanStep {
            agent_name: agent.agent_name.clone(),
            task: agent.task.clone().or_else(|| swarm.task.clone()),
        };

        let layout = match swarm_type {
            SwarmType::SequentialWorkflow => {
                // One agent per stage, declaration order
                let stages = doc
                    .agents
                    .iter()
                    .map(|a| Stage {
                        steps: vec![step(a)],
                    })
                    .collect();
                Layout::Staged(stages)
            }
            SwarmType::ConcurrentWorkflow | SwarmType::MixtureOfAgents => {
                let steps = doc.agents.iter().map(step).collect();
                Layout::Staged(vec![Stage { steps }])
            }
            SwarmType::AgentRearrange => {
                let flow = swarm.flow.as_deref().ok_or_else(|| {
                    SwarmConfigError::invalid_flow("AgentRearrange requires a flow")
                })?;
                // Flows name agents, so this is the only layout that looks them up
                let stages = parse_flow(flow)?
                    .iter()
                    .map(|names| -> Result<Stage> {
                        let steps = names
                            .iter()
                            .map(|name| {
                                doc.agent(name).map(step).ok_or_else(|| {
                                    SwarmConfigError::invalid_flow(format!(
                                        "unknown agent '{}'",
                                        name
                                    ))
                                })
                            })
                            .collect::<Result<Vec<_>>>()?;
                        Ok(Stage { steps })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Layout::Staged(stages)
            }
            SwarmType::Auto => Layout::Deferred,
        };

        let plan = Self {
            name: swarm.name.clone(),
            swarm_type,
            loops: swarm.max_loops(),
            layout,
        };

        log::info!(
            "Planned '{}' swarm '{}' with {} stage(s) x {} loop(s)",
            plan.swarm_type,
            plan.name,
            plan.stages().len(),
            plan.loops
        );

        Ok(plan)
    }

    /// Stages in order; empty for deferred layouts
    pub fn stages(&self) -> &[Stage] {
        match &self.layout {
            Layout::Staged(stages) => stages,
            Layout::Deferred => &[],
        }
    }

    /// Agent names flattened in stage order for a single loop
    pub fn order(&self) -> Vec<&str> {
        self.stages()
            .iter()
            .flat_map(|s| s.steps.iter().map(|step| step.agent_name.as_str()))
            .collect()
    }
}

impl fmt::Display for SwarmPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({}), {} loop(s)",
            self.name, self.swarm_type, self.loops
        )?;
        match &self.layout {
            Layout::Deferred => writeln!(f, "  strategy deferred to runtime")?,
            Layout::Staged(stages) => {
                for (i, stage) in stages.iter().enumerate() {
                    let names: Vec<&str> =
                        stage.steps.iter().map(|s| s.agent_name.as_str()).collect();
                    writeln!(f, "  stage {}: {}", i + 1, names.join(", "))?;
                }
            }
        }
        Ok(())
    }
}

/// Parse a flow expression into stages of agent names.
///
/// `->` separates stages, `,` separates agents within a stage:
/// `"A -> B, C -> D"` is `[[A], [B, C], [D]]`.
pub fn parse_flow(flow: &str) -> Result<Vec<Vec<String>>> {
    if flow.trim().is_empty() {
        return Err(SwarmConfigError::invalid_flow("flow is empty"));
    }

    flow.split("->")
        .enumerate()
        .map(|(i, segment)| {
            let names: Vec<String> = segment
                .split(',')
                .map(|n| n.trim().to_string())
                .collect();
            if names.iter().any(|n| n.is_empty()) {
                return Err(SwarmConfigError::invalid_flow(format!(
                    "empty agent name in stage {} of '{}'",
                    i + 1,
                    flow
                )));
            }
            Ok(names)
        })
        .collect()
}
