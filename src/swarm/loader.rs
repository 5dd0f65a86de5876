// SPDX-License-Identifier: MIT

//! Swarm loader - YAML file loading, parsing and serialization
//!
//! This module handles loading swarm documents from YAML files and writing
//! them back out as YAML or JSON. Keys outside the schema are read from the
//! raw YAML tree into each record's `extra` and merged back on output.

use super::types::{
    ExtraFields, SwarmDocument, AGENT_KEYS, DOCUMENT_KEYS, MODEL_KEYS, SWARM_KEYS,
};
use super::validation::{validate, ValidationReport};
use crate::error::{Result, SwarmConfigError};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Loads swarm documents from YAML files
pub struct SwarmLoader;

impl SwarmLoader {
    /// Load a swarm document from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SwarmDocument> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SwarmConfigError::FileNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        let doc = Self::parse_yaml(&content)?;
        log::info!(
            "Loaded swarm '{}' with {} agent(s) from {}",
            doc.swarm_architecture.name,
            doc.agents.len(),
            path.display()
        );
        Ok(doc)
    }

    /// Parse a swarm document from a YAML string
    pub fn parse_yaml(content: &str) -> Result<SwarmDocument> {
        // Typed parse first so errors keep their location
        let mut doc: SwarmDocument = serde_yaml::from_str(content)?;
        let raw: Value = serde_yaml::from_str(content)?;
        capture_extras(&mut doc, &raw);
        for agent in &doc.agents {
            log::debug!(
                "Parsed agent '{}' (model: {})",
                agent.agent_name,
                agent.model.model_name.as_deref().unwrap_or("<unset>")
            );
        }
        Ok(doc)
    }

    /// Load a document and reject it if validation reports errors
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<SwarmDocument> {
        let doc = Self::load(path)?;
        Self::check(doc)
    }

    /// Parse a document and reject it if validation reports errors
    pub fn parse_validated(content: &str) -> Result<SwarmDocument> {
        let doc = Self::parse_yaml(content)?;
        Self::check(doc)
    }

    /// Serialize a document to YAML
    pub fn to_yaml(doc: &SwarmDocument) -> Result<String> {
        Ok(serde_yaml::to_string(&Self::to_value(doc)?)?)
    }

    /// Serialize a document to pretty-printed JSON
    ///
    /// Fails if an unknown key holds a mapping with non-string keys.
    pub fn to_json(doc: &SwarmDocument) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Self::to_value(doc)?)?)
    }

    /// The document as a YAML tree, unknown keys included
    pub fn to_value(doc: &SwarmDocument) -> Result<Value> {
        let mut value = serde_yaml::to_value(doc)?;

        if let Some(agents) = value.get_mut("agents").and_then(Value::as_sequence_mut) {
            for (raw, agent) in agents.iter_mut().zip(&doc.agents) {
                if let Some(model) = raw.get_mut("model") {
                    merge_extras(model, &agent.model.extra);
                }
                merge_extras(raw, &agent.extra);
            }
        }
        if let Some(swarm) = value.get_mut("swarm_architecture") {
            merge_extras(swarm, &doc.swarm_architecture.extra);
        }
        merge_extras(&mut value, &doc.extra);

        Ok(value)
    }

    fn check(doc: SwarmDocument) -> Result<SwarmDocument> {
        let report: ValidationReport = validate(&doc);
        for warning in report.warnings() {
            log::warn!("{}", warning);
        }
        if report.is_valid() {
            Ok(doc)
        } else {
            Err(SwarmConfigError::Validation(report))
        }
    }
}

fn capture_extras(doc: &mut SwarmDocument, raw: &Value) {
    doc.extra = unknown_keys(raw, DOCUMENT_KEYS);

    if let Some(agents) = raw.get("agents").and_then(Value::as_sequence) {
        for (agent, raw_agent) in doc.agents.iter_mut().zip(agents) {
            agent.extra = unknown_keys(raw_agent, AGENT_KEYS);
            if let Some(model) = raw_agent.get("model") {
                agent.model.extra = unknown_keys(model, MODEL_KEYS);
            }
        }
    }
    if let Some(swarm) = raw.get("swarm_architecture") {
        doc.swarm_architecture.extra = unknown_keys(swarm, SWARM_KEYS);
    }
}

fn unknown_keys(raw: &Value, known: &[&str]) -> ExtraFields {
    let Some(map) = raw.as_mapping() else {
        return ExtraFields::new();
    };
    map.iter()
        .filter(|(k, _)| !k.as_str().is_some_and(|k| known.contains(&k)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn merge_extras(target: &mut Value, extra: &ExtraFields) {
    if let Some(map) = target.as_mapping_mut() {
        for (k, v) in extra {
            map.insert(k.clone(), v.clone());
        }
    }
}
