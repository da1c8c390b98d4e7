// crates/foundry-bridge-contract/src/tooling.rs
// ============================================================================
// Module: Tool Contracts
// Description: The fixed five-tool surface and its input schemas.
// Purpose: Provide registry entries and listing definitions for the gateway.
// Dependencies: serde_json, crate::types
// ============================================================================

//! ## Overview
//! This module defines the canonical tool surface as an explicit, statically
//! constructed list. The registration-by-decoration pattern of the original
//! middleware is deliberately replaced with this table so the surface stays
//! enumerable and auditable.
//!
//! The order is intentional: it is preserved in tool listings to keep diffs
//! stable across releases. Append new tools at the end.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use crate::types::ParamSpec;
use crate::types::ParamType;
use crate::types::ToolDefinition;
use crate::types::ToolDescriptor;
use crate::types::ToolName;

// ============================================================================
// SECTION: Tool Descriptors
// ============================================================================

/// Returns the canonical tool descriptors in listing order.
#[must_use]
pub fn tool_descriptors() -> Vec<ToolDescriptor> {
    vec![
        greet_descriptor(),
        add_numbers_descriptor(),
        run_aml_pipeline_descriptor(),
        list_aml_experiments_descriptor(),
        get_aml_job_status_descriptor(),
    ]
}

/// Builds the descriptor for `greet`.
fn greet_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: ToolName::Greet,
        description: "Greet someone by name.",
        params: vec![ParamSpec::required("name", ParamType::String)],
    }
}

/// Builds the descriptor for `add_numbers`.
fn add_numbers_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: ToolName::AddNumbers,
        description: "Add two numbers and return the sum with input metadata.",
        params: vec![
            ParamSpec::required("a", ParamType::Number),
            ParamSpec::required("b", ParamType::Number),
        ],
    }
}

/// Builds the descriptor for `run_aml_pipeline`.
fn run_aml_pipeline_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: ToolName::RunAmlPipeline,
        description: "Submit an Azure ML pipeline job from a YAML definition reference.",
        params: vec![
            ParamSpec::required("pipeline_job_yaml", ParamType::String),
            ParamSpec::optional("payload", ParamType::Object, json!({})),
            ParamSpec::required("experiment_name", ParamType::String),
        ],
    }
}

/// Builds the descriptor for `list_aml_experiments`.
fn list_aml_experiments_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: ToolName::ListAmlExperiments,
        description: "List experiments recorded in the Azure ML workspace.",
        params: Vec::new(),
    }
}

/// Builds the descriptor for `get_aml_job_status`.
fn get_aml_job_status_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: ToolName::GetAmlJobStatus,
        description: "Fetch the current status of an Azure ML job by name.",
        params: vec![ParamSpec::required("job_name", ParamType::String)],
    }
}

// ============================================================================
// SECTION: Tool Definitions
// ============================================================================

/// Returns the tool definitions served by the listing endpoint.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    tool_descriptors()
        .into_iter()
        .map(|descriptor| ToolDefinition {
            name: descriptor.name,
            description: descriptor.description.to_string(),
            input_schema: input_schema(&descriptor),
        })
        .collect()
}

/// Builds the JSON Schema input shape for a descriptor.
fn input_schema(descriptor: &ToolDescriptor) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();
    for param in &descriptor.params {
        let mut property = serde_json::Map::new();
        property.insert("type".to_string(), json!(param.param_type.schema_type()));
        if let Some(default) = &param.default {
            property.insert("default".to_string(), default.clone());
        }
        properties.insert(param.name.to_string(), Value::Object(property));
        if param.required {
            required.push(json!(param.name));
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}
