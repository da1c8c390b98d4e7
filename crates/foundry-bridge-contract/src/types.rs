// crates/foundry-bridge-contract/src/types.rs
// ============================================================================
// Module: Contract Types
// Description: Tool names, parameter specifications, and listing shapes.
// Purpose: Provide canonical shapes for the registry and the tool listing.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Typed shapes for the tool surface. [`ToolName`] is the case-sensitive
//! dispatch key; [`ToolDescriptor`] carries the parameter specification the
//! gateway validates against; [`ToolDefinition`] is the listing shape served
//! to clients.
//! Invariants:
//! - Tool name strings are stable wire identifiers.
//! - Lookups are case-sensitive exact matches.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Tool Names
// ============================================================================

/// Canonical tool names exposed by the gateway.
///
/// # Invariants
/// - Wire encoding is the snake_case tool identifier.
/// - Variants are append-only; the surface is otherwise closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// Local utility: greet a caller by name.
    Greet,
    /// Local utility: add two numbers with metadata.
    AddNumbers,
    /// Enterprise: submit an Azure ML pipeline job.
    RunAmlPipeline,
    /// Enterprise: list experiments in the workspace.
    ListAmlExperiments,
    /// Enterprise: fetch the status of one job.
    GetAmlJobStatus,
}

impl ToolName {
    /// Returns the stable wire identifier for the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Greet => "greet",
            Self::AddNumbers => "add_numbers",
            Self::RunAmlPipeline => "run_aml_pipeline",
            Self::ListAmlExperiments => "list_aml_experiments",
            Self::GetAmlJobStatus => "get_aml_job_status",
        }
    }
}

impl FromStr for ToolName {
    type Err = UnknownToolName;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "greet" => Ok(Self::Greet),
            "add_numbers" => Ok(Self::AddNumbers),
            "run_aml_pipeline" => Ok(Self::RunAmlPipeline),
            "list_aml_experiments" => Ok(Self::ListAmlExperiments),
            "get_aml_job_status" => Ok(Self::GetAmlJobStatus),
            _ => Err(UnknownToolName),
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker error for tool name parsing; callers map it to their own kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownToolName;

// ============================================================================
// SECTION: Parameter Specification
// ============================================================================

/// Accepted parameter value categories.
///
/// # Invariants
/// - `Number` accepts both JSON integers and floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// UTF-8 string value.
    String,
    /// Numeric value; integers and floats both coerce.
    Number,
    /// JSON object value.
    Object,
}

impl ParamType {
    /// Returns the JSON Schema type label for this category.
    #[must_use]
    pub const fn schema_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Object => "object",
        }
    }
}

/// Specification for one tool parameter.
///
/// # Invariants
/// - A `default` is only meaningful when `required` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Parameter name as it appears in the request mapping.
    pub name: &'static str,
    /// Accepted value category.
    pub param_type: ParamType,
    /// Whether the caller must supply the parameter.
    pub required: bool,
    /// Default applied when an optional parameter is absent.
    pub default: Option<Value>,
}

impl ParamSpec {
    /// Builds a required parameter specification.
    #[must_use]
    pub const fn required(name: &'static str, param_type: ParamType) -> Self {
        Self {
            name,
            param_type,
            required: true,
            default: None,
        }
    }

    /// Builds an optional parameter specification with a default.
    #[must_use]
    pub const fn optional(name: &'static str, param_type: ParamType, default: Value) -> Self {
        Self {
            name,
            param_type,
            required: false,
            default: Some(default),
        }
    }
}

// ============================================================================
// SECTION: Descriptors and Definitions
// ============================================================================

/// Registry entry for one tool: identity, description, and parameter spec.
///
/// # Invariants
/// - Created once at process start from the fixed list in
///   [`crate::tooling::tool_descriptors`]; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Canonical tool name.
    pub name: ToolName,
    /// Tool description for listings.
    pub description: &'static str,
    /// Ordered parameter specifications.
    pub params: Vec<ParamSpec>,
}

/// Tool definition shape served by the listing endpoint.
///
/// # Invariants
/// - `input_schema` is a JSON Schema payload for the tool input shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Canonical tool name.
    pub name: ToolName,
    /// Tool description for clients.
    pub description: String,
    /// JSON schema for tool input.
    pub input_schema: Value,
}
