// crates/foundry-bridge-mcp/src/tools.rs
// ============================================================================
// Module: Tool Router
// Description: Closed dispatch table routing tool calls to handlers.
// Purpose: Validate parameters and invoke local or enterprise handlers.
// Dependencies: foundry-bridge-contract, foundry-bridge-core, serde_json
// ============================================================================

//! ## Overview
//! The router is an explicit dispatch table built at startup from the fixed
//! tool registry. Dispatch is strictly linear: resolve the tool name, validate
//! parameters against the descriptor, invoke the handler, wrap the outcome in
//! the normalized envelope. An unknown name never reaches a handler; a
//! parameter violation names the offending field; bridge error kinds pass
//! through unchanged. Nothing in this module is fatal to the process.
//!
//! Security posture: tool parameters are untrusted input and are validated
//! against the contract before any handler runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use foundry_bridge_contract::ParamType;
use foundry_bridge_contract::ToolDescriptor;
use foundry_bridge_contract::ToolName;
use foundry_bridge_contract::tool_descriptors;
use foundry_bridge_core::EnterpriseBridge;
use foundry_bridge_core::GatewayError;
use foundry_bridge_core::ToolRequest;
use foundry_bridge_core::ToolResponse;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Router
// ============================================================================

/// Closed dispatch table over the five registered tools.
///
/// # Invariants
/// - The registry is built once from [`tool_descriptors`] and immutable
///   thereafter; lookups are case-sensitive exact matches.
/// - No handler runs before its parameters validate.
pub struct ToolRouter {
    /// Descriptor registry keyed by tool name.
    registry: BTreeMap<ToolName, ToolDescriptor>,
    /// Enterprise bridge handling the Azure ML operations.
    bridge: Arc<dyn EnterpriseBridge>,
}

impl ToolRouter {
    /// Builds the router over the fixed registry and the given bridge.
    #[must_use]
    pub fn new(bridge: Arc<dyn EnterpriseBridge>) -> Self {
        let registry = tool_descriptors()
            .into_iter()
            .map(|descriptor| (descriptor.name, descriptor))
            .collect();
        Self {
            registry,
            bridge,
        }
    }

    /// Dispatches one tool request and wraps the outcome in the envelope.
    pub async fn dispatch(&self, request: &ToolRequest) -> ToolResponse {
        match self.route(request).await {
            Ok(result) => ToolResponse::success(result),
            Err(err) => ToolResponse::failure(&err),
        }
    }

    /// Resolves, validates, and invokes; errors carry the gateway kind.
    async fn route(&self, request: &ToolRequest) -> Result<Value, GatewayError> {
        let name = ToolName::from_str(&request.tool_name).map_err(|_| GatewayError::UnknownTool {
            name: request.tool_name.clone(),
        })?;
        let descriptor = self.registry.get(&name).ok_or_else(|| GatewayError::UnknownTool {
            name: request.tool_name.clone(),
        })?;
        let params = validate_parameters(descriptor, &request.parameters)?;
        match name {
            ToolName::Greet => greet(&params),
            ToolName::AddNumbers => add_numbers(&params),
            ToolName::RunAmlPipeline => self.run_pipeline(&params).await,
            ToolName::ListAmlExperiments => self.list_experiments().await,
            ToolName::GetAmlJobStatus => self.job_status(&params).await,
        }
    }

    /// Handles `run_aml_pipeline`.
    async fn run_pipeline(&self, params: &Map<String, Value>) -> Result<Value, GatewayError> {
        let reference = str_param(params, "pipeline_job_yaml")?;
        let experiment_name = str_param(params, "experiment_name")?;
        let payload = object_param(params, "payload")?;
        let handle = self.bridge.submit_pipeline(reference, &payload, experiment_name).await?;
        let message = format!("pipeline job {} submitted", handle.job_name);
        Ok(json!({
            "status": "submitted",
            "job": {
                "job_name": handle.job_name,
                "job_id": handle.job_id,
                "status": handle.status.as_str(),
            },
            "message": message,
        }))
    }

    /// Handles `list_aml_experiments`.
    async fn list_experiments(&self) -> Result<Value, GatewayError> {
        let experiments = self.bridge.list_experiments().await?;
        let count = experiments.len();
        Ok(json!({
            "status": "success",
            "experiments": experiments,
            "count": count,
        }))
    }

    /// Handles `get_aml_job_status`.
    async fn job_status(&self, params: &Map<String, Value>) -> Result<Value, GatewayError> {
        let job_name = str_param(params, "job_name")?;
        if job_name.is_empty() {
            return Err(GatewayError::invalid_parameter("job_name", "must not be empty"));
        }
        let handle = self.bridge.get_job_status(job_name).await?;
        Ok(json!({
            "job_name": handle.job_name,
            "job_id": handle.job_id,
            "status": handle.status.as_str(),
        }))
    }
}

// ============================================================================
// SECTION: Parameter Validation
// ============================================================================

/// Validates supplied parameters against a descriptor.
///
/// Unknown keys are rejected, required parameters must be present, optional
/// parameters receive their defaults, and every value must match the declared
/// category.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidParameters`] naming the offending field.
fn validate_parameters(
    descriptor: &ToolDescriptor,
    supplied: &Map<String, Value>,
) -> Result<Map<String, Value>, GatewayError> {
    for key in supplied.keys() {
        if !descriptor.params.iter().any(|spec| spec.name == key) {
            return Err(GatewayError::invalid_parameter(key, "not a parameter of this tool"));
        }
    }
    let mut validated = Map::new();
    for spec in &descriptor.params {
        match supplied.get(spec.name) {
            Some(value) => {
                if !matches_type(spec.param_type, value) {
                    return Err(GatewayError::invalid_parameter(
                        spec.name,
                        format!("expected a {} value", spec.param_type.schema_type()),
                    ));
                }
                validated.insert(spec.name.to_string(), value.clone());
            }
            None => match &spec.default {
                Some(default) => {
                    validated.insert(spec.name.to_string(), default.clone());
                }
                None => {
                    if spec.required {
                        return Err(GatewayError::invalid_parameter(
                            spec.name,
                            "missing required parameter",
                        ));
                    }
                }
            },
        }
    }
    Ok(validated)
}

/// Returns true when the value matches the declared category.
fn matches_type(param_type: ParamType, value: &Value) -> bool {
    match param_type {
        ParamType::String => value.is_string(),
        ParamType::Number => value.is_number(),
        ParamType::Object => value.is_object(),
    }
}

/// Extracts a validated string parameter.
fn str_param<'a>(params: &'a Map<String, Value>, name: &str) -> Result<&'a str, GatewayError> {
    params
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::invalid_parameter(name, "expected a string value"))
}

/// Extracts a validated numeric parameter as f64.
fn f64_param(params: &Map<String, Value>, name: &str) -> Result<f64, GatewayError> {
    params
        .get(name)
        .and_then(Value::as_f64)
        .ok_or_else(|| GatewayError::invalid_parameter(name, "expected a number value"))
}

/// Extracts a validated object parameter.
fn object_param(
    params: &Map<String, Value>,
    name: &str,
) -> Result<Map<String, Value>, GatewayError> {
    params
        .get(name)
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| GatewayError::invalid_parameter(name, "expected an object value"))
}

// ============================================================================
// SECTION: Local Handlers
// ============================================================================

/// Greets the caller by name.
fn greet(params: &Map<String, Value>) -> Result<Value, GatewayError> {
    let name = str_param(params, "name")?;
    if name.is_empty() {
        return Err(GatewayError::invalid_parameter("name", "must not be empty"));
    }
    Ok(Value::String(format!(
        "Hello, {name}! Welcome to the MCP Foundry ML integration."
    )))
}

/// Adds two numbers and reports the operation performed.
fn add_numbers(params: &Map<String, Value>) -> Result<Value, GatewayError> {
    let a = f64_param(params, "a")?;
    let b = f64_param(params, "b")?;
    let sum = a + b;
    Ok(json!({
        "sum": number_value(sum),
        "inputs": {"a": number_value(a), "b": number_value(b)},
        "operation": format!("{} + {} = {}", format_number(a), format_number(b), format_number(sum)),
    }))
}

/// Renders a number without a fractional part when it is integral.
fn format_number(value: f64) -> String {
    if is_integral(value) {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Integrality and range are checked before the cast."
        )]
        return format!("{}", value as i64);
    }
    format!("{value}")
}

/// Emits an integer JSON number for integral values, a float otherwise.
fn number_value(value: f64) -> Value {
    if is_integral(value) {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Integrality and range are checked before the cast."
        )]
        return Value::Number(Number::from(value as i64));
    }
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Returns true when the value is finite, integral, and fits in i64.
fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0
}

#[cfg(test)]
mod tests;
