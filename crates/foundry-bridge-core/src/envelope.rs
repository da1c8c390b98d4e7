// crates/foundry-bridge-core/src/envelope.rs
// ============================================================================
// Module: Tool Envelope
// Description: Wire shapes for inbound tool calls and the uniform response.
// Purpose: Provide the request/response envelope shared by all transports.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every tool call arrives as a [`ToolRequest`] and leaves as a
//! [`ToolResponse`]. The response envelope is uniform across success and
//! failure: callers branch on the `status` discriminator, never on
//! transport-level codes alone.
//! Invariants:
//! - Exactly one response variant is populated.
//! - The wire encoding always includes the `status` discriminator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::errors::ErrorKind;
use crate::errors::GatewayError;

// ============================================================================
// SECTION: Request
// ============================================================================

/// Inbound tool call: a tool name plus a parameter mapping.
///
/// # Invariants
/// - Transient; one per incoming call; never persisted.
/// - `parameters` defaults to an empty mapping when absent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Name of the tool to invoke; case-sensitive exact match.
    pub tool_name: String,
    /// Parameter mapping forwarded to the tool handler.
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

// ============================================================================
// SECTION: Response
// ============================================================================

/// Error payload carried inside an error envelope.
///
/// # Invariants
/// - `kind` is one of the stable [`ErrorKind`] labels.
/// - `message` is user-facing and must not carry secrets or stack detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolFault {
    /// Stable error kind label.
    pub kind: ErrorKind,
    /// Diagnostic message preserved from the failure.
    pub message: String,
}

/// Uniform tool call response envelope.
///
/// # Invariants
/// - Serializes with a `status` discriminator of `"success"` or `"error"`.
/// - Terminal: the gateway never emits partial or intermediate states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolResponse {
    /// Successful invocation with the handler's payload.
    Success {
        /// Structured handler result.
        result: Value,
    },
    /// Failed invocation with a normalized fault.
    Error {
        /// Normalized error payload.
        error: ToolFault,
    },
}

impl ToolResponse {
    /// Wraps a handler payload as a success envelope.
    #[must_use]
    pub const fn success(result: Value) -> Self {
        Self::Success {
            result,
        }
    }

    /// Wraps a dispatch failure as an error envelope.
    #[must_use]
    pub fn failure(err: &GatewayError) -> Self {
        Self::Error {
            error: ToolFault {
                kind: err.kind(),
                message: err.to_string(),
            },
        }
    }

    /// Returns the error kind when this is an error envelope.
    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success {
                ..
            } => None,
            Self::Error {
                error,
            } => Some(error.kind),
        }
    }
}

#[cfg(test)]
mod tests;
