// crates/foundry-bridge-core/src/envelope/tests.rs
// ============================================================================
// Module: Tool Envelope Unit Tests
// Description: Unit tests for the wire envelope shapes.
// Purpose: Validate the status discriminator and error payload encoding.
// Dependencies: foundry-bridge-core
// ============================================================================

//! ## Overview
//! Exercises envelope serialization: the `status` discriminator must always
//! be present and callers must be able to branch on it alone.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::json;

use super::ToolRequest;
use super::ToolResponse;
use crate::errors::ErrorKind;
use crate::errors::GatewayError;

// ============================================================================
// SECTION: Request Decoding
// ============================================================================

#[test]
fn request_parameters_default_to_empty_mapping() {
    let request: ToolRequest =
        serde_json::from_value(json!({"tool_name": "greet"})).expect("decode");
    assert_eq!(request.tool_name, "greet");
    assert!(request.parameters.is_empty());
}

#[test]
fn request_decodes_parameter_mapping() {
    let request: ToolRequest =
        serde_json::from_value(json!({"tool_name": "add_numbers", "parameters": {"a": 1, "b": 2}}))
            .expect("decode");
    assert_eq!(request.parameters.len(), 2);
}

// ============================================================================
// SECTION: Response Encoding
// ============================================================================

#[test]
fn success_envelope_carries_status_discriminator() {
    let response = ToolResponse::success(json!({"sum": 3}));
    let encoded = serde_json::to_value(&response).expect("encode");
    assert_eq!(encoded, json!({"status": "success", "result": {"sum": 3}}));
}

#[test]
fn error_envelope_carries_kind_and_message() {
    let err = GatewayError::UnknownTool {
        name: "nope".to_string(),
    };
    let response = ToolResponse::failure(&err);
    let encoded = serde_json::to_value(&response).expect("encode");
    assert_eq!(encoded["status"], "error");
    assert_eq!(encoded["error"]["kind"], "UnknownTool");
    assert_eq!(encoded["error"]["message"], "unknown tool: nope");
}

#[test]
fn error_kind_accessor_distinguishes_variants() {
    let ok = ToolResponse::success(json!(null));
    assert_eq!(ok.error_kind(), None);
    let err = ToolResponse::failure(&GatewayError::invalid_parameter("a", "missing"));
    assert_eq!(err.error_kind(), Some(ErrorKind::InvalidParameters));
}

#[test]
fn envelope_round_trips() {
    let response = ToolResponse::success(json!({"ok": true}));
    let encoded = serde_json::to_string(&response).expect("encode");
    let decoded: ToolResponse = serde_json::from_str(&encoded).expect("decode");
    assert_eq!(decoded, response);
}
