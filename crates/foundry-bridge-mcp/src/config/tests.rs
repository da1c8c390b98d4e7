// crates/foundry-bridge-mcp/src/config/tests.rs
// ============================================================================
// Module: Gateway Configuration Unit Tests
// Description: Unit tests for environment-driven config resolution.
// Purpose: Validate defaults, parse failures, and workspace completeness.
// Dependencies: foundry-bridge-mcp
// ============================================================================

//! ## Overview
//! Exercises config resolution through injected lookups: defaults apply when
//! variables are unset, present-but-invalid values fail closed, and partial
//! workspace coordinates are rejected.

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

use std::path::PathBuf;

use super::ConfigError;
use super::DEFAULT_REQUEST_TIMEOUT_MS;
use super::GatewayConfig;

// ============================================================================
// SECTION: Defaults
// ============================================================================

#[test]
fn empty_environment_resolves_to_defaults() {
    let config = GatewayConfig::from_lookup(|_| None).expect("config");
    assert_eq!(config.server.name, "foundry-bridge");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.server.path, "/mcp");
    assert_eq!(config.pipeline_root, PathBuf::from("aml"));
    assert_eq!(config.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
    assert!(config.workspace.is_none());
}

#[test]
fn bind_addr_and_call_route_derive_from_server_config() {
    let config = GatewayConfig::from_lookup(|_| None).expect("config");
    assert_eq!(config.server.bind_addr().expect("addr").to_string(), "127.0.0.1:8000");
    assert_eq!(config.server.call_route(), "/mcp/call");
}

// ============================================================================
// SECTION: Overrides
// ============================================================================

#[test]
fn set_variables_override_defaults() {
    let config = GatewayConfig::from_lookup(|name| match name {
        "MCP_SERVER_NAME" => Some("ml-gateway".to_string()),
        "MCP_SERVER_HOST" => Some("0.0.0.0".to_string()),
        "MCP_SERVER_PORT" => Some("9100".to_string()),
        "MCP_SERVER_PATH" => Some("/bridge/".to_string()),
        "AML_REQUEST_TIMEOUT_MS" => Some("5000".to_string()),
        _ => None,
    })
    .expect("config");
    assert_eq!(config.server.name, "ml-gateway");
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.path, "/bridge");
    assert_eq!(config.server.call_route(), "/bridge/call");
    assert_eq!(config.request_timeout_ms, 5000);
}

// ============================================================================
// SECTION: Failure Modes
// ============================================================================

#[test]
fn unparsable_port_fails_closed() {
    let err = GatewayConfig::from_lookup(|name| {
        (name == "MCP_SERVER_PORT").then(|| "http".to_string())
    })
    .expect_err("invalid port");
    assert!(matches!(err, ConfigError::InvalidVariable { ref name, .. } if name == "MCP_SERVER_PORT"));
}

#[test]
fn out_of_range_timeout_fails_closed() {
    let err = GatewayConfig::from_lookup(|name| {
        (name == "AML_REQUEST_TIMEOUT_MS").then(|| "10".to_string())
    })
    .expect_err("timeout below minimum");
    assert!(
        matches!(err, ConfigError::InvalidVariable { ref name, .. } if name == "AML_REQUEST_TIMEOUT_MS")
    );
}

#[test]
fn path_without_leading_slash_fails_closed() {
    let err = GatewayConfig::from_lookup(|name| {
        (name == "MCP_SERVER_PATH").then(|| "mcp".to_string())
    })
    .expect_err("invalid path");
    assert!(matches!(err, ConfigError::InvalidVariable { ref name, .. } if name == "MCP_SERVER_PATH"));
}

// ============================================================================
// SECTION: Workspace Coordinates
// ============================================================================

#[test]
fn full_workspace_coordinates_resolve() {
    let config = GatewayConfig::from_lookup(|name| match name {
        "AZURE_SUBSCRIPTION_ID" => Some("sub-123".to_string()),
        "AZURE_RESOURCE_GROUP" => Some("rg-demo".to_string()),
        "AZURE_ML_WORKSPACE" => Some("ws-demo".to_string()),
        _ => None,
    })
    .expect("config");
    let workspace = config.workspace.expect("workspace");
    assert_eq!(workspace.subscription_id, "sub-123");
    assert_eq!(workspace.resource_group, "rg-demo");
    assert_eq!(workspace.workspace_name, "ws-demo");
}

#[test]
fn partial_workspace_coordinates_are_rejected() {
    let err = GatewayConfig::from_lookup(|name| match name {
        "AZURE_SUBSCRIPTION_ID" => Some("sub-123".to_string()),
        "AZURE_ML_WORKSPACE" => Some("ws-demo".to_string()),
        _ => None,
    })
    .expect_err("incomplete workspace");
    assert_eq!(
        err,
        ConfigError::IncompleteWorkspace {
            name: "AZURE_RESOURCE_GROUP".to_string(),
        }
    );
}
