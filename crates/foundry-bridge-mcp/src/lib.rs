// crates/foundry-bridge-mcp/src/lib.rs
// ============================================================================
// Module: Foundry Bridge MCP
// Description: Dispatch gateway, server configuration, and HTTP transport.
// Purpose: Route tool calls to local handlers and the enterprise bridge.
// Dependencies: axum, foundry-bridge-aml, foundry-bridge-contract,
// foundry-bridge-core, serde, serde_json, thiserror, tokio
// ============================================================================

//! ## Overview
//! This crate hosts the dispatch gateway: a closed tool router over the five
//! registered tools, environment-driven server configuration, dependency-light
//! metrics hooks, and the axum transport that exposes the gateway over HTTP.
//! Every response is the normalized envelope; a failing tool call is a
//! well-formed error response, never a process fault.
//!
//! Security posture: tool requests are untrusted input; the router validates
//! every parameter against the contract before any handler runs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod server;
pub mod telemetry;
pub mod tools;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::GatewayConfig;
pub use config::ServerConfig;
pub use server::GatewayServer;
pub use server::GatewayState;
pub use telemetry::GatewayMetrics;
pub use telemetry::NoopMetrics;
pub use tools::ToolRouter;
