// crates/foundry-bridge-contract/src/lib.rs
// ============================================================================
// Module: Foundry Bridge Contract
// Description: Canonical tool surface exposed by the dispatch gateway.
// Purpose: Provide the closed, enumerable tool registry entries and schemas.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! This crate defines the canonical tool surface: five fixed tools, their
//! parameter specifications, and the JSON Schema shapes published through the
//! tool listing endpoint. The surface is a closed dispatch table built at
//! process start; there is no dynamic registration, removal, or versioning,
//! so every operation callable by an external agent is known in advance and
//! auditable.
//!
//! Security posture: tool inputs are untrusted; parameter specifications are
//! the validation source of truth for the gateway.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod tooling;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use tooling::tool_definitions;
pub use tooling::tool_descriptors;
pub use types::ParamSpec;
pub use types::ParamType;
pub use types::ToolDefinition;
pub use types::ToolDescriptor;
pub use types::ToolName;
