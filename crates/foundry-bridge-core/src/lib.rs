// crates/foundry-bridge-core/src/lib.rs
// ============================================================================
// Module: Foundry Bridge Core
// Description: Shared data model, errors, and interfaces for the tool gateway.
// Purpose: Provide backend-agnostic shapes used by the bridge and gateway.
// Dependencies: serde, serde_json, thiserror, async-trait
// ============================================================================

//! ## Overview
//! Core types for the Foundry Bridge tool gateway: the wire envelope exchanged
//! with agent callers, the stable error kinds surfaced to them, the Azure ML
//! job shapes, and the traits the enterprise bridge is built against.
//! Invariants:
//! - Wire shapes always carry a `status` discriminator.
//! - Error kinds are stable for programmatic handling.
//!
//! Security posture: tool inputs and provider responses are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod envelope;
pub mod errors;
pub mod interfaces;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use envelope::ToolFault;
pub use envelope::ToolRequest;
pub use envelope::ToolResponse;
pub use errors::BridgeError;
pub use errors::ErrorKind;
pub use errors::GatewayError;
pub use interfaces::CredentialError;
pub use interfaces::EnterpriseBridge;
pub use interfaces::JobRecord;
pub use interfaces::JobSubmission;
pub use interfaces::MlWorkspaceClient;
pub use interfaces::PipelineResolver;
pub use interfaces::ResolveError;
pub use interfaces::TokenCredential;
pub use interfaces::WorkspaceConnector;
pub use interfaces::WorkspaceError;
pub use types::AccessToken;
pub use types::ExperimentSummary;
pub use types::JobHandle;
pub use types::JobStatus;
pub use types::PipelineDefinition;
pub use types::WorkspaceCoordinates;
