// crates/foundry-bridge-core/src/errors.rs
// ============================================================================
// Module: Error Kinds
// Description: Stable error kinds and error types for bridge and gateway.
// Purpose: Centralize the error surface exposed through the tool envelope.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Every failure surfaced to a tool caller carries one of the stable
//! [`ErrorKind`] labels. [`BridgeError`] covers enterprise operations;
//! [`GatewayError`] adds the dispatch-level failures. The gateway never lets
//! an unclassified failure escape: bridge adapters wrap unexpected provider
//! faults into `SubmissionFailed` or `WorkspaceUnavailable` for the operation
//! in flight, preserving the original message for diagnostics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Error Kind
// ============================================================================

/// Stable error kind labels carried in error envelopes.
///
/// # Invariants
/// - Wire encoding is the PascalCase variant name.
/// - Variants are append-only for compatibility with existing callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Tool name is not present in the registry.
    UnknownTool,
    /// A required parameter is missing or has an uncoercible type.
    InvalidParameters,
    /// Pipeline definition reference could not be resolved locally.
    DefinitionNotFound,
    /// Provider rejected or failed the submission call.
    SubmissionFailed,
    /// Provider reports no job with the requested name.
    JobNotFound,
    /// Workspace could not be reached or timed out.
    WorkspaceUnavailable,
    /// Credential resolution chain was exhausted.
    AuthenticationFailed,
}

impl ErrorKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownTool => "UnknownTool",
            Self::InvalidParameters => "InvalidParameters",
            Self::DefinitionNotFound => "DefinitionNotFound",
            Self::SubmissionFailed => "SubmissionFailed",
            Self::JobNotFound => "JobNotFound",
            Self::WorkspaceUnavailable => "WorkspaceUnavailable",
            Self::AuthenticationFailed => "AuthenticationFailed",
        }
    }
}

// ============================================================================
// SECTION: Bridge Errors
// ============================================================================

/// Failures raised by enterprise bridge operations.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages may include untrusted provider text and must not carry secrets.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// Pipeline definition reference did not resolve before submission.
    #[error("pipeline definition not found: {0}")]
    DefinitionNotFound(String),
    /// Provider rejected or failed the submission call.
    #[error("pipeline submission failed: {0}")]
    SubmissionFailed(String),
    /// Provider reports no job with the requested name.
    #[error("job not found: {0}")]
    JobNotFound(String),
    /// Workspace could not be reached, timed out, or refused the call.
    #[error("workspace unavailable: {0}")]
    WorkspaceUnavailable(String),
    /// Credential resolution chain was exhausted.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
}

impl BridgeError {
    /// Returns the stable error kind for this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DefinitionNotFound(_) => ErrorKind::DefinitionNotFound,
            Self::SubmissionFailed(_) => ErrorKind::SubmissionFailed,
            Self::JobNotFound(_) => ErrorKind::JobNotFound,
            Self::WorkspaceUnavailable(_) => ErrorKind::WorkspaceUnavailable,
            Self::AuthenticationFailed(_) => ErrorKind::AuthenticationFailed,
        }
    }
}

// ============================================================================
// SECTION: Gateway Errors
// ============================================================================

/// Failures raised during tool dispatch.
///
/// # Invariants
/// - Bridge failures pass through with their kind unchanged.
/// - `InvalidParameters` always names the offending field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Tool name is not present in the registry.
    #[error("unknown tool: {name}")]
    UnknownTool {
        /// Tool name supplied by the caller.
        name: String,
    },
    /// A required parameter is missing or has an uncoercible type.
    #[error("invalid parameter '{field}': {reason}")]
    InvalidParameters {
        /// Name of the offending parameter.
        field: String,
        /// Human-readable reason the parameter was rejected.
        reason: String,
    },
    /// Enterprise bridge failure passed through unchanged.
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl GatewayError {
    /// Returns the stable error kind for this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownTool {
                ..
            } => ErrorKind::UnknownTool,
            Self::InvalidParameters {
                ..
            } => ErrorKind::InvalidParameters,
            Self::Bridge(err) => err.kind(),
        }
    }

    /// Builds an `InvalidParameters` failure naming the offending field.
    #[must_use]
    pub fn invalid_parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
