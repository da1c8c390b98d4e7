// crates/foundry-bridge-core/src/interfaces.rs
// ============================================================================
// Module: Bridge Interfaces
// Description: Backend-agnostic interfaces for workspace, credential, and
// pipeline collaborators.
// Purpose: Define the contract surfaces the enterprise bridge is built on.
// Dependencies: async-trait, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the bridge integrates with the external ML provider
//! without embedding backend-specific detail. Implementations must fail
//! closed on missing or invalid data and keep all outbound calls bounded by
//! a timeout.
//!
//! Security posture: provider responses are untrusted input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::errors::BridgeError;
use crate::types::AccessToken;
use crate::types::ExperimentSummary;
use crate::types::JobHandle;
use crate::types::PipelineDefinition;

// ============================================================================
// SECTION: Workspace Client
// ============================================================================

/// Job submission payload handed to the workspace client.
///
/// # Invariants
/// - `job_name` is freshly generated per submission; two submissions with
///   identical definitions still create two distinct jobs.
/// - `input_data` is opaque pass-through; the provider decides whether
///   unmatched keys are rejected or ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSubmission {
    /// Workspace-unique name for the new job.
    pub job_name: String,
    /// Experiment the job is recorded under.
    pub experiment_name: String,
    /// Optional display name from the pipeline definition.
    pub display_name: Option<String>,
    /// Resolved pipeline definition being submitted.
    pub definition: PipelineDefinition,
    /// Opaque payload injected into the pipeline's declared inputs.
    pub input_data: Value,
}

/// Job record returned by the workspace client.
///
/// # Invariants
/// - `status` is the provider's raw status string; callers normalize it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Workspace-unique job name.
    pub name: String,
    /// Provider-assigned job identifier.
    pub id: String,
    /// Raw provider status string.
    pub status: String,
    /// Experiment the job belongs to, when reported.
    pub experiment_name: Option<String>,
}

/// Workspace client errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages may include untrusted provider text and must not carry secrets.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    /// Provider reports no resource with the requested name.
    #[error("not found")]
    NotFound,
    /// Provider rejected the caller's credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Provider could not be reached or the call timed out.
    #[error("unavailable: {0}")]
    Unavailable(String),
    /// Provider rejected the request for any other reason.
    #[error("rejected: {0}")]
    Rejected(String),
}

/// Backend-agnostic ML workspace client.
///
/// Implementations wrap exactly one workspace and hold whatever session
/// state the provider requires; the bridge creates them once and reuses the
/// handle for the process lifetime.
#[async_trait]
pub trait MlWorkspaceClient: Send + Sync {
    /// Creates one job in the workspace. Not idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError`] when the provider rejects or fails the call.
    async fn create_job(&self, submission: &JobSubmission) -> Result<JobRecord, WorkspaceError>;

    /// Lists jobs in the workspace. Read-only.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError`] on connectivity or auth failure.
    async fn list_jobs(&self) -> Result<Vec<JobRecord>, WorkspaceError>;

    /// Fetches one job by name.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::NotFound`] when the job does not exist and
    /// other variants on connectivity or auth failure.
    async fn get_job(&self, job_name: &str) -> Result<JobRecord, WorkspaceError>;
}

// ============================================================================
// SECTION: Workspace Connector
// ============================================================================

/// Factory that authenticates and produces a workspace client.
///
/// The bridge calls `connect` lazily, exactly once across concurrent first
/// callers; the returned handle is cached for the process lifetime.
#[async_trait]
pub trait WorkspaceConnector: Send + Sync {
    /// Resolves credentials and builds an authenticated workspace client.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Unauthorized`] when credential resolution is
    /// exhausted and other variants on connectivity failure.
    async fn connect(&self) -> Result<Arc<dyn MlWorkspaceClient>, WorkspaceError>;
}

// ============================================================================
// SECTION: Enterprise Bridge
// ============================================================================

/// The three enterprise operations exposed to the dispatch gateway.
///
/// Implementations are stateless per call apart from the cached session
/// handle; the gateway holds exactly one instance behind this trait so tests
/// can substitute counting stubs.
#[async_trait]
pub trait EnterpriseBridge: Send + Sync {
    /// Submits one pipeline job. Not idempotent: calling twice with
    /// identical arguments submits two jobs.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::DefinitionNotFound`] when the reference does
    /// not resolve locally, [`BridgeError::SubmissionFailed`] when the
    /// provider rejects the call, [`BridgeError::WorkspaceUnavailable`] on
    /// timeout, and [`BridgeError::AuthenticationFailed`] when the credential
    /// chain is exhausted.
    async fn submit_pipeline(
        &self,
        pipeline_reference: &str,
        payload: &Map<String, Value>,
        experiment_name: &str,
    ) -> Result<JobHandle, BridgeError>;

    /// Lists experiments recorded in the workspace. Read-only.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::WorkspaceUnavailable`] on connectivity failure
    /// and [`BridgeError::AuthenticationFailed`] when the credential chain is
    /// exhausted.
    async fn list_experiments(&self) -> Result<Vec<ExperimentSummary>, BridgeError>;

    /// Fetches the status of one job. Callers must pass a non-empty name.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::JobNotFound`] when the provider reports no such
    /// job and [`BridgeError::WorkspaceUnavailable`] on connectivity failure.
    async fn get_job_status(&self, job_name: &str) -> Result<JobHandle, BridgeError>;
}

// ============================================================================
// SECTION: Token Credential
// ============================================================================

/// Credential resolution errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// This provider cannot serve a token in the current environment.
    #[error("credential unavailable: {0}")]
    Unavailable(String),
    /// Every provider in the chain failed.
    #[error("credential chain exhausted: {0}")]
    Exhausted(String),
}

/// Provider of bearer tokens for workspace calls.
///
/// Implementations form an ordered fallback chain: each is tried in priority
/// order and the first success wins.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    /// Resolves a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] when no token can be produced.
    async fn token(&self) -> Result<AccessToken, CredentialError>;
}

// ============================================================================
// SECTION: Pipeline Resolver
// ============================================================================

/// Pipeline definition resolution errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The reference does not name a readable definition.
    #[error("definition not found: {0}")]
    NotFound(String),
    /// The definition exists but could not be parsed.
    #[error("definition invalid: {reference}: {reason}")]
    Invalid {
        /// Reference supplied by the caller.
        reference: String,
        /// Parse failure detail.
        reason: String,
    },
}

/// Loads a named pipeline definition before submission.
///
/// Resolution is local and happens before any session or network work, so a
/// bad reference never consumes credential resolution.
pub trait PipelineResolver: Send + Sync {
    /// Resolves a pipeline definition reference.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the reference cannot be resolved or the
    /// definition cannot be parsed.
    fn resolve(&self, reference: &str) -> Result<PipelineDefinition, ResolveError>;
}
