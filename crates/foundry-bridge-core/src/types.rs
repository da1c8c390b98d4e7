// crates/foundry-bridge-core/src/types.rs
// ============================================================================
// Module: Core Types
// Description: Job, experiment, workspace, and pipeline definition shapes.
// Purpose: Provide canonical data shapes shared by the bridge and gateway.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Canonical data shapes for Azure ML jobs and pipeline definitions. Job
//! handles are references into the external provider's job store; nothing in
//! this crate caches or mutates them.
//! Invariants:
//! - [`JobStatus`] parsing is lenient: unrecognized provider vocabulary maps
//!   to [`JobStatus::Unknown`], never to an error.
//! - [`AccessToken`] never exposes its secret through `Debug`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Job Status
// ============================================================================

/// Lifecycle status of a pipeline job as reported by the provider.
///
/// # Invariants
/// - Variants are stable for wire encoding and programmatic handling.
/// - Unrecognized provider strings parse to [`JobStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Job accepted by the workspace but not yet started.
    Submitted,
    /// Job is executing.
    Running,
    /// Job finished successfully.
    Completed,
    /// Job finished with an error.
    Failed,
    /// Job was canceled before completion.
    Canceled,
    /// Provider reported a status outside the known vocabulary.
    Unknown,
}

impl JobStatus {
    /// Returns a stable label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::Running => "Running",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Canceled => "Canceled",
            Self::Unknown => "Unknown",
        }
    }

    /// Parses a provider status string into a known variant.
    ///
    /// Azure ML reports a wider vocabulary than the gateway exposes; queued
    /// and provisioning states collapse into [`JobStatus::Submitted`] and
    /// anything unrecognized becomes [`JobStatus::Unknown`].
    #[must_use]
    pub fn from_provider(raw: &str) -> Self {
        match raw {
            "Submitted" | "NotStarted" | "Starting" | "Preparing" | "Provisioning" | "Queued" => {
                Self::Submitted
            }
            "Running" | "Finalizing" => Self::Running,
            "Completed" => Self::Completed,
            "Failed" => Self::Failed,
            "Canceled" | "CancelRequested" => Self::Canceled,
            _ => Self::Unknown,
        }
    }
}

// ============================================================================
// SECTION: Job Handle
// ============================================================================

/// Reference to a job in the external workspace's job store.
///
/// # Invariants
/// - Produced by submit or status operations; never cached locally.
/// - `job_name` is the stable lookup key for later status queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    /// Workspace-unique job name.
    pub job_name: String,
    /// Provider-assigned job identifier (ARM resource id or equivalent).
    pub job_id: String,
    /// Last observed job status.
    pub status: JobStatus,
}

/// Summary of an experiment derived from the workspace's job history.
///
/// # Invariants
/// - `name` is unique within a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    /// Experiment name.
    pub name: String,
    /// Optional experiment description when the provider supplies one.
    pub description: Option<String>,
}

// ============================================================================
// SECTION: Workspace Coordinates
// ============================================================================

/// Coordinates identifying one Azure ML workspace.
///
/// # Invariants
/// - All fields are non-empty when built through configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceCoordinates {
    /// Azure subscription identifier.
    pub subscription_id: String,
    /// Resource group containing the workspace.
    pub resource_group: String,
    /// Workspace name.
    pub workspace_name: String,
}

// ============================================================================
// SECTION: Access Token
// ============================================================================

/// Bearer token resolved by a credential provider.
///
/// # Invariants
/// - The secret is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Raw bearer token value.
    secret: String,
}

impl AccessToken {
    /// Wraps a raw bearer token value.
    #[must_use]
    pub const fn new(secret: String) -> Self {
        Self {
            secret,
        }
    }

    /// Returns the raw token for use in an `Authorization` header.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken").field("secret", &"<redacted>").finish()
    }
}

// ============================================================================
// SECTION: Pipeline Definition
// ============================================================================

/// Parsed pipeline job definition loaded from YAML.
///
/// # Invariants
/// - `inputs` holds the pipeline's declared inputs verbatim; payload keys are
///   passed through without local validation (provider-defined behavior).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PipelineDefinition {
    /// Optional display name for submitted jobs.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Experiment name pinned by the definition, if any.
    #[serde(default)]
    pub experiment_name: Option<String>,
    /// Declared pipeline inputs keyed by input name.
    #[serde(default)]
    pub inputs: BTreeMap<String, Value>,
}
