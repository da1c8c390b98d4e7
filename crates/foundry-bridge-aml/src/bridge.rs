// crates/foundry-bridge-aml/src/bridge.rs
// ============================================================================
// Module: Enterprise Bridge
// Description: The three enterprise operations over a single cached session.
// Purpose: Translate gateway tool calls into workspace client calls.
// Dependencies: foundry-bridge-core, rand, tokio
// ============================================================================

//! ## Overview
//! The bridge owns exactly one piece of session state: the authenticated
//! workspace client handle. The handle is created lazily on first use
//! through a [`WorkspaceConnector`], with single-flight semantics: concurrent
//! first callers resolve authentication exactly once. A failed connect
//! leaves the cell empty and is retried on a later call; a cached success is
//! never invalidated by later transient failures.
//!
//! Operation failures map onto stable bridge error kinds: unclassified
//! provider faults become `SubmissionFailed` or `WorkspaceUnavailable` for
//! the operation in flight, with the provider message preserved.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use async_trait::async_trait;
use foundry_bridge_core::BridgeError;
use foundry_bridge_core::EnterpriseBridge;
use foundry_bridge_core::ExperimentSummary;
use foundry_bridge_core::JobHandle;
use foundry_bridge_core::JobStatus;
use foundry_bridge_core::JobSubmission;
use foundry_bridge_core::MlWorkspaceClient;
use foundry_bridge_core::PipelineResolver;
use foundry_bridge_core::TokenCredential;
use foundry_bridge_core::WorkspaceConnector;
use foundry_bridge_core::WorkspaceError;
use rand::Rng;
use serde_json::Map;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::client::AmlClientConfig;
use crate::client::AmlRestClient;

// ============================================================================
// SECTION: Connector
// ============================================================================

/// Connector that authenticates and builds the REST workspace client.
///
/// # Invariants
/// - Credential resolution happens inside `connect`, at most once per
///   successful session; the resolved token is pinned into the client and
///   reused for every request on that session.
pub struct AmlConnector {
    /// REST client configuration.
    config: AmlClientConfig,
    /// Credential chain consulted at connect time.
    credential: Arc<dyn TokenCredential>,
}

impl AmlConnector {
    /// Creates a connector for the configured workspace.
    #[must_use]
    pub fn new(config: AmlClientConfig, credential: Arc<dyn TokenCredential>) -> Self {
        Self {
            config,
            credential,
        }
    }
}

#[async_trait]
impl WorkspaceConnector for AmlConnector {
    async fn connect(&self) -> Result<Arc<dyn MlWorkspaceClient>, WorkspaceError> {
        // The chain is consulted exactly once per session; the resolved
        // token rides inside the client for the session's lifetime.
        let token = self
            .credential
            .token()
            .await
            .map_err(|err| WorkspaceError::Unauthorized(err.to_string()))?;
        let client = AmlRestClient::new(self.config.clone(), token)?;
        Ok(Arc::new(client))
    }
}

// ============================================================================
// SECTION: Bridge
// ============================================================================

/// Enterprise bridge over one Azure ML workspace.
///
/// # Invariants
/// - The session cell is populated at most once; concurrent first calls
///   share a single connect.
/// - Pipeline resolution happens before any session or network work.
pub struct AmlBridge {
    /// Resolver for pipeline definition references.
    resolver: Arc<dyn PipelineResolver>,
    /// Connector used for lazy session creation.
    connector: Arc<dyn WorkspaceConnector>,
    /// Cached authenticated workspace client.
    session: OnceCell<Arc<dyn MlWorkspaceClient>>,
}

impl AmlBridge {
    /// Creates a bridge with an empty session cell.
    #[must_use]
    pub fn new(
        resolver: Arc<dyn PipelineResolver>,
        connector: Arc<dyn WorkspaceConnector>,
    ) -> Self {
        Self {
            resolver,
            connector,
            session: OnceCell::new(),
        }
    }

    /// Returns the cached session, connecting on first use.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError`] when the connect fails; the cell stays
    /// empty so a later call retries.
    async fn session(&self) -> Result<&Arc<dyn MlWorkspaceClient>, WorkspaceError> {
        self.session.get_or_try_init(|| self.connector.connect()).await
    }
}

/// Generates a fresh workspace-unique job name.
///
/// Submission is not idempotent: two identical submissions produce two
/// distinct names and therefore two jobs.
fn generate_job_name() -> String {
    let seconds = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs());
    let nonce: u32 = rand::thread_rng().r#gen();
    format!("mcp-{seconds}-{nonce:08x}")
}

/// Maps a connect or list/get failure onto the read-path bridge error.
fn map_read_error(err: WorkspaceError, job_name: Option<&str>) -> BridgeError {
    match err {
        WorkspaceError::NotFound => {
            BridgeError::JobNotFound(job_name.unwrap_or("<unnamed>").to_string())
        }
        WorkspaceError::Unauthorized(msg) => BridgeError::AuthenticationFailed(msg),
        WorkspaceError::Unavailable(msg) | WorkspaceError::Rejected(msg) => {
            BridgeError::WorkspaceUnavailable(msg)
        }
    }
}

/// Maps a submit-path failure onto the bridge error for that operation.
fn map_submit_error(err: WorkspaceError) -> BridgeError {
    match err {
        WorkspaceError::Unauthorized(msg) => BridgeError::AuthenticationFailed(msg),
        WorkspaceError::Unavailable(msg) => BridgeError::WorkspaceUnavailable(msg),
        WorkspaceError::NotFound => {
            BridgeError::SubmissionFailed("submission target not found".to_string())
        }
        WorkspaceError::Rejected(msg) => BridgeError::SubmissionFailed(msg),
    }
}

#[async_trait]
impl EnterpriseBridge for AmlBridge {
    async fn submit_pipeline(
        &self,
        pipeline_reference: &str,
        payload: &Map<String, Value>,
        experiment_name: &str,
    ) -> Result<JobHandle, BridgeError> {
        let definition = self
            .resolver
            .resolve(pipeline_reference)
            .map_err(|err| BridgeError::DefinitionNotFound(err.to_string()))?;
        // A definition-pinned experiment name wins over the caller's.
        let experiment =
            definition.experiment_name.clone().unwrap_or_else(|| experiment_name.to_string());
        let submission = JobSubmission {
            job_name: generate_job_name(),
            experiment_name: experiment,
            display_name: definition.display_name.clone(),
            definition,
            input_data: Value::Object(payload.clone()),
        };
        let client = self.session().await.map_err(map_submit_error)?;
        let record = client.create_job(&submission).await.map_err(map_submit_error)?;
        Ok(JobHandle {
            job_name: record.name,
            job_id: record.id,
            status: JobStatus::from_provider(&record.status),
        })
    }

    async fn list_experiments(&self) -> Result<Vec<ExperimentSummary>, BridgeError> {
        let client = self.session().await.map_err(|err| map_read_error(err, None))?;
        let records = client.list_jobs().await.map_err(|err| map_read_error(err, None))?;
        let names: BTreeSet<String> =
            records.into_iter().filter_map(|record| record.experiment_name).collect();
        Ok(names
            .into_iter()
            .map(|name| ExperimentSummary {
                name,
                description: None,
            })
            .collect())
    }

    async fn get_job_status(&self, job_name: &str) -> Result<JobHandle, BridgeError> {
        let client = self.session().await.map_err(|err| map_read_error(err, Some(job_name)))?;
        let record = client
            .get_job(job_name)
            .await
            .map_err(|err| map_read_error(err, Some(job_name)))?;
        Ok(JobHandle {
            job_name: record.name,
            job_id: record.id,
            status: JobStatus::from_provider(&record.status),
        })
    }
}
