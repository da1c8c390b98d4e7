// crates/foundry-bridge-aml/src/client.rs
// ============================================================================
// Module: AML REST Client
// Description: Bounded HTTP client for the Azure ML jobs surface.
// Purpose: Implement the workspace client interface against the ARM API.
// Dependencies: foundry-bridge-core, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! REST client for one Azure ML workspace. Every request carries the bearer
//! token resolved at connect time, is bounded by the configured timeout, and
//! follows no redirects. Provider status codes map onto the
//! stable [`WorkspaceError`] variants; unexpected failures keep the provider
//! message for diagnostics without exposing transport internals.
//!
//! Security posture: response bodies are untrusted; listing pagination is
//! bounded by [`MAX_LIST_PAGES`] to preserve fail-closed behavior.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use foundry_bridge_core::AccessToken;
use foundry_bridge_core::JobRecord;
use foundry_bridge_core::JobSubmission;
use foundry_bridge_core::MlWorkspaceClient;
use foundry_bridge_core::WorkspaceCoordinates;
use foundry_bridge_core::WorkspaceError;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default ARM management endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";

/// Pinned jobs API version.
pub const API_VERSION: &str = "2024-10-01";

/// Upper bound on job-listing pages fetched per call.
pub const MAX_LIST_PAGES: usize = 10;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the AML REST client.
///
/// # Invariants
/// - `timeout_ms` applies to the full request lifecycle.
/// - `endpoint` must be an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmlClientConfig {
    /// Target workspace coordinates.
    pub coordinates: WorkspaceCoordinates,
    /// Management endpoint base URL.
    pub endpoint: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl AmlClientConfig {
    /// Creates a config with default endpoint, timeout, and user agent.
    #[must_use]
    pub fn new(coordinates: WorkspaceCoordinates) -> Self {
        Self {
            coordinates,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: 30_000,
            user_agent: "foundry-bridge/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Wire Shapes
// ============================================================================

/// Job resource as returned by the ARM API.
#[derive(Debug, Deserialize)]
struct ArmJob {
    /// ARM resource identifier.
    #[serde(default)]
    id: Option<String>,
    /// Workspace-unique job name.
    name: String,
    /// Job properties payload.
    #[serde(default)]
    properties: ArmJobProperties,
}

/// Properties payload for a job resource.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArmJobProperties {
    /// Provider status string.
    #[serde(default)]
    status: Option<String>,
    /// Experiment the job belongs to.
    #[serde(default)]
    experiment_name: Option<String>,
}

/// Paged job listing as returned by the ARM API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArmJobList {
    /// Jobs on this page.
    #[serde(default)]
    value: Vec<ArmJob>,
    /// Absolute URL of the next page, when present.
    #[serde(default)]
    next_link: Option<String>,
}

/// Converts an ARM job resource into the backend-agnostic record.
fn to_record(job: ArmJob) -> JobRecord {
    JobRecord {
        id: job.id.unwrap_or_else(|| job.name.clone()),
        name: job.name,
        status: job.properties.status.unwrap_or_default(),
        experiment_name: job.properties.experiment_name,
    }
}

// ============================================================================
// SECTION: Error Mapping
// ============================================================================

/// Maps a non-success HTTP status onto a workspace error.
fn classify_status(status: StatusCode, detail: &str) -> WorkspaceError {
    match status {
        StatusCode::NOT_FOUND => WorkspaceError::NotFound,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            WorkspaceError::Unauthorized(format!("{status}: {detail}"))
        }
        StatusCode::REQUEST_TIMEOUT
        | StatusCode::TOO_MANY_REQUESTS
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            WorkspaceError::Unavailable(format!("{status}: {detail}"))
        }
        _ => WorkspaceError::Rejected(format!("{status}: {detail}")),
    }
}

/// Maps a transport-level failure onto a workspace error.
fn classify_transport(err: &reqwest::Error) -> WorkspaceError {
    if err.is_timeout() || err.is_connect() {
        return WorkspaceError::Unavailable(err.to_string());
    }
    WorkspaceError::Rejected(err.to_string())
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// REST client for one Azure ML workspace.
///
/// # Invariants
/// - Redirects are not followed.
/// - Every request is bounded by the configured timeout.
/// - Every request reuses the token resolved at connect time; the client
///   never re-resolves credentials.
pub struct AmlRestClient {
    /// Client configuration, including coordinates and limits.
    config: AmlClientConfig,
    /// HTTP client used for outbound requests.
    http: Client,
    /// Bearer token resolved at connect time.
    token: AccessToken,
}

impl AmlRestClient {
    /// Creates a new client for the configured workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Unavailable`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: AmlClientConfig, token: AccessToken) -> Result<Self, WorkspaceError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| WorkspaceError::Unavailable(format!("http client build: {err}")))?;
        Ok(Self {
            config,
            http,
            token,
        })
    }

    /// Builds the jobs collection URL for the configured workspace.
    fn jobs_url(&self, job_name: Option<&str>) -> Result<Url, WorkspaceError> {
        let coords = &self.config.coordinates;
        let mut path = format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.MachineLearningServices/workspaces/{}/jobs",
            self.config.endpoint.trim_end_matches('/'),
            coords.subscription_id,
            coords.resource_group,
            coords.workspace_name,
        );
        if let Some(name) = job_name {
            path.push('/');
            path.push_str(name);
        }
        let mut url = Url::parse(&path)
            .map_err(|err| WorkspaceError::Rejected(format!("invalid endpoint: {err}")))?;
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }

    /// Formats the authorization header from the session token.
    fn bearer(&self) -> String {
        format!("Bearer {}", self.token.secret())
    }

    /// Sends a request and decodes a JSON body, mapping failures.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, WorkspaceError> {
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(classify_status(status, truncate_detail(&detail)));
        }
        response
            .json::<T>()
            .await
            .map_err(|err| WorkspaceError::Rejected(format!("response decode: {err}")))
    }
}

/// Caps provider error text carried into diagnostics.
fn truncate_detail(detail: &str) -> &str {
    let limit = 512;
    match detail.char_indices().nth(limit) {
        Some((idx, _)) => &detail[..idx],
        None => detail,
    }
}

/// Builds the ARM request body for a job submission.
fn submission_body(submission: &JobSubmission) -> Value {
    let mut inputs = serde_json::Map::new();
    for (key, value) in &submission.definition.inputs {
        inputs.insert(key.clone(), value.clone());
    }
    // Payload keys are pass-through; the provider decides reject-vs-ignore.
    inputs.insert("input_data".to_string(), submission.input_data.clone());
    json!({
        "properties": {
            "jobType": "Pipeline",
            "displayName": submission.display_name,
            "experimentName": submission.experiment_name,
            "inputs": inputs,
        }
    })
}

#[async_trait]
impl MlWorkspaceClient for AmlRestClient {
    async fn create_job(&self, submission: &JobSubmission) -> Result<JobRecord, WorkspaceError> {
        let url = self.jobs_url(Some(&submission.job_name))?;
        let response = self
            .http
            .put(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .json(&submission_body(submission))
            .send()
            .await
            .map_err(|err| classify_transport(&err))?;
        let job: ArmJob = Self::decode(response).await?;
        Ok(to_record(job))
    }

    async fn list_jobs(&self) -> Result<Vec<JobRecord>, WorkspaceError> {
        let mut records = Vec::new();
        let mut next: Option<Url> = Some(self.jobs_url(None)?);
        let mut pages = 0_usize;
        while let Some(url) = next.take() {
            if pages == MAX_LIST_PAGES {
                break;
            }
            pages += 1;
            let response = self
                .http
                .get(url)
                .header(reqwest::header::AUTHORIZATION, self.bearer())
                .send()
                .await
                .map_err(|err| classify_transport(&err))?;
            let page: ArmJobList = Self::decode(response).await?;
            records.extend(page.value.into_iter().map(to_record));
            next = match page.next_link {
                Some(link) => Some(Url::parse(&link).map_err(|err| {
                    WorkspaceError::Rejected(format!("invalid next link: {err}"))
                })?),
                None => None,
            };
        }
        Ok(records)
    }

    async fn get_job(&self, job_name: &str) -> Result<JobRecord, WorkspaceError> {
        let url = self.jobs_url(Some(job_name))?;
        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .send()
            .await
            .map_err(|err| classify_transport(&err))?;
        let job: ArmJob = Self::decode(response).await?;
        Ok(to_record(job))
    }
}
