// crates/foundry-bridge-mcp/src/server.rs
// ============================================================================
// Module: Gateway HTTP Server
// Description: Axum transport exposing the dispatch gateway over HTTP.
// Purpose: Serve the tool surface with envelope-stable error responses.
// Dependencies: axum, foundry-bridge-aml, foundry-bridge-contract,
// foundry-bridge-core, serde_json, tokio
// ============================================================================

//! ## Overview
//! HTTP transport for the gateway: an info route, the tool listing, the
//! tool-call route, and health/readiness probes. Every tool-call response is
//! the normalized envelope; the HTTP status mirrors the error kind as a
//! convenience for conventional HTTP clients, but callers branch on the
//! body's `status` discriminator. A malformed request body produces the same
//! envelope with `InvalidParameters` rather than a transport-level fault.
//!
//! Security posture: request bodies are untrusted input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use foundry_bridge_aml::AmlBridge;
use foundry_bridge_aml::AmlClientConfig;
use foundry_bridge_aml::AmlConnector;
use foundry_bridge_aml::CredentialChain;
use foundry_bridge_aml::FilePipelineResolver;
use foundry_bridge_contract::ToolName;
use foundry_bridge_contract::tool_definitions;
use foundry_bridge_contract::tool_descriptors;
use foundry_bridge_core::BridgeError;
use foundry_bridge_core::CredentialError;
use foundry_bridge_core::EnterpriseBridge;
use foundry_bridge_core::ErrorKind;
use foundry_bridge_core::ExperimentSummary;
use foundry_bridge_core::GatewayError;
use foundry_bridge_core::JobHandle;
use foundry_bridge_core::ToolRequest;
use foundry_bridge_core::ToolResponse;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ConfigError;
use crate::config::GatewayConfig;
use crate::config::ServerConfig;
use crate::telemetry::GatewayMetricEvent;
use crate::telemetry::GatewayMetrics;
use crate::telemetry::NoopMetrics;
use crate::telemetry::RequestOutcome;
use crate::tools::ToolRouter;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures raised while starting or running the server.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Configuration was invalid at startup.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Credential chain construction failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),
    /// Bind or accept failure on the listener.
    #[error("server io: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// SECTION: State
// ============================================================================

/// Shared per-process server state.
///
/// # Invariants
/// - Read-only after startup; shared across requests without locking.
pub struct GatewayState {
    /// Tool router handling dispatch.
    router: ToolRouter,
    /// Server configuration for the info route.
    server: ServerConfig,
    /// Metrics sink for request counters and latencies.
    metrics: Arc<dyn GatewayMetrics>,
}

impl GatewayState {
    /// Builds server state from a router and configuration.
    #[must_use]
    pub fn new(router: ToolRouter, server: ServerConfig, metrics: Arc<dyn GatewayMetrics>) -> Self {
        Self {
            router,
            server,
            metrics,
        }
    }
}

// ============================================================================
// SECTION: Bootstrap
// ============================================================================

/// Bridge used when the workspace coordinates are not configured.
///
/// # Invariants
/// - Every operation fails with `WorkspaceUnavailable`; the gateway stays up
///   so the local tools keep working.
struct UnconfiguredBridge;

/// Message reported by every operation of the unconfigured bridge.
const UNCONFIGURED_MESSAGE: &str = "workspace not configured: set AZURE_SUBSCRIPTION_ID, \
                                    AZURE_RESOURCE_GROUP, and AZURE_ML_WORKSPACE";

#[async_trait]
impl EnterpriseBridge for UnconfiguredBridge {
    async fn submit_pipeline(
        &self,
        _pipeline_reference: &str,
        _payload: &Map<String, Value>,
        _experiment_name: &str,
    ) -> Result<JobHandle, BridgeError> {
        Err(BridgeError::WorkspaceUnavailable(UNCONFIGURED_MESSAGE.to_string()))
    }

    async fn list_experiments(&self) -> Result<Vec<ExperimentSummary>, BridgeError> {
        Err(BridgeError::WorkspaceUnavailable(UNCONFIGURED_MESSAGE.to_string()))
    }

    async fn get_job_status(&self, _job_name: &str) -> Result<JobHandle, BridgeError> {
        Err(BridgeError::WorkspaceUnavailable(UNCONFIGURED_MESSAGE.to_string()))
    }
}

/// Builds the enterprise bridge for the configured workspace.
///
/// Without workspace coordinates the gateway still serves the local tools;
/// enterprise calls then fail with `WorkspaceUnavailable`.
///
/// # Errors
///
/// Returns [`CredentialError`] when a configured credential provider cannot
/// be constructed.
pub fn build_bridge(config: &GatewayConfig) -> Result<Arc<dyn EnterpriseBridge>, CredentialError> {
    let Some(coordinates) = config.workspace.clone() else {
        return Ok(Arc::new(UnconfiguredBridge));
    };
    let credential = Arc::new(CredentialChain::from_lookup(|name| env::var(name).ok())?);
    let mut client_config = AmlClientConfig::new(coordinates);
    client_config.timeout_ms = config.request_timeout_ms;
    let connector = AmlConnector::new(client_config, credential);
    let resolver = FilePipelineResolver::new(&config.pipeline_root);
    Ok(Arc::new(AmlBridge::new(Arc::new(resolver), Arc::new(connector))))
}

// ============================================================================
// SECTION: Status Mapping
// ============================================================================

/// Maps an error kind onto the HTTP status mirrored alongside the envelope.
#[must_use]
pub const fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::UnknownTool | ErrorKind::InvalidParameters => StatusCode::BAD_REQUEST,
        ErrorKind::AuthenticationFailed => StatusCode::UNAUTHORIZED,
        ErrorKind::JobNotFound | ErrorKind::DefinitionNotFound => StatusCode::NOT_FOUND,
        ErrorKind::SubmissionFailed | ErrorKind::WorkspaceUnavailable => StatusCode::BAD_GATEWAY,
    }
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Serves server identity and the registered tool names.
async fn handle_info(State(state): State<Arc<GatewayState>>) -> Response {
    let tools: Vec<&'static str> =
        tool_descriptors().into_iter().map(|descriptor| descriptor.name.as_str()).collect();
    json_response(
        StatusCode::OK,
        &json!({
            "name": state.server.name,
            "version": env!("CARGO_PKG_VERSION"),
            "tools": tools,
        }),
    )
}

/// Serves the tool listing with input schemas.
async fn handle_tools() -> Response {
    json_response(StatusCode::OK, &json!({"tools": tool_definitions()}))
}

/// Handles one tool call: parse, dispatch, record metrics, respond.
async fn handle_call(State(state): State<Arc<GatewayState>>, body: Bytes) -> Response {
    let started = Instant::now();
    let (response, tool) = match serde_json::from_slice::<ToolRequest>(&body) {
        Ok(request) => {
            let tool = request.tool_name.parse::<ToolName>().ok();
            (state.router.dispatch(&request).await, tool)
        }
        Err(err) => {
            let fault = GatewayError::invalid_parameter("body", format!("malformed request: {err}"));
            (ToolResponse::failure(&fault), None)
        }
    };
    let status = response.error_kind().map_or(StatusCode::OK, status_for_kind);
    let payload = serde_json::to_vec(&response).unwrap_or_default();
    let event = GatewayMetricEvent {
        tool,
        outcome: match response.error_kind() {
            None => RequestOutcome::Ok,
            Some(_) => RequestOutcome::Error,
        },
        error_kind: response.error_kind().map(ErrorKind::as_str),
        request_bytes: body.len(),
        response_bytes: payload.len(),
    };
    state.metrics.record_request(event.clone());
    state.metrics.record_latency(event, started.elapsed());
    (status, [(CONTENT_TYPE, "application/json")], payload).into_response()
}

/// Liveness probe.
async fn handle_health() -> Response {
    json_response(StatusCode::OK, &json!({"status": "ok"}))
}

/// Readiness probe; the registry is built at startup, so ready equals alive.
async fn handle_ready() -> Response {
    json_response(StatusCode::OK, &json!({"status": "ready"}))
}

/// Encodes a JSON body with the given status.
fn json_response(status: StatusCode, body: &Value) -> Response {
    let payload = serde_json::to_vec(body).unwrap_or_default();
    (status, [(CONTENT_TYPE, "application/json")], payload).into_response()
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Builds the axum router over shared gateway state.
#[must_use]
pub fn build_router(state: Arc<GatewayState>, call_route: &str) -> Router {
    Router::new()
        .route("/", get(handle_info))
        .route("/tools", get(handle_tools))
        .route(call_route, post(handle_call))
        .route("/healthz", get(handle_health))
        .route("/readyz", get(handle_ready))
        .with_state(state)
}

/// HTTP server wrapping the dispatch gateway.
pub struct GatewayServer {
    /// Resolved gateway configuration.
    config: GatewayConfig,
    /// Shared request state.
    state: Arc<GatewayState>,
}

impl GatewayServer {
    /// Builds a server from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError::Credential`] when a configured credential
    /// provider cannot be constructed.
    pub fn new(config: GatewayConfig) -> Result<Self, ServeError> {
        let bridge = build_bridge(&config)?;
        Ok(Self::with_bridge(config, bridge, Arc::new(NoopMetrics)))
    }

    /// Builds a server over an explicit bridge and metrics sink.
    #[must_use]
    pub fn with_bridge(
        config: GatewayConfig,
        bridge: Arc<dyn EnterpriseBridge>,
        metrics: Arc<dyn GatewayMetrics>,
    ) -> Self {
        let state = Arc::new(GatewayState::new(
            ToolRouter::new(bridge),
            config.server.clone(),
            metrics,
        ));
        Self {
            config,
            state,
        }
    }

    /// Binds the listener and serves until the process is stopped.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError`] on configuration or listener failure.
    pub async fn serve(self) -> Result<(), ServeError> {
        let addr = self.config.server.bind_addr()?;
        let router = build_router(Arc::clone(&self.state), &self.config.server.call_route());
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;
        Ok(())
    }
}
