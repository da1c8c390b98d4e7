// crates/foundry-bridge-mcp/src/telemetry.rs
// ============================================================================
// Module: Gateway Telemetry
// Description: Observability hooks for transport and tool dispatch.
// Purpose: Provide metric events and latency buckets without hard deps.
// Dependencies: foundry-bridge-contract
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for gateway request counters
//! and latency histograms. It is intentionally dependency-light so downstream
//! deployments can plug in Prometheus or OpenTelemetry without redesign.
//! Security posture: telemetry must avoid leaking parameter values or tokens
//! and treat labels as untrusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use foundry_bridge_contract::ToolName;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default latency buckets in milliseconds for gateway request histograms.
pub const GATEWAY_LATENCY_BUCKETS_MS: &[u64] =
    &[1, 2, 5, 10, 25, 50, 100, 250, 500, 1_000, 2_500, 5_000, 10_000, 30_000];

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// Gateway request outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RequestOutcome {
    /// Successful request.
    Ok,
    /// Failed request.
    Error,
}

impl RequestOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

/// Gateway request metric event payload.
///
/// # Invariants
/// - Optional fields are `None` when the metadata is unavailable.
#[derive(Debug, Clone)]
pub struct GatewayMetricEvent {
    /// Tool name when the request named a registered tool.
    pub tool: Option<ToolName>,
    /// Request outcome.
    pub outcome: RequestOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Metrics sink for gateway requests and latencies.
pub trait GatewayMetrics: Send + Sync {
    /// Records a request counter event.
    fn record_request(&self, event: GatewayMetricEvent);
    /// Records a latency observation for the request.
    fn record_latency(&self, event: GatewayMetricEvent, latency: Duration);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are intentionally discarded.
pub struct NoopMetrics;

impl GatewayMetrics for NoopMetrics {
    fn record_request(&self, _event: GatewayMetricEvent) {}

    fn record_latency(&self, _event: GatewayMetricEvent, _latency: Duration) {}
}
