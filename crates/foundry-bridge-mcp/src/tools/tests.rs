// crates/foundry-bridge-mcp/src/tools/tests.rs
// ============================================================================
// Module: Tool Router Unit Tests
// Description: Unit tests for dispatch, validation, and handler contracts.
// Purpose: Validate router behavior against a counting stub bridge.
// Dependencies: foundry-bridge-mcp, foundry-bridge-core, proptest
// ============================================================================

//! ## Overview
//! Exercises the router end to end: exact envelopes for the local handlers,
//! parameter validation that never reaches a handler, pass-through of bridge
//! error kinds, and the commutativity property for addition.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use foundry_bridge_core::BridgeError;
use foundry_bridge_core::EnterpriseBridge;
use foundry_bridge_core::ExperimentSummary;
use foundry_bridge_core::JobHandle;
use foundry_bridge_core::JobStatus;
use foundry_bridge_core::ToolRequest;
use proptest::prelude::*;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use super::ToolRouter;
use super::format_number;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Counting bridge stub; optionally fails every call with a fixed error.
struct StubBridge {
    calls: AtomicUsize,
    fail_with: Option<BridgeError>,
    last_payload: Mutex<Option<Map<String, Value>>>,
}

impl StubBridge {
    fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_with: None,
            last_payload: Mutex::new(None),
        })
    }

    fn failing(err: BridgeError) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_with: Some(err),
            last_payload: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), BridgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EnterpriseBridge for StubBridge {
    async fn submit_pipeline(
        &self,
        _pipeline_reference: &str,
        payload: &Map<String, Value>,
        _experiment_name: &str,
    ) -> Result<JobHandle, BridgeError> {
        self.check()?;
        *self.last_payload.lock().expect("lock") = Some(payload.clone());
        Ok(JobHandle {
            job_name: "mcp-1-abc".to_string(),
            job_id: "/jobs/mcp-1-abc".to_string(),
            status: JobStatus::Submitted,
        })
    }

    async fn list_experiments(&self) -> Result<Vec<ExperimentSummary>, BridgeError> {
        self.check()?;
        Ok(vec![
            ExperimentSummary {
                name: "alpha".to_string(),
                description: None,
            },
            ExperimentSummary {
                name: "zeta".to_string(),
                description: Some("nightly".to_string()),
            },
        ])
    }

    async fn get_job_status(&self, job_name: &str) -> Result<JobHandle, BridgeError> {
        self.check()?;
        Ok(JobHandle {
            job_name: job_name.to_string(),
            job_id: format!("/jobs/{job_name}"),
            status: JobStatus::Running,
        })
    }
}

fn request(tool_name: &str, parameters: Value) -> ToolRequest {
    serde_json::from_value(json!({
        "tool_name": tool_name,
        "parameters": parameters,
    }))
    .expect("request")
}

async fn dispatch_json(router: &ToolRouter, req: &ToolRequest) -> Value {
    serde_json::to_value(router.dispatch(req).await).expect("encode response")
}

// ============================================================================
// SECTION: Local Handlers
// ============================================================================

#[tokio::test]
async fn greet_returns_the_exact_welcome_string() {
    let router = ToolRouter::new(StubBridge::succeeding());
    let response = dispatch_json(&router, &request("greet", json!({"name": "Azure"}))).await;
    assert_eq!(
        response,
        json!({
            "status": "success",
            "result": "Hello, Azure! Welcome to the MCP Foundry ML integration.",
        })
    );
}

#[tokio::test]
async fn add_numbers_end_to_end_envelope_is_exact() {
    let router = ToolRouter::new(StubBridge::succeeding());
    let response = dispatch_json(&router, &request("add_numbers", json!({"a": 42, "b": 58}))).await;
    assert_eq!(
        response,
        json!({
            "status": "success",
            "result": {
                "sum": 100,
                "inputs": {"a": 42, "b": 58},
                "operation": "42 + 58 = 100",
            },
        })
    );
}

#[tokio::test]
async fn add_numbers_keeps_fractional_results() {
    let router = ToolRouter::new(StubBridge::succeeding());
    let response =
        dispatch_json(&router, &request("add_numbers", json!({"a": 0.5, "b": 2}))).await;
    assert_eq!(response["result"]["sum"], json!(2.5));
    assert_eq!(response["result"]["operation"], json!("0.5 + 2 = 2.5"));
}

#[tokio::test]
async fn empty_greet_name_is_rejected() {
    let router = ToolRouter::new(StubBridge::succeeding());
    let response = dispatch_json(&router, &request("greet", json!({"name": ""}))).await;
    assert_eq!(response["status"], json!("error"));
    assert_eq!(response["error"]["kind"], json!("InvalidParameters"));
}

// ============================================================================
// SECTION: Dispatch Guards
// ============================================================================

#[tokio::test]
async fn unknown_tool_yields_the_error_envelope_without_any_handler_call() {
    let bridge = StubBridge::succeeding();
    let router = ToolRouter::new(Arc::clone(&bridge) as Arc<dyn EnterpriseBridge>);
    let response = dispatch_json(&router, &request("unknown_tool", json!({}))).await;
    assert_eq!(response["status"], json!("error"));
    assert_eq!(response["error"]["kind"], json!("UnknownTool"));
    assert_eq!(bridge.calls(), 0);
}

#[tokio::test]
async fn tool_names_are_case_sensitive() {
    let router = ToolRouter::new(StubBridge::succeeding());
    let response = dispatch_json(&router, &request("Greet", json!({"name": "Azure"}))).await;
    assert_eq!(response["error"]["kind"], json!("UnknownTool"));
}

#[tokio::test]
async fn missing_required_parameter_never_reaches_the_bridge() {
    let bridge = StubBridge::succeeding();
    let router = ToolRouter::new(Arc::clone(&bridge) as Arc<dyn EnterpriseBridge>);
    let response = dispatch_json(
        &router,
        &request("run_aml_pipeline", json!({"pipeline_job_yaml": "jobs/pipeline.yml"})),
    )
    .await;
    assert_eq!(response["error"]["kind"], json!("InvalidParameters"));
    assert!(
        response["error"]["message"]
            .as_str()
            .expect("message")
            .contains("experiment_name")
    );
    assert_eq!(bridge.calls(), 0);
}

#[tokio::test]
async fn mistyped_parameter_names_the_field() {
    let router = ToolRouter::new(StubBridge::succeeding());
    let response =
        dispatch_json(&router, &request("add_numbers", json!({"a": "42", "b": 58}))).await;
    assert_eq!(response["error"]["kind"], json!("InvalidParameters"));
    assert!(response["error"]["message"].as_str().expect("message").contains('a'));
}

#[tokio::test]
async fn unexpected_parameter_is_rejected() {
    let router = ToolRouter::new(StubBridge::succeeding());
    let response = dispatch_json(
        &router,
        &request("greet", json!({"name": "Azure", "shout": true})),
    )
    .await;
    assert_eq!(response["error"]["kind"], json!("InvalidParameters"));
}

// ============================================================================
// SECTION: Enterprise Handlers
// ============================================================================

#[tokio::test]
async fn run_pipeline_reports_the_submitted_job() {
    let router = ToolRouter::new(StubBridge::succeeding());
    let response = dispatch_json(
        &router,
        &request(
            "run_aml_pipeline",
            json!({
                "pipeline_job_yaml": "jobs/pipeline.yml",
                "experiment_name": "demo",
                "payload": {"message": "hello"},
            }),
        ),
    )
    .await;
    assert_eq!(
        response,
        json!({
            "status": "success",
            "result": {
                "status": "submitted",
                "job": {
                    "job_name": "mcp-1-abc",
                    "job_id": "/jobs/mcp-1-abc",
                    "status": "Submitted",
                },
                "message": "pipeline job mcp-1-abc submitted",
            },
        })
    );
}

#[tokio::test]
async fn omitted_payload_defaults_to_an_empty_object() {
    let bridge = StubBridge::succeeding();
    let router = ToolRouter::new(Arc::clone(&bridge) as Arc<dyn EnterpriseBridge>);
    dispatch_json(
        &router,
        &request(
            "run_aml_pipeline",
            json!({"pipeline_job_yaml": "jobs/pipeline.yml", "experiment_name": "demo"}),
        ),
    )
    .await;
    let payload = bridge.last_payload.lock().expect("lock").clone().expect("payload");
    assert!(payload.is_empty());
}

#[tokio::test]
async fn list_experiments_reports_summaries_and_count() {
    let router = ToolRouter::new(StubBridge::succeeding());
    let response = dispatch_json(&router, &request("list_aml_experiments", json!({}))).await;
    assert_eq!(
        response["result"],
        json!({
            "status": "success",
            "experiments": [
                {"name": "alpha", "description": null},
                {"name": "zeta", "description": "nightly"},
            ],
            "count": 2,
        })
    );
}

#[tokio::test]
async fn job_status_reports_the_handle() {
    let router = ToolRouter::new(StubBridge::succeeding());
    let response =
        dispatch_json(&router, &request("get_aml_job_status", json!({"job_name": "mcp-1-abc"})))
            .await;
    assert_eq!(
        response["result"],
        json!({
            "job_name": "mcp-1-abc",
            "job_id": "/jobs/mcp-1-abc",
            "status": "Running",
        })
    );
}

#[tokio::test]
async fn empty_job_name_never_reaches_the_bridge() {
    let bridge = StubBridge::succeeding();
    let router = ToolRouter::new(Arc::clone(&bridge) as Arc<dyn EnterpriseBridge>);
    let response =
        dispatch_json(&router, &request("get_aml_job_status", json!({"job_name": ""}))).await;
    assert_eq!(response["error"]["kind"], json!("InvalidParameters"));
    assert_eq!(bridge.calls(), 0);
}

#[tokio::test]
async fn bridge_error_kinds_pass_through_unchanged() {
    let cases = [
        (BridgeError::DefinitionNotFound("jobs/absent.yml".to_string()), "DefinitionNotFound"),
        (BridgeError::SubmissionFailed("quota exceeded".to_string()), "SubmissionFailed"),
        (BridgeError::AuthenticationFailed("chain exhausted".to_string()), "AuthenticationFailed"),
    ];
    for (err, kind) in cases {
        let router = ToolRouter::new(StubBridge::failing(err));
        let response = dispatch_json(
            &router,
            &request(
                "run_aml_pipeline",
                json!({"pipeline_job_yaml": "jobs/pipeline.yml", "experiment_name": "demo"}),
            ),
        )
        .await;
        assert_eq!(response["error"]["kind"], json!(kind));
    }
}

#[tokio::test]
async fn missing_job_passes_job_not_found_through() {
    let router =
        ToolRouter::new(StubBridge::failing(BridgeError::JobNotFound("mcp-0-gone".to_string())));
    let response =
        dispatch_json(&router, &request("get_aml_job_status", json!({"job_name": "mcp-0-gone"})))
            .await;
    assert_eq!(response["error"]["kind"], json!("JobNotFound"));
    assert_eq!(response["error"]["message"], json!("job not found: mcp-0-gone"));
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn addition_is_commutative(a in -1.0e12_f64..1.0e12, b in -1.0e12_f64..1.0e12) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        let router = ToolRouter::new(StubBridge::succeeding());
        let forward = runtime
            .block_on(async { dispatch_json(&router, &request("add_numbers", json!({"a": a, "b": b}))).await });
        let reverse = runtime
            .block_on(async { dispatch_json(&router, &request("add_numbers", json!({"b": a, "a": b}))).await });
        assert_eq!(forward["result"]["sum"], reverse["result"]["sum"]);
    }

    #[test]
    fn operation_string_round_trips_through_the_sum(a in -1.0e6_f64..1.0e6, b in -1.0e6_f64..1.0e6) {
        let operation =
            format!("{} + {} = {}", format_number(a), format_number(b), format_number(a + b));
        let rendered_sum = operation.rsplit(" = ").next().expect("sum segment");
        let parsed: f64 = rendered_sum.parse().expect("parse sum");
        assert!((parsed - (a + b)).abs() < 1.0e-6);
    }
}
