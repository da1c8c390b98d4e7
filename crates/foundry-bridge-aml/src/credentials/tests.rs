// crates/foundry-bridge-aml/src/credentials/tests.rs
// ============================================================================
// Module: Credential Chain Unit Tests
// Description: Unit tests for ordered credential resolution.
// Purpose: Validate priority order, first-success, and exhaustion behavior.
// Dependencies: foundry-bridge-aml, foundry-bridge-core
// ============================================================================

//! ## Overview
//! Exercises the credential chain with counting stubs: providers are tried
//! strictly in order, the first success wins, and an exhausted chain reports
//! every failure.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::use_debug,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use foundry_bridge_core::AccessToken;
use foundry_bridge_core::CredentialError;
use foundry_bridge_core::TokenCredential;

use super::ClientSecretCredential;
use super::CredentialChain;
use super::StaticTokenCredential;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

struct CountingCredential {
    calls: Arc<AtomicUsize>,
    outcome: Result<String, String>,
}

impl CountingCredential {
    fn succeeding(calls: Arc<AtomicUsize>, token: &str) -> Self {
        Self {
            calls,
            outcome: Ok(token.to_string()),
        }
    }

    fn failing(calls: Arc<AtomicUsize>, message: &str) -> Self {
        Self {
            calls,
            outcome: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl TokenCredential for CountingCredential {
    async fn token(&self) -> Result<AccessToken, CredentialError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(token) => Ok(AccessToken::new(token.clone())),
            Err(message) => Err(CredentialError::Unavailable(message.clone())),
        }
    }
}

// ============================================================================
// SECTION: Chain Ordering
// ============================================================================

#[tokio::test]
async fn first_success_wins_and_later_providers_are_not_consulted() {
    let first_calls = Arc::new(AtomicUsize::new(0));
    let second_calls = Arc::new(AtomicUsize::new(0));
    let chain = CredentialChain::new(vec![
        Arc::new(CountingCredential::succeeding(Arc::clone(&first_calls), "tok-1")),
        Arc::new(CountingCredential::succeeding(Arc::clone(&second_calls), "tok-2")),
    ]);
    let token = chain.token().await.expect("token");
    assert_eq!(token.secret(), "tok-1");
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn chain_falls_through_failures_in_order() {
    let first_calls = Arc::new(AtomicUsize::new(0));
    let second_calls = Arc::new(AtomicUsize::new(0));
    let chain = CredentialChain::new(vec![
        Arc::new(CountingCredential::failing(Arc::clone(&first_calls), "env missing")),
        Arc::new(CountingCredential::succeeding(Arc::clone(&second_calls), "tok-2")),
    ]);
    let token = chain.token().await.expect("token");
    assert_eq!(token.secret(), "tok-2");
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn exhausted_chain_reports_every_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = CredentialChain::new(vec![
        Arc::new(CountingCredential::failing(Arc::clone(&calls), "first reason")),
        Arc::new(CountingCredential::failing(Arc::clone(&calls), "second reason")),
    ]);
    let err = chain.token().await.expect_err("exhausted");
    let rendered = err.to_string();
    assert!(rendered.contains("first reason"));
    assert!(rendered.contains("second reason"));
}

#[tokio::test]
async fn empty_chain_is_exhausted_immediately() {
    let chain = CredentialChain::new(Vec::new());
    let err = chain.token().await.expect_err("exhausted");
    assert!(err.to_string().contains("no credential providers configured"));
}

// ============================================================================
// SECTION: Environment Construction
// ============================================================================

#[test]
fn from_lookup_prefers_static_token_then_client_secret() {
    let chain = CredentialChain::from_lookup(|key| match key {
        "AZURE_ACCESS_TOKEN" => Some("pre-issued".to_string()),
        "AZURE_TENANT_ID" => Some("tenant".to_string()),
        "AZURE_CLIENT_ID" => Some("client".to_string()),
        "AZURE_CLIENT_SECRET" => Some("secret".to_string()),
        _ => None,
    })
    .expect("chain");
    assert_eq!(chain.len(), 2);
}

#[test]
fn from_lookup_with_no_variables_builds_an_empty_chain() {
    let chain = CredentialChain::from_lookup(|_| None).expect("chain");
    assert!(chain.is_empty());
}

#[test]
fn client_secret_requires_all_three_variables() {
    let chain = CredentialChain::from_lookup(|key| match key {
        "AZURE_TENANT_ID" => Some("tenant".to_string()),
        "AZURE_CLIENT_ID" => Some("client".to_string()),
        _ => None,
    })
    .expect("chain");
    assert!(chain.is_empty());
}

// ============================================================================
// SECTION: Redaction
// ============================================================================

#[tokio::test]
async fn static_credential_returns_its_token_and_redacts_debug() {
    let credential = StaticTokenCredential::new(AccessToken::new("abc".to_string()));
    assert!(!format!("{credential:?}").contains("abc"));
    let token = credential.token().await.expect("token");
    assert_eq!(token.secret(), "abc");
}

#[test]
fn client_secret_debug_redacts_secret() {
    let credential =
        ClientSecretCredential::new("tenant", "client", "s3cr3t", None).expect("credential");
    let rendered = format!("{credential:?}");
    assert!(!rendered.contains("s3cr3t"));
    assert!(rendered.contains("tenant"));
}
