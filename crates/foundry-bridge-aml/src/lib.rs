// crates/foundry-bridge-aml/src/lib.rs
// ============================================================================
// Module: Foundry Bridge AML
// Description: Azure ML enterprise bridge, credential chain, and REST client.
// Purpose: Translate the three enterprise operations into workspace calls.
// Dependencies: foundry-bridge-core, reqwest, serde_yaml, tokio
// ============================================================================

//! ## Overview
//! This crate implements the enterprise side of the gateway: an ordered
//! credential-resolution chain, a bounded Azure ML REST client, a file-based
//! pipeline definition resolver, and the bridge that ties them together
//! behind a lazily-initialized, single-flight session.
//! Invariants:
//! - Authentication resolves at most once per process across concurrent
//!   first callers; a cached session is never invalidated by later failures.
//! - Every outbound call is bounded by a timeout and fails closed.
//!
//! Security posture: provider responses and pipeline references are
//! untrusted input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod bridge;
pub mod client;
pub mod credentials;
pub mod pipeline;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bridge::AmlBridge;
pub use bridge::AmlConnector;
pub use client::AmlClientConfig;
pub use client::AmlRestClient;
pub use credentials::ClientSecretCredential;
pub use credentials::CredentialChain;
pub use credentials::StaticTokenCredential;
pub use pipeline::FilePipelineResolver;
