// crates/foundry-bridge-aml/src/credentials.rs
// ============================================================================
// Module: Credential Chain
// Description: Ordered credential providers for Azure ML bearer tokens.
// Purpose: Resolve a token by trying providers in priority order.
// Dependencies: foundry-bridge-core, reqwest, serde, url
// ============================================================================

//! ## Overview
//! Credential resolution follows an ordered fallback chain: each provider is
//! tried in priority order and the first success wins. When every provider
//! fails the chain reports exhaustion, which the bridge surfaces as
//! `AuthenticationFailed`. Token secrets are redacted from all `Debug`
//! output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use foundry_bridge_core::AccessToken;
use foundry_bridge_core::CredentialError;
use foundry_bridge_core::TokenCredential;
use serde::Deserialize;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default authority used for the client-credentials token flow.
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";

/// OAuth scope requested for ARM management-plane calls.
pub const MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";

/// Timeout applied to token endpoint requests.
const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// SECTION: Static Token
// ============================================================================

/// Credential provider backed by a pre-issued bearer token.
///
/// # Invariants
/// - The token is returned as-is; expiry is the caller's concern.
#[derive(Clone)]
pub struct StaticTokenCredential {
    /// Pre-issued bearer token.
    token: AccessToken,
}

impl StaticTokenCredential {
    /// Wraps a pre-issued bearer token.
    #[must_use]
    pub const fn new(token: AccessToken) -> Self {
        Self {
            token,
        }
    }
}

impl std::fmt::Debug for StaticTokenCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenCredential").field("token", &"<redacted>").finish()
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn token(&self) -> Result<AccessToken, CredentialError> {
        Ok(self.token.clone())
    }
}

// ============================================================================
// SECTION: Client Secret
// ============================================================================

/// Token endpoint response payload.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    /// Issued bearer token.
    access_token: String,
}

/// Credential provider using the AAD client-credentials flow.
///
/// # Invariants
/// - The token endpoint request is bounded by [`TOKEN_REQUEST_TIMEOUT`].
/// - The client secret is redacted from `Debug` output.
#[derive(Clone)]
pub struct ClientSecretCredential {
    /// AAD tenant identifier.
    tenant_id: String,
    /// Application (client) identifier.
    client_id: String,
    /// Application client secret.
    client_secret: String,
    /// Authority base URL for the token endpoint.
    authority: Url,
    /// HTTP client for token requests.
    http: reqwest::Client,
}

impl ClientSecretCredential {
    /// Creates a credential for the given tenant and application.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Unavailable`] when the HTTP client or
    /// authority URL cannot be constructed.
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        authority: Option<&str>,
    ) -> Result<Self, CredentialError> {
        let authority = Url::parse(authority.unwrap_or(DEFAULT_AUTHORITY))
            .map_err(|err| CredentialError::Unavailable(format!("invalid authority: {err}")))?;
        let http = reqwest::Client::builder()
            .timeout(TOKEN_REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| CredentialError::Unavailable(format!("http client build: {err}")))?;
        Ok(Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            authority,
            http,
        })
    }

    /// Builds the token endpoint URL for this tenant.
    fn token_endpoint(&self) -> Result<Url, CredentialError> {
        self.authority
            .join(&format!("{}/oauth2/v2.0/token", self.tenant_id))
            .map_err(|err| CredentialError::Unavailable(format!("token endpoint: {err}")))
    }
}

impl std::fmt::Debug for ClientSecretCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSecretCredential")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("authority", &self.authority.as_str())
            .finish()
    }
}

#[async_trait]
impl TokenCredential for ClientSecretCredential {
    async fn token(&self) -> Result<AccessToken, CredentialError> {
        let endpoint = self.token_endpoint()?;
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", MANAGEMENT_SCOPE),
        ];
        let response = self
            .http
            .post(endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|err| CredentialError::Unavailable(format!("token request: {err}")))?;
        if !response.status().is_success() {
            return Err(CredentialError::Unavailable(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }
        let payload: TokenResponse = response
            .json()
            .await
            .map_err(|err| CredentialError::Unavailable(format!("token decode: {err}")))?;
        Ok(AccessToken::new(payload.access_token))
    }
}

// ============================================================================
// SECTION: Chain
// ============================================================================

/// Ordered credential-resolution chain.
///
/// # Invariants
/// - Providers are tried strictly in registration order.
/// - The first success wins; later providers are not consulted.
pub struct CredentialChain {
    /// Providers in priority order.
    providers: Vec<Arc<dyn TokenCredential>>,
}

impl CredentialChain {
    /// Creates a chain from providers in priority order.
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn TokenCredential>>) -> Self {
        Self {
            providers,
        }
    }

    /// Builds the default chain from environment-style lookups.
    ///
    /// Priority order: pre-issued token from `AZURE_ACCESS_TOKEN`, then the
    /// client-credentials flow when `AZURE_TENANT_ID`, `AZURE_CLIENT_ID`,
    /// and `AZURE_CLIENT_SECRET` are all present.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Unavailable`] when a configured provider
    /// cannot be constructed.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CredentialError> {
        let mut providers: Vec<Arc<dyn TokenCredential>> = Vec::new();
        if let Some(raw) = lookup("AZURE_ACCESS_TOKEN") {
            providers.push(Arc::new(StaticTokenCredential::new(AccessToken::new(raw))));
        }
        if let (Some(tenant), Some(client), Some(secret)) = (
            lookup("AZURE_TENANT_ID"),
            lookup("AZURE_CLIENT_ID"),
            lookup("AZURE_CLIENT_SECRET"),
        ) {
            providers.push(Arc::new(ClientSecretCredential::new(tenant, client, secret, None)?));
        }
        Ok(Self::new(providers))
    }

    /// Returns the number of configured providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true when no providers are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[async_trait]
impl TokenCredential for CredentialChain {
    async fn token(&self) -> Result<AccessToken, CredentialError> {
        let mut failures = Vec::new();
        for provider in &self.providers {
            match provider.token().await {
                Ok(token) => return Ok(token),
                Err(err) => failures.push(err.to_string()),
            }
        }
        if failures.is_empty() {
            return Err(CredentialError::Exhausted(
                "no credential providers configured".to_string(),
            ));
        }
        Err(CredentialError::Exhausted(failures.join("; ")))
    }
}

#[cfg(test)]
mod tests;
