// crates/foundry-bridge-mcp/src/config.rs
// ============================================================================
// Module: Gateway Configuration
// Description: Environment-driven configuration for the dispatch gateway.
// Purpose: Provide strict, fail-closed config resolution with hard limits.
// Dependencies: foundry-bridge-core, thiserror
// ============================================================================

//! ## Overview
//! Configuration is resolved from environment variables through an injectable
//! lookup so tests never mutate process-global state. Unset variables fall
//! back to documented defaults; present-but-invalid values fail closed. The
//! workspace coordinates are all-or-nothing: a partially configured workspace
//! is an error rather than a silently disabled bridge.
//!
//! Security posture: environment values are untrusted input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::net::IpAddr;
use std::net::SocketAddr;
use std::path::PathBuf;

use foundry_bridge_core::WorkspaceCoordinates;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the server instance.
pub const ENV_SERVER_NAME: &str = "MCP_SERVER_NAME";
/// Environment variable for the bind host.
pub const ENV_SERVER_HOST: &str = "MCP_SERVER_HOST";
/// Environment variable for the bind port.
pub const ENV_SERVER_PORT: &str = "MCP_SERVER_PORT";
/// Environment variable for the tool-call route prefix.
pub const ENV_SERVER_PATH: &str = "MCP_SERVER_PATH";
/// Environment variable for the Azure subscription identifier.
pub const ENV_SUBSCRIPTION_ID: &str = "AZURE_SUBSCRIPTION_ID";
/// Environment variable for the Azure resource group.
pub const ENV_RESOURCE_GROUP: &str = "AZURE_RESOURCE_GROUP";
/// Environment variable for the Azure ML workspace name.
pub const ENV_WORKSPACE_NAME: &str = "AZURE_ML_WORKSPACE";
/// Environment variable for the pipeline definition root directory.
pub const ENV_PIPELINE_ROOT: &str = "AML_PIPELINE_ROOT";
/// Environment variable for the outbound request timeout.
pub const ENV_REQUEST_TIMEOUT_MS: &str = "AML_REQUEST_TIMEOUT_MS";

/// Default server instance name.
pub const DEFAULT_SERVER_NAME: &str = "foundry-bridge";
/// Default bind host.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
/// Default bind port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;
/// Default tool-call route prefix.
pub const DEFAULT_SERVER_PATH: &str = "/mcp";
/// Default pipeline definition root directory.
pub const DEFAULT_PIPELINE_ROOT: &str = "aml";
/// Default outbound request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
/// Minimum allowed outbound request timeout in milliseconds.
pub const MIN_REQUEST_TIMEOUT_MS: u64 = 1_000;
/// Maximum allowed outbound request timeout in milliseconds.
pub const MAX_REQUEST_TIMEOUT_MS: u64 = 300_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration resolution errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages name the offending variable, never its value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is present but cannot be parsed or is out of range.
    #[error("invalid value for {name}: {reason}")]
    InvalidVariable {
        /// Variable name.
        name: String,
        /// Parse or range failure detail.
        reason: String,
    },
    /// Workspace coordinates are partially configured.
    #[error("incomplete workspace configuration: {name} is not set")]
    IncompleteWorkspace {
        /// Missing variable name.
        name: String,
    },
}

impl ConfigError {
    /// Builds an invalid-variable error for the named variable.
    fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidVariable {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// SECTION: Server Configuration
// ============================================================================

/// HTTP server configuration.
///
/// # Invariants
/// - `path` starts with `/` and carries no trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server instance name reported on the info route.
    pub name: String,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Tool-call route prefix.
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            path: DEFAULT_SERVER_PATH.to_string(),
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVariable`] when the host does not parse
    /// as an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::invalid(ENV_SERVER_HOST, "not an IP address"))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Returns the tool-call route, `{path}/call`.
    #[must_use]
    pub fn call_route(&self) -> String {
        format!("{}/call", self.path)
    }
}

// ============================================================================
// SECTION: Gateway Configuration
// ============================================================================

/// Resolved gateway configuration.
///
/// # Invariants
/// - `workspace` is `Some` only when all three coordinates are set.
/// - `request_timeout_ms` is within the documented bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Azure ML workspace coordinates, when fully configured.
    pub workspace: Option<WorkspaceCoordinates>,
    /// Root directory for pipeline definition references.
    pub pipeline_root: PathBuf,
    /// Outbound request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl GatewayConfig {
    /// Resolves configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a present variable is invalid or the
    /// workspace coordinates are partially configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolves configuration from an environment-style lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a present variable is invalid or the
    /// workspace coordinates are partially configured.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let name = lookup(ENV_SERVER_NAME).unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string());
        let host = lookup(ENV_SERVER_HOST).unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string());
        let port = match lookup(ENV_SERVER_PORT) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::invalid(ENV_SERVER_PORT, "not a port number"))?,
            None => DEFAULT_SERVER_PORT,
        };
        let path = normalize_path(
            &lookup(ENV_SERVER_PATH).unwrap_or_else(|| DEFAULT_SERVER_PATH.to_string()),
        )?;
        let workspace = resolve_workspace(&lookup)?;
        let pipeline_root = PathBuf::from(
            lookup(ENV_PIPELINE_ROOT).unwrap_or_else(|| DEFAULT_PIPELINE_ROOT.to_string()),
        );
        let request_timeout_ms = match lookup(ENV_REQUEST_TIMEOUT_MS) {
            Some(raw) => {
                let parsed = raw
                    .parse::<u64>()
                    .map_err(|_| ConfigError::invalid(ENV_REQUEST_TIMEOUT_MS, "not a number"))?;
                if !(MIN_REQUEST_TIMEOUT_MS..=MAX_REQUEST_TIMEOUT_MS).contains(&parsed) {
                    return Err(ConfigError::invalid(
                        ENV_REQUEST_TIMEOUT_MS,
                        format!(
                            "must be between {MIN_REQUEST_TIMEOUT_MS} and {MAX_REQUEST_TIMEOUT_MS}"
                        ),
                    ));
                }
                parsed
            }
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };
        Ok(Self {
            server: ServerConfig {
                name,
                host,
                port,
                path,
            },
            workspace,
            pipeline_root,
            request_timeout_ms,
        })
    }
}

/// Normalizes the route prefix: leading slash required, trailing removed.
fn normalize_path(raw: &str) -> Result<String, ConfigError> {
    if !raw.starts_with('/') || raw.len() < 2 {
        return Err(ConfigError::invalid(
            ENV_SERVER_PATH,
            "must start with '/' and name a route",
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Resolves workspace coordinates; all three variables or none.
fn resolve_workspace(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Option<WorkspaceCoordinates>, ConfigError> {
    let subscription_id = lookup(ENV_SUBSCRIPTION_ID);
    let resource_group = lookup(ENV_RESOURCE_GROUP);
    let workspace_name = lookup(ENV_WORKSPACE_NAME);
    match (subscription_id, resource_group, workspace_name) {
        (None, None, None) => Ok(None),
        (Some(subscription_id), Some(resource_group), Some(workspace_name)) => {
            Ok(Some(WorkspaceCoordinates {
                subscription_id,
                resource_group,
                workspace_name,
            }))
        }
        (None, _, _) => Err(ConfigError::IncompleteWorkspace {
            name: ENV_SUBSCRIPTION_ID.to_string(),
        }),
        (_, None, _) => Err(ConfigError::IncompleteWorkspace {
            name: ENV_RESOURCE_GROUP.to_string(),
        }),
        (_, _, None) => Err(ConfigError::IncompleteWorkspace {
            name: ENV_WORKSPACE_NAME.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests;
