// crates/foundry-bridge-cli/src/main.rs
// ============================================================================
// Module: Foundry Bridge CLI Entry Point
// Description: Command dispatcher for the gateway server and demo client.
// Purpose: Run the HTTP gateway and exercise its tool surface from a shell.
// Dependencies: clap, foundry-bridge-mcp, reqwest, serde_json, thiserror,
// tokio
// ============================================================================

//! ## Overview
//! The CLI runs the gateway (`serve`) and doubles as a small client for a
//! running instance: `tools` fetches the tool listing and `call` posts one
//! tool-call envelope and exits nonzero when the response carries
//! `status: "error"`.
//!
//! Security posture: CLI inputs and server responses are untrusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use foundry_bridge_mcp::GatewayConfig;
use foundry_bridge_mcp::GatewayServer;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default base URL for client subcommands.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Timeout applied to client subcommand requests.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(60);

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "foundry-bridge", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the gateway HTTP server.
    Serve(ServeCommand),
    /// Fetch the tool listing from a running gateway.
    Tools(ClientCommand),
    /// Call one tool on a running gateway.
    Call(CallCommand),
}

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Override the bind host from the environment.
    #[arg(long)]
    host: Option<String>,
    /// Override the bind port from the environment.
    #[arg(long)]
    port: Option<u16>,
    /// Override the tool-call route prefix from the environment.
    #[arg(long)]
    path: Option<String>,
}

/// Arguments shared by the client subcommands.
#[derive(Args, Debug)]
struct ClientCommand {
    /// Base URL of the running gateway.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    url: String,
}

/// Arguments for the `call` subcommand.
#[derive(Args, Debug)]
struct CallCommand {
    /// Tool name to invoke.
    tool: String,
    /// Tool parameters as a JSON object.
    #[arg(long, default_value = "{}")]
    params: String,
    /// Base URL of the running gateway.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    url: String,
    /// Tool-call route prefix on the gateway.
    #[arg(long, default_value = "/mcp")]
    path: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI failure with a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// User-facing failure description.
    message: String,
}

impl CliError {
    /// Builds a CLI error from a message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            let _ = write_stderr_line(&format!("error: {err}"));
            ExitCode::FAILURE
        }
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Tools(command) => command_tools(command).await,
        Commands::Call(command) => command_call(command).await,
    }
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let mut config = GatewayConfig::from_env()
        .map_err(|err| CliError::new(format!("configuration: {err}")))?;
    apply_overrides(&mut config, command.host, command.port, command.path);
    let addr = config
        .server
        .bind_addr()
        .map_err(|err| CliError::new(format!("configuration: {err}")))?;
    write_stdout_line(&format!(
        "{} listening on http://{addr}{}",
        config.server.name,
        config.server.call_route()
    ))?;
    let server =
        GatewayServer::new(config).map_err(|err| CliError::new(format!("startup: {err}")))?;
    server.serve().await.map_err(|err| CliError::new(format!("server: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Applies command-line overrides onto the resolved configuration.
fn apply_overrides(
    config: &mut GatewayConfig,
    host: Option<String>,
    port: Option<u16>,
    path: Option<String>,
) {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(path) = path {
        config.server.path = path;
    }
}

// ============================================================================
// SECTION: Client Commands
// ============================================================================

/// Executes the `tools` command.
async fn command_tools(command: ClientCommand) -> CliResult<ExitCode> {
    let listing = http_get_json(&join_url(&command.url, "/tools")).await?;
    print_json(&listing)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `call` command.
async fn command_call(command: CallCommand) -> CliResult<ExitCode> {
    let parameters: Value = serde_json::from_str(&command.params)
        .map_err(|err| CliError::new(format!("--params is not valid JSON: {err}")))?;
    if !parameters.is_object() {
        return Err(CliError::new("--params must be a JSON object"));
    }
    let envelope = serde_json::json!({
        "tool_name": command.tool,
        "parameters": parameters,
    });
    let route = format!("{}/call", command.path.trim_end_matches('/'));
    let response = http_post_json(&join_url(&command.url, &route), &envelope).await?;
    print_json(&response)?;
    if response.get("status").and_then(Value::as_str) == Some("error") {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Joins a base URL and a route without doubling slashes.
fn join_url(base: &str, route: &str) -> String {
    format!("{}{route}", base.trim_end_matches('/'))
}

/// Builds the HTTP client for client subcommands.
fn http_client() -> CliResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(CLIENT_TIMEOUT)
        .build()
        .map_err(|err| CliError::new(format!("http client: {err}")))
}

/// Fetches a JSON body from the gateway.
async fn http_get_json(url: &str) -> CliResult<Value> {
    let response = http_client()?
        .get(url)
        .send()
        .await
        .map_err(|err| CliError::new(format!("request to {url} failed: {err}")))?;
    decode_json(url, response).await
}

/// Posts a JSON body to the gateway and decodes the reply.
async fn http_post_json(url: &str, body: &Value) -> CliResult<Value> {
    let response = http_client()?
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|err| CliError::new(format!("request to {url} failed: {err}")))?;
    decode_json(url, response).await
}

/// Decodes a JSON response body.
async fn decode_json(url: &str, response: reqwest::Response) -> CliResult<Value> {
    response
        .json::<Value>()
        .await
        .map_err(|err| CliError::new(format!("response from {url} was not JSON: {err}")))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Prints a value as pretty JSON to stdout.
fn print_json(value: &Value) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("encode output: {err}")))?;
    write_stdout_line(&rendered)
}

/// Writes one line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|err| CliError::new(format!("stdout: {err}")))
}

/// Writes one line to stderr.
fn write_stderr_line(message: &str) -> CliResult<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}").map_err(|err| CliError::new(format!("stderr: {err}")))
}
