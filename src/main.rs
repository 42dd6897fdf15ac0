// cigam-mcp: stdio MCP server for the CIGAM ERP.
//
// Configuration comes from flags or the environment:
//   CIGAM_BASE_URL  ERP base address
//   CIGAM_PIN       shared secret appended to every request
// Logs go to stderr (RUST_LOG overrides the default `info`); stdout is
// reserved for protocol messages.

use cigam_mcp::atoms::constants::{ENV_BASE_URL, ENV_PIN};
use cigam_mcp::{CigamClient, CigamResult, Credentials, McpServer, ToolDispatcher};
use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "cigam-mcp", version, about = "MCP server for the CIGAM ERP REST API")]
struct Cli {
    /// ERP base address, e.g. https://erp.example.com
    #[arg(long, env = ENV_BASE_URL)]
    base_url: Option<String>,

    /// Shared secret (PIN) sent with every request
    #[arg(long, env = ENV_PIN, hide_env_values = true)]
    pin: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("[cigam] Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CigamResult<()> {
    let credentials = Credentials::new(cli.base_url.as_deref(), cli.pin.as_deref())?;
    let client = CigamClient::connect(credentials)?;
    let server = McpServer::new(ToolDispatcher::new(client));

    info!("[mcp] CIGAM MCP server running on stdio");
    server.serve_stdio().await
}
