//! Freesound MCP server entry point.
//!
//! Parses the command line, loads configuration, checks the API key and
//! serves MCP over stdin/stdout.

use anyhow::Result;
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use freesound_mcp_server::core::{Config, McpServer, StdioTransport};

/// Freesound MCP Server - search the Freesound audio library from MCP clients.
#[derive(Debug, Parser)]
#[command(
    name = "freesound-mcp-server",
    version,
    about,
    after_help = concat!(
        "Environment variables:\n",
        "  FREESOUND_API_KEY  Freesound API key (required). Get one from https://freesound.org/apiv2/apply/\n",
        "  MCP_LOG_LEVEL      Log level: trace, debug, info, warn, error (default: info)\n",
        "\n",
        "Connect an MCP client (e.g. Claude Desktop) by adding this server to its MCP configuration."
    )
)]
struct Cli {
    /// Log level, overriding MCP_LOG_LEVEL.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment
    let mut config = Config::from_env();
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // Initialize logging
    init_logging(&config.logging.level);

    if let Err(e) = config.validate() {
        error!("{}", e);
        return Err(e.into());
    }

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config);
    info!("Server initialized with tools: {:?}", server.tool_names());

    StdioTransport::run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the MCP protocol.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
