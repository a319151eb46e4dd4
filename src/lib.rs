//! Freesound MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing a single tool,
//! `search_sounds`, backed by the Freesound text search API.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and the
//!   STDIO transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: MCP tools that can be executed by clients
//!
//! # Example
//!
//! ```rust,no_run
//! use freesound_mcp_server::core::{Config, McpServer, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     StdioTransport::run(McpServer::new(config)).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
