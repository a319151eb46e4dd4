//! Transport layer for the MCP server.
//!
//! MCP hosts launch the server as a child process and exchange JSON-RPC
//! messages over stdin/stdout; framing is handled by `rmcp`.

mod error;
mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
