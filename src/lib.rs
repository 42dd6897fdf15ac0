//! CIGAM ERP bridge for the Model Context Protocol.
//!
//! Exposes materials, stock, purchasing, invoicing and account endpoints of
//! the CIGAM REST API as MCP tools served over stdio.

pub mod atoms;
pub mod engine;

pub use atoms::error::{CigamError, CigamResult};
pub use atoms::types::{Credentials, ToolCallResult, ToolDefinition};
pub use engine::client::CigamClient;
pub use engine::mcp::McpServer;
pub use engine::tools::ToolDispatcher;
