// CIGAM Bridge: MCP (Model Context Protocol) Server
//
// Architecture:
//   types.rs     - JSON-RPC + MCP message shapes
//   transport.rs - newline-delimited stdio framing + writer task
//   server.rs    - initialize / tools-list / tools-call routing

pub mod server;
pub mod transport;
pub mod types;

pub use server::McpServer;
