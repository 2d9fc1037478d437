//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes catalog extraction and diffing to AI assistants over stdio.
//!
//! ## Module Structure
//!
//! - `server`: Main MCP server implementation
//! - `types`: Tool parameters and result DTOs

mod server;
pub mod types;

pub use server::{TrcatMcpServer, run_server};
