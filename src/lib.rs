//! Countries MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server answering
//! country and currency questions from the REST Countries API.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, the main server
//!   and the STDIO/TCP/HTTP transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: the four country tools, their registry and the upstream client
//!
//! # Example
//!
//! ```rust,no_run
//! use countries_mcp_server::{core::Config, core::McpServer, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
