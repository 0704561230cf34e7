//! # FatSecret Search Library
//!
//! A client for the FatSecret nutrition API that turns its loosely-typed search responses
//! into a stable model of foods, servings and nutrients.
//!
//! ## Client Module
//!
//! The [`client`] module handles OAuth2 client-credentials authentication with token
//! caching, the `foods.search` request, and normalization of the response.
//!
//! ## Report Module
//!
//! The [`report`] module renders normalized foods as a line-oriented console report.
//!
//! ## Server Module
//!
//! The [`server`] module exposes food search as an MCP tool for AI assistants.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fatsecret_search::{FatSecretClient, FatSecretConfig, FatSecretMcpServer};
//!
//! // Use the client directly
//! let client = FatSecretClient::new(FatSecretConfig::new("client-id", "client-secret"));
//!
//! // Or create an MCP server around it
//! let server = FatSecretMcpServer::new(std::sync::Arc::new(client));
//! ```

pub mod client;
pub mod config;
pub mod report;
pub mod server;

pub use client::FatSecretClient;
pub use config::FatSecretConfig;
pub use server::FatSecretMcpServer;
