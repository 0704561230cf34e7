//! # FatSecret HTTP Client
//!
//! This module provides a client for the FatSecret Platform API: OAuth2 client-credentials
//! authentication, the `foods.search` call, and normalization of its loosely-typed JSON.
//!
//! ## Modules
//!
//! - [`auth`] - Token provider, clock and the cached [`auth::TokenManager`]
//! - [`client`] - [`FatSecretClient`] and the search operation
//! - [`error`] - [`FatSecretError`] and the FatSecret error code table
//! - [`normalize`] - Coercion and normalization rules from raw payloads to the model
//! - [`types`] - Raw payload types and the normalized model
//!
//! ## Quick Start
//!
//! ```no_run
//! use fatsecret_search::client::FatSecretClient;
//!
//! # async fn example() -> Result<(), fatsecret_search::client::FatSecretError> {
//! let client = FatSecretClient::from_env()?;
//!
//! let foods = client.search("banana", 10, 0).await?;
//! println!("Found {} foods", foods.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
#[allow(clippy::module_inception)]
pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::FatSecretClient;
pub use error::{ApiErrorCode, ErrorKind, FatSecretError};
pub use types::*;
