//! cricd-client: HTTP adapter for the cricd statistics API
//!
//! [`ApiClient`] implements the `EntityBackend`, `MatchRegistry` and
//! `EventSink` collaborators from `cricd-core` over plain JSON-over-HTTP.
//!
//! ```no_run
//! use cricd_client::{ApiClient, ApiConfig};
//! use cricd_core::CachingResolver;
//!
//! # fn main() -> Result<(), cricd_client::ClientError> {
//! let client = ApiClient::new(ApiConfig::new("localhost", 3001))?;
//! let resolver = CachingResolver::new(client.clone());
//! # let _ = resolver;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{ClientError, Result};
