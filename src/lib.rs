//! SendoraCity Provider
//!
//! An infrastructure-as-code provider for the SendoraCity REST API. It lets
//! a host manage cities, houses and stores declaratively, and look them up
//! as data sources.
//!
//! # Overview
//!
//! - **ProviderService trait**: the interface a host drives ([`service`])
//! - **SendoraCityProvider**: the implementation for the SendoraCity API ([`provider`])
//! - **API client**: one HTTP request per operation, with classified errors ([`client`])
//! - **Resources**: the city, house and store types built on a shared CRUD adapter
//!   ([`resource`], [`resources`])
//! - **Error types** and **diagnostics** reported back to the host
//! - **Logging**: `tracing` output on stderr
//! - **Testing**: [`testing::ProviderTester`] for exercising any provider
//!
//! # Quick Start
//!
//! ```ignore
//! use sendoracity_provider::{init_logging, ProviderService, SendoraCityProvider};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging();
//!
//!     let provider = SendoraCityProvider::new(env!("CARGO_PKG_VERSION"));
//!     let diagnostics = provider
//!         .configure(json!({"base_uri": "http://localhost:8080"}))
//!         .await?;
//!     assert!(diagnostics.is_empty());
//!
//!     let city = provider
//!         .create("sendoracity_city", json!({"name": "Lyon", "touristic": true}))
//!         .await?;
//!     let house = provider
//!         .create(
//!             "sendoracity_house",
//!             json!({"city_id": city["id"], "address": "1 Rue Neuve", "inhabitants": 3}),
//!         )
//!         .await?;
//!     tracing::info!(%house, "House created");
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The only setting is `base_uri`. When the provider configuration leaves it
//! unset, the `BASE_URI` environment variable is used instead.
//!
//! # Identifiers
//!
//! The API uses integer identifiers; declarative state carries them as
//! strings. A non-numeric identifier is rejected before any request is sent.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod models;
pub mod provider;
pub mod resource;
pub mod resources;
pub mod service;
pub mod testing;
pub mod types;

// Re-export main types at crate root
pub use client::ApiClient;
pub use config::{ProviderConfig, BASE_URI_ENV};
pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use error::{ApiError, ClientError, ProviderError};
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use provider::SendoraCityProvider;
pub use resource::{Resource, ResourceAdapter, ResourceState};
pub use service::ProviderService;
pub use types::{ProviderMetadata, PROVIDER_TYPE_NAME};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

// Re-export commonly used external types
pub use serde_json;
pub use tracing;
