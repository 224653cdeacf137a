//! The host-facing provider interface.
//!
//! A host drives a provider through [`ProviderService`]: it configures it
//! once, then asks it to create, read, update and delete resources and to
//! read data sources, always addressing them by type name and exchanging
//! declarative state as JSON.

use serde_json::Value;

use crate::diagnostics::Diagnostic;
use crate::error::ProviderError;
use crate::types::ProviderMetadata;

/// Trait that provider implementations must implement.
///
/// # Example
///
/// ```ignore
/// use sendoracity_provider::{ProviderService, SendoraCityProvider};
/// use serde_json::json;
///
/// let provider = SendoraCityProvider::new("0.1.0");
/// provider.configure(json!({"base_uri": "http://localhost:8080"})).await?;
/// let city = provider
///     .create("sendoracity_city", json!({"name": "Lyon", "touristic": true}))
///     .await?;
/// ```
#[async_trait::async_trait]
pub trait ProviderService: Send + Sync + 'static {
    // =========================================================================
    // Metadata & Lifecycle
    // =========================================================================

    /// Return the provider's type name, version and supported types.
    fn metadata(&self) -> ProviderMetadata;

    /// Configure the provider.
    /// Returns diagnostics (errors and warnings).
    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError>;

    /// Stop the provider gracefully.
    async fn stop(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Validate a resource's configuration without calling the API.
    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let _ = (resource_type, config);
        Ok(vec![])
    }

    /// Create a new resource and return its state, identifier included.
    async fn create(&self, resource_type: &str, planned_state: Value)
        -> Result<Value, ProviderError>;

    /// Read the current state of a resource.
    ///
    /// `Ok(None)` means the resource no longer exists and should be dropped
    /// from the host's state.
    async fn read(
        &self,
        resource_type: &str,
        current_state: Value,
    ) -> Result<Option<Value>, ProviderError>;

    /// Update an existing resource.
    async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError>;

    /// Delete a resource.
    async fn delete(&self, resource_type: &str, current_state: Value) -> Result<(), ProviderError>;

    // =========================================================================
    // Data Source Operations
    // =========================================================================

    /// Validate a data source's configuration.
    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let _ = (data_source_type, config);
        Ok(vec![])
    }

    /// Read data from an external source.
    async fn read_data_source(
        &self,
        data_source_type: &str,
        _config: Value,
    ) -> Result<Value, ProviderError> {
        Err(ProviderError::UnknownResource(format!(
            "Unknown data source type: {}",
            data_source_type
        )))
    }
}
