//! Provider configuration.
//!
//! The only setting is the API base URI. It comes from the `base_uri`
//! attribute of the provider configuration, or from the `BASE_URI`
//! environment variable when the attribute is unset.

use serde::Deserialize;

use crate::error::ProviderError;

/// Environment variable consulted when `base_uri` is not configured.
pub const BASE_URI_ENV: &str = "BASE_URI";

/// Provider configuration as sent by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// City API base URI.
    #[serde(default)]
    pub base_uri: Option<String>,
}

impl ProviderConfig {
    /// Parse the configuration payload. `null` means an empty configuration.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ProviderError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
            .map_err(|e| ProviderError::Configuration(format!("invalid provider configuration: {}", e)))
    }

    /// Resolve the base URI, falling back to the process environment.
    pub fn resolve_base_uri(&self) -> Result<String, ProviderError> {
        self.resolve_base_uri_with(|key| std::env::var(key).ok())
    }

    /// Resolve the base URI with a custom environment lookup.
    ///
    /// An explicitly configured value wins even when empty; an empty result
    /// is an error either way.
    pub fn resolve_base_uri_with<F>(&self, lookup: F) -> Result<String, ProviderError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let base_uri = match &self.base_uri {
            Some(uri) => uri.clone(),
            None => lookup(BASE_URI_ENV).unwrap_or_default(),
        };

        if base_uri.trim().is_empty() {
            return Err(ProviderError::Configuration(format!(
                "the API base URI was not found in the {} environment variable \
                 or the provider configuration block base_uri attribute",
                BASE_URI_ENV
            )));
        }
        Ok(base_uri)
    }
}
