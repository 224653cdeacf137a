//! Provider-wide constants and metadata.

use serde::{Deserialize, Serialize};

/// Type name of the provider; resource type names are prefixed with it.
pub const PROVIDER_TYPE_NAME: &str = "sendoracity";

/// Provider metadata returned by [`ProviderService::metadata`](crate::ProviderService::metadata).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderMetadata {
    /// Provider type name.
    pub type_name: String,
    /// Provider version.
    pub version: String,
    /// List of resource type names.
    pub resources: Vec<String>,
    /// List of data source type names.
    pub data_sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_serialization() {
        let metadata = ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: "test".to_string(),
            resources: vec!["sendoracity_city".to_string()],
            data_sources: vec![],
        };
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["type_name"], "sendoracity");
        assert_eq!(value["resources"][0], "sendoracity_city");
        assert_eq!(value["data_sources"].as_array().map(Vec::len), Some(0));
    }
}
