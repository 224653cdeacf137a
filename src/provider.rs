//! The SendoraCity provider.
//!
//! [`SendoraCityProvider`] routes host requests to the city, house and store
//! adapters. The API client is created once by [`configure`] and handed to
//! every adapter explicitly; there is no other shared state.
//!
//! [`configure`]: ProviderService::configure

use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::client::ApiClient;
use crate::config::ProviderConfig;
use crate::diagnostics::{has_errors, Diagnostic};
use crate::error::ProviderError;
use crate::resource::{parse_id, parse_state, validate_config, Resource, ResourceAdapter};
use crate::resources::{CityQuery, CityResource, HouseResource, IdQuery, StoreResource};
use crate::service::ProviderService;
use crate::types::{ProviderMetadata, PROVIDER_TYPE_NAME};

/// The entity types served by this provider, as resources and data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    City,
    House,
    Store,
}

impl Kind {
    const ALL: [Kind; 3] = [Kind::City, Kind::House, Kind::Store];

    fn type_name(self) -> &'static str {
        match self {
            Kind::City => CityResource::TYPE_NAME,
            Kind::House => HouseResource::TYPE_NAME,
            Kind::Store => StoreResource::TYPE_NAME,
        }
    }

    fn resource(type_name: &str) -> Result<Self, ProviderError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.type_name() == type_name)
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))
    }

    fn data_source(type_name: &str) -> Result<Self, ProviderError> {
        Self::resource(type_name).map_err(|_| {
            ProviderError::UnknownResource(format!("Unknown data source type: {}", type_name))
        })
    }
}

/// Provider for the SendoraCity API.
#[derive(Debug)]
pub struct SendoraCityProvider {
    version: String,
    client: OnceLock<ApiClient>,
}

impl SendoraCityProvider {
    /// Create an unconfigured provider.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            client: OnceLock::new(),
        }
    }

    /// Create a provider that is already configured with `client`.
    pub fn with_client(version: impl Into<String>, client: ApiClient) -> Self {
        Self {
            version: version.into(),
            client: OnceLock::from(client),
        }
    }

    /// The configured API client.
    pub fn client(&self) -> Result<&ApiClient, ProviderError> {
        self.client.get().ok_or_else(|| {
            ProviderError::Configuration("provider has not been configured".to_string())
        })
    }

    fn adapter<R: Resource>(&self) -> Result<ResourceAdapter<R>, ProviderError> {
        Ok(ResourceAdapter::new(self.client()?.clone()))
    }

    async fn create_as<R: Resource>(&self, planned_state: Value) -> Result<Value, ProviderError> {
        let planned = parse_state::<R>(planned_state)?;
        let created = self.adapter::<R>()?.create(planned).await?;
        Ok(serde_json::to_value(created)?)
    }

    async fn read_as<R: Resource>(&self, current_state: Value) -> Result<Option<Value>, ProviderError> {
        let current = parse_state::<R>(current_state)?;
        match self.adapter::<R>()?.read(current).await? {
            Some(state) => Ok(Some(serde_json::to_value(state)?)),
            None => Ok(None),
        }
    }

    async fn update_as<R: Resource>(
        &self,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let prior = parse_state::<R>(prior_state)?;
        let planned = parse_state::<R>(planned_state)?;
        let updated = self.adapter::<R>()?.update(&prior, planned).await?;
        Ok(serde_json::to_value(updated)?)
    }

    async fn delete_as<R: Resource>(&self, current_state: Value) -> Result<(), ProviderError> {
        let current = parse_state::<R>(current_state)?;
        self.adapter::<R>()?.delete(&current).await
    }

    async fn read_by_id<R: Resource>(&self, config: Value) -> Result<Value, ProviderError> {
        let query: IdQuery = parse_query(R::TYPE_NAME, config)?;
        let state = self.adapter::<R>()?.lookup_id(&query.id).await?;
        Ok(serde_json::to_value(state)?)
    }
}

fn parse_query<T: DeserializeOwned>(type_name: &str, config: Value) -> Result<T, ProviderError> {
    serde_json::from_value(config).map_err(|e| {
        ProviderError::Validation(format!("invalid {} data source configuration: {}", type_name, e))
    })
}

fn validate_data_source(kind: Kind, config: Value) -> Result<(), ProviderError> {
    match kind {
        Kind::City => parse_query::<CityQuery>(kind.type_name(), config)?.check(),
        Kind::House | Kind::Store => {
            let query: IdQuery = parse_query(kind.type_name(), config)?;
            parse_id("id", &query.id).map(|_| ())
        },
    }
}

#[async_trait::async_trait]
impl ProviderService for SendoraCityProvider {
    fn metadata(&self) -> ProviderMetadata {
        let names: Vec<String> = Kind::ALL.iter().map(|k| k.type_name().to_string()).collect();
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: self.version.clone(),
            resources: names.clone(),
            data_sources: names,
        }
    }

    #[instrument(skip(self, config), name = "provider.configure")]
    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        debug!("Configure called");
        let config = match ProviderConfig::from_value(config) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Configure rejected an invalid configuration");
                return Ok(vec![
                    Diagnostic::error("Invalid provider configuration").with_detail(e.message())
                ]);
            },
        };
        let base_uri = match config.resolve_base_uri() {
            Ok(base_uri) => base_uri,
            Err(e) => {
                warn!(error = %e, "Configure completed with errors");
                return Ok(vec![Diagnostic::error("Missing URL Configuration")
                    .with_detail(e.message())
                    .with_attribute("base_uri")]);
            },
        };

        let client = ApiClient::new(&base_uri)?;
        if self.client.set(client).is_err() {
            warn!("Configure called on an already configured provider");
            return Ok(vec![Diagnostic::error("Provider already configured")
                .with_detail("the API base URI cannot change once the provider is configured")]);
        }

        info!(base_uri = %base_uri, "Configure completed successfully");
        Ok(vec![])
    }

    #[instrument(skip(self, config), name = "provider.validate_resource_config")]
    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let diagnostics = match Kind::resource(resource_type)? {
            Kind::City => validate_config::<CityResource>(config),
            Kind::House => validate_config::<HouseResource>(config),
            Kind::Store => validate_config::<StoreResource>(config),
        };
        if has_errors(&diagnostics) {
            warn!(diagnostics = diagnostics.len(), "ValidateResourceConfig completed with errors");
        }
        Ok(diagnostics)
    }

    #[instrument(skip(self, planned_state), name = "provider.create")]
    async fn create(&self, resource_type: &str, planned_state: Value) -> Result<Value, ProviderError> {
        let result = match Kind::resource(resource_type)? {
            Kind::City => self.create_as::<CityResource>(planned_state).await,
            Kind::House => self.create_as::<HouseResource>(planned_state).await,
            Kind::Store => self.create_as::<StoreResource>(planned_state).await,
        };
        if let Err(e) = &result {
            error!(error = %e, "Create failed");
        }
        result
    }

    #[instrument(skip(self, current_state), name = "provider.read")]
    async fn read(
        &self,
        resource_type: &str,
        current_state: Value,
    ) -> Result<Option<Value>, ProviderError> {
        let result = match Kind::resource(resource_type)? {
            Kind::City => self.read_as::<CityResource>(current_state).await,
            Kind::House => self.read_as::<HouseResource>(current_state).await,
            Kind::Store => self.read_as::<StoreResource>(current_state).await,
        };
        if let Err(e) = &result {
            error!(error = %e, "Read failed");
        }
        result
    }

    #[instrument(skip(self, prior_state, planned_state), name = "provider.update")]
    async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let result = match Kind::resource(resource_type)? {
            Kind::City => self.update_as::<CityResource>(prior_state, planned_state).await,
            Kind::House => self.update_as::<HouseResource>(prior_state, planned_state).await,
            Kind::Store => self.update_as::<StoreResource>(prior_state, planned_state).await,
        };
        if let Err(e) = &result {
            error!(error = %e, "Update failed");
        }
        result
    }

    #[instrument(skip(self, current_state), name = "provider.delete")]
    async fn delete(&self, resource_type: &str, current_state: Value) -> Result<(), ProviderError> {
        let result = match Kind::resource(resource_type)? {
            Kind::City => self.delete_as::<CityResource>(current_state).await,
            Kind::House => self.delete_as::<HouseResource>(current_state).await,
            Kind::Store => self.delete_as::<StoreResource>(current_state).await,
        };
        if let Err(e) = &result {
            error!(error = %e, "Delete failed");
        }
        result
    }

    #[instrument(skip(self, config), name = "provider.validate_data_source_config")]
    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let kind = Kind::data_source(data_source_type)?;
        match validate_data_source(kind, config) {
            Ok(()) => Ok(vec![]),
            Err(e) => Ok(vec![Diagnostic::from(&e)]),
        }
    }

    #[instrument(skip(self, config), name = "provider.read_data_source")]
    async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        let result = match Kind::data_source(data_source_type)? {
            Kind::City => {
                let query: CityQuery = parse_query(CityResource::TYPE_NAME, config)?;
                let state = query.resolve(&self.adapter::<CityResource>()?).await?;
                serde_json::to_value(state).map_err(ProviderError::from)
            },
            Kind::House => self.read_by_id::<HouseResource>(config).await,
            Kind::Store => self.read_by_id::<StoreResource>(config).await,
        };
        if let Err(e) = &result {
            error!(error = %e, "ReadDataSource failed");
        }
        result
    }
}
