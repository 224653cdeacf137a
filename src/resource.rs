//! The generic CRUD adapter shared by every SendoraCity resource.
//!
//! A [`Resource`] names its API collection and knows how to convert between
//! its declarative attributes and its wire record. [`ResourceAdapter`] turns
//! that into the create/read/update/delete/lookup verbs the provider needs.
//!
//! Identifiers are numbers on the wire and strings in declarative state.
//! [`parse_id`] and [`format_id`] are the only places that convert between
//! the two, and parsing always happens before a request is sent.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::client::ApiClient;
use crate::diagnostics::Diagnostic;
use crate::error::ProviderError;

/// An API entity managed through the provider.
pub trait Resource: Send + Sync + 'static {
    /// Type name seen by the host, e.g. `sendoracity_city`.
    const TYPE_NAME: &'static str;

    /// Collection path on the API, e.g. `cities`.
    const PATH: &'static str;

    /// Declarative attributes, every field except the identifier.
    type Attributes: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Wire representation exchanged with the API.
    type Record: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Build the request record for these attributes, without an identifier.
    fn to_record(attributes: &Self::Attributes) -> Result<Self::Record, ProviderError>;

    /// Declarative attributes carried by a record.
    fn to_attributes(record: Self::Record) -> Self::Attributes;

    /// Server-assigned identifier of a record, if any.
    fn record_id(record: &Self::Record) -> Option<i64>;
}

/// Declarative state of a resource: a string identifier plus attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState<A> {
    /// Identifier, unset until the API has created the entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Every other attribute.
    #[serde(flatten)]
    pub attributes: A,
}

impl<A> ResourceState<A> {
    /// State for an entity that does not exist yet.
    pub fn planned(attributes: A) -> Self {
        Self {
            id: None,
            attributes,
        }
    }

    /// The identifier, parsed to its wire form.
    pub fn wire_id(&self) -> Result<i64, ProviderError> {
        match self.id.as_deref() {
            Some(id) => parse_id("id", id),
            None => Err(ProviderError::Validation(
                "resource state has no id".to_string(),
            )),
        }
    }
}

/// Parse a declarative identifier into its wire form.
pub fn parse_id(attribute: &str, value: &str) -> Result<i64, ProviderError> {
    value.parse::<i64>().map_err(|e| {
        ProviderError::Validation(format!(
            "unable to convert {} '{}' to an integer: {}",
            attribute, value, e
        ))
    })
}

/// Render a wire identifier for declarative state.
pub fn format_id(id: i64) -> String {
    id.to_string()
}

/// Build the full declarative state for a record read from the API.
pub fn state_from_record<R: Resource>(record: R::Record) -> ResourceState<R::Attributes> {
    let id = R::record_id(&record).map(format_id);
    ResourceState {
        id,
        attributes: R::to_attributes(record),
    }
}

/// Parse host-provided JSON into a resource state.
pub fn parse_state<R: Resource>(
    value: serde_json::Value,
) -> Result<ResourceState<R::Attributes>, ProviderError> {
    serde_json::from_value(value).map_err(|e| {
        ProviderError::Validation(format!("invalid {} state: {}", R::TYPE_NAME, e))
    })
}

/// Check a resource configuration without touching the API.
pub fn validate_config<R: Resource>(config: serde_json::Value) -> Vec<Diagnostic> {
    let state = match parse_state::<R>(config) {
        Ok(state) => state,
        Err(err) => return vec![Diagnostic::from(&err)],
    };
    match R::to_record(&state.attributes) {
        Ok(_) => vec![],
        Err(err) => vec![Diagnostic::from(&err)],
    }
}

/// CRUD verbs for one resource type, bound to an API client.
pub struct ResourceAdapter<R: Resource> {
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceAdapter<R> {
    /// Create an adapter that issues its requests through `client`.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn entity_path(id: i64) -> String {
        format!("{}/{}", R::PATH, id)
    }

    /// Create the entity and record the identifier the API assigned.
    #[instrument(skip_all, fields(resource_type = R::TYPE_NAME))]
    pub async fn create(
        &self,
        mut state: ResourceState<R::Attributes>,
    ) -> Result<ResourceState<R::Attributes>, ProviderError> {
        let body = serde_json::to_vec(&R::to_record(&state.attributes)?)?;
        let response = self.client.create(R::PATH, body).await?;
        let created: R::Record = decode(response).await?;

        let id = R::record_id(&created).ok_or_else(|| {
            ProviderError::InvalidResponse(format!(
                "created {} has no id",
                R::TYPE_NAME
            ))
        })?;
        state.id = Some(format_id(id));
        info!(id = id, "Created");
        Ok(state)
    }

    /// Refresh the state from the API.
    ///
    /// Returns `None` when the entity no longer exists; the caller should
    /// stop tracking it. The identifier is kept, every other attribute is
    /// overwritten with what the API reports.
    #[instrument(skip_all, fields(resource_type = R::TYPE_NAME))]
    pub async fn read(
        &self,
        mut state: ResourceState<R::Attributes>,
    ) -> Result<Option<ResourceState<R::Attributes>>, ProviderError> {
        let id = state.wire_id()?;
        let Some(record) = self.get(id).await? else {
            info!(id = id, "Resource no longer exists");
            return Ok(None);
        };
        state.attributes = R::to_attributes(record);
        Ok(Some(state))
    }

    /// Push the planned attributes to the API.
    ///
    /// The identifier comes from the planned state, falling back to the
    /// prior state. The response body is not read.
    #[instrument(skip_all, fields(resource_type = R::TYPE_NAME))]
    pub async fn update(
        &self,
        prior: &ResourceState<R::Attributes>,
        mut planned: ResourceState<R::Attributes>,
    ) -> Result<ResourceState<R::Attributes>, ProviderError> {
        if planned.id.is_none() {
            planned.id = prior.id.clone();
        }
        let id = planned.wire_id()?;
        let body = serde_json::to_vec(&R::to_record(&planned.attributes)?)?;
        self.client.update(&Self::entity_path(id), body).await?;
        info!(id = id, "Updated");
        Ok(planned)
    }

    /// Delete the entity. The response body is not read.
    #[instrument(skip_all, fields(resource_type = R::TYPE_NAME))]
    pub async fn delete(&self, state: &ResourceState<R::Attributes>) -> Result<(), ProviderError> {
        let id = state.wire_id()?;
        self.client.delete(&Self::entity_path(id)).await?;
        info!(id = id, "Deleted");
        Ok(())
    }

    /// Fetch one record, `None` on a 404.
    pub async fn get(&self, id: i64) -> Result<Option<R::Record>, ProviderError> {
        let response = self.client.read(&Self::entity_path(id)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    /// Resolve a declarative identifier to a full state; a missing entity
    /// is an error.
    #[instrument(skip(self), fields(resource_type = R::TYPE_NAME))]
    pub async fn lookup_id(&self, id: &str) -> Result<ResourceState<R::Attributes>, ProviderError> {
        let wire_id = parse_id("id", id)?;
        match self.get(wire_id).await? {
            Some(record) => Ok(state_from_record::<R>(record)),
            None => Err(ProviderError::NotFound(format!(
                "{} with id {}",
                R::TYPE_NAME,
                id
            ))),
        }
    }

    /// List the records matching `filters`, in API order.
    pub async fn list(&self, filters: &HashMap<String, String>) -> Result<Vec<R::Record>, ProviderError> {
        let response = self.client.list(R::PATH, filters).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        decode(response).await
    }

    /// The first record matching `filters`; no match is an error.
    #[instrument(skip(self), fields(resource_type = R::TYPE_NAME))]
    pub async fn find_first(
        &self,
        filters: &HashMap<String, String>,
    ) -> Result<ResourceState<R::Attributes>, ProviderError> {
        let records = self.list(filters).await?;
        debug!(matches = records.len(), "Listed");
        records
            .into_iter()
            .next()
            .map(state_from_record::<R>)
            .ok_or_else(|| {
                ProviderError::NotFound(format!(
                    "no {} matches {}",
                    R::TYPE_NAME,
                    describe_filters(filters)
                ))
            })
    }
}

impl<R: Resource> Clone for ResourceAdapter<R> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

impl<R: Resource> fmt::Debug for ResourceAdapter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceAdapter")
            .field("resource_type", &R::TYPE_NAME)
            .field("base_uri", &self.client.base_uri())
            .finish()
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

fn describe_filters(filters: &HashMap<String, String>) -> String {
    let mut pairs: Vec<String> = filters.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    pairs.sort();
    pairs.join(", ")
}
