//! `sendoracity_city`: a city, addressable by id or by name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::models::City;
use crate::resource::{parse_id, Resource, ResourceAdapter, ResourceState};

/// Marker type for the city resource.
#[derive(Debug, Clone, Copy)]
pub struct CityResource;

/// Declarative attributes of a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityAttributes {
    /// City name.
    pub name: String,
    /// Whether the city is touristic or not.
    pub touristic: bool,
}

impl Resource for CityResource {
    const TYPE_NAME: &'static str = "sendoracity_city";
    const PATH: &'static str = "cities";

    type Attributes = CityAttributes;
    type Record = City;

    fn to_record(attributes: &CityAttributes) -> Result<City, ProviderError> {
        Ok(City {
            id: None,
            name: attributes.name.clone(),
            touristic: attributes.touristic,
        })
    }

    fn to_attributes(record: City) -> CityAttributes {
        CityAttributes {
            name: record.name,
            touristic: record.touristic,
        }
    }

    fn record_id(record: &City) -> Option<i64> {
        record.id
    }
}

/// Data source configuration: a city is found by `id` or by `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CityQuery {
    /// City identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// City name, used when no identifier is given.
    #[serde(default)]
    pub name: Option<String>,
}

impl CityQuery {
    /// Reject queries that cannot be resolved, before any request is sent.
    pub fn check(&self) -> Result<(), ProviderError> {
        match (&self.id, &self.name) {
            (Some(id), _) => parse_id("id", id).map(|_| ()),
            (None, Some(_)) => Ok(()),
            (None, None) => Err(missing_id_or_name()),
        }
    }

    /// Resolve the query to a single city.
    ///
    /// An identifier takes precedence over a name. A name lookup returns the
    /// first city the API lists for it.
    pub async fn resolve(
        &self,
        adapter: &ResourceAdapter<CityResource>,
    ) -> Result<ResourceState<CityAttributes>, ProviderError> {
        match (&self.id, &self.name) {
            (Some(id), _) => adapter.lookup_id(id).await,
            (None, Some(name)) => {
                let filters = HashMap::from([("name".to_string(), name.clone())]);
                adapter.find_first(&filters).await
            },
            (None, None) => Err(missing_id_or_name()),
        }
    }
}

fn missing_id_or_name() -> ProviderError {
    ProviderError::Validation("Either id or name must be set".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::state_from_record;

    #[test]
    fn test_to_record_excludes_id() {
        let record = CityResource::to_record(&CityAttributes {
            name: "X".to_string(),
            touristic: false,
        })
        .unwrap();
        assert_eq!(record.id, None);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"name":"X","touristic":false}"#
        );
    }

    #[test]
    fn test_state_from_record_stringifies_id() {
        let state = state_from_record::<CityResource>(City {
            id: Some(7),
            name: "X".to_string(),
            touristic: true,
        });
        assert_eq!(state.id.as_deref(), Some("7"));
        assert_eq!(state.attributes.name, "X");
        assert!(state.attributes.touristic);
    }

    #[test]
    fn test_query_requires_id_or_name() {
        let err = CityQuery::default().check().unwrap_err();
        assert_eq!(err.message(), "Either id or name must be set");

        let by_name = CityQuery {
            id: None,
            name: Some("Lyon".to_string()),
        };
        assert!(by_name.check().is_ok());

        let bad_id = CityQuery {
            id: Some("abc".to_string()),
            name: Some("Lyon".to_string()),
        };
        assert!(matches!(bad_id.check(), Err(ProviderError::Validation(_))));
    }
}
