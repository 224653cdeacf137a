//! `sendoracity_store`: a store in a city.

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::models::{Store, StoreType};
use crate::resource::{format_id, parse_id, Resource};

/// Marker type for the store resource.
#[derive(Debug, Clone, Copy)]
pub struct StoreResource;

/// Declarative attributes of a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAttributes {
    /// Store city identifier.
    pub city_id: String,
    /// Store address.
    pub address: String,
    /// Store name.
    pub name: String,
    /// Store type, one of Food, Sports, Clothes, Electronics or Other.
    #[serde(rename = "type")]
    pub store_type: String,
}

impl Resource for StoreResource {
    const TYPE_NAME: &'static str = "sendoracity_store";
    const PATH: &'static str = "stores";

    type Attributes = StoreAttributes;
    type Record = Store;

    fn to_record(attributes: &StoreAttributes) -> Result<Store, ProviderError> {
        let store_type = attributes
            .store_type
            .parse::<StoreType>()
            .map_err(|e| ProviderError::Validation(format!("type: {}", e)))?;

        Ok(Store {
            id: None,
            city_id: parse_id("city_id", &attributes.city_id)?,
            address: attributes.address.clone(),
            name: attributes.name.clone(),
            store_type: store_type.to_string(),
        })
    }

    fn to_attributes(record: Store) -> StoreAttributes {
        StoreAttributes {
            city_id: format_id(record.city_id),
            address: record.address,
            name: record.name,
            store_type: record.store_type,
        }
    }

    fn record_id(record: &Store) -> Option<i64> {
        record.id
    }
}
