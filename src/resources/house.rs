//! `sendoracity_house`: a house in a city.

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::models::House;
use crate::resource::{format_id, parse_id, Resource};

/// Marker type for the house resource.
#[derive(Debug, Clone, Copy)]
pub struct HouseResource;

/// Declarative attributes of a house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseAttributes {
    /// House city identifier.
    pub city_id: String,
    /// House address.
    pub address: String,
    /// House inhabitants count.
    pub inhabitants: i64,
}

impl Resource for HouseResource {
    const TYPE_NAME: &'static str = "sendoracity_house";
    const PATH: &'static str = "houses";

    type Attributes = HouseAttributes;
    type Record = House;

    fn to_record(attributes: &HouseAttributes) -> Result<House, ProviderError> {
        Ok(House {
            id: None,
            city_id: parse_id("city_id", &attributes.city_id)?,
            address: attributes.address.clone(),
            inhabitants: attributes.inhabitants,
        })
    }

    fn to_attributes(record: House) -> HouseAttributes {
        HouseAttributes {
            city_id: format_id(record.city_id),
            address: record.address,
            inhabitants: record.inhabitants,
        }
    }

    fn record_id(record: &House) -> Option<i64> {
        record.id
    }
}
