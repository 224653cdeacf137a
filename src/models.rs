//! Wire records exchanged with the SendoraCity API.
//!
//! Zero-valued fields are left off the wire and default back to zero when
//! absent, so a record without an `id` is one the API has not created yet.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// A city.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// Identifier assigned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// City name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Always sent, `false` is a meaningful value.
    #[serde(default)]
    pub touristic: bool,
}

/// A house located in a city.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct House {
    /// Identifier assigned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Identifier of the city the house is in.
    #[serde(rename = "cityid", default, skip_serializing_if = "is_zero")]
    pub city_id: i64,
    /// Street address.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    /// Number of inhabitants.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub inhabitants: i64,
}

/// A store located in a city.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Identifier assigned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Identifier of the city the store is in.
    #[serde(rename = "cityid", default, skip_serializing_if = "is_zero")]
    pub city_id: i64,
    /// Street address.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    /// Store name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// What the store sells, the wire name of a [`StoreType`].
    ///
    /// Not checked on decode. [`StoreResource`](crate::resources::StoreResource)
    /// checks it when building a request.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub store_type: String,
}

/// The kinds of store the API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum StoreType {
    Food,
    Sports,
    Clothes,
    Electronics,
    Other,
}

impl StoreType {
    /// Every accepted store type, in API order.
    pub const ALL: [StoreType; 5] = [
        StoreType::Food,
        StoreType::Sports,
        StoreType::Clothes,
        StoreType::Electronics,
        StoreType::Other,
    ];

    /// The wire name of this store type.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreType::Food => "Food",
            StoreType::Sports => "Sports",
            StoreType::Clothes => "Clothes",
            StoreType::Electronics => "Electronics",
            StoreType::Other => "Other",
        }
    }
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn allowed_store_types() -> String {
    let allowed: Vec<&str> = StoreType::ALL.iter().map(StoreType::as_str).collect();
    allowed.join(", ")
}

/// Returned when a string names no [`StoreType`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown store type '{0}', expected one of: {allowed}", allowed = allowed_store_types())]
pub struct UnknownStoreType(pub String);

impl FromStr for StoreType {
    type Err = UnknownStoreType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoreType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownStoreType(s.to_string()))
    }
}
