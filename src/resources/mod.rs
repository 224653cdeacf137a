//! SendoraCity resources and data sources.

pub mod city;
pub mod house;
pub mod store;

pub use city::{CityAttributes, CityQuery, CityResource};
pub use house::{HouseAttributes, HouseResource};
pub use store::{StoreAttributes, StoreResource};

use serde::Deserialize;

/// Configuration of a data source addressed by identifier only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdQuery {
    /// Identifier of the entity to read.
    pub id: String,
}
