//! Station dataset client, address parsing and the in-memory directory.
//!
//! The dataset is fetched once from an ArcGIS feature query, each feature's
//! composite address is split into street, postcode and district, and the
//! resulting list is held in a [`StationDirectory`].

mod address;
mod client;
mod directory;
mod error;
mod record;

pub use address::{AddressError, ParsedAddress, parse_address};
pub use client::{
    AttributesDto, DEFAULT_DATASET_URL, FeatureDto, GeometryDto, StationClient,
    StationClientConfig, parse_query_body,
};
pub use directory::{StationDirectory, StationLoad};
pub use error::StationError;
pub use record::{Coordinates, LoadReport, StationRecord, records_from_features};
