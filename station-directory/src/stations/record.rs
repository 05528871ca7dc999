//! Station records built from dataset features.

use std::collections::HashSet;

use tracing::warn;

use super::address::{AddressError, ParsedAddress, parse_address};
use super::client::{FeatureDto, GeometryDto};

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Take a position from point geometry, if both axes are present and finite.
    pub fn from_geometry(geometry: &GeometryDto) -> Option<Self> {
        match (geometry.y, geometry.x) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(Self { lat, lng })
            }
            _ => None,
        }
    }
}

/// A single station from the dataset.
///
/// The street, postcode and district are derived from the composite address
/// when the record is created and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    id: i64,
    full_address: String,
    parts: ParsedAddress,
    address_issue: Option<AddressError>,
    coordinates: Option<Coordinates>,
}

impl StationRecord {
    /// Create a record, splitting the composite address.
    ///
    /// An address that does not parse is kept whole as the street part; the
    /// reason is available from [`StationRecord::address_issue`].
    pub fn new(id: i64, full_address: impl Into<String>, coordinates: Option<Coordinates>) -> Self {
        let full_address = full_address.into();
        let (parts, address_issue) = match parse_address(&full_address) {
            Ok(parts) => (parts, None),
            Err(e) => (ParsedAddress::unparsed(&full_address), Some(e)),
        };

        Self {
            id,
            full_address,
            parts,
            address_issue,
            coordinates,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// The raw composite address as delivered by the dataset.
    pub fn full_address(&self) -> &str {
        &self.full_address
    }

    /// Street and house number.
    pub fn address(&self) -> &str {
        &self.parts.address
    }

    pub fn postcode(&self) -> &str {
        &self.parts.postcode
    }

    pub fn district(&self) -> &str {
        &self.parts.district
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Why the composite address could not be split, if it couldn't.
    pub fn address_issue(&self) -> Option<AddressError> {
        self.address_issue
    }
}

/// Outcome of converting a feature batch into records.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub stations: Vec<StationRecord>,
    /// Features dropped for a missing address or a duplicate id.
    pub skipped: usize,
    /// Records kept with an unsplit address.
    pub unparsed: usize,
}

/// Convert dataset features into station records.
///
/// Features without an address are skipped, as are repeated ids (the first
/// occurrence wins). Every dropped or unparsed feature is logged.
pub fn records_from_features(features: Vec<FeatureDto>) -> LoadReport {
    let mut report = LoadReport {
        stations: Vec::with_capacity(features.len()),
        ..LoadReport::default()
    };
    let mut seen = HashSet::with_capacity(features.len());

    for feature in features {
        let id = feature.attributes.objectid;

        let Some(adresse) = feature.attributes.adresse else {
            warn!(id, "skipping station without address");
            report.skipped += 1;
            continue;
        };

        if !seen.insert(id) {
            warn!(id, "skipping station with duplicate id");
            report.skipped += 1;
            continue;
        }

        let coordinates = feature.geometry.as_ref().and_then(Coordinates::from_geometry);
        let record = StationRecord::new(id, adresse, coordinates);

        if let Some(issue) = record.address_issue() {
            warn!(id, address = record.full_address(), %issue, "unparseable station address");
            report.unparsed += 1;
        }

        report.stations.push(record);
    }

    report
}
