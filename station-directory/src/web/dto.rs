//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stations::{StationLoad, StationRecord};
use crate::view::{InvalidSort, SortDirection, SortOrder, ViewAction, ViewState};

use super::templates::map_place_url;

/// Query parameters shared by the page and the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    /// Search text
    pub q: Option<String>,

    /// Sort column: `address`, `postcode` or `district`
    pub sort: Option<String>,

    /// Sort direction: `asc` or `desc`
    pub dir: Option<String>,
}

impl DirectoryQuery {
    /// Build the view state these parameters describe on top of `load`.
    ///
    /// A missing column means the default column; a missing direction means
    /// ascending.
    pub fn view_state(&self, load: StationLoad) -> Result<ViewState, InvalidSort> {
        let key = match self.sort.as_deref() {
            Some(s) if !s.is_empty() => s.parse()?,
            _ => SortOrder::default().key,
        };
        let direction = match self.dir.as_deref() {
            Some(d) if !d.is_empty() => d.parse()?,
            _ => SortDirection::Ascending,
        };

        let mut state = ViewState::new(load)
            .update(ViewAction::SortSelected(SortOrder::new(key, direction)));
        if let Some(q) = &self.q {
            state = state.update(ViewAction::SearchChanged(q.clone()));
        }
        Ok(state)
    }
}

/// A station in list results.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Dataset object id
    pub id: i64,

    /// Raw composite address
    pub full_address: String,

    /// Street and house number
    pub address: String,

    pub postcode: String,

    pub district: String,

    pub lat: Option<f64>,

    pub lng: Option<f64>,

    /// Link to the map service, when coordinates are known
    pub map_url: Option<String>,
}

impl StationResult {
    pub fn from_record(record: &StationRecord, map_base_url: &str) -> Self {
        let coordinates = record.coordinates();
        Self {
            id: record.id(),
            full_address: record.full_address().to_string(),
            address: record.address().to_string(),
            postcode: record.postcode().to_string(),
            district: record.district().to_string(),
            lat: coordinates.map(|c| c.lat),
            lng: coordinates.map(|c| c.lng),
            map_url: coordinates.map(|c| map_place_url(map_base_url, c)),
        }
    }
}

/// Response for the station list.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// When the dataset was fetched
    pub fetched_at: DateTime<Utc>,

    /// Stations in the dataset
    pub total: usize,

    /// Stations matching the search
    pub shown: usize,

    pub search: String,

    pub sort: String,

    pub dir: String,

    pub stations: Vec<StationResult>,
}

/// Response for a dataset reload.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    /// Stations now loaded
    pub stations: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
