//! Immutable view state and its update function.

use chrono::{DateTime, Utc};

use crate::stations::{StationLoad, StationRecord};

use super::filter::filter_stations;
use super::sort::{SortKey, SortOrder, sort_stations};

/// A discrete user or system event that changes what is shown.
#[derive(Debug, Clone)]
pub enum ViewAction {
    /// The dataset load finished (or was redone); replaces the station list.
    StationsLoaded(StationLoad),
    /// The search box changed.
    SearchChanged(String),
    /// A column header was clicked.
    SortClicked(SortKey),
    /// A sort order was chosen directly, e.g. restored from a link.
    SortSelected(SortOrder),
}

/// Everything that determines the rendered directory.
///
/// Values are never mutated in place; [`ViewState::update`] consumes the
/// state and returns the next one.
#[derive(Debug, Clone)]
pub struct ViewState {
    load: StationLoad,
    search: String,
    sort: SortOrder,
}

/// What the directory shows for a given state.
#[derive(Debug)]
pub enum Listing<'a> {
    Pending,
    Failed(&'a str),
    Rows {
        rows: Vec<&'a StationRecord>,
        /// Stations before filtering.
        total: usize,
        fetched_at: DateTime<Utc>,
    },
}

impl ViewState {
    /// Initial state: empty search, default sort.
    pub fn new(load: StationLoad) -> Self {
        Self {
            load,
            search: String::new(),
            sort: SortOrder::default(),
        }
    }

    pub fn load(&self) -> &StationLoad {
        &self.load
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Apply one action.
    pub fn update(self, action: ViewAction) -> Self {
        match action {
            ViewAction::StationsLoaded(load) => Self { load, ..self },
            ViewAction::SearchChanged(search) => Self { search, ..self },
            ViewAction::SortClicked(key) => Self {
                sort: self.sort.clicked(key),
                ..self
            },
            ViewAction::SortSelected(sort) => Self { sort, ..self },
        }
    }

    /// The filtered, then sorted stations.
    pub fn listing(&self) -> Listing<'_> {
        match &self.load {
            StationLoad::Pending => Listing::Pending,
            StationLoad::Failed { reason } => Listing::Failed(reason),
            StationLoad::Loaded {
                stations,
                fetched_at,
            } => {
                let filtered = filter_stations(stations, &self.search);
                Listing::Rows {
                    rows: sort_stations(filtered, self.sort),
                    total: stations.len(),
                    fetched_at: *fetched_at,
                }
            }
        }
    }

    /// Query string that reproduces this state's search and sort.
    pub fn query_string(&self) -> String {
        let sort = format!(
            "sort={}&dir={}",
            self.sort.key.as_str(),
            self.sort.direction.as_str()
        );
        if self.search.is_empty() {
            sort
        } else {
            format!("q={}&{}", urlencoding::encode(&self.search), sort)
        }
    }
}
