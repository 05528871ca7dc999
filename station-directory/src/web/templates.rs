//! Askama templates for the web frontend.

use askama::Template;

use crate::stations::{Coordinates, StationRecord};
use crate::view::{Listing, SortDirection, SortKey, ViewAction, ViewState};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Directory page: search box, sortable headers and the station list.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub search: String,
    pub sort_key: &'static str,
    pub sort_dir: &'static str,
    pub columns: Vec<ColumnHeader>,
    pub list: StationListView,
}

impl IndexTemplate {
    /// Build the page for a view state.
    pub fn from_view(view: &ViewState, map_base_url: &str) -> Self {
        let sort = view.sort();
        Self {
            search: view.search().to_string(),
            sort_key: sort.key.as_str(),
            sort_dir: sort.direction.as_str(),
            columns: ColumnHeader::for_view(view),
            list: StationListView::from_listing(view.listing(), map_base_url),
        }
    }
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Station list fragment.
#[derive(Template)]
#[template(path = "station_list.html")]
pub struct StationListTemplate {
    pub list: StationListView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A clickable column header.
#[derive(Debug, Clone)]
pub struct ColumnHeader {
    pub label: &'static str,
    /// Link applying a click on this header to the current state
    pub href: String,
    pub active: bool,
    /// Arrow shown next to the active column
    pub indicator: &'static str,
}

impl ColumnHeader {
    /// Headers for all columns, each linking to the state after its click.
    pub fn for_view(view: &ViewState) -> Vec<Self> {
        let sort = view.sort();
        SortKey::ALL
            .into_iter()
            .map(|key| {
                let next = view.clone().update(ViewAction::SortClicked(key));
                let active = sort.key == key;
                let indicator = match (active, sort.direction) {
                    (false, _) => "",
                    (true, SortDirection::Ascending) => "▲",
                    (true, SortDirection::Descending) => "▼",
                };
                Self {
                    label: column_label(key),
                    href: format!("/?{}", next.query_string()),
                    active,
                    indicator,
                }
            })
            .collect()
    }
}

/// German column heading.
pub fn column_label(key: SortKey) -> &'static str {
    match key {
        SortKey::Address => "Adresse",
        SortKey::Postcode => "Postleitzahl",
        SortKey::District => "Stadtteil",
    }
}

/// The list area: rows, or a notice while loading or after a failure.
#[derive(Debug, Clone)]
pub struct StationListView {
    pub rows: Vec<StationRow>,
    pub total: usize,
    pub fetched_at: Option<String>,
    pub pending: bool,
    pub error: Option<String>,
}

impl StationListView {
    pub fn from_listing(listing: Listing<'_>, map_base_url: &str) -> Self {
        match listing {
            Listing::Pending => Self {
                rows: Vec::new(),
                total: 0,
                fetched_at: None,
                pending: true,
                error: None,
            },
            Listing::Failed(reason) => Self {
                rows: Vec::new(),
                total: 0,
                fetched_at: None,
                pending: false,
                error: Some(reason.to_string()),
            },
            Listing::Rows {
                rows,
                total,
                fetched_at,
            } => Self {
                rows: rows
                    .into_iter()
                    .map(|r| StationRow::from_record(r, map_base_url))
                    .collect(),
                total,
                fetched_at: Some(fetched_at.format("%d.%m.%Y %H:%M UTC").to_string()),
                pending: false,
                error: None,
            },
        }
    }

    /// Number of rows shown.
    pub fn shown(&self) -> usize {
        self.rows.len()
    }
}

/// One station row.
#[derive(Debug, Clone)]
pub struct StationRow {
    pub address: String,
    pub postcode: String,
    pub district: String,
    pub map_url: Option<String>,
}

impl StationRow {
    pub fn from_record(record: &StationRecord, map_base_url: &str) -> Self {
        Self {
            address: record.address().to_string(),
            postcode: record.postcode().to_string(),
            district: record.district().to_string(),
            map_url: record
                .coordinates()
                .map(|c| map_place_url(map_base_url, c)),
        }
    }
}

/// Map service link for a position: `<base>/place/<lat>,<lng>`.
pub fn map_place_url(map_base_url: &str, coordinates: Coordinates) -> String {
    format!(
        "{}/place/{},{}",
        map_base_url.trim_end_matches('/'),
        coordinates.lat,
        coordinates.lng
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::StationLoad;

    const MAPS: &str = "https://www.google.com/maps";

    fn view() -> ViewState {
        ViewState::new(StationLoad::loaded(vec![
            StationRecord::new(
                1,
                "B-Str. 2 (50667 Altstadt)",
                Some(Coordinates {
                    lat: 50.9375,
                    lng: 6.9603,
                }),
            ),
            StationRecord::new(2, "A-Str. 1 (50999 Sürth)", None),
        ]))
    }

    #[test]
    fn map_url_uses_lat_then_lng() {
        let c = Coordinates {
            lat: 50.9375,
            lng: 6.9603,
        };
        assert_eq!(
            map_place_url(MAPS, c),
            "https://www.google.com/maps/place/50.9375,6.9603"
        );
        assert_eq!(
            map_place_url("https://maps.example.org/", c),
            "https://maps.example.org/place/50.9375,6.9603"
        );
    }

    #[test]
    fn row_links_only_with_coordinates() {
        let list = StationListView::from_listing(view().listing(), MAPS);
        assert_eq!(list.shown(), 2);
        assert_eq!(list.total, 2);
        // Default sort is district ascending: Altstadt before Sürth.
        assert_eq!(list.rows[0].district, "Altstadt");
        assert!(list.rows[0].map_url.is_some());
        assert_eq!(list.rows[1].district, "Sürth");
        assert!(list.rows[1].map_url.is_none());
    }

    #[test]
    fn headers_link_to_toggled_order() {
        let columns = ColumnHeader::for_view(&view());
        let labels: Vec<&str> = columns.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["Adresse", "Postleitzahl", "Stadtteil"]);

        assert_eq!(columns[0].href, "/?sort=address&dir=asc");
        assert!(!columns[0].active);
        assert_eq!(columns[0].indicator, "");

        assert_eq!(columns[2].href, "/?sort=district&dir=desc");
        assert!(columns[2].active);
        assert_eq!(columns[2].indicator, "▲");
    }

    #[test]
    fn headers_keep_search() {
        let view = view().update(ViewAction::SearchChanged("str".into()));
        let columns = ColumnHeader::for_view(&view);
        assert_eq!(columns[1].href, "/?q=str&sort=postcode&dir=asc");
    }

    #[test]
    fn pending_and_failed_lists() {
        let pending = StationListView::from_listing(Listing::Pending, MAPS);
        assert!(pending.pending);
        assert!(pending.rows.is_empty());

        let failed = StationListView::from_listing(Listing::Failed("HTTP error"), MAPS);
        assert!(!failed.pending);
        assert_eq!(failed.error.as_deref(), Some("HTTP error"));
    }

    #[test]
    fn page_renders_rows_and_headers() {
        let html = IndexTemplate::from_view(&view(), MAPS).render().unwrap();
        assert!(html.contains("Tankstellen in Köln"));
        assert!(html.contains("B-Str. 2"));
        assert!(html.contains("50999"));
        assert!(html.contains("50.9375,6.9603"));
        assert!(html.contains("Postleitzahl"));
    }

    #[test]
    fn fragment_renders_failure_notice() {
        let list = StationListView::from_listing(Listing::Failed("API error 503: down"), MAPS);
        let html = StationListTemplate { list }.render().unwrap();
        assert!(html.contains("API error 503: down"));
    }

    #[test]
    fn fragment_escapes_addresses() {
        let view = ViewState::new(StationLoad::loaded(vec![StationRecord::new(
            1,
            "<b>Weg</b> 1 (50667 Altstadt)",
            None,
        )]));
        let list = StationListView::from_listing(view.listing(), MAPS);
        let html = StationListTemplate { list }.render().unwrap();
        assert!(!html.contains("<b>Weg</b>"));
        assert!(html.contains("&lt;b&gt;Weg"));
    }
}
