//! Substring search over station addresses.

use crate::stations::StationRecord;

/// Keep the stations whose raw address contains `search`, ignoring case.
///
/// Order is preserved and an empty search keeps every station.
pub fn filter_stations<'a>(stations: &'a [StationRecord], search: &str) -> Vec<&'a StationRecord> {
    if search.is_empty() {
        return stations.iter().collect();
    }

    let needle = search.to_lowercase();
    stations
        .iter()
        .filter(|s| s.full_address().to_lowercase().contains(&needle))
        .collect()
}
