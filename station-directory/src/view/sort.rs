//! Column sorting.

use std::fmt;
use std::str::FromStr;

use crate::stations::StationRecord;

use super::collate::locale_cmp;

/// Error returned when a sort key or direction is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sort {what}: {value:?}")]
pub struct InvalidSort {
    what: &'static str,
    value: String,
}

/// A sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Address,
    Postcode,
    District,
}

impl SortKey {
    /// All columns, in display order.
    pub const ALL: [SortKey; 3] = [SortKey::Address, SortKey::Postcode, SortKey::District];

    /// Query-string form.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Address => "address",
            SortKey::Postcode => "postcode",
            SortKey::District => "district",
        }
    }

    /// The field of `record` this column sorts by.
    pub fn field(self, record: &StationRecord) -> &str {
        match self {
            SortKey::Address => record.address(),
            SortKey::Postcode => record.postcode(),
            SortKey::District => record.district(),
        }
    }
}

impl FromStr for SortKey {
    type Err = InvalidSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "address" => Ok(SortKey::Address),
            "postcode" => Ok(SortKey::Postcode),
            "district" => Ok(SortKey::District),
            _ => Err(InvalidSort {
                what: "key",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = InvalidSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            _ => Err(InvalidSort {
                what: "direction",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active sort column and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    /// The order after the user clicks the header of `key`.
    ///
    /// Clicking the active column flips its direction; clicking another
    /// column selects it in ascending order.
    pub fn clicked(self, key: SortKey) -> Self {
        if key == self.key {
            Self::new(key, self.direction.toggled())
        } else {
            Self::ascending(key)
        }
    }
}

impl Default for SortOrder {
    /// District, ascending.
    fn default() -> Self {
        Self::ascending(SortKey::District)
    }
}

/// Order stations by the given column.
///
/// Uses a stable sort; stations with equal keys keep their relative order in
/// both directions.
pub fn sort_stations<'a>(
    mut records: Vec<&'a StationRecord>,
    order: SortOrder,
) -> Vec<&'a StationRecord> {
    let key = order.key;
    match order.direction {
        SortDirection::Ascending => {
            records.sort_by(|a, b| locale_cmp(key.field(a), key.field(b)));
        }
        SortDirection::Descending => {
            records.sort_by(|a, b| locale_cmp(key.field(b), key.field(a)));
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addresses(records: &[&StationRecord]) -> Vec<String> {
        records.iter().map(|r| r.address().to_string()).collect()
    }

    #[test]
    fn parse_keys_and_directions() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Ascending));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Descending));
    }

    #[test]
    fn reject_unknown_key() {
        let err = "name".parse::<SortKey>().unwrap_err();
        assert_eq!(err.to_string(), "invalid sort key: \"name\"");
        assert!("Address".parse::<SortKey>().is_err());
        assert!("up".parse::<SortDirection>().is_err());
    }

    #[test]
    fn default_is_district_ascending() {
        assert_eq!(
            SortOrder::default(),
            SortOrder::new(SortKey::District, SortDirection::Ascending)
        );
    }

    #[test]
    fn clicking_active_column_toggles() {
        let order = SortOrder::ascending(SortKey::Address);
        let once = order.clicked(SortKey::Address);
        assert_eq!(once, SortOrder::new(SortKey::Address, SortDirection::Descending));
        assert_eq!(once.clicked(SortKey::Address), order);
    }

    #[test]
    fn clicking_other_column_resets_to_ascending() {
        let order = SortOrder::new(SortKey::Address, SortDirection::Descending);
        assert_eq!(
            order.clicked(SortKey::Postcode),
            SortOrder::ascending(SortKey::Postcode)
        );
    }

    #[test]
    fn sort_by_address_then_toggle() {
        let a = StationRecord::new(1, "A (11111 X)", None);
        let b = StationRecord::new(2, "B (22222 Y)", None);

        let order = SortOrder::ascending(SortKey::Address);
        let asc = sort_stations(vec![&b, &a], order);
        assert_eq!(addresses(&asc), vec!["A", "B"]);

        let desc = sort_stations(vec![&b, &a], order.clicked(SortKey::Address));
        assert_eq!(addresses(&desc), vec!["B", "A"]);
    }

    #[test]
    fn sort_by_postcode_and_district() {
        let x = StationRecord::new(1, "Ring 1 (50999 Altstadt)", None);
        let y = StationRecord::new(2, "Ring 2 (50667 Zollstock)", None);
        let z = StationRecord::new(3, "Ring 3 (51143 Ägidienberg)", None);

        let by_postcode = sort_stations(vec![&x, &y, &z], SortOrder::ascending(SortKey::Postcode));
        let ids: Vec<i64> = by_postcode.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        let by_district = sort_stations(vec![&x, &y, &z], SortOrder::ascending(SortKey::District));
        let ids: Vec<i64> = by_district.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn ties_keep_input_order() {
        let a = StationRecord::new(1, "Ring 1 (50667 Altstadt)", None);
        let b = StationRecord::new(2, "Ring 2 (50667 Altstadt)", None);

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let sorted = sort_stations(vec![&b, &a], SortOrder::new(SortKey::District, direction));
            let ids: Vec<i64> = sorted.iter().map(|r| r.id()).collect();
            assert_eq!(ids, vec![2, 1]);
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn key() -> impl Strategy<Value = SortKey> {
        prop_oneof![
            Just(SortKey::Address),
            Just(SortKey::Postcode),
            Just(SortKey::District),
        ]
    }

    proptest! {
        /// With distinct keys, toggling the direction exactly reverses the order.
        #[test]
        fn toggle_reverses(
            words in proptest::collection::btree_set("[A-Za-zÄÖÜäöüß]{1,10}", 0..10),
            postcodes in proptest::collection::btree_set("[0-9]{5}", 10),
            key in key(),
        ) {
            let words: Vec<String> = words.into_iter().collect();
            let postcodes: Vec<String> = postcodes.into_iter().collect();
            let stations: Vec<StationRecord> = words
                .iter()
                .zip(&postcodes)
                .enumerate()
                .map(|(i, (w, pc))| StationRecord::new(i as i64, format!("{w} ({pc} {w})"), None))
                .collect();

            let order = SortOrder::ascending(key);
            let asc: Vec<i64> = sort_stations(stations.iter().collect(), order)
                .iter()
                .map(|r| r.id())
                .collect();
            let mut desc: Vec<i64> = sort_stations(stations.iter().collect(), order.clicked(key))
                .iter()
                .map(|r| r.id())
                .collect();
            desc.reverse();
            prop_assert_eq!(asc, desc);
        }

        /// Sorting never changes which stations are present.
        #[test]
        fn sort_is_a_permutation(
            addresses in proptest::collection::vec(".{0,16}", 0..10),
            key in key(),
        ) {
            let stations: Vec<StationRecord> = addresses
                .iter()
                .enumerate()
                .map(|(i, a)| StationRecord::new(i as i64, a.clone(), None))
                .collect();
            let mut ids: Vec<i64> = sort_stations(stations.iter().collect(), SortOrder::ascending(key))
                .iter()
                .map(|r| r.id())
                .collect();
            ids.sort_unstable();
            prop_assert_eq!(ids, (0..stations.len() as i64).collect::<Vec<_>>());
        }
    }
}
