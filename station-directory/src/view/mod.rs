//! Directory view logic: search, sorting and the state that drives them.
//!
//! Everything here is synchronous and free of I/O. The web layer rebuilds a
//! [`ViewState`] per request and renders its [`Listing`].

mod collate;
mod filter;
mod sort;
mod state;

pub use collate::locale_cmp;
pub use filter::filter_stations;
pub use sort::{InvalidSort, SortDirection, SortKey, SortOrder, sort_stations};
pub use state::{Listing, ViewAction, ViewState};
