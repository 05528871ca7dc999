//! Fuel station directory server.
//!
//! Fetches the City of Cologne's fuel/hazmat station dataset once, and serves
//! a searchable, sortable list of the stations with links to a map service.

pub mod config;
pub mod stations;
pub mod view;
pub mod web;
