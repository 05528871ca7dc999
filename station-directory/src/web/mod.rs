//! Web layer for the station directory.
//!
//! Serves the directory page, the station list as an HTML fragment or JSON,
//! and the static assets.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
