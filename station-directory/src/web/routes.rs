//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::stations::StationError;
use crate::view::{InvalidSort, Listing};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/stations/reload", post(reload_stations))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Directory page.
async fn index_page(State(state): State<AppState>, Query(query): Query<DirectoryQuery>) -> Response {
    let load = state.directory.snapshot().await;

    let view = match query.view_state(load) {
        Ok(view) => view,
        Err(e) => {
            warn!(error = %e, "rejecting directory page request");
            return error_page(
                StatusCode::BAD_REQUEST,
                "Ungültige Sortierung",
                "Die angeforderte Sortierung ist unbekannt.",
                Some(e.to_string()),
            );
        }
    };

    let page = IndexTemplate::from_view(&view, &state.map_base_url);
    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Fehler",
            "Die Seite konnte nicht erstellt werden.",
            Some(e.to_string()),
        ),
    }
}

/// Render the error page, falling back to plain text if that fails too.
fn error_page(status: StatusCode, title: &str, message: &str, details: Option<String>) -> Response {
    let template = ErrorTemplate {
        title: title.to_string(),
        message: message.to_string(),
        details,
    };
    let body = template
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e));
    (status, Html(body)).into_response()
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Filtered and sorted station list, as an HTML fragment or JSON.
async fn list_stations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DirectoryQuery>,
) -> Result<Response, AppError> {
    let load = state.directory.snapshot().await;
    let view = query.view_state(load)?;

    if accepts_html(&headers) {
        let template = StationListTemplate {
            list: StationListView::from_listing(view.listing(), &state.map_base_url),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        return Ok(Html(html).into_response());
    }

    match view.listing() {
        Listing::Pending => Err(AppError::Unavailable {
            message: "station list is still loading".to_string(),
        }),
        Listing::Failed(reason) => Err(AppError::Upstream {
            message: reason.to_string(),
        }),
        Listing::Rows {
            rows,
            total,
            fetched_at,
        } => {
            let stations: Vec<StationResult> = rows
                .iter()
                .map(|r| StationResult::from_record(r, &state.map_base_url))
                .collect();
            let sort = view.sort();

            Ok(Json(StationsResponse {
                fetched_at,
                total,
                shown: stations.len(),
                search: view.search().to_string(),
                sort: sort.key.to_string(),
                dir: sort.direction.to_string(),
                stations,
            })
            .into_response())
        }
    }
}

/// Fetch the dataset again and replace the station list.
async fn reload_stations(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let stations = state.directory.load().await?;
    info!(stations, "station list reloaded on request");
    Ok(Json(ReloadResponse { stations }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unavailable { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<InvalidSort> for AppError {
    fn from(e: InvalidSort) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<StationError> for AppError {
    fn from(e: StationError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
