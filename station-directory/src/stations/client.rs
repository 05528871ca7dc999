//! ArcGIS feature query client for the station dataset.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::StationError;

/// Default dataset URL: Cologne's fuel/hazmat stations layer, all fields,
/// geometry reprojected to WGS84 (`outSR=4326`).
pub const DEFAULT_DATASET_URL: &str = "https://geoportal.stadt-koeln.de/arcgis/rest/services/verkehr/gefahrgutstrecken/MapServer/0/query?where=objectid+is+not+null&outFields=*&returnGeometry=true&outSR=4326&f=pjson";

/// Top-level body of a feature query.
///
/// ArcGIS reports query failures with HTTP 200 and an `error` object instead
/// of `features`, so both are optional here.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub features: Option<Vec<FeatureDto>>,
    pub error: Option<ServiceErrorDto>,
}

/// A single feature of the query result.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureDto {
    pub attributes: AttributesDto,
    #[serde(default)]
    pub geometry: Option<GeometryDto>,
}

/// Feature attributes - we only need the id and the composite address.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AttributesDto {
    pub objectid: i64,
    pub adresse: Option<String>,
}

/// Point geometry; `x` is longitude and `y` latitude in WGS84.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct GeometryDto {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// In-band error object.
#[derive(Debug, Deserialize)]
pub struct ServiceErrorDto {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// Configuration for the dataset client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Full query URL
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StationClientConfig {
    /// Create a new config for the given query URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: 30,
        }
    }

    /// Set a custom request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for StationClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATASET_URL)
    }
}

/// Client for the station feature query.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    url: String,
}

impl StationClient {
    /// Create a new dataset client.
    pub fn new(config: StationClientConfig) -> Result<Self, StationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// The query URL this client fetches.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch every feature of the dataset.
    pub async fn fetch_features(&self) -> Result<Vec<FeatureDto>, StationError> {
        debug!(url = %self.url, "fetching station features");

        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_query_body(&body)
    }
}

/// Decode a query response body into its features.
pub fn parse_query_body(body: &str) -> Result<Vec<FeatureDto>, StationError> {
    let response: QueryResponse = serde_json::from_str(body).map_err(|e| StationError::Json {
        message: e.to_string(),
    })?;

    if let Some(error) = response.error {
        let message = if error.details.is_empty() {
            error.message
        } else {
            format!("{} ({})", error.message, error.details.join("; "))
        };
        return Err(StationError::Service {
            code: error.code,
            message,
        });
    }

    response.features.ok_or_else(|| StationError::Json {
        message: "response has neither `features` nor `error`".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = StationClientConfig::default();
        assert_eq!(config.url, DEFAULT_DATASET_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_timeout() {
        let config = StationClientConfig::new("http://localhost:8080/query").with_timeout_secs(5);
        assert_eq!(config.url, "http://localhost:8080/query");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn parse_features_with_geometry() {
        let body = r#"{
            "displayFieldName": "adresse",
            "features": [
                {
                    "attributes": { "objectid": 7, "adresse": "Hauptstr. 1 (50667 Altstadt)", "betreiber": "X" },
                    "geometry": { "x": 6.95, "y": 50.94 }
                }
            ]
        }"#;

        let features = parse_query_body(body).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].attributes.objectid, 7);
        assert_eq!(
            features[0].attributes.adresse.as_deref(),
            Some("Hauptstr. 1 (50667 Altstadt)")
        );
        let geometry = features[0].geometry.unwrap();
        assert_eq!(geometry.x, Some(6.95));
        assert_eq!(geometry.y, Some(50.94));
    }

    #[test]
    fn parse_features_without_geometry() {
        let body = r#"{ "features": [ { "attributes": { "objectid": 1, "adresse": null } } ] }"#;
        let features = parse_query_body(body).unwrap();
        assert!(features[0].geometry.is_none());
        assert!(features[0].attributes.adresse.is_none());
    }

    #[test]
    fn parse_empty_features() {
        let features = parse_query_body(r#"{ "features": [] }"#).unwrap();
        assert!(features.is_empty());
    }

    #[test]
    fn parse_in_band_error() {
        let body = r#"{ "error": { "code": 400, "message": "Unable to complete operation.", "details": ["Invalid query"] } }"#;
        match parse_query_body(body) {
            Err(StationError::Service { code, message }) => {
                assert_eq!(code, 400);
                assert_eq!(message, "Unable to complete operation. (Invalid query)");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn parse_missing_features_is_json_error() {
        assert!(matches!(
            parse_query_body("{}"),
            Err(StationError::Json { .. })
        ));
    }

    #[test]
    fn parse_garbage_is_json_error() {
        assert!(matches!(
            parse_query_body("<html>maintenance</html>"),
            Err(StationError::Json { .. })
        ));
    }
}
