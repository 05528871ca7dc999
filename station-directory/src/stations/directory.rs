//! Shared in-memory station directory.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

use super::client::StationClient;
use super::error::StationError;
use super::record::{StationRecord, records_from_features};

/// Outcome of loading the dataset.
#[derive(Debug, Clone)]
pub enum StationLoad {
    /// The fetch has not completed yet.
    Pending,
    /// The dataset was fetched and parsed.
    Loaded {
        stations: Arc<[StationRecord]>,
        fetched_at: DateTime<Utc>,
    },
    /// The fetch failed; no stations are available.
    Failed { reason: String },
}

impl StationLoad {
    /// A successful load stamped with the current time.
    pub fn loaded(stations: Vec<StationRecord>) -> Self {
        StationLoad::Loaded {
            stations: stations.into(),
            fetched_at: Utc::now(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        StationLoad::Failed {
            reason: reason.into(),
        }
    }

    /// The loaded stations, if any.
    pub fn stations(&self) -> Option<&[StationRecord]> {
        match self {
            StationLoad::Loaded { stations, .. } => Some(stations),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, StationLoad::Loaded { .. })
    }
}

/// Thread-safe holder for the station list.
///
/// The list is only ever replaced as a whole; readers take a cheap snapshot
/// and never hold the lock while working with it. Loads run one at a time,
/// so the stored list always comes from the most recently started fetch.
#[derive(Clone)]
pub struct StationDirectory {
    inner: Arc<RwLock<StationLoad>>,
    loading: Arc<Mutex<()>>,
    client: StationClient,
}

impl StationDirectory {
    /// Create a directory that has not been loaded yet.
    pub fn new(client: StationClient) -> Self {
        Self::with_load(client, StationLoad::Pending)
    }

    /// Create a directory with a known load outcome (for tests and tooling).
    pub fn with_load(client: StationClient, load: StationLoad) -> Self {
        Self {
            inner: Arc::new(RwLock::new(load)),
            loading: Arc::new(Mutex::new(())),
            client,
        }
    }

    /// Current load outcome.
    pub async fn snapshot(&self) -> StationLoad {
        self.inner.read().await.clone()
    }

    /// Fetch the dataset and replace the station list.
    ///
    /// On failure a previously loaded list is kept; otherwise the failure is
    /// recorded so it can be shown. Returns the number of stations loaded.
    /// A load started while another is running waits for it to finish.
    pub async fn load(&self) -> Result<usize, StationError> {
        let _loading = self.loading.lock().await;

        match self.client.fetch_features().await {
            Ok(features) => {
                let received = features.len();
                let report = records_from_features(features);
                let count = report.stations.len();
                info!(
                    received,
                    loaded = count,
                    skipped = report.skipped,
                    unparsed = report.unparsed,
                    "station list loaded"
                );

                *self.inner.write().await = StationLoad::loaded(report.stations);
                Ok(count)
            }
            Err(e) => {
                error!(url = self.client.url(), error = %e, "failed to load stations");

                let mut guard = self.inner.write().await;
                if !guard.is_loaded() {
                    *guard = StationLoad::failed(e.to_string());
                }
                Err(e)
            }
        }
    }
}
