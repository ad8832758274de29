//! Load-cycle state
//!
//! Owns the current record set. A load cycle replaces it wholesale: readers
//! take an `Arc` snapshot and never see a half-installed set.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::detail;
use crate::engine::{self, DashboardView};
use crate::fetcher::{LoadedRecords, WeatherFetcher};
use crate::models::{FilterCriteria, WeatherRecord};
use crate::registry::CityRegistry;
use crate::{DashboardError, Result};

/// Status of the record set
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// No load cycle has started
    #[default]
    Idle,
    /// A load cycle is running
    Loading,
    /// The last cycle succeeded
    Ready(Arc<LoadedRecords>),
    /// The last cycle failed; holds the user-facing message
    Failed(String),
}

impl LoadState {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Ready(_) => "ready",
            LoadState::Failed(_) => "failed",
        }
    }
}

/// Restores the pre-cycle state when a load cycle is dropped midway
struct CycleGuard<'a> {
    state: &'a RwLock<LoadState>,
    previous: Option<LoadState>,
}

impl CycleGuard<'_> {
    fn disarm(mut self) {
        self.previous = None;
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        let Some(previous) = self.previous.take() else {
            return;
        };
        match self.state.try_write() {
            Ok(mut state) => {
                debug!("Load cycle cancelled, restoring {} state", previous.label());
                *state = previous;
            }
            Err(_) => warn!("Load cycle cancelled while the state was locked"),
        }
    }
}

/// Registry, fetcher and the current record set
pub struct Dashboard {
    registry: CityRegistry,
    fetcher: WeatherFetcher,
    state: RwLock<LoadState>,
    reload_lock: Mutex<()>,
}

impl Dashboard {
    #[must_use]
    pub fn new(registry: CityRegistry, fetcher: WeatherFetcher) -> Self {
        Self {
            registry,
            fetcher,
            state: RwLock::new(LoadState::Idle),
            reload_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &CityRegistry {
        &self.registry
    }

    #[must_use]
    pub fn fetcher(&self) -> &WeatherFetcher {
        &self.fetcher
    }

    /// Current status
    pub async fn state(&self) -> LoadState {
        self.state.read().await.clone()
    }

    /// Run one load cycle and install its outcome.
    ///
    /// Cycles are serialized; a failed cycle discards the previous set. If
    /// the returned future is dropped before the cycle finishes, the state
    /// from before the cycle is put back.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<Arc<LoadedRecords>> {
        let _cycle = self.reload_lock.lock().await;
        let previous = std::mem::replace(&mut *self.state.write().await, LoadState::Loading);
        let guard = CycleGuard {
            state: &self.state,
            previous: Some(previous),
        };

        let outcome = self.fetcher.load_all(&self.registry).await;
        let (next, result) = match outcome {
            Ok(loaded) => {
                let loaded = Arc::new(loaded);
                info!("Installed {} weather records", loaded.records.len());
                (LoadState::Ready(Arc::clone(&loaded)), Ok(loaded))
            }
            Err(e) => {
                warn!("Load cycle failed: {}", e);
                (LoadState::Failed(e.user_message()), Err(e))
            }
        };
        *self.state.write().await = next;
        guard.disarm();
        result
    }

    /// Snapshot of the installed record set
    pub async fn snapshot(&self) -> Result<Arc<LoadedRecords>> {
        match &*self.state.read().await {
            LoadState::Ready(loaded) => Ok(Arc::clone(loaded)),
            LoadState::Failed(message) => Err(DashboardError::fetch_batch_failed(message.clone())),
            other => Err(DashboardError::DataNotLoaded {
                state: other.label().to_string(),
            }),
        }
    }

    /// Evaluate the list view against the installed record set
    pub async fn view(&self, criteria: &FilterCriteria) -> Result<DashboardView> {
        let loaded = self.snapshot().await?;
        Ok(engine::evaluate(&loaded.records, criteria, &self.registry))
    }

    /// Detail view from the installed record set
    pub async fn detail(&self, key: &str) -> Result<WeatherRecord> {
        let loaded = self.snapshot().await?;
        detail::find_city_record(key, &self.registry, &loaded.records).cloned()
    }

    /// Detail view with its own request to the weather source
    pub async fn fetch_detail(&self, key: &str) -> Result<WeatherRecord> {
        detail::fetch_city_record(key, &self.registry, self.fetcher.source()).await
    }
}
