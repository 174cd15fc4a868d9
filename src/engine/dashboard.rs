use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::data::store::{dedupe, SeriesStore};
use crate::data::PriceSource;
use crate::errors::AppError;
use crate::models::config::WindowMinutes;
use crate::models::matrix::CorrelationMatrix;
use crate::models::series::SeriesSnapshot;
use crate::models::ticker::Ticker;

use super::correlation;

/// A snapshot and the matrix derived from it, published together.
#[derive(Debug)]
pub struct Published {
    pub generation: u64,
    pub snapshot: Arc<SeriesSnapshot>,
    pub matrix: Arc<CorrelationMatrix>,
}

/// Session state: the ticker list, and the latest published snapshot/matrix.
///
/// Each window change takes a new generation number. A load only publishes
/// if its generation is still the latest when it finishes, so an older load
/// completing late can never replace a newer one. A failed load leaves the
/// previous publication in place.
pub struct Dashboard<S> {
    store: SeriesStore<S>,
    tickers: Mutex<Option<Arc<Vec<Ticker>>>>,
    generation: AtomicU64,
    published: Mutex<Option<Arc<Published>>>,
}

impl<S: PriceSource> Dashboard<S> {
    pub fn new(source: S) -> Self {
        Self {
            store: SeriesStore::new(source),
            tickers: Mutex::new(None),
            generation: AtomicU64::new(0),
            published: Mutex::new(None),
        }
    }

    /// Ticker list, fetched on first use and reused for the whole session.
    pub async fn tickers(&self) -> Result<Arc<Vec<Ticker>>, AppError> {
        let mut cached = self.tickers.lock().await;
        if let Some(tickers) = cached.as_ref() {
            return Ok(tickers.clone());
        }

        let listed = self.store.source().list_tickers().await?;
        let tickers = Arc::new(dedupe(&listed));
        info!("Loaded {} tickers", tickers.len());
        *cached = Some(tickers.clone());
        Ok(tickers)
    }

    /// Reload every ticker for `window` and publish the new snapshot/matrix.
    ///
    /// Returns `AppError::Superseded` if another window change started while
    /// this one was in flight; its result is discarded.
    pub async fn set_window(&self, window: WindowMinutes) -> Result<Arc<Published>, AppError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Window change to {} (generation {})", window, generation);

        let loaded = match self.tickers().await {
            Ok(tickers) => self.store.load(&tickers, window).await,
            Err(e) => Err(e),
        };
        self.ensure_latest(generation)?;
        let snapshot = Arc::new(loaded?);

        let matrix = {
            let snapshot = snapshot.clone();
            tokio::task::spawn_blocking(move || correlation::compute(&snapshot))
                .await
                .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        };

        let mut published = self.published.lock().await;
        self.ensure_latest(generation)?;
        let entry = Arc::new(Published {
            generation,
            snapshot,
            matrix: Arc::new(matrix),
        });
        *published = Some(entry.clone());

        info!(
            "Published generation {}: {} tickers, window {}",
            generation,
            entry.matrix.size(),
            window
        );
        Ok(entry)
    }

    /// Latest published snapshot/matrix, if any load has succeeded.
    pub async fn current(&self) -> Option<Arc<Published>> {
        self.published.lock().await.clone()
    }

    /// Generation number of the most recent window change.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn ensure_latest(&self, generation: u64) -> Result<(), AppError> {
        let latest = self.latest_generation();
        if latest != generation {
            warn!(
                "Discarding load for generation {} (latest is {})",
                generation, latest
            );
            return Err(AppError::Superseded { generation, latest });
        }
        Ok(())
    }
}
