//! Lookup-or-refresh of ZIP-keyed search records.
//!
//! A weather search always produces a fresh record: the ZIP is resolved, the
//! current conditions are fetched and scored, and the result overwrites
//! whatever was stored under `search-<zip>` before. The overwrite names the
//! revision it read, so a concurrent writer is detected rather than
//! clobbered.
//!
//! # Concurrency
//!
//! The store lock is taken once per store call and never across the read
//! and the write. Two searches for the same new ZIP can therefore both see
//! no record and both try to create it. The loser's insert fails with a
//! conflict, it re-reads the winner's revision and writes once more as an
//! update. A second conflict is returned to the caller.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use ridecast_core::WeatherProvider;
use ridecast_store::Store;
use ridecast_types::{SearchRecord, ZipCode};

use crate::error::{Result, ServiceError};

/// Runs weather searches and records their results.
#[derive(Clone)]
pub struct SearchUpsertService {
    provider: Arc<dyn WeatherProvider>,
    store: Arc<Mutex<Store>>,
    lookup_timeout: Duration,
}

impl SearchUpsertService {
    /// Create a service over a provider and store.
    ///
    /// Each provider call is abandoned after `lookup_timeout`.
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        store: Arc<Mutex<Store>>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            store,
            lookup_timeout,
        }
    }

    /// Look up current weather for `zip` and store it as `search-<zip>`.
    ///
    /// Returns the written record with its new revision. If either provider
    /// call fails or times out, nothing is written.
    pub async fn upsert_by_zip(&self, zip: &ZipCode) -> Result<SearchRecord> {
        let location = self
            .bounded("resolve_zip", self.provider.resolve_zip(zip))
            .await
            .inspect_err(|e| warn!("Lookup for ZIP {} failed: {}", zip, e))?;

        let conditions = self
            .bounded(
                "fetch_current_conditions",
                self.provider
                    .fetch_current_conditions(location.lat, location.lon),
            )
            .await
            .inspect_err(|e| warn!("Lookup for ZIP {} failed: {}", zip, e))?;

        let record = SearchRecord::from_lookup(zip, &location, &conditions);
        debug!(
            "ZIP {} is {} with score {}",
            zip, record.location, record.rideability_score
        );

        let existing = self.store.lock().await.get(&record.id)?;
        let record = record.with_rev(existing.and_then(|r| r.rev));

        let stored = self.commit(record).await?;
        info!("Recorded search {} ({})", stored.id, stored.location);
        Ok(stored)
    }

    /// Write `record`, retrying once with a fresh revision on conflict.
    pub(crate) async fn commit(&self, record: SearchRecord) -> Result<SearchRecord> {
        let first = self.store.lock().await.put(&record);

        match first {
            Ok(stored) => Ok(stored),
            Err(ridecast_store::Error::Conflict(id)) => {
                warn!("Revision conflict writing {}, retrying once", id);

                let current = self.store.lock().await.get(&id)?;
                let retry = record.with_rev(current.and_then(|r| r.rev));

                self.store.lock().await.put(&retry).map_err(|e| {
                    if e.is_conflict() {
                        warn!("Revision conflict writing {} again, giving up", id);
                    }
                    ServiceError::from(e)
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Run a provider call under the lookup timeout.
    async fn bounded<T>(
        &self,
        operation: &str,
        call: impl Future<Output = ridecast_core::Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.lookup_timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(ridecast_core::Error::Timeout {
                operation: operation.to_string(),
                duration: self.lookup_timeout,
            }
            .into()),
        }
    }
}
