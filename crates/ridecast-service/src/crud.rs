//! Manual management of stored searches.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use ridecast_store::{ListOrder, Store};
use ridecast_types::{NewSearch, SearchPatch, SearchRecord, ZipCode};

use crate::error::{Result, ServiceError};

/// Create, read, update and delete over the search store.
#[derive(Clone)]
pub struct CrudService {
    store: Arc<Mutex<Store>>,
}

impl CrudService {
    pub fn new(store: Arc<Mutex<Store>>) -> Self {
        Self { store }
    }

    /// Store a manually entered search.
    ///
    /// The score is computed here with snow never flagged, and the identifier
    /// is the store's next manual number.
    pub async fn create(&self, entry: NewSearch) -> Result<SearchRecord> {
        validate_fields(
            &entry.zip_code,
            entry.precipitation,
            entry.visibility,
            entry.wind,
        )?;
        let record = self.store.lock().await.create(entry)?;
        Ok(record)
    }

    /// All searches, newest first.
    pub async fn list(&self) -> Result<Vec<SearchRecord>> {
        Ok(self.store.lock().await.list(ListOrder::NewestFirst)?)
    }

    /// A single search.
    pub async fn get(&self, id: &str) -> Result<SearchRecord> {
        self.store
            .lock()
            .await
            .get(id)?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Merge `patch` into the stored search and write it back.
    ///
    /// The write uses the `_rev` from the patch when one is given, otherwise
    /// the revision just read. The merged fields are held to the same rules
    /// as [`create`](Self::create). The score is left as stored unless the
    /// patch sets it.
    pub async fn update(&self, id: &str, mut patch: SearchPatch) -> Result<SearchRecord> {
        if let Some(body_id) = patch.id.take()
            && body_id != id
        {
            return Err(ServiceError::Validation(format!(
                "body _id '{}' does not match '{}'",
                body_id, id
            )));
        }

        let mut record = self.get(id).await?;
        let rev = patch.rev.take().or(record.rev.take());
        patch.apply(&mut record);
        validate_fields(
            &record.zip_code,
            record.precipitation,
            record.visibility,
            record.wind,
        )?;
        record.rev = rev;

        let stored = self.store.lock().await.put(&record)?;
        debug!(
            "Updated search {} to {}",
            stored.id,
            stored.rev.as_ref().map(|r| r.as_str()).unwrap_or("-")
        );
        Ok(stored)
    }

    /// Delete a search.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let record = self.get(id).await?;
        let rev = record
            .rev
            .ok_or_else(|| ServiceError::Conflict(id.to_string()))?;

        self.store.lock().await.remove(id, &rev)?;
        info!("Deleted search {}", id);
        Ok(())
    }
}

fn validate_fields(zip_code: &str, precipitation: f64, visibility: f64, wind: f64) -> Result<()> {
    ZipCode::parse(zip_code)?;

    for (field, value) in [
        ("precipitation", precipitation),
        ("visibility", visibility),
        ("wind", wind),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ServiceError::Validation(format!(
                "{} must be a non-negative number, got {}",
                field, value
            )));
        }
    }

    Ok(())
}
