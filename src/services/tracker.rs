use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::error::TrackerError;
use crate::models::minifigure::{Minifigure, MinifigureView};
use crate::scrapers::PriceSource;
use crate::services::comparison::with_comparisons;
use crate::services::reconciliation::apply_fetched_prices;
use crate::store::{RecordStore, StoreError};

pub const UPDATED_MESSAGE: &str = "Minifigure updated successfully with price differences.";
pub const UNCHANGED_MESSAGE: &str = "No price difference found. Minifigure not updated.";

/// Result of reconciling one record against the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    Updated(Minifigure),
    Unchanged(Minifigure),
}

impl ReconcileOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ReconcileOutcome::Updated(_) => UPDATED_MESSAGE,
            ReconcileOutcome::Unchanged(_) => UNCHANGED_MESSAGE,
        }
    }

    pub fn minifigure(&self) -> &Minifigure {
        match self {
            ReconcileOutcome::Updated(fig) | ReconcileOutcome::Unchanged(fig) => fig,
        }
    }

    pub fn into_minifigure(self) -> Minifigure {
        match self {
            ReconcileOutcome::Updated(fig) | ReconcileOutcome::Unchanged(fig) => fig,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchStatus {
    Updated,
    Unchanged,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub id: String,
    pub status: BatchStatus,
}

/// Per-record outcome of a batch run, in collection order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn count(&self, pred: impl Fn(&BatchStatus) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.status)).count()
    }

    pub fn updated(&self) -> usize {
        self.count(|s| *s == BatchStatus::Updated)
    }

    pub fn unchanged(&self) -> usize {
        self.count(|s| *s == BatchStatus::Unchanged)
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, BatchStatus::Failed(_)))
    }
}

/// Collection operations and price reconciliation over an injected store
/// and catalog.
///
/// Every operation reloads the whole collection. Load-modify-save
/// sequences hold `write_lock` so concurrent requests cannot interleave
/// their full rewrites.
#[derive(Clone)]
pub struct MinifigureTracker {
    store: Arc<dyn RecordStore>,
    source: Arc<dyn PriceSource>,
    write_lock: Arc<Mutex<()>>,
}

impl MinifigureTracker {
    pub fn new(store: Arc<dyn RecordStore>, source: Arc<dyn PriceSource>) -> Self {
        Self {
            store,
            source,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Whole collection with the used-price comparison attached.
    ///
    /// Read-only: the comparison is computed, never written back.
    pub async fn list(&self) -> Result<Vec<MinifigureView>, TrackerError> {
        let records = self.store.load().await?;
        Ok(with_comparisons(records))
    }

    /// Insert a record, replacing any record with the same identifier.
    pub async fn add(&self, record: Minifigure) -> Result<Minifigure, TrackerError> {
        let id = record
            .id()
            .ok_or_else(|| {
                TrackerError::InvalidPayload(
                    "record needs a \"Minifig number\" or \"Number\"".to_string(),
                )
            })?
            .to_string();

        let _guard = self.write_lock.lock().await;
        let mut records = self.store.load().await?;
        upsert(&mut records, record.clone());
        self.store.save(&records).await?;

        tracing::info!(id = %id, "Stored minifigure ({} in collection)", records.len());
        Ok(record)
    }

    /// Scrape a record from the catalog and store it.
    ///
    /// Nothing is stored when the scrape fails.
    pub async fn add_by_id(&self, id: &str) -> Result<Minifigure, TrackerError> {
        let record = self.source.fetch_details(id).await?;
        self.add(record).await
    }

    /// Merge a partial JSON object over a stored record.
    pub async fn update(&self, id: &str, patch: Value) -> Result<Minifigure, TrackerError> {
        let Value::Object(patch) = patch else {
            return Err(TrackerError::InvalidPayload(
                "expected a JSON object".to_string(),
            ));
        };

        let _guard = self.write_lock.lock().await;
        let mut records = self.store.load().await?;
        let index = position(&records, id)?;

        let merged = merge_patch(&records[index], patch)?;
        let renamed = merged.id() != records[index].id();
        if renamed {
            let taken = records
                .iter()
                .enumerate()
                .any(|(i, fig)| i != index && fig.id() == merged.id());
            if taken {
                return Err(TrackerError::Conflict(
                    merged.id().unwrap_or_default().to_string(),
                ));
            }
        }

        records[index] = merged.clone();
        if renamed {
            records.sort_by(|a, b| a.id().cmp(&b.id()));
        }
        self.store.save(&records).await?;

        tracing::info!(id = %id, "Updated minifigure");
        Ok(merged)
    }

    pub async fn delete(&self, id: &str) -> Result<(), TrackerError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.store.load().await?;

        let before = records.len();
        records.retain(|fig| !fig.has_id(id));
        if records.len() == before {
            return Err(TrackerError::NotFound(id.to_string()));
        }

        self.store.save(&records).await?;
        tracing::info!(id = %id, "Deleted minifigure");
        Ok(())
    }

    pub async fn set_quantity(&self, id: &str, quantity: u32) -> Result<Minifigure, TrackerError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.store.load().await?;
        let index = position(&records, id)?;

        records[index].quantity = quantity;
        self.store.save(&records).await?;

        tracing::info!(id = %id, quantity = quantity, "Updated quantity");
        Ok(records[index].clone())
    }

    /// Reconcile one record against today's catalog prices.
    pub async fn reconcile(&self, id: &str) -> Result<ReconcileOutcome, TrackerError> {
        self.reconcile_on(id, Local::now().date_naive()).await
    }

    /// Reconcile one record, dating any history entry `date`.
    ///
    /// The record must exist before the catalog is contacted. A failed
    /// fetch is returned as-is and nothing is written. When neither price
    /// moved the store is not touched.
    pub async fn reconcile_on(
        &self,
        id: &str,
        date: NaiveDate,
    ) -> Result<ReconcileOutcome, TrackerError> {
        let records = self.store.load().await?;
        position(&records, id)?;

        let fetched = self.source.fetch_prices(id).await?;

        let _guard = self.write_lock.lock().await;
        // Reload: the collection may have changed while the catalog was queried
        let mut records = self.store.load().await?;
        let index = position(&records, id)?;

        match apply_fetched_prices(&mut records[index], fetched, date) {
            Some(change) => {
                self.store.save(&records).await?;
                tracing::info!(
                    id = %id,
                    new_diff = %change.new_price_diff_amount,
                    used_diff = %change.used_price_diff_amount,
                    "Price change recorded"
                );
                Ok(ReconcileOutcome::Updated(records[index].clone()))
            }
            None => {
                tracing::debug!(id = %id, "No price change");
                Ok(ReconcileOutcome::Unchanged(records[index].clone()))
            }
        }
    }

    /// Reconcile every record in turn with today's date.
    pub async fn reconcile_all(&self) -> Result<BatchReport, TrackerError> {
        self.reconcile_all_on(Local::now().date_naive()).await
    }

    /// Reconcile every record sequentially.
    ///
    /// Per-record failures are logged and reported but never abort the
    /// run. Only failing to read the collection up front is an error.
    pub async fn reconcile_all_on(&self, date: NaiveDate) -> Result<BatchReport, TrackerError> {
        let ids: Vec<String> = self
            .store
            .load()
            .await?
            .iter()
            .filter_map(|fig| fig.id().map(str::to_string))
            .collect();

        tracing::info!("Reconciling {} minifigures", ids.len());

        let mut report = BatchReport::default();
        for id in ids {
            let status = match self.reconcile_on(&id, date).await {
                Ok(ReconcileOutcome::Updated(_)) => BatchStatus::Updated,
                Ok(ReconcileOutcome::Unchanged(_)) => BatchStatus::Unchanged,
                Err(e) => {
                    tracing::warn!(id = %id, "Reconciliation failed: {}", e);
                    BatchStatus::Failed(e.to_string())
                }
            };
            report.entries.push(BatchEntry { id, status });
        }

        tracing::info!(
            updated = report.updated(),
            unchanged = report.unchanged(),
            failed = report.failed(),
            "Batch reconciliation finished"
        );

        Ok(report)
    }
}

fn position(records: &[Minifigure], id: &str) -> Result<usize, TrackerError> {
    records
        .iter()
        .position(|fig| fig.has_id(id))
        .ok_or_else(|| TrackerError::NotFound(id.to_string()))
}

/// Replace the record with the same identifier or append, keeping the
/// collection sorted by identifier.
fn upsert(records: &mut Vec<Minifigure>, record: Minifigure) {
    match records.iter().position(|fig| fig.id() == record.id()) {
        Some(index) => records[index] = record,
        None => records.push(record),
    }
    records.sort_by(|a, b| a.id().cmp(&b.id()));
}

fn merge_patch(record: &Minifigure, patch: Map<String, Value>) -> Result<Minifigure, TrackerError> {
    let mut value = serde_json::to_value(record).map_err(StoreError::from)?;

    if let Value::Object(fields) = &mut value {
        fields.extend(patch);
    }

    let merged: Minifigure = serde_json::from_value(value)
        .map_err(|e| TrackerError::InvalidPayload(e.to_string()))?;

    if merged.id().is_none() {
        return Err(TrackerError::InvalidPayload(
            "update would remove the record identifier".to_string(),
        ));
    }

    Ok(merged)
}
