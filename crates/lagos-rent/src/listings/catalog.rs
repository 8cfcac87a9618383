use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::domain::{PropertyId, PropertyRecord, PropertyStatus};
use super::query::{FilterSpec, PropertyQueryEngine, QueryPage};

/// Sequence number handed out when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(pub u64);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("fetch {ticket} is older than installed fetch {installed}")]
    Stale { ticket: u64, installed: u64 },
    #[error("listing {0} not found in catalog")]
    NotFound(PropertyId),
}

/// Immutable view of the listing collection. Readers hold an `Arc` to it for
/// as long as they need; installing a newer snapshot never touches this one.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub fetch: FetchTicket,
    pub revision: u64,
    pub installed_at: DateTime<Utc>,
    records: Vec<PropertyRecord>,
}

impl CatalogSnapshot {
    fn empty() -> Self {
        Self {
            fetch: FetchTicket(0),
            revision: 0,
            installed_at: Utc::now(),
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &PropertyId) -> Option<&PropertyRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn query(&self, spec: &FilterSpec) -> QueryPage {
        PropertyQueryEngine::query(&self.records, spec)
    }

    pub fn featured(&self) -> Vec<PropertyRecord> {
        PropertyQueryEngine::featured(&self.records)
    }

    fn revised(&self, records: Vec<PropertyRecord>) -> Self {
        Self {
            fetch: self.fetch,
            revision: self.revision + 1,
            installed_at: Utc::now(),
            records,
        }
    }
}

/// Client-side cache of the listing collection.
///
/// Fetches are tagged with a monotonic [`FetchTicket`]; a response whose
/// ticket is not newer than the installed snapshot is discarded, so two
/// overlapping fetches can never roll the cache back.
#[derive(Debug)]
pub struct PropertyCatalog {
    sequence: AtomicU64,
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl Default for PropertyCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyCatalog {
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(1),
            current: RwLock::new(Arc::new(CatalogSnapshot::empty())),
        }
    }

    /// Seeds the cache as if a fetch had already completed.
    pub fn with_records(records: Vec<PropertyRecord>) -> Self {
        let catalog = Self::new();
        let ticket = catalog.begin_fetch();
        // A fresh catalog has nothing installed, so the first ticket always wins.
        let _ = catalog.apply(ticket, records);
        catalog
    }

    pub fn begin_fetch(&self) -> FetchTicket {
        FetchTicket(self.sequence.fetch_add(1, Ordering::Relaxed))
    }

    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn apply(
        &self,
        ticket: FetchTicket,
        records: Vec<PropertyRecord>,
    ) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let installed = guard.fetch;
        if ticket <= installed {
            debug!(
                ticket = ticket.0,
                installed = installed.0,
                "discarding stale listing fetch"
            );
            return Err(CatalogError::Stale {
                ticket: ticket.0,
                installed: installed.0,
            });
        }

        let snapshot = Arc::new(CatalogSnapshot {
            fetch: ticket,
            revision: 0,
            installed_at: Utc::now(),
            records,
        });
        debug!(
            ticket = ticket.0,
            count = snapshot.len(),
            "installed listing snapshot"
        );
        *guard = snapshot.clone();
        Ok(snapshot)
    }

    /// Inserts or replaces one listing, e.g. after a create or edit succeeds.
    pub fn upsert(&self, record: PropertyRecord) -> Arc<CatalogSnapshot> {
        self.revise(|records| {
            match records.iter_mut().find(|existing| existing.id == record.id) {
                Some(existing) => *existing = record,
                None => records.insert(0, record),
            }
            Ok(())
        })
        .unwrap_or_else(|_| self.snapshot())
    }

    pub fn remove(&self, id: &PropertyId) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        self.revise(|records| {
            let before = records.len();
            records.retain(|record| &record.id != id);
            if records.len() == before {
                Err(CatalogError::NotFound(id.clone()))
            } else {
                Ok(())
            }
        })
    }

    pub fn set_status(
        &self,
        id: &PropertyId,
        status: PropertyStatus,
    ) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        self.revise(|records| {
            let record = records
                .iter_mut()
                .find(|record| &record.id == id)
                .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
            record.status = status;
            Ok(())
        })
    }

    fn revise<F>(&self, change: F) -> Result<Arc<CatalogSnapshot>, CatalogError>
    where
        F: FnOnce(&mut Vec<PropertyRecord>) -> Result<(), CatalogError>,
    {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut records = guard.records.clone();
        change(&mut records)?;
        let snapshot = Arc::new(guard.revised(records));
        *guard = snapshot.clone();
        Ok(snapshot)
    }
}
