//! Listing collection handling: domain types, the query engine shared by the
//! search, favorites and agent-listing views, the snapshot cache, and the
//! ingestion boundary that normalizes backend payloads.

pub mod catalog;
pub mod domain;
pub mod ingest;
pub mod query;
pub mod router;

#[cfg(test)]
pub(crate) mod tests;

pub use catalog::{CatalogError, CatalogSnapshot, FetchTicket, PropertyCatalog};
pub use domain::{AgentId, ListingType, PropertyId, PropertyRecord, PropertyStatus, PropertyType};
pub use ingest::{CatalogImporter, ImportError};
pub use query::{FilterSpec, ListingQueryParams, PropertyQueryEngine, QueryPage, SortOrder};
pub use router::{listing_router, ListingEnvelope, ListingState, Pagination};
