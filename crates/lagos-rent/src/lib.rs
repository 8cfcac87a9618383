//! Core of the LagosRent marketplace: listing search over an in-memory
//! catalog snapshot and the rules deciding whether an agent may publish.

pub mod agents;
pub mod config;
pub mod error;
pub mod listings;
pub mod telemetry;

pub use agents::{can_list, evaluate, status_label, AgentEligibilitySnapshot, Eligibility};
pub use error::AppError;
pub use listings::{
    CatalogImporter, FilterSpec, PropertyCatalog, PropertyQueryEngine, PropertyRecord, QueryPage,
    SortOrder,
};
