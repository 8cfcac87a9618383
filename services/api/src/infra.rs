use chrono::{DateTime, Utc};
use lagos_rent::error::AppError;
use lagos_rent::listings::{CatalogImporter, PropertyCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<PropertyCatalog>,
}

/// Seeds the catalog from a listing export, or starts empty when none is set.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<PropertyCatalog, AppError> {
    let Some(path) = path else {
        warn!("no listing export configured; catalog starts empty");
        return Ok(PropertyCatalog::new());
    };

    let records = CatalogImporter::from_path(path)?;
    info!(path = %path.display(), count = records.len(), "seeded listing catalog");
    Ok(PropertyCatalog::with_records(records))
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
