//! Ingestion boundary: turns backend JSON payloads and CSV exports into
//! validated [`PropertyRecord`]s. Everything downstream assumes the shapes
//! produced here.

mod amenities;
mod parser;

pub use amenities::{normalize_amenities, normalize_amenity_text};

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::listings::domain::PropertyRecord;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read listing export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid listing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid listing CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("listing {position} rejected: {reason}")]
    InvalidRecord { position: usize, reason: String },
    #[error("unsupported listing export format '{0}'")]
    UnsupportedFormat(String),
}

pub struct CatalogImporter;

impl CatalogImporter {
    /// Picks the parser from the file extension (`.json` or `.csv`).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PropertyRecord>, ImportError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let file = std::fs::File::open(path)?;

        let records = match extension.as_str() {
            "json" => Self::from_json_reader(file)?,
            "csv" => Self::from_csv_reader(file)?,
            other => return Err(ImportError::UnsupportedFormat(other.to_string())),
        };

        debug!(path = %path.display(), count = records.len(), "listing export imported");
        Ok(records)
    }

    /// Accepts either a bare array or the `{ "success": .., "data": [..] }`
    /// envelope returned by the listings endpoint.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<PropertyRecord>, ImportError> {
        parser::parse_json(reader)
    }

    pub fn from_json_str(payload: &str) -> Result<Vec<PropertyRecord>, ImportError> {
        parser::parse_json(payload.as_bytes())
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<PropertyRecord>, ImportError> {
        parser::parse_csv(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::domain::{ListingType, PropertyStatus, PropertyType};
    use std::io::Cursor;

    #[test]
    fn json_envelope_with_backend_field_names_imports() {
        let payload = r#"{
            "success": true,
            "data": [{
                "_id": "p-1",
                "title": "Ensuite Duplex",
                "price": 2500000,
                "location": "Lekki Phase 1",
                "type": "duplex",
                "bedrooms": 4,
                "bathrooms": 5,
                "area": 320,
                "amenities": ["[\"WiFi\",\"Pool\"]"],
                "images": ["https://img.example/1.jpg"],
                "isFeatured": true,
                "status": "available",
                "createdAt": "2025-01-10T09:30:00Z",
                "agentId": { "_id": "agent-9", "name": "Tolu" }
            }]
        }"#;

        let records = CatalogImporter::from_json_str(payload).expect("payload imports");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id.as_str(), "p-1");
        assert_eq!(record.property_type, PropertyType::Duplex);
        assert_eq!(record.listing_type, ListingType::Rent);
        assert_eq!(record.amenities, vec!["wifi", "pool"]);
        assert_eq!(record.agent_id.as_str(), "agent-9");
        assert_eq!(record.status, PropertyStatus::Available);
    }

    #[test]
    fn short_let_type_implies_short_let_listing() {
        let payload = r#"[{
            "id": "p-2", "title": "Studio", "price": "45000", "location": "Yaba",
            "type": "short-let", "createdAt": "2025-02-01", "agentId": "agent-1"
        }]"#;

        let records = CatalogImporter::from_json_str(payload).expect("payload imports");

        assert_eq!(records[0].listing_type, ListingType::ShortLet);
        assert_eq!(records[0].price, 45_000);
        assert!(records[0].amenities.is_empty());
    }

    #[test]
    fn negative_prices_are_rejected_with_position() {
        let payload = r#"[{
            "id": "p-3", "title": "Bad", "price": -1, "location": "Ikeja",
            "type": "studio", "createdAt": "2025-02-01", "agentId": "agent-1"
        }]"#;

        match CatalogImporter::from_json_str(payload) {
            Err(ImportError::InvalidRecord { position, reason }) => {
                assert_eq!(position, 0);
                assert!(reason.contains("price"));
            }
            other => panic!("expected invalid record, got {other:?}"),
        }
    }

    #[test]
    fn malformed_listing_in_envelope_reports_its_position() {
        let payload = r#"{
            "success": true,
            "data": [
                {
                    "_id": "p-4", "title": "Fine", "price": 500000, "location": "Yaba",
                    "type": "studio", "createdAt": "2025-02-01", "agentId": "agent-1"
                },
                {
                    "_id": "p-5", "price": 600000, "location": "Yaba",
                    "type": "studio", "createdAt": "2025-02-02", "agentId": "agent-1"
                }
            ]
        }"#;

        match CatalogImporter::from_json_str(payload) {
            Err(ImportError::InvalidRecord { position, reason }) => {
                assert_eq!(position, 1);
                assert!(reason.contains("title"));
            }
            other => panic!("expected invalid record, got {other:?}"),
        }
    }

    #[test]
    fn wrongly_typed_field_is_reported_per_listing() {
        let payload = r#"[{
            "_id": "p-6", "title": "Typed wrong", "price": 500000, "location": "Yaba",
            "type": "studio", "createdAt": "2025-02-01", "agentId": "agent-1",
            "images": "not-a-list"
        }]"#;

        assert!(matches!(
            CatalogImporter::from_json_str(payload),
            Err(ImportError::InvalidRecord { position: 0, .. })
        ));
    }

    #[test]
    fn csv_export_imports_with_comma_joined_amenities() {
        let csv = "id,title,price,location,type,listingType,bedrooms,bathrooms,area,amenities,images,isFeatured,status,createdAt,agentId\n\
p-10,Mini flat,350000,Surulere,mini-flat,rent,1,1,40,\"Parking, Security\",a.jpg;b.jpg,false,rented,2025-03-04T08:00:00Z,agent-2\n";

        let records =
            CatalogImporter::from_csv_reader(Cursor::new(csv)).expect("csv imports");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.amenities, vec!["parking", "security"]);
        assert_eq!(record.images, vec!["a.jpg", "b.jpg"]);
        assert_eq!(record.status, PropertyStatus::Rented);
        assert_eq!(record.property_type, PropertyType::MiniFlat);
    }

    #[test]
    fn unsupported_extension_is_reported() {
        let path = std::env::temp_dir().join("lagos-rent-import-test.xml");
        std::fs::write(&path, "<listings/>").expect("temp file written");

        let result = CatalogImporter::from_path(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "xml"));
    }
}
