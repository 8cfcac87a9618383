use std::io::Read;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::amenities::{normalize_amenities, normalize_amenity_text};
use super::ImportError;
use crate::listings::domain::{
    AgentId, ListingType, PropertyId, PropertyRecord, PropertyStatus, PropertyType,
};

/// Items stay untyped here so one malformed listing is reported with its
/// position instead of failing the whole payload shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingPayload {
    Envelope { data: Vec<Value> },
    Bare(Vec<Value>),
}

/// Numbers sometimes arrive as strings from form-encoded backends.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(&self) -> Option<f64> {
        let value = match self {
            Numeric::Number(value) => Some(*value),
            Numeric::Text(text) => text.trim().parse::<f64>().ok(),
        };
        value.filter(|value| value.is_finite())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawListing {
    #[serde(alias = "_id")]
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    price: Numeric,
    location: String,
    #[serde(rename = "type")]
    property_type: String,
    #[serde(default)]
    listing_type: Option<String>,
    #[serde(default)]
    bedrooms: Option<Numeric>,
    #[serde(default)]
    bathrooms: Option<Numeric>,
    #[serde(default)]
    area: Option<Numeric>,
    #[serde(default)]
    amenities: Value,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    is_featured: bool,
    #[serde(default)]
    status: Option<String>,
    created_at: String,
    agent_id: Value,
    #[serde(default)]
    views: Option<u64>,
    #[serde(default)]
    likes: Option<u64>,
}

pub(super) fn parse_json<R: Read>(reader: R) -> Result<Vec<PropertyRecord>, ImportError> {
    let payload: ListingPayload = serde_json::from_reader(reader)?;
    let raw = match payload {
        ListingPayload::Envelope { data } => data,
        ListingPayload::Bare(listings) => listings,
    };

    raw.into_iter()
        .enumerate()
        .map(|(position, value)| {
            serde_json::from_value::<RawListing>(value)
                .map_err(|err| err.to_string())
                .and_then(RawListing::into_record)
                .map_err(|reason| ImportError::InvalidRecord { position, reason })
        })
        .collect()
}

impl RawListing {
    fn into_record(self) -> Result<PropertyRecord, String> {
        let property_type = PropertyType::parse(&self.property_type);
        let listing_type = listing_type_for(self.listing_type.as_deref(), &property_type);
        let agent_id = agent_id_from(&self.agent_id)
            .ok_or_else(|| "agentId must be a string or an object with an id".to_string())?;

        Ok(PropertyRecord {
            id: PropertyId(self.id),
            title: self.title,
            description: self.description,
            price: non_negative("price", Some(&self.price))?,
            location: self.location,
            property_type,
            listing_type,
            bedrooms: count("bedrooms", self.bedrooms.as_ref())?,
            bathrooms: count("bathrooms", self.bathrooms.as_ref())?,
            area: self.area.as_ref().and_then(Numeric::value).unwrap_or(0.0),
            amenities: normalize_amenities(&self.amenities),
            images: self.images,
            is_featured: self.is_featured,
            status: self
                .status
                .as_deref()
                .map(PropertyStatus::parse)
                .unwrap_or_default(),
            created_at: parse_timestamp(&self.created_at)?,
            agent_id,
            views: self.views,
            likes: self.likes,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvListingRow {
    id: String,
    title: String,
    price: String,
    location: String,
    #[serde(rename = "type")]
    property_type: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    listing_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bedrooms: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bathrooms: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    area: Option<String>,
    #[serde(default)]
    amenities: String,
    #[serde(default)]
    images: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_featured: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    created_at: String,
    agent_id: String,
}

pub(super) fn parse_csv<R: Read>(reader: R) -> Result<Vec<PropertyRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (position, row) in csv_reader.deserialize::<CsvListingRow>().enumerate() {
        let row = row?;
        let record = row
            .into_record()
            .map_err(|reason| ImportError::InvalidRecord { position, reason })?;
        records.push(record);
    }

    Ok(records)
}

impl CsvListingRow {
    fn into_record(self) -> Result<PropertyRecord, String> {
        let numeric = |value: Option<String>| value.map(Numeric::Text);
        let property_type = PropertyType::parse(&self.property_type);
        let listing_type = listing_type_for(self.listing_type.as_deref(), &property_type);

        Ok(PropertyRecord {
            id: PropertyId(self.id),
            title: self.title,
            description: None,
            price: non_negative("price", Some(&Numeric::Text(self.price)))?,
            location: self.location,
            property_type,
            listing_type,
            bedrooms: count("bedrooms", numeric(self.bedrooms).as_ref())?,
            bathrooms: count("bathrooms", numeric(self.bathrooms).as_ref())?,
            area: numeric(self.area)
                .as_ref()
                .and_then(Numeric::value)
                .unwrap_or(0.0),
            amenities: normalize_amenity_text(&self.amenities),
            images: self
                .images
                .split(';')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect(),
            is_featured: self
                .is_featured
                .as_deref()
                .map(|flag| matches!(flag.to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
                .unwrap_or(false),
            status: self
                .status
                .as_deref()
                .map(PropertyStatus::parse)
                .unwrap_or_default(),
            created_at: parse_timestamp(&self.created_at)?,
            agent_id: AgentId(self.agent_id),
            views: None,
            likes: None,
        })
    }
}

fn listing_type_for(raw: Option<&str>, property_type: &PropertyType) -> ListingType {
    match raw {
        Some(value) => ListingType::parse(value),
        None if *property_type == PropertyType::ShortLet => ListingType::ShortLet,
        None => ListingType::Rent,
    }
}

fn agent_id_from(value: &Value) -> Option<AgentId> {
    match value {
        Value::String(id) if !id.trim().is_empty() => Some(AgentId(id.trim().to_string())),
        Value::Object(map) => map
            .get("id")
            .or_else(|| map.get("_id"))
            .and_then(Value::as_str)
            .map(|id| AgentId(id.to_string())),
        _ => None,
    }
}

fn non_negative(field: &str, value: Option<&Numeric>) -> Result<u64, String> {
    match value.map(|raw| (raw, raw.value())) {
        None => Ok(0),
        Some((_, Some(number))) if number >= 0.0 => Ok(number.round() as u64),
        Some((raw, _)) => Err(format!("{field} must be a non-negative number, got {raw:?}")),
    }
}

fn count(field: &str, value: Option<&Numeric>) -> Result<u32, String> {
    non_negative(field, value).map(|number| number.min(u32::MAX as u64) as u32)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(format!("createdAt '{trimmed}' is not an RFC 3339 timestamp or YYYY-MM-DD date"))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
