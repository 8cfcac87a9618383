use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque listing identifier assigned by the marketplace backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub String);

impl PropertyId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the agent owning a listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Listing category. Values outside the closed set survive deserialization
/// as `Unrecognized` and never satisfy a filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    OneBedroom,
    TwoBedroom,
    ThreeBedroom,
    Duplex,
    Studio,
    MiniFlat,
    ShortLet,
    Unrecognized(String),
}

impl PropertyType {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::OneBedroom,
            Self::TwoBedroom,
            Self::ThreeBedroom,
            Self::Duplex,
            Self::Studio,
            Self::MiniFlat,
            Self::ShortLet,
        ]
    }

    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "1-bedroom" => Self::OneBedroom,
            "2-bedroom" => Self::TwoBedroom,
            "3-bedroom" => Self::ThreeBedroom,
            "duplex" => Self::Duplex,
            "studio" => Self::Studio,
            "mini-flat" => Self::MiniFlat,
            "short-let" => Self::ShortLet,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::OneBedroom => "1-bedroom",
            Self::TwoBedroom => "2-bedroom",
            Self::ThreeBedroom => "3-bedroom",
            Self::Duplex => "duplex",
            Self::Studio => "studio",
            Self::MiniFlat => "mini-flat",
            Self::ShortLet => "short-let",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneBedroom => "1 Bedroom",
            Self::TwoBedroom => "2 Bedroom",
            Self::ThreeBedroom => "3 Bedroom",
            Self::Duplex => "Duplex",
            Self::Studio => "Studio",
            Self::MiniFlat => "Mini Flat",
            Self::ShortLet => "Short Let",
            Self::Unrecognized(_) => "Other",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Closed-enumeration match: an unrecognized value on either side fails.
    pub fn matches(&self, other: &Self) -> bool {
        self.is_recognized() && self == other
    }
}

impl From<String> for PropertyType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<PropertyType> for String {
    fn from(value: PropertyType) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ListingType {
    Rent,
    ShortLet,
    Unrecognized(String),
}

impl ListingType {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "rent" => Self::Rent,
            "short-let" => Self::ShortLet,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Rent => "rent",
            Self::ShortLet => "short-let",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn matches(&self, other: &Self) -> bool {
        !matches!(self, Self::Unrecognized(_)) && self == other
    }
}

impl From<String> for ListingType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ListingType> for String {
    fn from(value: ListingType) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyStatus {
    Available,
    Rented,
    Pending,
    Unrecognized(String),
}

impl PropertyStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "available" => Self::Available,
            "rented" => Self::Rented,
            "pending" => Self::Pending,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "available",
            Self::Rented => "rented",
            Self::Pending => "pending",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn matches(&self, other: &Self) -> bool {
        !matches!(self, Self::Unrecognized(_)) && self == other
    }
}

impl Default for PropertyStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl From<String> for PropertyStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<PropertyStatus> for String {
    fn from(value: PropertyStatus) -> Self {
        value.as_str().to_string()
    }
}

/// One rental or short-let listing as handed to the core by the ingestion
/// boundary. Amenities are already normalized at this point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: u64,
    pub location: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub status: PropertyStatus,
    pub created_at: DateTime<Utc>,
    pub agent_id: AgentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
}

impl PropertyRecord {
    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities.iter().any(|candidate| candidate == amenity)
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
