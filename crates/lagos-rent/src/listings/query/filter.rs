use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::listings::domain::{AgentId, ListingType, PropertyId, PropertyStatus, PropertyType};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
    MostViewed,
}

impl SortOrder {
    /// Unknown orderings fall back to `Newest`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "oldest" => Self::Oldest,
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            "most_viewed" => Self::MostViewed,
            _ => Self::Newest,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::MostViewed => "most_viewed",
        }
    }
}

/// Declarative description of one query against a listing collection.
///
/// Every constraint is optional and an absent constraint matches everything.
/// `category` is the named-category selector and `property_type` the free-form
/// type filter; when both are present both must hold.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub location: Option<String>,
    pub category: Option<PropertyType>,
    pub property_type: Option<PropertyType>,
    pub listing_type: Option<ListingType>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub min_bedrooms: Option<u32>,
    pub min_bathrooms: Option<u32>,
    pub required_amenities: Vec<String>,
    pub agent_id: Option<AgentId>,
    pub status: Option<PropertyStatus>,
    pub search: Option<String>,
    pub featured_only: bool,
    pub only_ids: Option<BTreeSet<PropertyId>>,
    pub sort_by: SortOrder,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = non_empty(location.into());
        self
    }

    pub fn category(mut self, category: PropertyType) -> Self {
        self.category = Some(category);
        self
    }

    pub fn property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    pub fn listing_type(mut self, listing_type: ListingType) -> Self {
        self.listing_type = Some(listing_type);
        self
    }

    pub fn min_price(mut self, min_price: u64) -> Self {
        self.min_price = Some(min_price);
        self
    }

    pub fn max_price(mut self, max_price: u64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// Price bounds coming from untyped input. Non-finite or negative values
    /// leave the corresponding side unbounded.
    pub fn with_price_bounds(mut self, min_price: f64, max_price: f64) -> Self {
        (self.min_price, self.max_price) = price_range(Some(min_price), Some(max_price));
        self
    }

    pub fn min_bedrooms(mut self, bedrooms: u32) -> Self {
        self.min_bedrooms = Some(bedrooms);
        self
    }

    pub fn min_bathrooms(mut self, bathrooms: u32) -> Self {
        self.min_bathrooms = Some(bathrooms);
        self
    }

    pub fn require_amenity(mut self, amenity: impl Into<String>) -> Self {
        self.required_amenities.push(amenity.into());
        self
    }

    pub fn agent(mut self, agent_id: AgentId) -> Self {
        self.agent_id = Some(agent_id);
        self
    }

    pub fn status(mut self, status: PropertyStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = non_empty(term.into());
        self
    }

    pub fn featured_only(mut self) -> Self {
        self.featured_only = true;
        self
    }

    pub fn only_ids<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = PropertyId>,
    {
        self.only_ids = Some(ids.into_iter().collect());
        self
    }

    pub fn sort_by(mut self, order: SortOrder) -> Self {
        self.sort_by = order;
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// 1-based page number; 0 is treated as the first page.
    pub fn effective_page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn effective_page_size(&self) -> usize {
        match self.page_size {
            Some(size) if size > 0 => size,
            _ => DEFAULT_PAGE_SIZE,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Non-finite bounds are dropped. A negative maximum admits no price, so it
/// becomes an inverted range; a negative minimum clamps to zero.
fn price_range(min: Option<f64>, max: Option<f64>) -> (Option<u64>, Option<u64>) {
    let lower = min
        .filter(|value| value.is_finite())
        .map(|value| value.max(0.0).ceil().min(u64::MAX as f64) as u64);

    match max.filter(|value| value.is_finite()) {
        Some(value) if value < 0.0 => (Some(u64::MAX), Some(0)),
        Some(value) => (lower, Some(value.floor().min(u64::MAX as f64) as u64)),
        None => (lower, None),
    }
}

/// Query-string shape used by the search and favorites views. Every value
/// arrives as text and is coerced here so the engine only sees typed input.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingQueryParams {
    #[serde(deserialize_with = "empty_string_as_none")]
    pub location: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub category: Option<String>,
    #[serde(rename = "type", deserialize_with = "empty_string_as_none")]
    pub property_type: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub listing_type: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub min_price: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub max_price: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub bedrooms: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub bathrooms: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub amenities: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub agent_id: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub status: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub featured: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub ids: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub sort_by: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub page: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub limit: Option<String>,
}

impl ListingQueryParams {
    /// Builds the filter; unparsable numbers are dropped rather than rejected.
    pub fn into_filter(self, default_page_size: usize) -> FilterSpec {
        let mut spec = FilterSpec::new();
        spec.location = self.location;
        spec.category = self.category.as_deref().map(PropertyType::parse);
        spec.property_type = self.property_type.as_deref().map(PropertyType::parse);
        spec.listing_type = self.listing_type.as_deref().map(ListingType::parse);
        (spec.min_price, spec.max_price) = price_range(
            self.min_price.as_deref().and_then(parse_price),
            self.max_price.as_deref().and_then(parse_price),
        );
        spec.min_bedrooms = self.bedrooms.as_deref().and_then(parse_count);
        spec.min_bathrooms = self.bathrooms.as_deref().and_then(parse_count);
        spec.required_amenities = self
            .amenities
            .as_deref()
            .map(split_list)
            .unwrap_or_default()
            .into_iter()
            .map(|amenity| amenity.to_lowercase())
            .collect();
        spec.agent_id = self.agent_id.map(AgentId);
        spec.status = self.status.as_deref().map(PropertyStatus::parse);
        spec.search = self.search;
        spec.featured_only = self
            .featured
            .as_deref()
            .map(|flag| matches!(flag.trim(), "true" | "1" | "yes"))
            .unwrap_or(false);
        spec.only_ids = self
            .ids
            .as_deref()
            .map(|raw| split_list(raw).into_iter().map(PropertyId).collect());
        spec.sort_by = self
            .sort_by
            .as_deref()
            .map(SortOrder::parse)
            .unwrap_or_default();
        spec.page = self.page.as_deref().and_then(|raw| raw.trim().parse().ok());
        spec.page_size = self
            .limit
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .filter(|size: &usize| *size > 0)
            .or(Some(default_page_size));
        spec
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

fn parse_count(raw: &str) -> Option<u32> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value.floor().min(u32::MAX as f64) as u32)
    } else {
        None
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}
