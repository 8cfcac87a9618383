use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::filter::{FilterSpec, SortOrder};
use crate::listings::domain::PropertyRecord;

/// One page of a filtered, sorted listing collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPage {
    pub items: Vec<PropertyRecord>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub pages: usize,
}

impl QueryPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

/// Stateless filter/sort/paginate pipeline shared by every listing view.
pub struct PropertyQueryEngine;

impl PropertyQueryEngine {
    pub fn query(records: &[PropertyRecord], spec: &FilterSpec) -> QueryPage {
        let matched = Self::filter_sorted(records, spec);

        let total = matched.len();
        let page = spec.effective_page();
        let page_size = spec.effective_page_size();
        let pages = total.div_ceil(page_size);

        let start = (page - 1).saturating_mul(page_size);
        let items = matched
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        QueryPage {
            items,
            total,
            page,
            page_size,
            pages,
        }
    }

    /// Full filtered and sorted sequence, before pagination.
    pub fn filter_sorted<'a>(
        records: &'a [PropertyRecord],
        spec: &FilterSpec,
    ) -> Vec<&'a PropertyRecord> {
        let mut matched: Vec<&PropertyRecord> = records
            .iter()
            .filter(|record| Self::matches(record, spec))
            .collect();
        sort_records(&mut matched, spec.sort_by);
        matched
    }

    /// Featured subset in input order.
    pub fn featured(records: &[PropertyRecord]) -> Vec<PropertyRecord> {
        records
            .iter()
            .filter(|record| record.is_featured)
            .cloned()
            .collect()
    }

    pub fn matches(record: &PropertyRecord, spec: &FilterSpec) -> bool {
        if let Some(location) = &spec.location {
            if !contains_folded(&record.location, location) {
                return false;
            }
        }

        if let Some(category) = &spec.category {
            if !category.matches(&record.property_type) {
                return false;
            }
        }

        if let Some(property_type) = &spec.property_type {
            if !property_type.matches(&record.property_type) {
                return false;
            }
        }

        if let Some(listing_type) = &spec.listing_type {
            if !listing_type.matches(&record.listing_type) {
                return false;
            }
        }

        let min_price = spec.min_price.unwrap_or(0);
        let max_price = spec.max_price.unwrap_or(u64::MAX);
        if record.price < min_price || record.price > max_price {
            return false;
        }

        if record.bedrooms < spec.min_bedrooms.unwrap_or(0) {
            return false;
        }

        if record.bathrooms < spec.min_bathrooms.unwrap_or(0) {
            return false;
        }

        if !spec
            .required_amenities
            .iter()
            .all(|amenity| record.has_amenity(amenity))
        {
            return false;
        }

        if let Some(agent_id) = &spec.agent_id {
            if &record.agent_id != agent_id {
                return false;
            }
        }

        if let Some(status) = &spec.status {
            if !status.matches(&record.status) {
                return false;
            }
        }

        if let Some(term) = &spec.search {
            if !contains_folded(&record.title, term) && !contains_folded(&record.location, term) {
                return false;
            }
        }

        if spec.featured_only && !record.is_featured {
            return false;
        }

        if let Some(ids) = &spec.only_ids {
            if !ids.contains(&record.id) {
                return false;
            }
        }

        true
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// `sort_by` is stable, so equal keys keep input order.
fn sort_records(records: &mut [&PropertyRecord], order: SortOrder) {
    let compare: fn(&PropertyRecord, &PropertyRecord) -> Ordering = match order {
        SortOrder::Newest => |a, b| b.created_at.cmp(&a.created_at),
        SortOrder::Oldest => |a, b| a.created_at.cmp(&b.created_at),
        SortOrder::PriceAsc => |a, b| a.price.cmp(&b.price),
        SortOrder::PriceDesc => |a, b| b.price.cmp(&a.price),
        SortOrder::MostViewed => |a, b| b.views.unwrap_or(0).cmp(&a.views.unwrap_or(0)),
    };
    records.sort_by(|a, b| compare(a, b));
}
