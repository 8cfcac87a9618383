use super::common::*;
use crate::listings::domain::{AgentId, ListingType, PropertyId, PropertyStatus, PropertyType};
use crate::listings::query::{FilterSpec, PropertyQueryEngine, SortOrder};

#[test]
fn empty_spec_returns_everything_newest_first() {
    let records = sample_catalog();

    let page = PropertyQueryEngine::query(&records, &FilterSpec::new());

    assert_eq!(page.total, 6);
    assert_eq!(
        ids(&page.items),
        vec![
            "ajah-penthouse",
            "ikeja-3bed",
            "ikoyi-shortlet",
            "surulere-mini",
            "lekki-duplex",
            "yaba-2bed"
        ]
    );
}

#[test]
fn location_matches_case_insensitive_substrings() {
    let records = sample_catalog();
    let spec = FilterSpec::new().location("LEKKI phase");

    let page = PropertyQueryEngine::query(&records, &spec);

    assert_eq!(ids(&page.items), vec!["lekki-duplex"]);
}

#[test]
fn category_and_type_are_independent_constraints() {
    let records = sample_catalog();

    let agreeing = FilterSpec::new()
        .category(PropertyType::Duplex)
        .property_type(PropertyType::Duplex);
    assert_eq!(PropertyQueryEngine::query(&records, &agreeing).total, 1);

    let conflicting = FilterSpec::new()
        .category(PropertyType::Duplex)
        .property_type(PropertyType::Studio);
    assert_eq!(PropertyQueryEngine::query(&records, &conflicting).total, 0);
}

#[test]
fn unrecognized_enum_values_never_match() {
    let records = sample_catalog();

    let spec = FilterSpec::new().property_type(PropertyType::parse("penthouse"));
    assert_eq!(PropertyQueryEngine::query(&records, &spec).total, 0);

    let spec = FilterSpec::new().listing_type(ListingType::parse("lease"));
    assert_eq!(PropertyQueryEngine::query(&records, &spec).total, 0);

    let spec = FilterSpec::new().listing_type(ListingType::Rent);
    let page = PropertyQueryEngine::query(&records, &spec);
    assert!(!ids(&page.items).contains(&"ajah-penthouse"));
    assert!(!ids(&page.items).contains(&"ikoyi-shortlet"));
}

#[test]
fn price_bounds_are_inclusive_on_both_sides() {
    let records = vec![listing("exact", 100_000)];
    let spec = FilterSpec::new().min_price(100_000).max_price(100_000);

    let page = PropertyQueryEngine::query(&records, &spec);

    assert_eq!(ids(&page.items), vec!["exact"]);
}

#[test]
fn inverted_price_bounds_degrade_to_empty_result() {
    let records = sample_catalog();
    let spec = FilterSpec::new().min_price(2_000_000).max_price(100_000);

    let page = PropertyQueryEngine::query(&records, &spec);

    assert_eq!(page.total, 0);
    assert!(page.is_empty());
    assert_eq!(page.pages, 0);
}

#[test]
fn non_finite_price_bounds_are_unconstrained() {
    let records = sample_catalog();
    let spec = FilterSpec::new().with_price_bounds(f64::NAN, f64::NEG_INFINITY);

    assert_eq!(PropertyQueryEngine::query(&records, &spec).total, records.len());
}

#[test]
fn negative_maximum_price_matches_nothing() {
    let records = vec![listing("low", 100_000), listing("high", 200_000)];
    let spec = FilterSpec::new().with_price_bounds(150_000.0, -1.0);

    assert_eq!(PropertyQueryEngine::query(&records, &spec).total, 0);
}

#[test]
fn negative_minimum_price_is_zero() {
    let records = vec![listing("free", 0), listing("low", 100_000)];
    let spec = FilterSpec::new().with_price_bounds(-500.0, 100_000.0);

    assert_eq!(PropertyQueryEngine::query(&records, &spec).total, 2);
}

#[test]
fn fractional_minimum_excludes_the_price_below_it() {
    let records = vec![listing("low", 100_000), listing("high", 100_001)];
    let spec = FilterSpec::new().with_price_bounds(100_000.5, f64::INFINITY);

    let page = PropertyQueryEngine::query(&records, &spec);

    assert_eq!(ids(&page.items), vec!["high"]);
}

#[test]
fn bedroom_and_bathroom_minimums_apply() {
    let records = sample_catalog();
    let spec = FilterSpec::new().min_bedrooms(3).min_bathrooms(4);

    let page = PropertyQueryEngine::query(&records, &spec);

    assert_eq!(ids(&page.items), vec!["lekki-duplex"]);
}

#[test]
fn every_required_amenity_must_be_present() {
    let mut record = listing("amenity-check", 500_000);
    record.amenities = vec!["wifi".to_string(), "parking".to_string()];
    let records = vec![record];

    let missing_pool = FilterSpec::new()
        .require_amenity("wifi")
        .require_amenity("pool");
    assert_eq!(PropertyQueryEngine::query(&records, &missing_pool).total, 0);

    let wifi_only = FilterSpec::new().require_amenity("wifi");
    assert_eq!(PropertyQueryEngine::query(&records, &wifi_only).total, 1);

    let wrong_case = FilterSpec::new().require_amenity("WiFi");
    assert_eq!(PropertyQueryEngine::query(&records, &wrong_case).total, 0);
}

#[test]
fn agent_listing_view_filters_by_owner_status_and_search() {
    let records = sample_catalog();

    let spec = FilterSpec::new().agent(AgentId::new("agent-2"));
    assert_eq!(
        ids(&PropertyQueryEngine::query(&records, &spec).items),
        vec!["ikoyi-shortlet", "lekki-duplex"]
    );

    let spec = FilterSpec::new().status(PropertyStatus::Rented);
    assert_eq!(
        ids(&PropertyQueryEngine::query(&records, &spec).items),
        vec!["surulere-mini"]
    );

    let spec = FilterSpec::new().search("waterfront");
    assert_eq!(
        ids(&PropertyQueryEngine::query(&records, &spec).items),
        vec!["ikoyi-shortlet"]
    );

    let spec = FilterSpec::new().search("ikeja gra");
    assert_eq!(
        ids(&PropertyQueryEngine::query(&records, &spec).items),
        vec!["ikeja-3bed"]
    );
}

#[test]
fn favorites_view_ignores_dangling_identifiers() {
    let records = sample_catalog();
    let spec = FilterSpec::new().only_ids([
        PropertyId::new("yaba-2bed"),
        PropertyId::new("deleted-listing"),
    ]);

    let page = PropertyQueryEngine::query(&records, &spec);

    assert_eq!(ids(&page.items), vec!["yaba-2bed"]);
}

#[test]
fn featured_subset_keeps_input_order() {
    let records = sample_catalog();

    assert_eq!(
        ids(&PropertyQueryEngine::featured(&records)),
        vec!["lekki-duplex", "ikoyi-shortlet"]
    );
    let spec = FilterSpec::new().featured_only().sort_by(SortOrder::Oldest);
    assert_eq!(
        ids(&PropertyQueryEngine::query(&records, &spec).items),
        vec!["lekki-duplex", "ikoyi-shortlet"]
    );
}

#[test]
fn price_sorts_are_stable_for_equal_prices() {
    let records = sample_catalog();

    let ascending = FilterSpec::new().sort_by(SortOrder::PriceAsc);
    assert_eq!(
        ids(&PropertyQueryEngine::query(&records, &ascending).items),
        vec![
            "ikoyi-shortlet",
            "surulere-mini",
            "yaba-2bed",
            "ajah-penthouse",
            "ikeja-3bed",
            "lekki-duplex"
        ]
    );

    let descending = FilterSpec::new().sort_by(SortOrder::PriceDesc);
    assert_eq!(
        ids(&PropertyQueryEngine::query(&records, &descending).items),
        vec![
            "lekki-duplex",
            "ikeja-3bed",
            "yaba-2bed",
            "ajah-penthouse",
            "surulere-mini",
            "ikoyi-shortlet"
        ]
    );
}

#[test]
fn most_viewed_treats_missing_counts_as_zero() {
    let records = sample_catalog();
    let spec = FilterSpec::new().sort_by(SortOrder::MostViewed);

    assert_eq!(
        ids(&PropertyQueryEngine::query(&records, &spec).items),
        vec![
            "ikoyi-shortlet",
            "lekki-duplex",
            "yaba-2bed",
            "surulere-mini",
            "ikeja-3bed",
            "ajah-penthouse"
        ]
    );
}

#[test]
fn pages_slice_the_sorted_sequence() {
    let records = sample_catalog();
    let spec = FilterSpec::new()
        .sort_by(SortOrder::Oldest)
        .page(2)
        .page_size(4);

    let page = PropertyQueryEngine::query(&records, &spec);

    assert_eq!(page.total, 6);
    assert_eq!(page.pages, 2);
    assert!(!page.has_next());
    assert_eq!(ids(&page.items), vec!["ikeja-3bed", "ajah-penthouse"]);
}

#[test]
fn out_of_range_page_is_empty_with_correct_total() {
    let records = sample_catalog();
    let spec = FilterSpec::new().page(9).page_size(5);

    let page = PropertyQueryEngine::query(&records, &spec);

    assert!(page.items.is_empty());
    assert_eq!(page.total, 6);
    assert_eq!(page.page, 9);
}
