use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::listings::domain::{
    AgentId, ListingType, PropertyId, PropertyRecord, PropertyStatus, PropertyType,
};

pub(crate) fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(crate) fn listing(id: &str, price: u64) -> PropertyRecord {
    PropertyRecord {
        id: PropertyId::new(id),
        title: format!("Listing {id}"),
        description: None,
        price,
        location: "Yaba, Lagos".to_string(),
        property_type: PropertyType::TwoBedroom,
        listing_type: ListingType::Rent,
        bedrooms: 2,
        bathrooms: 2,
        area: 80.0,
        amenities: vec!["wifi".to_string(), "parking".to_string()],
        images: Vec::new(),
        is_featured: false,
        status: PropertyStatus::Available,
        created_at: epoch(),
        agent_id: AgentId::new("agent-1"),
        views: None,
        likes: None,
    }
}

/// Six listings with distinct creation days; `lekki-duplex` and
/// `ikoyi-shortlet` are featured.
pub(crate) fn sample_catalog() -> Vec<PropertyRecord> {
    let mut yaba = listing("yaba-2bed", 650_000);
    yaba.created_at = epoch();

    let mut lekki = listing("lekki-duplex", 4_500_000);
    lekki.title = "Ensuite Duplex".to_string();
    lekki.location = "Lekki Phase 1, Lagos".to_string();
    lekki.property_type = PropertyType::Duplex;
    lekki.bedrooms = 4;
    lekki.bathrooms = 5;
    lekki.amenities = vec!["wifi".into(), "parking".into(), "pool".into()];
    lekki.is_featured = true;
    lekki.created_at = epoch() + Duration::days(1);
    lekki.agent_id = AgentId::new("agent-2");
    lekki.views = Some(120);

    let mut surulere = listing("surulere-mini", 350_000);
    surulere.location = "Surulere, Lagos".to_string();
    surulere.property_type = PropertyType::MiniFlat;
    surulere.bedrooms = 1;
    surulere.bathrooms = 1;
    surulere.amenities = vec!["security".into()];
    surulere.status = PropertyStatus::Rented;
    surulere.created_at = epoch() + Duration::days(2);

    let mut ikoyi = listing("ikoyi-shortlet", 85_000);
    ikoyi.title = "Waterfront Studio".to_string();
    ikoyi.location = "Ikoyi, Lagos".to_string();
    ikoyi.property_type = PropertyType::ShortLet;
    ikoyi.listing_type = ListingType::ShortLet;
    ikoyi.bedrooms = 1;
    ikoyi.bathrooms = 1;
    ikoyi.amenities = vec!["wifi".into(), "pool".into(), "gym".into()];
    ikoyi.is_featured = true;
    ikoyi.created_at = epoch() + Duration::days(3);
    ikoyi.agent_id = AgentId::new("agent-2");
    ikoyi.views = Some(300);

    let mut ikeja = listing("ikeja-3bed", 1_200_000);
    ikeja.location = "Ikeja GRA, Lagos".to_string();
    ikeja.property_type = PropertyType::ThreeBedroom;
    ikeja.bedrooms = 3;
    ikeja.bathrooms = 3;
    ikeja.status = PropertyStatus::Pending;
    ikeja.created_at = epoch() + Duration::days(4);

    let mut odd = listing("ajah-penthouse", 650_000);
    odd.location = "Ajah, Lagos".to_string();
    odd.property_type = PropertyType::parse("penthouse");
    odd.listing_type = ListingType::parse("lease");
    odd.created_at = epoch() + Duration::days(5);

    vec![yaba, lekki, surulere, ikoyi, ikeja, odd]
}

pub(crate) fn ids(records: &[PropertyRecord]) -> Vec<&str> {
    records.iter().map(|record| record.id.as_str()).collect()
}
