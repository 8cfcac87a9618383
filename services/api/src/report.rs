use crate::infra::parse_timestamp;
use chrono::{DateTime, Utc};
use clap::Args;
use lagos_rent::agents::{evaluate, listing_basis, AgentEligibilitySnapshot};
use lagos_rent::error::AppError;
use lagos_rent::listings::{
    CatalogImporter, FilterSpec, PropertyQueryEngine, PropertyRecord, PropertyType, QueryPage,
    SortOrder,
};
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Listing export to search (.json or .csv)
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Case-insensitive location fragment, e.g. "lekki"
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Property category (1-bedroom, duplex, short-let, ...)
    #[arg(long = "type")]
    pub(crate) property_type: Option<String>,
    #[arg(long)]
    pub(crate) min_price: Option<u64>,
    #[arg(long)]
    pub(crate) max_price: Option<u64>,
    /// Minimum number of bedrooms
    #[arg(long)]
    pub(crate) bedrooms: Option<u32>,
    /// Minimum number of bathrooms
    #[arg(long)]
    pub(crate) bathrooms: Option<u32>,
    /// Required amenity; repeat for more than one
    #[arg(long)]
    pub(crate) amenity: Vec<String>,
    /// Match against title or location
    #[arg(long)]
    pub(crate) search: Option<String>,
    #[arg(long)]
    pub(crate) featured: bool,
    /// newest, oldest, price_asc, price_desc or most_viewed
    #[arg(long, default_value = "newest")]
    pub(crate) sort: String,
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

impl SearchArgs {
    fn filter(&self) -> FilterSpec {
        let mut spec = FilterSpec::new()
            .sort_by(SortOrder::parse(&self.sort))
            .page(self.page);

        if let Some(location) = &self.location {
            spec = spec.location(location.as_str());
        }
        if let Some(property_type) = &self.property_type {
            spec = spec.category(PropertyType::parse(property_type));
        }
        if let Some(min_price) = self.min_price {
            spec = spec.min_price(min_price);
        }
        if let Some(max_price) = self.max_price {
            spec = spec.max_price(max_price);
        }
        if let Some(bedrooms) = self.bedrooms {
            spec = spec.min_bedrooms(bedrooms);
        }
        if let Some(bathrooms) = self.bathrooms {
            spec = spec.min_bathrooms(bathrooms);
        }
        for amenity in &self.amenity {
            spec = spec.require_amenity(amenity.trim().to_lowercase());
        }
        if let Some(term) = &self.search {
            spec = spec.search(term.as_str());
        }
        if self.featured {
            spec = spec.featured_only();
        }
        if let Some(limit) = self.limit {
            spec = spec.page_size(limit);
        }
        spec
    }
}

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// Agent profile JSON (verificationStatus, freeListingWeeks, subscription, verifiedAt)
    #[arg(long)]
    pub(crate) agent: PathBuf,
    /// Evaluation instant (RFC 3339). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let records = CatalogImporter::from_path(&args.catalog)?;
    let page = PropertyQueryEngine::query(&records, &args.filter());
    print!("{}", render_page(&page));
    Ok(())
}

pub(crate) fn run_eligibility(args: EligibilityArgs) -> Result<(), AppError> {
    let file = File::open(&args.agent)?;
    let agent: AgentEligibilitySnapshot =
        serde_json::from_reader(file).map_err(std::io::Error::from)?;
    let now = args.now.unwrap_or_else(Utc::now);
    let eligibility = evaluate(&agent, now);

    if args.json {
        let body = serde_json::to_string_pretty(&eligibility).map_err(std::io::Error::from)?;
        println!("{body}");
        return Ok(());
    }

    println!("Evaluated at: {}", now.to_rfc3339());
    println!(
        "Can list: {}",
        if eligibility.can_list { "yes" } else { "no" }
    );
    println!("Status: {}", eligibility.status_label);
    println!("Basis: {:?}", listing_basis(&agent, now));
    if eligibility.trial_days_remaining > 0 {
        println!("Trial days remaining: {}", eligibility.trial_days_remaining);
    }
    Ok(())
}

fn render_page(page: &QueryPage) -> String {
    let mut out = format!(
        "{} listing(s) matched; page {} of {} ({} per page)\n",
        page.total,
        page.page,
        page.pages.max(1),
        page.page_size
    );

    if page.is_empty() {
        out.push_str("No listings on this page.\n");
        return out;
    }

    for record in &page.items {
        out.push_str(&render_row(record));
        out.push('\n');
    }
    out
}

fn render_row(record: &PropertyRecord) -> String {
    let marker = if record.is_featured { "*" } else { " " };
    format!(
        "{marker} {:<14} {:>14} {:<10} {}bd/{}ba  {} :: {}",
        record.id.as_str(),
        format_naira(record.price),
        record.property_type.label(),
        record.bedrooms,
        record.bathrooms,
        record.location,
        record.title,
    )
}

fn format_naira(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("NGN {grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../crates/lagos-rent/fixtures/lagos_listings.json")
    }

    fn search_args() -> SearchArgs {
        SearchArgs {
            catalog: fixture(),
            location: None,
            property_type: None,
            min_price: None,
            max_price: None,
            bedrooms: None,
            bathrooms: None,
            amenity: Vec::new(),
            search: None,
            featured: false,
            sort: "newest".to_string(),
            page: 1,
            limit: None,
        }
    }

    #[test]
    fn naira_amounts_are_grouped_by_thousands() {
        assert_eq!(format_naira(0), "NGN 0");
        assert_eq!(format_naira(950), "NGN 950");
        assert_eq!(format_naira(1_800_000), "NGN 1,800,000");
    }

    #[test]
    fn cli_amenities_are_lowercased_before_matching() {
        let args = SearchArgs {
            amenity: vec![" Parking ".to_string(), "SECURITY".to_string()],
            ..search_args()
        };
        let spec = args.filter();
        assert_eq!(spec.required_amenities, vec!["parking", "security"]);
    }

    #[test]
    fn rendered_page_lists_matching_rows() {
        let args = SearchArgs {
            featured: true,
            sort: "price_asc".to_string(),
            ..search_args()
        };
        let records = CatalogImporter::from_path(&args.catalog).expect("fixture imports");
        let page = PropertyQueryEngine::query(&records, &args.filter());
        let rendered = render_page(&page);

        assert!(rendered.starts_with("2 listing(s) matched; page 1 of 1"));
        let lines: Vec<&str> = rendered.lines().skip(1).collect();
        assert!(lines[0].contains("lst-004"));
        assert!(lines[1].contains("NGN 6,500,000"));
    }

    #[test]
    fn empty_pages_say_so() {
        let args = SearchArgs {
            page: 9,
            ..search_args()
        };
        let records = CatalogImporter::from_path(&args.catalog).expect("fixture imports");
        let page = PropertyQueryEngine::query(&records, &args.filter());
        assert!(render_page(&page).contains("No listings on this page."));
    }
}
