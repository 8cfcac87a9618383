mod engine;
mod filter;

pub use engine::{PropertyQueryEngine, QueryPage};
pub use filter::{FilterSpec, ListingQueryParams, SortOrder, DEFAULT_PAGE_SIZE};
