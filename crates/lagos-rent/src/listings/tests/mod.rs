pub(crate) mod common;
mod query;
