//! NYU course bulletin scraper.
//!
//! Collects subject pages from the bulletin index, extracts one record per
//! course block, and writes the catalog as JSON or CSV. `filter` derives a
//! lighter `{id, title}` dataset from a previously written JSON catalog.

pub mod crawl;
pub mod error;
pub mod export;
pub mod fetch;
pub mod filter;
pub mod links;
pub mod model;
pub mod parser;
pub mod settings;

pub use error::CatalogError;
pub use model::{CourseRecord, DescriptionPolicy};
