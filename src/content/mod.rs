mod catalog;
mod models;
mod store;

pub use catalog::{humanize_slug, Catalog, SubjectEntry, YearEntry};
pub use models::*;
pub use store::{is_valid_slug, ContentError, ContentStore, Result};
