pub mod catalog;
pub mod input;
pub mod models;

pub use catalog::ProjectCatalog;
pub use models::{ExtractedRow, LinkEntry, ProjectRecord, TextRecord};
