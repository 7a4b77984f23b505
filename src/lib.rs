pub mod catalog;
pub mod config;
pub mod parser;
pub mod storage;
pub mod utils;

pub use catalog::CatalogPipeline;
pub use config::{AppConfig, ColumnAliases};
pub use storage::{LinkEntry, ProjectCatalog, ProjectRecord};
pub use utils::{CatalogError, CatalogResult};
