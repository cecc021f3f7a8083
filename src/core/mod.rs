pub mod client_factory;
pub mod dispatch;
pub mod resolver;
pub mod selector;
pub mod tag_matcher;

pub use crate::domain::model::{CatalogRecord, OutputFormat, QuerySpec, TagMatchMode};
pub use crate::domain::ports::{CatalogClient, QueryCommand, RandomIndex, SessionLauncher};
pub use crate::utils::error::Result;
