pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::consul::ConsulClient;
pub use config::{AppConfig, FileConfig};
pub use crate::core::{
    client_factory::DatacenterClientSet,
    dispatch::{Action, Dispatcher},
    resolver::{resolve, resolve_services},
    selector::select_target,
    tag_matcher::tags_match,
};
pub use domain::model::{CatalogRecord, OutputFormat, QuerySpec, TagMatchMode};
pub use utils::error::{ConsultError, Result};
