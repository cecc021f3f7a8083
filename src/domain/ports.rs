use crate::domain::model::{CatalogRecord, QuerySpec};
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// A registry handle scoped to one datacenter (or to the agent's default).
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Nodes providing `service`, optionally narrowed by one tag on the registry side.
    async fn catalog_service(
        &self,
        service: &str,
        tag: Option<&str>,
    ) -> std::result::Result<Vec<CatalogRecord>, LookupError>;

    /// Every registered service name with the union of its tags.
    async fn catalog_services(
        &self,
    ) -> std::result::Result<BTreeMap<String, Vec<String>>, LookupError>;
}

/// Source of the index used to pick one target out of many.
pub trait RandomIndex {
    /// Returns a value in `0..len`. Callers guarantee `len > 0`.
    fn index(&self, len: usize) -> usize;
}

/// Hands control over to an interactive remote session.
pub trait SessionLauncher {
    /// Real implementations replace the current process and only return on failure.
    fn launch(&self, address: &str, user: Option<&str>) -> Result<()>;
}

/// Anything that can describe the catalog query it needs.
pub trait QueryCommand {
    fn query_spec(&self) -> QuerySpec;
}
