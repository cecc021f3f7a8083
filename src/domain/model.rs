use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One (service instance, node) pairing as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(rename = "Node")]
    pub node: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Datacenter", default)]
    pub datacenter: String,
    #[serde(rename = "ServiceID", default)]
    pub service_id: String,
    #[serde(rename = "ServiceName", default)]
    pub service_name: String,
    #[serde(rename = "ServiceAddress", default)]
    pub service_address: String,
    #[serde(rename = "ServicePort", default)]
    pub service_port: u16,
    // The registry sends `null` for untagged services.
    #[serde(rename = "ServiceTags", default, deserialize_with = "null_as_empty")]
    pub service_tags: Vec<String>,
}

impl CatalogRecord {
    /// Address a client should connect to: the service address when the
    /// instance registered one, otherwise the node address.
    pub fn target_address(&self) -> &str {
        if self.service_address.is_empty() {
            &self.address
        } else {
            &self.service_address
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TagMatchMode {
    /// Every requested tag must be present.
    #[default]
    All,
    /// At least one requested tag must be present.
    Any,
}

impl fmt::Display for TagMatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagMatchMode::All => f.write_str("all"),
            TagMatchMode::Any => f.write_str("any"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub service: String,
    pub tags: Vec<String>,
    pub mode: TagMatchMode,
}

impl QuerySpec {
    pub fn new(service: impl Into<String>, tags: Vec<String>, mode: TagMatchMode) -> Self {
        Self {
            service: service.into(),
            tags,
            mode,
        }
    }

    /// Single tag the registry may filter on natively without changing the
    /// result of the full match. Only sound for `All`.
    pub fn native_tag(&self) -> Option<&str> {
        match self.mode {
            TagMatchMode::All => self.tags.first().map(String::as_str),
            TagMatchMode::Any => None,
        }
    }
}

impl Validate for QuerySpec {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("service", &self.service)?;
        for tag in &self.tags {
            validate_non_empty_string("tag", tag)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    Pretty,
}
