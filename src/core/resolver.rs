use crate::core::client_factory::DatacenterClientSet;
use crate::core::tag_matcher::tags_match;
use crate::domain::model::{CatalogRecord, QuerySpec};
use crate::domain::ports::CatalogClient;
use crate::utils::error::{ConsultError, Result};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Looks `spec` up in every datacenter and keeps the records whose tags match.
///
/// Datacenters are queried one after another in the order they were configured
/// and results are concatenated in that order. The first failing lookup fails
/// the whole call; records already fetched from other datacenters are dropped.
pub async fn resolve<C: CatalogClient>(
    spec: &QuerySpec,
    clients: &DatacenterClientSet<C>,
) -> Result<Vec<CatalogRecord>> {
    let mut results = Vec::new();
    let mut seen = HashSet::new();

    for (dc, client) in clients.iter() {
        let records = client
            .catalog_service(&spec.service, spec.native_tag())
            .await
            .map_err(|source| ConsultError::Query {
                datacenter: dc.to_string(),
                source,
            })?;

        let fetched = records.len();
        let before = results.len();
        for mut record in records {
            if !tags_match(&record.service_tags, &spec.tags, spec.mode) {
                continue;
            }
            if record.datacenter.is_empty() {
                record.datacenter = dc.to_string();
            }
            let key = (
                dc.to_string(),
                record.node.clone(),
                record.service_id.clone(),
            );
            if seen.insert(key) {
                results.push(record);
            }
        }

        tracing::debug!(
            "Datacenter '{}': {} of {} '{}' records matched tags {:?} ({})",
            dc,
            results.len() - before,
            fetched,
            spec.service,
            spec.tags,
            spec.mode
        );
    }

    tracing::info!(
        "Resolved {} record(s) for service '{}' across {} datacenter(s)",
        results.len(),
        spec.service,
        clients.len()
    );
    Ok(results)
}

/// Lists every service in the catalog, merging tag sets across datacenters.
/// Same all-or-nothing failure policy as [`resolve`].
pub async fn resolve_services<C: CatalogClient>(
    clients: &DatacenterClientSet<C>,
) -> Result<BTreeMap<String, Vec<String>>> {
    let mut merged: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for (dc, client) in clients.iter() {
        let services = client
            .catalog_services()
            .await
            .map_err(|source| ConsultError::Query {
                datacenter: dc.to_string(),
                source,
            })?;
        tracing::debug!("Datacenter '{}': {} services", dc, services.len());

        for (name, tags) in services {
            merged.entry(name).or_default().extend(tags);
        }
    }

    Ok(merged
        .into_iter()
        .map(|(name, tags)| (name, tags.into_iter().collect()))
        .collect())
}
