use crate::domain::model::CatalogRecord;
use crate::utils::error::{ConsultError, Result};
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    pub scheme: String,
    pub path: String,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            path: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeResponse {
    pub node: String,
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// URL of `path` on the service instance described by `record`.
pub fn probe_url(record: &CatalogRecord, options: &ProbeOptions) -> String {
    let host = record.target_address();
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    };
    let port = match record.service_port {
        0 => String::new(),
        port => format!(":{}", port),
    };
    let path = if options.path.starts_with('/') {
        options.path.clone()
    } else {
        format!("/{}", options.path)
    };
    format!("{}://{}{}{}", options.scheme, host, port, path)
}

/// One GET against the selected instance. Non-2xx answers are reported, not treated as errors.
pub async fn probe(
    client: &Client,
    record: &CatalogRecord,
    options: &ProbeOptions,
) -> Result<ProbeResponse> {
    let url = probe_url(record, options);
    tracing::info!("Probing {} on node {}", url, record.node);

    let fail = |source: reqwest::Error| ConsultError::Probe {
        url: url.clone(),
        source,
    };
    let response = client.get(&url).send().await.map_err(fail)?;
    let status = response.status().as_u16();
    let body = response.text().await.map_err(fail)?;

    Ok(ProbeResponse {
        node: record.node.clone(),
        url,
        status,
        body,
    })
}
