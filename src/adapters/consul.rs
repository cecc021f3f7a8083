use crate::domain::model::CatalogRecord;
use crate::domain::ports::CatalogClient;
use crate::utils::error::{ConsultError, LookupError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use url::Url;

/// HTTP client for the registry's catalog endpoints, optionally pinned to one datacenter.
#[derive(Debug, Clone)]
pub struct ConsulClient {
    base: Url,
    datacenter: Option<String>,
    client: Client,
}

impl ConsulClient {
    /// Stores the configuration only; nothing is sent until a lookup is made.
    pub fn new(base: &Url, datacenter: Option<&str>) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(ConsultError::ClientConstruction {
                endpoint: base.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let client = Client::builder()
            .user_agent(concat!("consult/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConsultError::ClientConstruction {
                endpoint: base.to_string(),
                reason: e.to_string(),
            })?;

        let mut base = base.clone();
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self {
            base,
            datacenter: datacenter.map(str::to_string),
            client,
        })
    }

    pub fn datacenter(&self) -> Option<&str> {
        self.datacenter.as_deref()
    }

    fn url_for(&self, segments: &[&str], tag: Option<&str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        {
            let mut query = url.query_pairs_mut();
            if let Some(tag) = tag {
                query.append_pair("tag", tag);
            }
            if let Some(dc) = &self.datacenter {
                query.append_pair("dc", dc);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> std::result::Result<T, LookupError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CatalogClient for ConsulClient {
    async fn catalog_service(
        &self,
        service: &str,
        tag: Option<&str>,
    ) -> std::result::Result<Vec<CatalogRecord>, LookupError> {
        let url = self.url_for(&["v1", "catalog", "service", service], tag);
        self.get_json(url).await
    }

    async fn catalog_services(
        &self,
    ) -> std::result::Result<BTreeMap<String, Vec<String>>, LookupError> {
        let url = self.url_for(&["v1", "catalog", "services"], None);
        let raw: BTreeMap<String, Option<Vec<String>>> = self.get_json(url).await?;
        Ok(raw
            .into_iter()
            .map(|(name, tags)| (name, tags.unwrap_or_default()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn base(server: &MockServer) -> Url {
        Url::parse(&server.base_url()).unwrap()
    }

    #[test]
    fn test_url_for_scoped_client() {
        let base = Url::parse("http://127.0.0.1:8500/").unwrap();
        let client = ConsulClient::new(&base, Some("dc1")).unwrap();

        let url = client.url_for(&["v1", "catalog", "service", "web"], Some("primary"));

        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8500/v1/catalog/service/web?tag=primary&dc=dc1"
        );
    }

    #[test]
    fn test_url_for_unscoped_client_keeps_base_path() {
        let base = Url::parse("https://registry.internal/consul/?token=x").unwrap();
        let client = ConsulClient::new(&base, None).unwrap();

        let url = client.url_for(&["v1", "catalog", "services"], None);

        assert_eq!(
            url.as_str(),
            "https://registry.internal/consul/v1/catalog/services"
        );
    }

    #[tokio::test]
    async fn test_catalog_service_passes_tag_and_dc() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/catalog/service/web")
                    .query_param("tag", "primary")
                    .query_param("dc", "dc1");
                then.status(200).json_body(serde_json::json!([
                    {
                        "Node": "web-01",
                        "Address": "10.0.0.5",
                        "Datacenter": "dc1",
                        "ServiceID": "web",
                        "ServiceName": "web",
                        "ServiceAddress": "",
                        "ServicePort": 80,
                        "ServiceTags": ["primary"]
                    }
                ]));
            })
            .await;

        let client = ConsulClient::new(&base(&server), Some("dc1")).unwrap();
        let records = client.catalog_service("web", Some("primary")).await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].node, "web-01");
        assert_eq!(records[0].service_tags, vec!["primary".to_string()]);
    }

    #[tokio::test]
    async fn test_catalog_service_error_status() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/catalog/service/web");
                then.status(500).body("No path to datacenter");
            })
            .await;

        let client = ConsulClient::new(&base(&server), Some("nowhere")).unwrap();
        let err = client.catalog_service("web", None).await.unwrap_err();

        api_mock.assert_async().await;
        match err {
            LookupError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "No path to datacenter");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_catalog_service_malformed_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/catalog/service/web");
                then.status(200).body("not json");
            })
            .await;

        let client = ConsulClient::new(&base(&server), None).unwrap();
        let err = client.catalog_service("web", None).await.unwrap_err();

        assert!(matches!(err, LookupError::Decode(_)));
    }

    #[tokio::test]
    async fn test_catalog_services_tolerates_null_tags() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/catalog/services");
                then.status(200).json_body(serde_json::json!({
                    "consul": [],
                    "web": ["primary", "v2"],
                    "redis": null
                }));
            })
            .await;

        let client = ConsulClient::new(&base(&server), None).unwrap();
        let services = client.catalog_services().await.unwrap();

        assert_eq!(services.len(), 3);
        assert!(services["redis"].is_empty());
        assert_eq!(services["web"], vec!["primary".to_string(), "v2".to_string()]);
    }
}
