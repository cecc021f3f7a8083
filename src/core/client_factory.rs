use crate::adapters::consul::ConsulClient;
use crate::utils::error::{ConsultError, Result};
use crate::utils::validation::{validate_datacenter, validate_url};
use url::Url;

/// Datacenter name to registry handle, in the order the datacenters were given.
///
/// The empty name is the "unscoped" key used when no datacenter was requested.
#[derive(Debug, Clone)]
pub struct DatacenterClientSet<C> {
    clients: Vec<(String, C)>,
}

impl<C> DatacenterClientSet<C> {
    /// Builds one client per distinct datacenter (or a single unscoped one)
    /// with `connect`. The first failure aborts the whole build.
    pub fn build_with<F>(endpoint: &str, datacenters: &[String], mut connect: F) -> Result<Self>
    where
        F: FnMut(&Url, Option<&str>) -> Result<C>,
    {
        let base = validate_url("server", endpoint).map_err(|e| construction_error(endpoint, e))?;

        if datacenters.is_empty() {
            let client = connect(&base, None)?;
            return Ok(Self {
                clients: vec![(String::new(), client)],
            });
        }

        let mut clients: Vec<(String, C)> = Vec::with_capacity(datacenters.len());
        for dc in datacenters {
            if clients.iter().any(|(name, _)| name == dc) {
                tracing::debug!("Ignoring repeated datacenter '{}'", dc);
                continue;
            }
            validate_datacenter("dc", dc).map_err(|e| construction_error(endpoint, e))?;
            let client = connect(&base, Some(dc))?;
            clients.push((dc.clone(), client));
        }

        Ok(Self { clients })
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn datacenters(&self) -> impl Iterator<Item = &str> {
        self.clients.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, datacenter: &str) -> Option<&C> {
        self.clients
            .iter()
            .find(|(name, _)| name == datacenter)
            .map(|(_, client)| client)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &C)> {
        self.clients.iter().map(|(name, client)| (name.as_str(), client))
    }
}

impl DatacenterClientSet<ConsulClient> {
    pub fn connect(endpoint: &str, datacenters: &[String]) -> Result<Self> {
        Self::build_with(endpoint, datacenters, ConsulClient::new)
    }
}

fn construction_error(endpoint: &str, cause: ConsultError) -> ConsultError {
    let reason = match cause {
        ConsultError::InvalidConfigValueError { value, reason, .. } => {
            format!("{} ({})", reason, value)
        }
        other => other.to_string(),
    };
    ConsultError::ClientConstruction {
        endpoint: endpoint.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dcs(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_no_datacenters_builds_single_unscoped_client() {
        let set = DatacenterClientSet::connect("http://127.0.0.1:8500/", &[]).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.datacenters().collect::<Vec<_>>(), vec![""]);
        assert_eq!(set.get("").unwrap().datacenter(), None);
    }

    #[test]
    fn test_one_scoped_client_per_datacenter() {
        let set =
            DatacenterClientSet::connect("http://127.0.0.1:8500/", &dcs(&["dc1", "dc2"])).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.datacenters().collect::<Vec<_>>(), vec!["dc1", "dc2"]);
        assert_eq!(set.get("dc2").unwrap().datacenter(), Some("dc2"));
        assert!(set.get("").is_none());
    }

    #[test]
    fn test_repeated_datacenters_collapse() {
        let set = DatacenterClientSet::connect(
            "http://127.0.0.1:8500/",
            &dcs(&["dc1", "dc2", "dc1"]),
        )
        .unwrap();

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_malformed_endpoint_is_construction_error() {
        for endpoint in ["", "127.0.0.1:8500", "ftp://registry", "http://"] {
            let err = DatacenterClientSet::connect(endpoint, &[]).unwrap_err();
            assert!(
                matches!(err, ConsultError::ClientConstruction { .. }),
                "{endpoint}: {err:?}"
            );
        }
    }

    #[test]
    fn test_failure_aborts_whole_build() {
        let mut attempts = Vec::new();
        let result = DatacenterClientSet::build_with(
            "http://127.0.0.1:8500/",
            &dcs(&["dc1", "dc2", "dc3"]),
            |_, dc| {
                attempts.push(dc.map(str::to_string));
                if dc == Some("dc2") {
                    Err(ConsultError::ClientConstruction {
                        endpoint: "http://127.0.0.1:8500/".to_string(),
                        reason: "refused".to_string(),
                    })
                } else {
                    Ok(())
                }
            },
        );

        assert!(result.is_err());
        assert_eq!(attempts.len(), 2);
    }

    #[test]
    fn test_invalid_datacenter_name_is_construction_error() {
        let err = DatacenterClientSet::connect("http://127.0.0.1:8500/", &dcs(&["dc1&x=y"]))
            .unwrap_err();

        assert!(matches!(err, ConsultError::ClientConstruction { .. }));
    }
}
