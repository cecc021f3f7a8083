use crate::utils::error::{ConsultError, Result};
use crate::utils::validation::{validate_datacenter, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional defaults read from a TOML file, e.g.
///
/// ```toml
/// server = "http://consul.service.internal:8500/"
/// datacenters = ["dc1", "dc2"]
/// json = false
///
/// [ssh]
/// user = "${USER}"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub server: Option<String>,
    #[serde(default)]
    pub datacenters: Vec<String>,
    pub json: Option<bool>,
    pub ssh: Option<SshSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SshSection {
    pub user: Option<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConsultError::ConfigError {
            message: format!("Cannot read {}: {}", path.display(), e),
        })?;
        tracing::debug!("Loaded config file {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        let config: Self = toml::from_str(&processed).map_err(|e| ConsultError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn ssh_user(&self) -> Option<&str> {
        self.ssh
            .as_ref()
            .and_then(|ssh| ssh.user.as_deref())
            .filter(|user| !user.is_empty())
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(server) = &self.server {
            validate_url("server", server)?;
        }
        for dc in &self.datacenters {
            validate_datacenter("datacenters", dc)?;
        }
        Ok(())
    }
}

/// Replaces `${NAME}` with the value of the environment variable; unknown
/// variables are left as written.
fn substitute_env_vars(content: &str) -> String {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
    re.replace_all(content, |caps: &regex::Captures| {
        let name = &caps[1];
        std::env::var(name).unwrap_or_else(|_| format!("${{{}}}", name))
    })
    .into_owned()
}
