#[cfg(feature = "cli")]
pub mod cli;
pub mod file;

use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_datacenter, validate_url, Validate};

pub use file::FileConfig;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8500/";

/// Settings shared by every command, fixed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: String,
    pub datacenters: Vec<String>,
    pub format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            datacenters: Vec::new(),
            format: OutputFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Command-line (or environment) values win over the file, which wins over
    /// built-in defaults. A non-empty `--dc` list replaces the file's list.
    pub fn resolve(
        server: Option<String>,
        datacenters: Vec<String>,
        json: bool,
        file: Option<&FileConfig>,
    ) -> Self {
        let server = server
            .or_else(|| file.and_then(|f| f.server.clone()))
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());

        let datacenters = if datacenters.is_empty() {
            file.map(|f| f.datacenters.clone()).unwrap_or_default()
        } else {
            datacenters
        };

        let json = json || file.and_then(|f| f.json).unwrap_or(false);
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Pretty
        };

        Self {
            server,
            datacenters,
            format,
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("server", &self.server)?;
        for dc in &self.datacenters {
            validate_datacenter("dc", dc)?;
        }
        tracing::debug!("Configuration validation passed: {:?}", self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags_or_file() {
        let config = AppConfig::resolve(None, vec![], false, None);

        assert_eq!(config, AppConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override_file() {
        let file = FileConfig {
            server: Some("http://file:8500/".to_string()),
            datacenters: vec!["file-dc".to_string()],
            json: Some(false),
            ssh: None,
        };

        let config = AppConfig::resolve(
            Some("http://flag:8500/".to_string()),
            vec!["dc1".to_string()],
            true,
            Some(&file),
        );

        assert_eq!(config.server, "http://flag:8500/");
        assert_eq!(config.datacenters, vec!["dc1"]);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_file_fills_missing_flags() {
        let file = FileConfig {
            server: Some("http://file:8500/".to_string()),
            datacenters: vec!["file-dc".to_string()],
            json: Some(true),
            ssh: None,
        };

        let config = AppConfig::resolve(None, vec![], false, Some(&file));

        assert_eq!(config.server, "http://file:8500/");
        assert_eq!(config.datacenters, vec!["file-dc"]);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_server_fails_validation() {
        let config = AppConfig::resolve(Some("not a url".to_string()), vec![], false, None);

        assert!(config.validate().is_err());
    }
}
