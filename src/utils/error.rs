use thiserror::Error;

/// Why a single registry lookup failed.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("registry returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed registry response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConsultError {
    #[error("Cannot build registry client for {endpoint}: {reason}")]
    ClientConstruction { endpoint: String, reason: String },

    #[error("Catalog query against datacenter '{datacenter}' failed: {source}")]
    Query {
        datacenter: String,
        #[source]
        source: LookupError,
    },

    #[error("No nodes matched service '{service}'")]
    NoMatch { service: String },

    #[error("Cannot find '{binary}' on PATH: {source}")]
    LauncherNotFound {
        binary: String,
        #[source]
        source: which::Error,
    },

    #[error("Failed to launch '{binary}': {source}")]
    Launch {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP probe of {url} failed: {source}")]
    Probe {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ConsultError {
    /// Short, user-facing description printed by the binary.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ConsultError::ClientConstruction { endpoint, .. } => {
                format!("The registry address '{}' is not usable", endpoint)
            }
            ConsultError::Query { datacenter, .. } if datacenter.is_empty() => {
                "Could not query the registry".to_string()
            }
            ConsultError::Query { datacenter, .. } => {
                format!("Could not query the registry in datacenter '{}'", datacenter)
            }
            ConsultError::NoMatch { service } => {
                format!("No node runs service '{}' with the requested tags", service)
            }
            ConsultError::LauncherNotFound { binary, .. } => {
                format!("'{}' is not installed or not on PATH", binary)
            }
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ConsultError::ConfigError { .. }
            | ConsultError::InvalidConfigValueError { .. }
            | ConsultError::ClientConstruction { .. } => 2,
            ConsultError::Query { .. } | ConsultError::Probe { .. } => 3,
            ConsultError::NoMatch { .. } => 4,
            ConsultError::LauncherNotFound { .. } | ConsultError::Launch { .. } => 5,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsultError>;
