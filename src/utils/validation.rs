use crate::utils::error::{ConsultError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Parses a registry endpoint, accepting only http(s) URLs with a host.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.is_empty() {
        return Err(ConsultError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    let url = Url::parse(url_str).map_err(|e| ConsultError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: url_str.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ConsultError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            })
        }
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConsultError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL has no host".to_string(),
        });
    }

    Ok(url)
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConsultError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

fn datacenter_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("static regex"))
}

/// Datacenter names end up in a query string, so only the registry's own
/// alphabet is allowed.
pub fn validate_datacenter(field_name: &str, name: &str) -> Result<()> {
    if !datacenter_pattern().is_match(name) {
        return Err(ConsultError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Datacenter names may only contain letters, digits, '.', '_' and '-'"
                .to_string(),
        });
    }
    Ok(())
}
