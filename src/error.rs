//! Typed errors for setup and output. Page failures are not errors; they end
//! a harvest and are reported on the returned catalog.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] wreq::Error),

    #[error("failed to write output to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Checks that `url` is an absolute http(s) origin.
pub fn validate_base_url(url: &str) -> Result<(), HarvestError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| HarvestError::InvalidBaseUrl {
            url: url.to_string(),
            reason: "must start with http:// or https://".to_string(),
        })?;

    if rest.trim_matches('/').is_empty() {
        return Err(HarvestError::InvalidBaseUrl {
            url: url.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://atrezzovazquez.es").is_ok());
        assert!(validate_base_url("http://127.0.0.1:8080/").is_ok());

        let err = validate_base_url("atrezzovazquez.es").unwrap_err();
        assert!(err.to_string().contains("must start with http"));

        let err = validate_base_url("https://").unwrap_err();
        assert!(err.to_string().contains("missing host"));
    }

    #[test]
    fn test_output_error_display() {
        let err = HarvestError::Output {
            path: PathBuf::from("/tmp/out.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write output to /tmp/out.csv: denied");
    }
}
