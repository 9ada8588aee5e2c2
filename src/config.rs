//! Facade configuration: remote endpoint and credential.

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::Error;

/// Connection settings for one remote tracker instance.
///
/// One `Config` corresponds to one endpoint + credential pair; it is passed
/// to [`crate::GitBridge::new`] at the composition root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the GitLab instance (e.g. "https://gitlab.com").
    pub base_url: String,
    /// Personal access token sent as the `PRIVATE-TOKEN` header.
    pub token: String,
}

impl Config {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Config {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Create from environment variables.
    ///
    /// Required environment variables:
    /// - GITBRIDGE_URL: Base URL of the GitLab instance
    /// - GITBRIDGE_TOKEN: Personal access token
    pub fn from_env() -> Result<Self, Error> {
        let url = env::var("GITBRIDGE_URL").ok();
        let token = env::var("GITBRIDGE_TOKEN").ok();

        match (url, token) {
            (Some(u), Some(t)) if !u.trim().is_empty() && !t.trim().is_empty() => {
                Ok(Config::new(u, t))
            }
            _ => Err(Error::configuration(
                "GITBRIDGE_URL and GITBRIDGE_TOKEN must both be set and non-empty",
            )),
        }
    }

    /// Reject blank endpoint or credential before any client is built.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.base_url.trim().is_empty() {
            return Err(Error::configuration("base URL cannot be blank"));
        }
        if self.token.trim().is_empty() {
            return Err(Error::configuration("access token cannot be blank"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_populated_config() {
        let config = Config::new("https://gitlab.com", "glpat-abc123");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_url() {
        let config = Config::new("   ", "glpat-abc123");
        let err = config.validate().expect_err("blank URL must be rejected");
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_validate_rejects_blank_token() {
        let config = Config::new("https://gitlab.com", "");
        let err = config.validate().expect_err("blank token must be rejected");
        assert!(matches!(err, Error::Configuration(_)));
    }
}
