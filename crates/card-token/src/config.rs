//! Configuration loading and validation for the card token service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.
//! There is no unencrypted fallback: without a secret the service does not start.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Shared secret new tokens are issued under. **Required.**
    pub card_token_secret: String,

    /// Comma-separated previous secrets still accepted for validation.
    #[serde(default)]
    pub retired_secrets: String,

    /// Bearer credential the card renderer presents to `POST /tokens`.
    /// **Required.**
    pub issuer_api_key: String,

    /// Validation page base URL; tokens are appended as the last path segment.
    /// **Required.**
    pub validation_base_url: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// JSON members file backing the member directory. Empty means no members.
    #[serde(default)]
    pub members_file: String,

    /// How often (seconds) to reload the members file.
    #[serde(default = "default_members_refresh_interval")]
    pub members_refresh_interval_secs: u64,

    /// OTLP endpoint. Empty disables OpenTelemetry export.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_http_port() -> u16 {
    8080
}
fn default_members_refresh_interval() -> u64 {
    300
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Retired secrets as a list, blanks between commas skipped.
    pub fn retired_secret_list(&self) -> Vec<String> {
        self.retired_secrets
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Members file path, if one is configured.
    pub fn members_path(&self) -> Option<std::path::PathBuf> {
        let trimmed = self.members_file.trim();
        (!trimmed.is_empty()).then(|| trimmed.into())
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.card_token_secret, "CARD_TOKEN_SECRET")?;
        ensure_non_empty(&self.issuer_api_key, "ISSUER_API_KEY")?;
        ensure_non_empty(&self.validation_base_url, "VALIDATION_BASE_URL")?;

        if self.issuer_api_key == self.card_token_secret {
            anyhow::bail!("ISSUER_API_KEY must differ from CARD_TOKEN_SECRET");
        }

        let base = self.validation_base_url.trim();
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            anyhow::bail!("VALIDATION_BASE_URL must be an absolute http(s) URL");
        }
        if self
            .retired_secret_list()
            .iter()
            .any(|s| s == &self.card_token_secret)
        {
            anyhow::bail!("RETIRED_SECRETS must not contain the current CARD_TOKEN_SECRET");
        }
        if self.members_refresh_interval_secs == 0 {
            anyhow::bail!("MEMBERS_REFRESH_INTERVAL_SECS must be > 0");
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("card_token_secret", &"[REDACTED]")
            .field("retired_secrets", &self.retired_secret_list().len())
            .field("issuer_api_key", &"[REDACTED]")
            .field("validation_base_url", &self.validation_base_url)
            .field("http_port", &self.http_port)
            .field("members_file", &self.members_file)
            .field(
                "members_refresh_interval_secs",
                &self.members_refresh_interval_secs,
            )
            .field(
                "otel_exporter_otlp_endpoint",
                &self.otel_exporter_otlp_endpoint,
            )
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config {
            card_token_secret: "test-secret-key".into(),
            retired_secrets: String::new(),
            issuer_api_key: "issuer-key-123".into(),
            validation_base_url: "https://example.org/cek-validasi".into(),
            http_port: default_http_port(),
            members_file: String::new(),
            members_refresh_interval_secs: default_members_refresh_interval(),
            otel_exporter_otlp_endpoint: String::new(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_http_port(), 8080);
        assert_eq!(default_members_refresh_interval(), 300);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_secret() {
        let cfg = Config {
            card_token_secret: "  ".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_issuer_key() {
        let cfg = Config {
            issuer_api_key: String::new(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_issuer_key_equal_to_secret() {
        let cfg = Config {
            issuer_api_key: "test-secret-key".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_relative_base_url() {
        let cfg = Config {
            validation_base_url: "/cek-validasi".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_current_secret_in_retired_list() {
        let cfg = Config {
            retired_secrets: "old,test-secret-key".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_refresh_interval() {
        let cfg = Config {
            members_refresh_interval_secs: 0,
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn retired_secret_list_skips_blanks() {
        let cfg = Config {
            retired_secrets: " old-1 ,, old-2 ,".into(),
            ..valid()
        };
        assert_eq!(cfg.retired_secret_list(), vec!["old-1", "old-2"]);
    }

    #[test]
    fn members_path_none_when_blank() {
        assert!(valid().members_path().is_none());
        let cfg = Config {
            members_file: "/etc/card-token/members.json".into(),
            ..valid()
        };
        assert!(cfg.members_path().is_some());
    }

    #[test]
    fn debug_redacts_secrets() {
        let cfg = Config {
            retired_secrets: "old-secret".into(),
            ..valid()
        };
        let shown = format!("{cfg:?}");
        assert!(!shown.contains("test-secret-key"));
        assert!(!shown.contains("old-secret"));
        assert!(!shown.contains("issuer-key-123"));
        assert!(shown.contains("REDACTED"));
    }
}
