#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_secret, validate_url, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.getport.io/v1";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_SCORECARD_BLUEPRINT: &str = "service";

/// Connection settings handed to the API client.
#[derive(Clone)]
pub struct ApiSettings {
    pub api_key: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl ApiSettings {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Explicit values win over the file, the file wins over defaults.
    pub fn resolve(
        api_key: Option<String>,
        base_url: Option<String>,
        timeout_seconds: Option<u64>,
        file: Option<&TomlConfig>,
    ) -> Self {
        let api = file.map(|f| f.api.clone()).unwrap_or_default();

        Self {
            api_key: api_key.or(api.api_key).unwrap_or_default(),
            base_url: base_url
                .or(api.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_seconds: timeout_seconds
                .or(api.timeout_seconds)
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

/// Blueprint the scorecard is attached to: the flag, then the file, then `service`.
pub fn resolve_scorecard_blueprint(flag: Option<String>, file: Option<&TomlConfig>) -> String {
    flag.or_else(|| file?.scorecard_blueprint().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_SCORECARD_BLUEPRINT.to_string())
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ConfigProvider for ApiSettings {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for ApiSettings {
    fn validate(&self) -> Result<()> {
        validate_secret("api_key", &self.api_key)?;
        validate_url("base_url", &self.base_url)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PortError;

    #[test]
    fn test_defaults() {
        let settings = ApiSettings::resolve(Some("key".to_string()), None, None, None);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_explicit_values_override_file() {
        let file = TomlConfig::from_toml_str(
            "[api]\napi_key = \"file-key\"\n\
             base_url = \"http://file.local\"\n\
             timeout_seconds = 5\n",
        )
        .unwrap();

        let settings = ApiSettings::resolve(
            Some("cli-key".to_string()),
            None,
            Some(12),
            Some(&file),
        );

        assert_eq!(settings.api_key, "cli-key");
        assert_eq!(settings.base_url, "http://file.local");
        assert_eq!(settings.timeout_seconds, 12);
    }

    #[test]
    fn test_missing_key_fails_validation() {
        let settings = ApiSettings::resolve(None, None, None, None);
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, PortError::MissingConfigError { ref field } if field == "api_key"));
    }

    #[test]
    fn test_debug_hides_key() {
        let settings = ApiSettings::new("super-secret", DEFAULT_BASE_URL);
        assert!(!format!("{:?}", settings).contains("super-secret"));
    }

    #[test]
    fn test_scorecard_blueprint_resolution() {
        let file = TomlConfig::from_toml_str("[api]\n[scorecard]\nblueprint = \"repository\"\n")
            .unwrap();

        assert_eq!(resolve_scorecard_blueprint(None, None), "service");
        assert_eq!(resolve_scorecard_blueprint(None, Some(&file)), "repository");
        assert_eq!(
            resolve_scorecard_blueprint(Some("microservice".to_string()), Some(&file)),
            "microservice"
        );
    }
}
