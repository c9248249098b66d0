//! Configuration loading
//!
//! Layers, lowest precedence first:
//! - built-in defaults (`AppConfig::default()`, via `#[serde(default)]`)
//! - an optional TOML file, `otp.toml` or the path named by `OTP_CONFIG`
//! - environment variables prefixed `OTP__`, nested with `__`
//!   (e.g. `OTP__SMS__PROFILE_SECRET`)
//!
//! `.env` is read first so its entries take part as environment variables.

use std::collections::HashMap;
use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};
use otp_shared::config::AppConfig;

use crate::InfrastructureError;

/// Environment variable naming an explicit configuration file
pub const CONFIG_FILE_ENV: &str = "OTP_CONFIG";

/// Configuration file read when `OTP_CONFIG` is not set
pub const DEFAULT_CONFIG_FILE: &str = "otp.toml";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "OTP";

/// Separator between prefix and nested keys in environment variables
pub const ENV_SEPARATOR: &str = "__";

/// Where configuration is read from
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// TOML file to read
    pub file: Option<PathBuf>,
    /// Fail when the file does not exist
    pub file_required: bool,
    /// Replaces the process environment when set
    pub env: Option<HashMap<String, String>>,
}

impl ConfigSources {
    /// Sources for a normal process start
    pub fn from_process_env() -> Self {
        match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self {
                file: Some(PathBuf::from(path)),
                file_required: true,
                env: None,
            },
            Err(_) => Self {
                file: Some(PathBuf::from(DEFAULT_CONFIG_FILE)),
                file_required: false,
                env: None,
            },
        }
    }
}

/// Load and validate the application configuration for this process
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // Load .env file if present

    load_config_from(ConfigSources::from_process_env())
}

/// Load and validate the application configuration from explicit sources
pub fn load_config_from(sources: ConfigSources) -> Result<AppConfig, InfrastructureError> {
    let mut builder = Config::builder();

    if let Some(path) = &sources.file {
        builder = builder.add_source(
            File::from(path.as_path())
                .format(FileFormat::Toml)
                .required(sources.file_required),
        );
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(sources.env),
    );

    let app_config: AppConfig = builder.build()?.try_deserialize()?;
    app_config.validate().map_err(InfrastructureError::Config)?;

    tracing::debug!(config = ?app_config, event = "config_loaded", "Configuration loaded");

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use otp_shared::config::{ResponseMode, SmsProvider};
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn mock_sources() -> ConfigSources {
        ConfigSources {
            file: None,
            file_required: false,
            env: env(&[("OTP__SMS__PROVIDER", "mock")]),
        }
    }

    #[test]
    fn test_defaults_with_mock_provider() {
        let config = load_config_from(mock_sources()).unwrap();

        assert_eq!(config.server.port, 8082);
        assert_eq!(config.server.app_name, "otp-telnyx");
        assert_eq!(config.store.path, "demo-tokens.json");
        assert_eq!(config.sms.provider, SmsProvider::Mock);
        assert!(config.store.token_ttl_secs.is_none());
    }

    #[test]
    fn test_telnyx_without_secret_is_rejected() {
        let sources = ConfigSources {
            env: env(&[]),
            ..Default::default()
        };

        let result = load_config_from(sources);
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[test]
    fn test_env_overrides_nested_keys() {
        let sources = ConfigSources {
            env: env(&[
                ("OTP__SMS__PROFILE_SECRET", "secret-from-env"),
                ("OTP__SERVER__PORT", "9090"),
                ("OTP__SERVER__RESPONSE_MODE", "json"),
                ("OTP__STORE__TOKEN_TTL_SECS", "300"),
            ]),
            ..Default::default()
        };

        let config = load_config_from(sources).unwrap();
        assert_eq!(config.sms.profile_secret, "secret-from-env");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.response_mode, ResponseMode::Json);
        assert_eq!(config.store.token_ttl_secs, Some(300));
    }

    #[test]
    fn test_file_then_env_precedence() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 7000
app_name = "otp-demo"

[sms]
provider = "mock"
origin_identity = "Demo OTP"
"#
        )
        .unwrap();

        let sources = ConfigSources {
            file: Some(file.path().to_path_buf()),
            file_required: true,
            env: env(&[("OTP__SERVER__PORT", "7100")]),
        };

        let config = load_config_from(sources).unwrap();
        assert_eq!(config.server.port, 7100);
        assert_eq!(config.server.app_name, "otp-demo");
        assert_eq!(config.sms.origin_identity, "Demo OTP");
    }

    #[test]
    fn test_environment_key_from_file_sets_log_filter() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
environment = "production"

[sms]
provider = "mock"
"#
        )
        .unwrap();

        let sources = ConfigSources {
            file: Some(file.path().to_path_buf()),
            file_required: true,
            env: env(&[]),
        };

        let config = load_config_from(sources).unwrap();
        assert_eq!(config.environment, otp_shared::config::Environment::Production);
        assert_eq!(config.default_log_filter(), "info");
        assert!(config.uses_mock_in_production());
    }

    #[test]
    fn test_environment_key_from_env() {
        let sources = ConfigSources {
            env: env(&[("OTP__ENVIRONMENT", "staging"), ("OTP__SMS__PROVIDER", "mock")]),
            ..Default::default()
        };

        let config = load_config_from(sources).unwrap();
        assert_eq!(config.environment, otp_shared::config::Environment::Staging);
        assert_eq!(config.default_log_filter(), "info");
    }

    #[test]
    fn test_missing_required_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let sources = ConfigSources {
            file: Some(dir.path().join("absent.toml")),
            file_required: true,
            env: env(&[("OTP__SMS__PROVIDER", "mock")]),
        };

        assert!(matches!(
            load_config_from(sources),
            Err(InfrastructureError::Config(_))
        ));
    }

    #[test]
    fn test_missing_optional_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let sources = ConfigSources {
            file: Some(dir.path().join("otp.toml")),
            ..mock_sources()
        };

        assert!(load_config_from(sources).is_ok());
    }
}
