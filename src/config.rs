use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::KootaOptions;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub profile_store: ProfileStoreSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Bearer token checks; on unless turned off explicitly
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    #[serde(default = "default_auth_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            enabled: default_auth_enabled(),
            jwt_secret: String::new(),
            issuer: None,
            audience: None,
        }
    }
}

fn default_auth_enabled() -> bool { true }

/// Where chart documents come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Appwrite,
    /// In-memory store, optionally seeded from a fixtures file
    #[default]
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileStoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub database_id: String,
    #[serde(default = "default_charts_collection")]
    pub charts_collection: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// JSON object of profile id to chart, loaded by the memory backend
    #[serde(default)]
    pub fixtures_path: Option<String>,
}

impl Default for ProfileStoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            endpoint: String::new(),
            api_key: String::new(),
            project_id: String::new(),
            database_id: String::new(),
            charts_collection: default_charts_collection(),
            timeout_secs: default_timeout_secs(),
            fixtures_path: None,
        }
    }
}

fn default_charts_collection() -> String { "birth_charts".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            max_capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_enabled() -> bool { true }
fn default_cache_capacity() -> u64 { 10_000 }
fn default_cache_ttl() -> u64 { 3600 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub bhakoot_dwirdwadash: bool,
    #[serde(default = "default_max_rank_candidates")]
    pub max_rank_candidates: usize,
    #[serde(default = "default_max_rank_limit")]
    pub max_rank_limit: usize,
    /// Candidate charts fetched at once while ranking
    #[serde(default = "default_rank_fetch_concurrency")]
    pub rank_fetch_concurrency: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            bhakoot_dwirdwadash: false,
            max_rank_candidates: default_max_rank_candidates(),
            max_rank_limit: default_max_rank_limit(),
            rank_fetch_concurrency: default_rank_fetch_concurrency(),
        }
    }
}

impl ScoringSettings {
    pub fn koota_options(&self) -> KootaOptions {
        KootaOptions {
            bhakoot_dwirdwadash: self.bhakoot_dwirdwadash,
        }
    }
}

fn default_max_rank_candidates() -> usize { 500 }
fn default_max_rank_limit() -> usize { 100 }
fn default_rank_fetch_concurrency() -> usize { 16 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

const ENV_PREFIX: &str = "MILAN";

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MILAN__)
    ///
    /// The result is validated before it is returned.
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MILAN__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the service cannot run safely with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.enabled && self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.jwt_secret must be set when auth is enabled (MILAN__AUTH__JWT_SECRET)".into(),
            ));
        }
        if self.scoring.rank_fetch_concurrency == 0 {
            return Err(ConfigError::Message(
                "scoring.rank_fetch_concurrency must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let settings = from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            "#,
        );

        assert_eq!(settings.server.port, 8080);
        assert!(settings.auth.enabled);
        assert_eq!(settings.profile_store.backend, StoreBackend::Memory);
        assert!(settings.profile_store.fixtures_path.is_none());
        assert_eq!(settings.scoring.rank_fetch_concurrency, 16);
        assert_eq!(settings.profile_store.charts_collection, "birth_charts");
        assert!(settings.cache.enabled);
        assert_eq!(settings.scoring.max_rank_candidates, 500);
        assert_eq!(settings.scoring.koota_options(), KootaOptions::default());
    }

    #[test]
    fn test_sections_override_defaults() {
        let settings = from_toml(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [auth]
            enabled = true
            jwt_secret = "secret"
            issuer = "milan"

            [profile_store]
            backend = "appwrite"
            endpoint = "https://appwrite.test/v1"

            [scoring]
            bhakoot_dwirdwadash = true
            "#,
        );

        assert!(settings.auth.enabled);
        assert_eq!(settings.auth.issuer.as_deref(), Some("milan"));
        assert_eq!(settings.profile_store.backend, StoreBackend::Appwrite);
        assert!(settings.scoring.koota_options().bhakoot_dwirdwadash);
    }

    #[test]
    fn test_auth_defaults_to_enabled() {
        assert!(AuthSettings::default().enabled);

        let settings = from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [auth]
            jwt_secret = "secret"
            "#,
        );
        assert!(settings.auth.enabled);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_enabled_auth_requires_secret() {
        let settings = from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [auth]
            jwt_secret = "  "
            "#,
        );

        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("jwt_secret"), "{}", err);
    }

    #[test]
    fn test_disabled_auth_allows_empty_secret() {
        let settings = from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [auth]
            enabled = false
            "#,
        );

        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_fetch_concurrency_is_rejected() {
        let settings = from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [auth]
            jwt_secret = "secret"

            [scoring]
            rank_fetch_concurrency = 0
            "#,
        );

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_shipped_defaults_refuse_to_start_without_secret() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
        if std::env::vars().any(|(key, _)| key.starts_with("MILAN__AUTH__")) {
            return;
        }

        let err = Settings::load_from(path).unwrap_err();
        assert!(err.to_string().contains("jwt_secret"), "{}", err);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "compact");
    }
}
