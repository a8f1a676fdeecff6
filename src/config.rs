//! Configuration types for site-analyzer

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use utoipa::ToSchema;

/// Analysis behavior configuration (targets, output, fetch policy)
///
/// Groups settings related to how pages are fetched and where results are
/// written. Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalysisConfig {
    /// URLs analyzed by scheduled and direct runs
    ///
    /// API-triggered runs supply their own list and ignore this one.
    #[serde(default)]
    pub urls: Vec<String>,

    /// Directory where the JSON and CSV artifacts are written (default: "results")
    #[serde(default = "default_output_dir")]
    #[schema(value_type = String)]
    pub output_dir: PathBuf,

    /// Per-fetch timeout covering connection and body, in seconds (default: 30)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Treat 4xx/5xx responses as analyzable pages instead of failures (default: false)
    ///
    /// By default a non-success status produces a failure record. Enabling
    /// this analyzes the error page body like any other page.
    #[serde(default)]
    pub analyze_error_pages: bool,

    /// User-Agent header sent with every fetch
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            output_dir: default_output_dir(),
            fetch_timeout_secs: default_fetch_timeout(),
            analyze_error_pages: false,
            user_agent: default_user_agent(),
        }
    }
}

/// Periodic scheduling configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ScheduleConfig {
    /// Interval between scheduled analysis runs, in whole hours (default: 1)
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_hours: default_interval_hours(),
        }
    }
}

/// REST API server configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Address to bind to (default: 127.0.0.1:5000)
    #[serde(default = "default_bind_address")]
    #[schema(value_type = String)]
    pub bind_address: SocketAddr,

    /// Optional API key required in the X-Api-Key header
    #[serde(default)]
    pub api_key: Option<String>,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            api_key: None,
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

/// Top-level configuration for [`crate::SiteAnalyzer`]
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Analysis targets, output directory, and fetch policy
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Periodic scheduling
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// REST API server
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Build a configuration from defaults plus environment overrides
    ///
    /// Loads a `.env` file if one is present, then applies the recognized
    /// `SITE_ANALYZER_*` variables on top of [`Config::default`]:
    ///
    /// - `SITE_ANALYZER_URLS` — comma-separated target URL list
    /// - `SITE_ANALYZER_OUTPUT_DIR`
    /// - `SITE_ANALYZER_FETCH_TIMEOUT_SECS`
    /// - `SITE_ANALYZER_INTERVAL_HOURS`
    /// - `SITE_ANALYZER_BIND_ADDRESS`
    /// - `SITE_ANALYZER_API_KEY`
    ///
    /// Malformed numeric or address values produce a config error naming the
    /// offending variable rather than being silently ignored.
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Config::default();
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides through an injectable lookup function
    ///
    /// Separated from [`Config::from_env`] so tests can supply variables
    /// without mutating process state.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> crate::Result<()> {
        if let Some(urls) = lookup("SITE_ANALYZER_URLS") {
            self.analysis.urls = urls
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(dir) = lookup("SITE_ANALYZER_OUTPUT_DIR") {
            self.analysis.output_dir = PathBuf::from(dir);
        }

        if let Some(timeout) = lookup("SITE_ANALYZER_FETCH_TIMEOUT_SECS") {
            self.analysis.fetch_timeout_secs =
                timeout
                    .parse()
                    .map_err(|_| crate::Error::Config {
                        message: format!("invalid fetch timeout: {timeout}"),
                        key: Some("SITE_ANALYZER_FETCH_TIMEOUT_SECS".to_string()),
                    })?;
        }

        if let Some(hours) = lookup("SITE_ANALYZER_INTERVAL_HOURS") {
            self.schedule.interval_hours = hours.parse().map_err(|_| crate::Error::Config {
                message: format!("invalid schedule interval: {hours}"),
                key: Some("SITE_ANALYZER_INTERVAL_HOURS".to_string()),
            })?;
        }

        if let Some(address) = lookup("SITE_ANALYZER_BIND_ADDRESS") {
            self.api.bind_address = address.parse().map_err(|_| crate::Error::Config {
                message: format!("invalid bind address: {address}"),
                key: Some("SITE_ANALYZER_BIND_ADDRESS".to_string()),
            })?;
        }

        if let Some(key) = lookup("SITE_ANALYZER_API_KEY") {
            self.api.api_key = Some(key);
        }

        Ok(())
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("site-analyzer/{}", env!("CARGO_PKG_VERSION"))
}

fn default_interval_hours() -> u64 {
    1
}

#[allow(clippy::expect_used)] // literal address always parses
fn default_bind_address() -> SocketAddr {
    "127.0.0.1:5000"
        .parse()
        .expect("default bind address is valid")
}

fn default_true() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert!(config.analysis.urls.is_empty());
        assert_eq!(config.analysis.output_dir, PathBuf::from("results"));
        assert_eq!(config.analysis.fetch_timeout_secs, 30);
        assert!(!config.analysis.analyze_error_pages);
        assert_eq!(config.schedule.interval_hours, 1);
        assert_eq!(config.api.bind_address.port(), 5000);
        assert!(config.api.api_key.is_none());
        assert!(config.api.cors_enabled);
    }

    #[test]
    fn test_defaults_from_empty_json() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.analysis.fetch_timeout_secs, 30);
        assert_eq!(config.schedule.interval_hours, 1);
        assert!(config.api.swagger_ui);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"analysis": {"output_dir": "/tmp/audit", "fetch_timeout_secs": 5}}"#,
        )
        .unwrap();

        assert_eq!(config.analysis.output_dir, PathBuf::from("/tmp/audit"));
        assert_eq!(config.analysis.fetch_timeout_secs, 5);
        assert_eq!(config.schedule.interval_hours, 1);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SITE_ANALYZER_URLS", "https://a.example, https://b.example"),
            ("SITE_ANALYZER_OUTPUT_DIR", "/tmp/results"),
            ("SITE_ANALYZER_FETCH_TIMEOUT_SECS", "10"),
            ("SITE_ANALYZER_INTERVAL_HOURS", "6"),
            ("SITE_ANALYZER_BIND_ADDRESS", "0.0.0.0:8080"),
            ("SITE_ANALYZER_API_KEY", "secret"),
        ]);

        let mut config = Config::default();
        config
            .apply_env_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(
            config.analysis.urls,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.analysis.output_dir, PathBuf::from("/tmp/results"));
        assert_eq!(config.analysis.fetch_timeout_secs, 10);
        assert_eq!(config.schedule.interval_hours, 6);
        assert_eq!(config.api.bind_address.port(), 8080);
        assert_eq!(config.api.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_env_override_rejects_bad_timeout() {
        let mut config = Config::default();
        let result = config.apply_env_overrides(|key| {
            (key == "SITE_ANALYZER_FETCH_TIMEOUT_SECS").then(|| "soon".to_string())
        });

        let error = result.unwrap_err();
        assert!(error.to_string().contains("invalid fetch timeout"));
    }

    #[test]
    fn test_env_override_rejects_bad_bind_address() {
        let mut config = Config::default();
        let result = config.apply_env_overrides(|key| {
            (key == "SITE_ANALYZER_BIND_ADDRESS").then(|| "not-an-address".to_string())
        });

        assert!(result.is_err());
    }
}
