//! Configuration management for finweb
//!
//! This module handles loading, validation, and management of
//! finweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allow cross-origin requests to the JSON API
    #[serde(default)]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: false,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Browser session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session id
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Minutes of inactivity after which a session (and its ledger) is dropped
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_minutes: u64,
    /// Upper bound on live sessions kept in memory
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            idle_timeout_minutes: default_idle_timeout(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_cookie_name() -> String {
    "finweb_session".to_string()
}

fn default_idle_timeout() -> u64 {
    120
}

fn default_max_sessions() -> usize {
    1000
}

/// Currency display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Symbol printed in front of every amount
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_currency_symbol(),
        }
    }
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

/// Text report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// First line of the report
    #[serde(default = "default_report_title")]
    pub title: String,
    /// Suggested file name for the download
    #[serde(default = "default_report_file_name")]
    pub file_name: String,
    /// strftime pattern for the "Generated on" line
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_report_title(),
            file_name: default_report_file_name(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

fn default_report_title() -> String {
    "PERSONAL FINANCE REPORT".to_string()
}

fn default_report_file_name() -> String {
    "Finance_Report.txt".to_string()
}

fn default_timestamp_format() -> String {
    "%d-%m-%Y %H:%M".to_string()
}

/// Chart and visualization settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart width in pixels
    #[serde(default = "default_chart_width")]
    pub width: u32,
    /// Chart height in pixels
    #[serde(default = "default_chart_height")]
    pub height: u32,
    /// Bar colour for income
    #[serde(default = "default_income_color")]
    pub income_color: String,
    /// Bar colour for expenses
    #[serde(default = "default_expense_color")]
    pub expense_color: String,
    /// Pie slice palette, cycled when there are more slices than colours
    #[serde(default = "default_palette")]
    pub colors: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            income_color: default_income_color(),
            expense_color: default_expense_color(),
            colors: default_palette(),
        }
    }
}

fn default_chart_width() -> u32 {
    420
}

fn default_chart_height() -> u32 {
    300
}

fn default_income_color() -> String {
    "#4BC0C0".to_string()
}

fn default_expense_color() -> String {
    "#FF6384".to_string()
}

fn default_palette() -> Vec<String> {
    ["#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Session settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
    /// Chart settings
    #[serde(default)]
    pub charts: ChartConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound { path: path.display().to_string() }
            } else {
                ConfigError::IoError { message: e.to_string() }
            }
        })?;

        Self::parse(&content)
    }

    /// Load configuration, falling back to defaults when the file does not exist
    ///
    /// Silent: the logger is not up yet when this runs, so the caller reports
    /// the fallback.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(invalid("server.port", "Port must be greater than 0"));
        }

        if self.session.cookie_name.trim().is_empty() {
            return Err(invalid("session.cookie_name", "Cookie name must not be empty"));
        }

        if self.session.max_sessions == 0 {
            return Err(invalid("session.max_sessions", "At least one session must be allowed"));
        }

        if !self.report.file_name.ends_with(".txt") {
            return Err(invalid("report.file_name", "Report file name must end with .txt"));
        }

        let bad_format = chrono::format::StrftimeItems::new(&self.report.timestamp_format)
            .any(|item| matches!(item, chrono::format::Item::Error));
        if bad_format {
            return Err(invalid(
                "report.timestamp_format",
                "Timestamp format is not a valid strftime pattern",
            ));
        }

        if self.charts.colors.is_empty() {
            return Err(invalid("charts.colors", "At least one chart colour is required"));
        }

        if log::LevelFilter::from_str(&self.logging.level).is_err() {
            return Err(invalid(
                "logging.level",
                "Log level must be one of trace, debug, info, warn, error, off",
            ));
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.report.file_name, "Finance_Report.txt");
        assert_eq!(config.currency.symbol, "₹");
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_bundled_template_parses() {
        let config = Config::parse(Config::generate_default()).unwrap();
        assert_eq!(config.report.title, "PERSONAL FINANCE REPORT");
        assert_eq!(config.session.cookie_name, "finweb_session");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = Config::parse("server:\n  port: 9000\ncurrency:\n  symbol: \"$\"\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.currency.symbol, "$");
        assert_eq!(config.report.timestamp_format, "%d-%m-%Y %H:%M");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::parse("server: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let err = Config::parse("server:\n  port: 0\n").unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "server.port"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_report_settings() {
        let mut config = Config::default();
        config.report.file_name = "report.pdf".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.report.timestamp_format = "%Q".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "debug".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let path = Path::new("/definitely/not/here/finweb.yaml");
        assert!(matches!(Config::load(path), Err(ConfigError::FileNotFound { .. })));
        let config = Config::load_or_default(path).unwrap();
        assert_eq!(config.server.port, Config::default().server.port);
        assert_eq!(config.logging.level, default_log_level());
    }
}
