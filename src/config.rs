//! Tool configuration module.
//!
//! Handles loading, validating, and layering `mailshot.toml`. Stock defaults
//! are serialized to a TOML value, the project's file (if any) is merged on
//! top, and the result is deserialized with unknown keys rejected.
//!
//! ## Config File Location
//!
//! ```text
//! my-app/
//! ├── package.json
//! ├── mailshot.toml        # optional, project root only
//! └── emails/
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [api]
//! base_url = "https://www.mailshot.dev"   # signup endpoint host
//! timeout_secs = 5                        # applies to the signup POST
//!
//! [preview]
//! out_dir = "previews_html"               # where `preview` writes, relative to the root
//! ```
//!
//! The `MAILSHOT_API_URL` environment variable overrides `api.base_url`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Name of the optional config file at the project root.
pub const CONFIG_FILE: &str = "mailshot.toml";

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "MAILSHOT_API_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `mailshot.toml`.
///
/// Every field has a default, so the file only needs the values it changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Remote API used by the optional signup during `init`.
    pub api: ApiConfig,
    /// Output settings for the `preview` command.
    pub preview: PreviewConfig,
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "api.base_url must start with http:// or https:// (got {url:?})"
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.preview.out_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "preview.out_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL; `/api/users` is appended for the signup POST.
    pub base_url: String,
    /// Upper bound on the signup request, in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.mailshot.dev".to_string(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Output directory for `preview`, relative to the project root.
    pub out_dir: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            out_dir: "previews_html".to_string(),
        }
    }
}

pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ToolConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `mailshot.toml` from the project root as a raw TOML value.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Apply environment overrides. Takes the value rather than reading the
/// environment so callers and tests decide where it comes from.
pub fn apply_env_override(mut config: ToolConfig, api_url: Option<String>) -> ToolConfig {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }
    config
}

/// Load config for a project: stock defaults, then `mailshot.toml`, then
/// `MAILSHOT_API_URL`. The merged result is validated.
pub fn load_config(root: &Path) -> Result<ToolConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: ToolConfig = merged.try_into()?;
    let config = apply_env_override(config, std::env::var(API_URL_ENV).ok());
    config.validate()?;
    Ok(config)
}

/// A fully commented stock `mailshot.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# mailshot configuration
# ======================
#
# Place this file at the project root, next to package.json.
# Every key is optional; remove the ones you don't change.

[api]
# Host that receives the optional signup address entered during `init`.
# `/api/users` is appended. MAILSHOT_API_URL overrides this value.
base_url = "https://www.mailshot.dev"

# Seconds before the signup request is abandoned. A timeout never fails
# the command.
timeout_secs = 5

[preview]
# Where `mailshot preview` writes rendered previews and its index page,
# relative to the project root.
out_dir = "previews_html"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = ToolConfig::default();
        assert_eq!(config.api.base_url, "https://www.mailshot.dev");
        assert_eq!(config.api.timeout(), Duration::from_secs(5));
        assert_eq!(config.preview.out_dir, "previews_html");
    }

    #[test]
    fn parse_partial_config() {
        let config: ToolConfig = toml::from_str(
            r#"
[preview]
out_dir = "out"
"#,
        )
        .unwrap();
        assert_eq!(config.preview.out_dir, "out");
        assert_eq!(config.api.timeout_secs, 5);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.preview.out_dir, "previews_html");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[api]
timeout_secs = 2

[preview]
out_dir = "build/previews"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.api.timeout_secs, 2);
        assert_eq!(config.preview.out_dir, "build/previews");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[api]
timeout = 3
"#,
        )
        .unwrap();
        let err = load_config(tmp.path()).unwrap_err().to_string();
        assert!(err.contains("unknown field"), "{err}");
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[api]
timeout_secs = 0
"#,
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = ToolConfig::default();
        config.api.base_url = "ftp://example.com".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_override_replaces_base_url() {
        let config = apply_env_override(
            ToolConfig::default(),
            Some("http://localhost:3000".to_string()),
        );
        assert_eq!(config.api.base_url, "http://localhost:3000");
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let config = apply_env_override(ToolConfig::default(), Some("  ".to_string()));
        assert_eq!(config.api.base_url, "https://www.mailshot.dev");
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(
            r#"
[api]
timeout_secs = 9
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let api = merged.get("api").unwrap();
        assert_eq!(api.get("timeout_secs").unwrap().as_integer(), Some(9));
        assert_eq!(
            api.get("base_url").unwrap().as_str(),
            Some("https://www.mailshot.dev")
        );
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: ToolConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = ToolConfig::default();
        assert_eq!(config.api.base_url, defaults.api.base_url);
        assert_eq!(config.api.timeout_secs, defaults.api.timeout_secs);
        assert_eq!(config.preview.out_dir, defaults.preview.out_dir);
    }
}
