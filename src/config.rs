//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing, built-in defaults apply.
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub kiosk: KioskConfig,
    pub ui: UiConfig,
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the check-in API, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

/// Department branding and kiosk behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    pub department_name: String,
    pub year: String,
    pub dept_website: String,
    pub apply_url: String,
    /// Logo clicks needed to open the admin dashboard (default: 5).
    pub admin_entry_clicks: u32,
    /// Idle seconds after which the logo click count resets (default: 3).
    pub click_reset_secs: u64,
}

/// UI preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub fullscreen: bool,
    /// Extra font used as fallback, needed for CJK letter text.
    pub font_path: Option<PathBuf>,
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("Server base URL cannot be empty".to_string()));
        }
        if !self.server.base_url.starts_with("http") {
            return Err(ConfigError::Validation(
                "Server base URL must start with http:// or https://".to_string(),
            ));
        }
        if self.server.timeout_secs < 1 {
            return Err(ConfigError::Validation("Request timeout must be at least 1 second".to_string()));
        }
        if self.kiosk.department_name.trim().is_empty() {
            return Err(ConfigError::Validation("Department name cannot be empty".to_string()));
        }
        if !self.kiosk.dept_website.starts_with("http") {
            return Err(ConfigError::Validation(
                "Department website must start with http:// or https://".to_string(),
            ));
        }
        if !self.kiosk.apply_url.starts_with("http") {
            return Err(ConfigError::Validation(
                "Application URL must start with http:// or https://".to_string(),
            ));
        }
        if self.kiosk.admin_entry_clicks < 1 {
            return Err(ConfigError::Validation("Admin entry clicks must be at least 1".to_string()));
        }
        if self.kiosk.click_reset_secs < 1 {
            return Err(ConfigError::Validation(
                "Click reset window must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl KioskConfig {
    pub fn click_reset_window(&self) -> Duration {
        Duration::from_secs(self.click_reset_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            department_name: "ABC Department".to_string(),
            year: "2026".to_string(),
            dept_website: "https://abc-dept.university.edu".to_string(),
            apply_url: "https://admissions.university.edu/apply".to_string(),
            admin_entry_clicks: 5,
            click_reset_secs: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.kiosk.admin_entry_clicks, 5);
        assert_eq!(config.kiosk.click_reset_window(), Duration::from_secs(3));
    }

    #[test]
    fn test_validation_empty_base_url() {
        let mut config = AppConfig::default();
        config.server.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let mut config = AppConfig::default();
        config.server.base_url = "ftp://invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_click_threshold() {
        let mut config = AppConfig::default();

        config.kiosk.admin_entry_clicks = 0;
        assert!(config.validate().is_err());

        config.kiosk.admin_entry_clicks = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_links() {
        let mut config = AppConfig::default();
        config.kiosk.apply_url = "admissions.university.edu".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [kiosk]
            department_name = "Physics"
            admin_entry_clicks = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.kiosk.department_name, "Physics");
        assert_eq!(config.kiosk.admin_entry_clicks, 3);
        assert_eq!(config.kiosk.click_reset_secs, 3);
        assert_eq!(config.server.base_url, "http://localhost:8080/api");
        assert!(config.ui.font_path.is_none());
    }

    #[test]
    fn test_try_load_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));

        std::fs::write(&path, "[server\nbase_url = 1").unwrap();
        assert!(matches!(
            AppConfig::try_load(&path),
            ConfigLoadResult::Invalid(ConfigError::Parse(_))
        ));

        std::fs::write(&path, "[kiosk]\nadmin_entry_clicks = 0\n").unwrap();
        assert!(matches!(
            AppConfig::try_load(&path),
            ConfigLoadResult::Invalid(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.kiosk.year = "2027".to_string();
        config.ui.fullscreen = true;
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => {
                assert_eq!(loaded.kiosk.year, "2027");
                assert!(loaded.ui.fullscreen);
            }
            other => panic!("unexpected load result: {other:?}"),
        }
    }
}
