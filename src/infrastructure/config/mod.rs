use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::chart_data::{ChartData, HEALTH_TREND, SLEEP_TREND, VITALS_TREND};
use crate::domain::error::{AppError, Result};
use crate::domain::export::ExportLayout;

pub const CONFIG_FILE: &str = "healthmate.toml";
pub const ENV_PREFIX: &str = "HEALTHMATE_";

/// Process-wide settings, resolved once at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Employee whose dashboard is served
    pub employee_id: String,
    /// HealthMate endpoint, all requests are POSTed here
    pub api_base: String,
    pub api_timeout_ms: u64,
    /// Serve synthesized charts when the backend has none
    pub demo_fallback: bool,
    pub bind_host: String,
    pub port: u16,
    pub export_dir: PathBuf,
    /// Series keys exported, in presentation order
    pub export_sections: Vec<String>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            employee_id: "emp_001".to_string(),
            api_base: "http://127.0.0.1:8000/api/healthmate".to_string(),
            api_timeout_ms: 20_000,
            demo_fallback: true,
            bind_host: "127.0.0.1".to_string(),
            port: 3001,
            export_dir: PathBuf::from("exports"),
            export_sections: vec![
                HEALTH_TREND.to_string(),
                SLEEP_TREND.to_string(),
                VITALS_TREND.to_string(),
            ],
            log_filter: "info".to_string(),
        }
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl AppConfig {
    /// Defaults, then `healthmate.toml`, then `HEALTHMATE_*` variables
    /// (a `.env` file is read first).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn validate(&self) -> Result<()> {
        if self.employee_id.trim().is_empty() {
            return Err(AppError::ConfigError("employee_id must not be empty".to_string()));
        }
        if self.api_base.trim().is_empty() {
            return Err(AppError::ConfigError("api_base must not be empty".to_string()));
        }
        if self.api_timeout_ms == 0 {
            return Err(AppError::ConfigError("api_timeout_ms must be > 0".to_string()));
        }
        if self.export_sections.is_empty() {
            return Err(AppError::ConfigError(
                "export_sections must list at least one series".to_string(),
            ));
        }
        if let Some(unknown) = self
            .export_sections
            .iter()
            .find(|key| !ChartData::is_known_series(key))
        {
            return Err(AppError::ConfigError(format!(
                "Unknown chart series in export_sections: {}",
                unknown
            )));
        }
        Ok(())
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_ms)
    }

    pub fn export_layout(&self) -> ExportLayout {
        ExportLayout::from_keys(self.export_sections.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.export_layout(), ExportLayout::default());
        assert_eq!(config.api_timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_file_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                    employee_id = "emp_777"
                    port = 4000
                    export_sections = ["vitalsTrend", "healthTrend"]
                "#,
            )?;
            jail.set_env("HEALTHMATE_PORT", "4100");
            jail.set_env("HEALTHMATE_DEMO_FALLBACK", "false");

            let config = AppConfig::load_from(CONFIG_FILE).map_err(|e| e.to_string())?;

            assert_eq!(config.employee_id, "emp_777");
            assert_eq!(config.port, 4100);
            assert!(!config.demo_fallback);
            assert_eq!(config.api_timeout_ms, 20_000);
            let titles: Vec<String> = config
                .export_layout()
                .sections
                .into_iter()
                .map(|s| s.title)
                .collect();
            assert_eq!(titles, vec!["VitalsTrend", "HealthTrend"]);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = AppConfig::load_from("absent.toml").map_err(|e| e.to_string())?;
            assert_eq!(config, AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_rejects_unknown_section() {
        let config = AppConfig {
            export_sections: vec!["stepsTrend".to_string()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_rejects_empty_values() {
        let empty_id = AppConfig {
            employee_id: " ".to_string(),
            ..Default::default()
        };
        assert!(empty_id.validate().is_err());

        let zero_timeout = AppConfig {
            api_timeout_ms: 0,
            ..Default::default()
        };
        assert!(zero_timeout.validate().is_err());

        let no_sections = AppConfig {
            export_sections: Vec::new(),
            ..Default::default()
        };
        assert!(no_sections.validate().is_err());
    }
}
