#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::PathBuf;

pub const API_URL_ENV: &str = "API_URL";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// Effective settings after merging the config file, environment and flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub templates_dir: Option<PathBuf>,
    pub output_path: String,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

impl Settings {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            templates_dir: None,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            log_level: None,
            json_logs: false,
        }
    }
}

impl ConfigProvider for Settings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn templates_dir(&self) -> Option<PathBuf> {
        self.templates_dir.clone()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_base_url("api_url", &self.api_base_url)?;
        validation::validate_path("output_path", &self.output_path)?;
        if let Some(level) = &self.log_level {
            validation::validate_log_level("log_level", level)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::new("http://localhost:5000");
        assert_eq!(settings.output_path(), DEFAULT_OUTPUT_PATH);
        assert!(settings.templates_dir().is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        assert!(Settings::new("").validate().is_err());
        assert!(Settings::new("localhost:5000/api").validate().is_err());

        let mut settings = Settings::new("http://localhost:5000");
        settings.output_path = String::new();
        assert!(settings.validate().is_err());
    }
}
