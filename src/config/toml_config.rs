use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub templates: Option<TemplatesConfig>,
    #[serde(default)]
    pub export: Option<ExportConfig>,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// 本機的 public/templates 目錄
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

impl AdminConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdminError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AdminError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_URL})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdminError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn templates_dir(&self) -> Option<&Path> {
        self.templates.as_ref().map(|t| t.dir.as_path())
    }

    pub fn output_path(&self) -> Option<&str> {
        self.export.as_ref().map(|e| e.output_path.as_str())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().map(|l| l.json).unwrap_or(false)
    }
}

impl Validate for AdminConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_base_url("backend.base_url", &self.backend.base_url)?;

        if let Some(output_path) = self.output_path() {
            validation::validate_path("export.output_path", output_path)?;
        }

        if let Some(dir) = self.templates_dir() {
            validation::validate_path("templates.dir", &dir.to_string_lossy())?;
        }

        if let Some(level) = self.log_level() {
            validation::validate_log_level("logging.level", level)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[backend]
base_url = "https://api.turismosalud.example/v1"

[templates]
dir = "./public/templates"

[export]
output_path = "./exports"

[logging]
level = "debug"
"#;

        let config = AdminConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.backend.base_url, "https://api.turismosalud.example/v1");
        assert_eq!(config.templates_dir(), Some(Path::new("./public/templates")));
        assert_eq!(config.output_path(), Some("./exports"));
        assert_eq!(config.log_level(), Some("debug"));
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_optional_sections() {
        let config = AdminConfig::from_toml_str(
            r#"
[backend]
base_url = "http://localhost:5000"
"#,
        )
        .unwrap();

        assert!(config.templates_dir().is_none());
        assert!(config.output_path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SALUD_ADMIN_TEST_BACKEND", "https://backend.test");

        let config = AdminConfig::from_toml_str(
            r#"
[backend]
base_url = "${SALUD_ADMIN_TEST_BACKEND}"
"#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "https://backend.test");

        std::env::remove_var("SALUD_ADMIN_TEST_BACKEND");
    }

    #[test]
    fn test_undefined_env_var_fails_validation() {
        let config = AdminConfig::from_toml_str(
            r#"
[backend]
base_url = "${SALUD_ADMIN_SURELY_UNDEFINED}"
"#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "${SALUD_ADMIN_SURELY_UNDEFINED}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let config = AdminConfig::from_toml_str(
            r#"
[backend]
base_url = "http://localhost:5000"

[logging]
level = "chatty"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_backend_section() {
        assert!(AdminConfig::from_toml_str("[export]\noutput_path = \"./x\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[backend]\nbase_url = \"http://127.0.0.1:8000\"\n")
            .unwrap();

        let config = AdminConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");
    }
}
