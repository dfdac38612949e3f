use crate::config::toml_config::AdminConfig;
use crate::config::{Settings, API_URL_ENV, DEFAULT_OUTPUT_PATH};
use crate::core::grid::DEFAULT_PAGE_SIZE;
use crate::domain::schema::EntityKind;
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "salud-admin")]
#[command(about = "Manage health-tourism records held by the admin backend")]
pub struct CliConfig {
    /// Backend base URL
    #[arg(long, env = "API_URL", global = true)]
    pub api_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Local directory holding the *_template.xlsx files
    #[arg(long, global = true)]
    pub templates_dir: Option<PathBuf>,

    /// Directory for downloaded templates and exports
    #[arg(long, global = true)]
    pub output_path: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the managed entity types and their columns
    Entities,

    /// Load and show the records of one entity
    List {
        entity: EntityKind,

        /// Zero-based page to show; all rows when omitted
        #[arg(long)]
        page: Option<usize>,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Print the records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete one record by id
    Delete { entity: EntityKind, id: String },

    /// Bulk-import a spreadsheet into one entity
    Upload { entity: EntityKind, file: PathBuf },

    /// Fetch the import template of one entity
    Template { entity: EntityKind },

    /// Export records as CSV (one entity) or as a ZIP snapshot (--all)
    Export {
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        entity: Option<EntityKind>,

        #[arg(long)]
        all: bool,
    },
}

impl CliConfig {
    /// 命令列 > 環境變數 > 設定檔
    pub fn settings(&self) -> Result<Settings> {
        let file_config = match &self.config {
            Some(path) => {
                let config = AdminConfig::from_file(path)?;
                config.validate()?;
                Some(config)
            }
            None => None,
        };

        let api_base_url = self
            .api_url
            .clone()
            .or_else(|| file_config.as_ref().map(|c| c.backend.base_url.clone()))
            .ok_or_else(|| AdminError::MissingConfigError {
                field: format!("--api-url / {}", API_URL_ENV),
            })?;

        let mut settings = Settings::new(api_base_url);
        settings.templates_dir = self
            .templates_dir
            .clone()
            .or_else(|| file_config.as_ref().and_then(|c| c.templates_dir().map(PathBuf::from)));
        settings.output_path = self
            .output_path
            .clone()
            .or_else(|| file_config.as_ref().and_then(|c| c.output_path().map(String::from)))
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());
        settings.log_level = file_config
            .as_ref()
            .and_then(|c| c.log_level().map(String::from));
        settings.json_logs = file_config.as_ref().map(|c| c.json_logs()).unwrap_or(false);

        Ok(settings)
    }
}
