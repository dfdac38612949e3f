use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Backend responded with status {status}")]
    ServerError { status: u16, message: Option<String> },

    #[error("Cannot reach backend: {message}")]
    ConnectivityError { message: String },

    #[error("{message}")]
    RequestError { message: String },

    #[error("Unexpected backend payload: {message}")]
    DecodeError { message: String },

    #[error("Record {id} is not in the working list")]
    UnknownRecord { id: String },

    #[error("Unknown entity type: {name}")]
    UnknownEntity { name: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdminError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdminError::ConnectivityError { .. } => ErrorCategory::Network,
            AdminError::ServerError { .. } | AdminError::DecodeError { .. } => {
                ErrorCategory::Backend
            }
            AdminError::RequestError { .. }
            | AdminError::UnknownRecord { .. }
            | AdminError::UnknownEntity { .. } => ErrorCategory::Input,
            AdminError::ConfigError { .. }
            | AdminError::MissingConfigError { .. }
            | AdminError::InvalidConfigValueError { .. }
            | AdminError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AdminError::ZipError(_)
            | AdminError::CsvError(_)
            | AdminError::IoError(_)
            | AdminError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Backend => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 後端回傳的訊息（若有）
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            AdminError::ServerError { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AdminError::ServerError {
                status,
                message: Some(message),
            } => format!("El servidor respondió {}: {}", status, message),
            AdminError::ServerError { status, .. } => {
                format!("El servidor respondió con el estado {}", status)
            }
            AdminError::ConnectivityError { .. } => {
                "No se pudo conectar con el servidor.".to_string()
            }
            AdminError::UnknownRecord { id } => format!("El registro {} no existe en la tabla.", id),
            AdminError::UnknownEntity { name } => format!("Tipo de entidad desconocido: {}", name),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the backend is running and API_URL points to it",
            ErrorCategory::Backend => "Inspect the backend logs; the request was rejected",
            ErrorCategory::Input => "Check the command arguments and try again",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;
