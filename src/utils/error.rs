use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExpandError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,   // 重試錯誤
            ErrorSeverity::High => 1,     // 處理錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl ExpandError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ExpandError::IoError(_) => ErrorSeverity::Medium,
            ExpandError::ValidationError { .. }
            | ExpandError::ConfigValidationError { .. }
            | ExpandError::InvalidConfigValueError { .. }
            | ExpandError::MissingConfigError { .. }
            | ExpandError::ProcessingError { .. } => ErrorSeverity::High,
            ExpandError::CsvError(_) | ExpandError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ExpandError::IoError(e) => format!("Could not read or write a file: {}", e),
            ExpandError::CsvError(_) | ExpandError::SerializationError(_) => {
                "Failed to render the expanded queries".to_string()
            }
            ExpandError::ConfigValidationError { field, .. }
            | ExpandError::InvalidConfigValueError { field, .. } => {
                format!("The configuration value '{}' is invalid", field)
            }
            ExpandError::MissingConfigError { field } => {
                format!("The configuration value '{}' is required", field)
            }
            ExpandError::ProcessingError { message } | ExpandError::ValidationError { message } => {
                message.clone()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ExpandError::IoError(_) => "Check that the input file exists and the output directory is writable",
            ExpandError::CsvError(_) | ExpandError::SerializationError(_) => {
                "Try a different output format and report the failing query"
            }
            ExpandError::ConfigValidationError { .. }
            | ExpandError::InvalidConfigValueError { .. }
            | ExpandError::MissingConfigError { .. } => {
                "Fix the configuration file or command line flags and run again"
            }
            ExpandError::ProcessingError { .. } => "Inspect the input queries and run again with --verbose",
            ExpandError::ValidationError { .. } => "Provide at least one query to expand",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExpandError>;
