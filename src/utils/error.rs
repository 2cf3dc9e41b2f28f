use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("No CSV files found in input directory: {dir}")]
    NoInputError { dir: String },

    #[error("File '{file}' is missing required columns: {}", .missing.join(", "))]
    SchemaError { file: String, missing: Vec<String> },

    #[error("No rows matched target product '{product}' in any input file")]
    NoMatchesError { product: String },

    #[error("Failed to write output file '{path}': {reason}")]
    WriteError { path: String, reason: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Output,
    Config,
    System,
}

impl EtlError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // A file with missing columns is skipped; the run carries on.
            EtlError::SchemaError { .. } => ErrorSeverity::Low,
            // Data problems: rerun once the input directory has usable rows.
            EtlError::NoInputError { .. } | EtlError::NoMatchesError { .. } => {
                ErrorSeverity::Medium
            }
            EtlError::WriteError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            EtlError::CsvError(_) | EtlError::IoError(_) | EtlError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::NoInputError { .. } | EtlError::SchemaError { .. } => ErrorCategory::Input,
            EtlError::NoMatchesError { .. } => ErrorCategory::Data,
            EtlError::WriteError { .. } => ErrorCategory::Output,
            EtlError::ConfigValidationError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            EtlError::CsvError(_) | EtlError::IoError(_) | EtlError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::NoInputError { dir } => {
                format!("Place at least one .csv file in '{}' and rerun", dir)
            }
            EtlError::SchemaError { file, missing } => format!(
                "Add the columns {} to '{}' or remove the file from the input directory",
                missing.join(", "),
                file
            ),
            EtlError::NoMatchesError { product } => format!(
                "Check that the input files contain '{}' rows, or adjust the target product",
                product
            ),
            EtlError::WriteError { path, .. } => {
                format!("Check permissions and free space for '{}'", path)
            }
            EtlError::CsvError(_) => "Inspect the input files for malformed CSV".to_string(),
            EtlError::IoError(_) => "Check file permissions and paths".to_string(),
            EtlError::SerializationError(_) => "Report this as a bug".to_string(),
            EtlError::ConfigValidationError { field, .. }
            | EtlError::MissingConfigError { field }
            | EtlError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting and rerun", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::NoInputError { dir } => {
                format!("No sales data found: '{}' has no CSV files", dir)
            }
            EtlError::NoMatchesError { product } => {
                format!("No '{}' sales found in the input data", product)
            }
            EtlError::WriteError { path, .. } => {
                format!("Could not write the consolidated output to '{}'", path)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
