use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Excel workbook error: {0}")]
    SpreadsheetError(#[from] calamine::XlsxError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field in quota record: {field}")]
    MissingField { field: String },

    #[error("Invalid value '{value}' in field '{field}': {reason}")]
    InvalidField {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported attachment format: {path} (expected .xlsx or .csv)")]
    UnsupportedFormat { path: String },

    #[error("Spreadsheet contains no data rows")]
    NoRecords,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CoachError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CoachError::ConfigValidationError { .. }
            | CoachError::MissingConfigError { .. }
            | CoachError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CoachError::CsvError(_)
            | CoachError::SpreadsheetError(_)
            | CoachError::MissingField { .. }
            | CoachError::InvalidField { .. }
            | CoachError::UnsupportedFormat { .. }
            | CoachError::NoRecords => ErrorCategory::Input,
            CoachError::ZipError(_) | CoachError::SerializationError(_) => ErrorCategory::Output,
            CoachError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給使用者的修正建議
    pub fn recovery_suggestion(&self) -> String {
        match self {
            CoachError::MissingField { field } => format!(
                "Add a '{}' column to the spreadsheet and resend the report",
                field
            ),
            CoachError::InvalidField { field, .. } => {
                format!("Make sure '{}' holds a plain number (no text)", field)
            }
            CoachError::UnsupportedFormat { .. } => {
                "Attach the quota sheet as an .xlsx or .csv file".to_string()
            }
            CoachError::NoRecords => {
                "The spreadsheet needs a header row followed by one data row".to_string()
            }
            CoachError::CsvError(_) => "Check that the attachment is valid CSV".to_string(),
            CoachError::SpreadsheetError(_) => {
                "Check that the attachment opens in Excel and the quota data is on the first sheet"
                    .to_string()
            }
            CoachError::ConfigValidationError { .. }
            | CoachError::MissingConfigError { .. }
            | CoachError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags".to_string()
            }
            CoachError::IoError(_) => {
                "Check that the input file exists and the output directory is writable"
                    .to_string()
            }
            CoachError::ZipError(_) | CoachError::SerializationError(_) => {
                "Retry without --archive or check free disk space".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read the quota spreadsheet: {}", self),
            ErrorCategory::Output => format!("Could not write the coaching report: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoachError>;
