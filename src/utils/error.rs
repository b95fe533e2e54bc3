use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoiError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("{kind} index {index} is out of range (catalog has {len} entries)")]
    SelectionOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Report processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Io,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RoiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RoiError::ConfigValidationError { .. }
            | RoiError::InvalidConfigValueError { .. }
            | RoiError::MissingConfigError { .. } => ErrorCategory::Configuration,
            RoiError::SelectionOutOfRange { .. } => ErrorCategory::Input,
            RoiError::IoError(_) | RoiError::ZipError(_) => ErrorCategory::Io,
            RoiError::CsvError(_)
            | RoiError::SerializationError(_)
            | RoiError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RoiError::SelectionOutOfRange { kind, len, .. } => {
                format!("Pick a {} index between 0 and {}", kind, len.saturating_sub(1))
            }
            RoiError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration file", field)
            }
            RoiError::InvalidConfigValueError { field, .. }
            | RoiError::ConfigValidationError { field, .. } => {
                format!("Check the value of '{}' in the configuration", field)
            }
            RoiError::IoError(_) | RoiError::ZipError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            RoiError::CsvError(_) | RoiError::SerializationError(_) | RoiError::ProcessingError { .. } => {
                "Re-run with --verbose to see which scenario failed".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Invalid selection: {}", self),
            ErrorCategory::Io => format!("Could not read or write files: {}", self),
            ErrorCategory::Processing => format!("Could not build the report: {}", self),
        }
    }

    /// Process exit code for binaries; `Low` severity still counts as success.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, RoiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_error_message_and_suggestion() {
        let err = RoiError::SelectionOutOfRange {
            kind: "tier",
            index: 5,
            len: 3,
        };
        assert_eq!(
            err.to_string(),
            "tier index 5 is out of range (catalog has 3 entries)"
        );
        assert_eq!(err.recovery_suggestion(), "Pick a tier index between 0 and 2");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err: RoiError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }
}
