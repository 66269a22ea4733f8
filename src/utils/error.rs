use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid query: the query argument is missing")]
    InvalidQuery,

    #[error("Duplicate course id: {id}")]
    DuplicateCourseId { id: String },

    #[error("Invalid course {id}: {reason}")]
    InvalidCourse { id: String, reason: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Query,
    Catalog,
    Network,
    System,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::InvalidQuery => ErrorCategory::Query,
            CatalogError::DuplicateCourseId { .. }
            | CatalogError::InvalidCourse { .. }
            | CatalogError::SerializationError(_) => ErrorCategory::Catalog,
            CatalogError::ApiError(_) => ErrorCategory::Network,
            CatalogError::IoError(_) => ErrorCategory::System,
            CatalogError::ConfigError { .. }
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Query => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Catalog | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Whether the error was caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CatalogError::InvalidQuery)
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CatalogError::InvalidQuery => "Pass a query parameter, e.g. ?query=rust",
            CatalogError::DuplicateCourseId { .. } => {
                "Give every course in the catalog a distinct id"
            }
            CatalogError::InvalidCourse { .. } => {
                "Fix the offending course entry in the catalog source"
            }
            CatalogError::SerializationError(_) => {
                "Check that the catalog is a JSON array of course objects"
            }
            CatalogError::ApiError(_) => "Check network connectivity and the catalog URL",
            CatalogError::IoError(_) => "Check that the file exists and is readable",
            CatalogError::ConfigError { .. }
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CatalogError::InvalidQuery => "No search query was given".to_string(),
            CatalogError::ApiError(e) => format!("Could not fetch the course catalog: {}", e),
            CatalogError::IoError(e) => format!("Could not read the course catalog: {}", e),
            CatalogError::SerializationError(e) => {
                format!("The course catalog is not valid JSON: {}", e)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_is_client_error() {
        let err = CatalogError::InvalidQuery;
        assert!(err.is_client_error());
        assert_eq!(err.category(), ErrorCategory::Query);
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_catalog_errors_are_high_severity() {
        let err = CatalogError::DuplicateCourseId {
            id: "1".to_string(),
        };
        assert!(!err.is_client_error());
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("Duplicate course id: 1"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: CatalogError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
