use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{method} {path} rejected with status {status}: {body}")]
    RemoteError {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    #[error("Unexpected response from {path}: {message}")]
    UnexpectedResponse { path: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Remote,
    Response,
    Configuration,
    Validation,
    Processing,
    Serialization,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PortError {
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PortError::ApiError(_) => ErrorCategory::Network,
            PortError::RemoteError { .. } => ErrorCategory::Remote,
            PortError::UnexpectedResponse { .. } => ErrorCategory::Response,
            PortError::IoError(_) => ErrorCategory::Io,
            PortError::SerializationError(_) => ErrorCategory::Serialization,
            PortError::ConfigError { .. }
            | PortError::MissingConfigError { .. }
            | PortError::InvalidConfigValueError { .. }
            | PortError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            PortError::ValidationError { .. } => ErrorCategory::Validation,
            PortError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // a 409 means the object is already there
            PortError::RemoteError { status: 409, .. } => ErrorSeverity::Low,
            PortError::ApiError(_) => ErrorSeverity::Medium,
            PortError::RemoteError { status, .. } if *status == 429 || *status >= 500 => {
                ErrorSeverity::Medium
            }
            PortError::RemoteError { .. }
            | PortError::UnexpectedResponse { .. }
            | PortError::ValidationError { .. }
            | PortError::ProcessingError { .. }
            | PortError::SerializationError(_) => ErrorSeverity::High,
            PortError::IoError(_)
            | PortError::ConfigError { .. }
            | PortError::MissingConfigError { .. }
            | PortError::InvalidConfigValueError { .. }
            | PortError::ConfigValidationError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Whether the remote reported that the object already exists.
    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::RemoteError { status: 409, .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PortError::ApiError(e) if e.is_timeout() => {
                "The Port API did not answer in time".to_string()
            }
            PortError::ApiError(_) => "Could not reach the Port API".to_string(),
            PortError::RemoteError {
                status: 401 | 403, ..
            } => "The Port API refused the credentials".to_string(),
            PortError::RemoteError {
                status: 404, path, ..
            } => format!("Nothing found at {}", path),
            PortError::RemoteError { status, path, .. } => {
                format!("The Port API rejected {} (status {})", path, status)
            }
            PortError::UnexpectedResponse { path, .. } => {
                format!("The Port API answered {} with an unexpected payload", path)
            }
            PortError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            PortError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PortError::ApiError(_) => {
                "Check network access to the API and consider raising --timeout-seconds"
            }
            PortError::RemoteError {
                status: 401 | 403, ..
            } => "Provide a valid credential through --api-key or PORT_API_KEY",
            PortError::RemoteError { status: 404, .. } => {
                "Make sure the blueprint exists before creating entities or scorecards"
            }
            PortError::RemoteError { status: 409, .. } => {
                "The object already exists; nothing to do"
            }
            PortError::RemoteError { status, .. } if *status == 429 || *status >= 500 => {
                "The API is busy or failing; try again later"
            }
            PortError::RemoteError { .. } => "Inspect the response body for the rejected field",
            PortError::UnexpectedResponse { .. } => {
                "Check that --base-url points at the Port v1 API"
            }
            PortError::ValidationError { .. } => {
                "Fix the document shown in the error before sending it"
            }
            PortError::ProcessingError { .. } => "Check the log above for the unit that failed",
            PortError::SerializationError(_) => {
                "The payload could not be encoded or decoded as JSON"
            }
            PortError::IoError(_) => "Check that the file exists and is readable",
            PortError::ConfigError { .. }
            | PortError::MissingConfigError { .. }
            | PortError::InvalidConfigValueError { .. }
            | PortError::ConfigValidationError { .. } => {
                "Review the command-line flags, environment variables and config file"
            }
        }
    }
}

impl ErrorSeverity {
    /// Process exit code the binaries use for an error of this severity.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, PortError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(status: u16) -> PortError {
        PortError::RemoteError {
            method: "POST".to_string(),
            path: "/blueprints".to_string(),
            status,
            body: "{}".to_string(),
        }
    }

    #[test]
    fn test_conflict_is_low_severity() {
        let err = remote(409);
        assert!(err.is_conflict());
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.category(), ErrorCategory::Remote);
    }

    #[test]
    fn test_server_errors_are_retryable() {
        assert_eq!(remote(503).severity(), ErrorSeverity::Medium);
        assert_eq!(remote(429).severity(), ErrorSeverity::Medium);
        assert_eq!(remote(422).severity(), ErrorSeverity::High);
        assert!(!remote(422).is_conflict());
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = PortError::MissingConfigError {
            field: "api_key".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().contains("api_key"));
    }

    #[test]
    fn test_auth_failure_message() {
        let err = remote(401);
        assert_eq!(
            err.user_friendly_message(),
            "The Port API refused the credentials"
        );
        assert!(err.recovery_suggestion().contains("PORT_API_KEY"));
    }

    #[test]
    fn test_severity_exit_codes() {
        let missing_key = PortError::MissingConfigError {
            field: "api_key".to_string(),
        };
        assert_eq!(missing_key.severity().exit_code(), 3);
        assert_eq!(remote(503).severity().exit_code(), 2);
        assert_eq!(remote(404).severity().exit_code(), 1);
        assert_eq!(PortError::validation("bad level").severity().exit_code(), 1);
        assert_eq!(remote(409).severity().exit_code(), 0);
    }
}
