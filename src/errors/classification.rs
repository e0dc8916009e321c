use super::types::RiskError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    /// The user can fix this by changing input or simply running the command again.
    pub user_recoverable: bool,
    pub exit_code: i32,
}

impl RiskError {
    /// Classify this error for rendering and for the process exit code.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            RiskError::Validation(_) => ErrorClassification {
                error_type: "ValidationError",
                user_recoverable: true,
                exit_code: 3,
            },
            RiskError::Transport(_) => ErrorClassification {
                error_type: "TransportError",
                user_recoverable: true,
                exit_code: 4,
            },
            RiskError::Data(_) => ErrorClassification {
                error_type: "DataError",
                user_recoverable: true,
                exit_code: 5,
            },
            RiskError::NotFound(_) => ErrorClassification {
                error_type: "NotFoundError",
                user_recoverable: true,
                exit_code: 1,
            },

            RiskError::Config(_) | RiskError::Yaml(_) => ErrorClassification {
                error_type: "ConfigError",
                user_recoverable: false,
                exit_code: 2,
            },
            RiskError::Database(_) => ErrorClassification {
                error_type: "DatabaseError",
                user_recoverable: false,
                exit_code: 1,
            },
            RiskError::Io(_) => ErrorClassification {
                error_type: "IoError",
                user_recoverable: false,
                exit_code: 1,
            },
            RiskError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                user_recoverable: false,
                exit_code: 1,
            },
            RiskError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                user_recoverable: false,
                exit_code: 1,
            },
        }
    }
}
