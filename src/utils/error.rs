use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostsError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API responded with status {status}: {body}")]
    HttpStatusError { status: u16, body: String },

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl PostsError {
    /// True when the backend answered with the given status code.
    pub fn is_status(&self, code: u16) -> bool {
        matches!(self, PostsError::HttpStatusError { status, .. } if *status == code)
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PostsError::ApiError(e) if e.is_connect() => {
                "Could not reach the posts backend".to_string()
            }
            PostsError::ApiError(_) => "The request to the posts backend failed".to_string(),
            PostsError::HttpStatusError { status: 404, .. } => "Post not found".to_string(),
            PostsError::HttpStatusError { status, .. } if *status >= 500 => {
                format!("The posts backend failed with status {}", status)
            }
            PostsError::HttpStatusError { status, .. } => {
                format!("The posts backend rejected the request (status {})", status)
            }
            PostsError::IoError(e) => format!("File access failed: {}", e),
            PostsError::SerializationError(_) => {
                "The posts backend returned an unexpected payload".to_string()
            }
            PostsError::ConfigError { .. }
            | PostsError::ConfigValidationError { .. }
            | PostsError::InvalidConfigValueError { .. }
            | PostsError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PostsError::ApiError(_) => "Check that the backend is running and --api-url is correct",
            PostsError::HttpStatusError { status: 401 | 403, .. } => {
                "Sign in with an account allowed to modify this post"
            }
            PostsError::HttpStatusError { status: 404, .. } => "Check the post id",
            PostsError::HttpStatusError { .. } => "Inspect the backend logs for details",
            PostsError::IoError(_) => "Check the file path and its permissions",
            PostsError::SerializationError(_) => "Check that the backend and client versions match",
            PostsError::ConfigError { .. }
            | PostsError::ConfigValidationError { .. }
            | PostsError::InvalidConfigValueError { .. }
            | PostsError::MissingConfigError { .. } => {
                "Fix the command line flags or the TOML config file"
            }
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            PostsError::ConfigError { .. }
            | PostsError::ConfigValidationError { .. }
            | PostsError::InvalidConfigValueError { .. }
            | PostsError::MissingConfigError { .. } => 2,
            PostsError::IoError(_) => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, PostsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_helpers() {
        let err = PostsError::HttpStatusError {
            status: 404,
            body: String::new(),
        };
        assert!(err.is_status(404));
        assert!(!err.is_status(500));
        assert_eq!(err.user_friendly_message(), "Post not found");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn missing_config_names_the_field() {
        let err = PostsError::MissingConfigError {
            field: "api.url".to_string(),
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.user_friendly_message().contains("api.url"));
    }

    #[test]
    fn config_errors_use_config_exit_code() {
        let err = PostsError::ConfigValidationError {
            field: "api.url".to_string(),
            message: "missing".to_string(),
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.user_friendly_message().contains("api.url"));
    }
}
