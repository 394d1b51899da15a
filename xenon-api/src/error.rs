use http_client::HttpError;
use thiserror::Error;

/// High-level errors for the xenon request wrappers
///
/// A non-success status code is never reported through this type. Request
/// objects store the code and leave `data()` empty; callers branch on
/// `code()` themselves.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network communication error
    ///
    /// The remote service could not be reached or the exchange was cut off
    /// before a status line arrived.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response parsing error
    ///
    /// The body of a successful response did not have the expected JSON
    /// shape, or a value could not be converted to the requested type.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A required key was absent when a domain view was read
    #[error("{kind} has no key '{key}'")]
    MissingKey { kind: &'static str, key: String },

    /// A parameter was rejected before any network call was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The endpoint cannot work against the live service
    #[error("Endpoint '{endpoint}' is unavailable: {reason}")]
    Unavailable {
        endpoint: &'static str,
        reason: &'static str,
    },

    /// `execute` was called on a request object that already ran
    #[error("Request has already been executed")]
    AlreadyExecuted,

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ApiError {
    pub fn missing_key(kind: &'static str, key: impl Into<String>) -> Self {
        Self::MissingKey {
            kind,
            key: key.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Network(msg) => ApiError::NetworkError(msg),
            HttpError::Body(msg) => ApiError::NetworkError(format!("failed to read body: {}", msg)),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::ParseError(error.to_string())
    }
}

/// Parameter validation errors raised by request builders
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Parameter '{parameter}' returned more than {max} values.")]
    TooMany { parameter: String, max: usize },

    #[error("Parameter '{parameter}' returned less than {min} values.")]
    TooFew { parameter: String, min: usize },

    #[error("Parameter '{parameter}' value '{value}' is out of range ({min}..={max})")]
    RangeError {
        parameter: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Parameter '{parameter}' value '{value}' is invalid: {reason}")]
    InvalidValue {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("Required parameter '{parameter}' is missing")]
    MissingParameter { parameter: String },
}

impl ValidationError {
    pub fn range_error(
        parameter: &str,
        min: impl std::fmt::Display,
        max: impl std::fmt::Display,
        value: impl std::fmt::Display,
    ) -> Self {
        Self::RangeError {
            parameter: parameter.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn invalid_value(parameter: &str, value: impl std::fmt::Display, reason: &str) -> Self {
        Self::InvalidValue {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn missing(parameter: &str) -> Self {
        Self::MissingParameter {
            parameter: parameter.to_string(),
        }
    }

    /// Name of the parameter that failed
    pub fn parameter(&self) -> &str {
        match self {
            Self::TooMany { parameter, .. }
            | Self::TooFew { parameter, .. }
            | Self::RangeError { parameter, .. }
            | Self::InvalidValue { parameter, .. }
            | Self::MissingParameter { parameter } => parameter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_conversion() {
        let api_error: ApiError = HttpError::Network("connection refused".to_string()).into();
        assert!(matches!(api_error, ApiError::NetworkError(_)));

        let api_error: ApiError = HttpError::Body("truncated".to_string()).into();
        if let ApiError::NetworkError(msg) = api_error {
            assert!(msg.contains("truncated"));
        } else {
            panic!("Expected NetworkError");
        }
    }

    #[test]
    fn test_count_error_messages_name_parameter_and_bound() {
        let too_many = ValidationError::TooMany {
            parameter: "album_ids".to_string(),
            max: 20,
        };
        assert_eq!(
            too_many.to_string(),
            "Parameter 'album_ids' returned more than 20 values."
        );

        let too_few = ValidationError::TooFew {
            parameter: "album_ids".to_string(),
            min: 1,
        };
        assert_eq!(
            too_few.to_string(),
            "Parameter 'album_ids' returned less than 1 values."
        );
        assert_eq!(too_few.parameter(), "album_ids");
    }

    #[test]
    fn test_validation_error_wraps_transparently() {
        let error: ApiError = ValidationError::range_error("volume_percent", 0, 100, 150).into();
        assert_eq!(
            error.to_string(),
            "Parameter 'volume_percent' value '150' is out of range (0..=100)"
        );
    }

    #[test]
    fn test_error_display() {
        let missing = ApiError::missing_key("Album", "restrictions");
        assert_eq!(missing.to_string(), "Album has no key 'restrictions'");

        let unavailable = ApiError::Unavailable {
            endpoint: "get_saved_audiobooks",
            reason: "the service always answers 403",
        };
        assert!(unavailable.to_string().contains("get_saved_audiobooks"));

        assert_eq!(
            ApiError::AlreadyExecuted.to_string(),
            "Request has already been executed"
        );
    }
}
