//! The closed set of error categories.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Category of a canonical error record, serialized as the `type` field.
///
/// The set is fixed. Errors that cannot be matched to a more specific
/// category become [`ErrorType::ServerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Field or schema validation failed.
    ValidationError,
    /// Authentication failed, is missing, or the caller lacks permission.
    AuthenticationError,
    /// The request is malformed or cannot be served as asked.
    InvalidRequest,
    /// The caller is being rate limited.
    ThrottledError,
    /// Anything unrecognized.
    ServerError,
    /// Wrapper around several records.
    Multiple,
}

impl ErrorType {
    /// Returns the wire name of this category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "validation_error",
            Self::AuthenticationError => "authentication_error",
            Self::InvalidRequest => "invalid_request",
            Self::ThrottledError => "throttled_error",
            Self::ServerError => "server_error",
            Self::Multiple => "multiple",
        }
    }
}

impl Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
