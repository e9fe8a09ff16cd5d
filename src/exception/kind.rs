//! The closed set of exception categories.

use std::fmt::{self, Display};

use http::{Method, StatusCode};

/// What went wrong, independent of how it is reported.
///
/// Every category has a default status, code and message. Mapping a
/// category to an [`ErrorType`](crate::ErrorType) is the classifier's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExceptionKind {
    /// Credentials were supplied but rejected.
    AuthenticationFailed,
    /// No credentials were supplied.
    NotAuthenticated,
    /// The caller is authenticated but not allowed to do this.
    PermissionDenied,
    NotFound,
    MethodNotAllowed { method: Method },
    /// No representation satisfies the request's `Accept` header.
    NotAcceptable,
    UnsupportedMediaType { media_type: String },
    /// The request body could not be parsed.
    ParseError,
    /// The operation would break a reference held by another object.
    ProtectedObject,
    /// Rate limited; `wait` is the number of seconds until retry, if known.
    Throttled { wait: Option<u64> },
    /// Field or schema validation failed.
    Validation,
    /// An API-level error that declares no specific category.
    Generic,
}

impl ExceptionKind {
    /// Status sent when the exception does not override it.
    pub fn default_status(&self) -> StatusCode {
        match self {
            Self::AuthenticationFailed | Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            Self::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::ParseError | Self::Validation => StatusCode::BAD_REQUEST,
            Self::ProtectedObject => StatusCode::CONFLICT,
            Self::Throttled { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Generic => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Code used when neither the exception nor its payload names one.
    ///
    /// `None` for [`ExceptionKind::Generic`], which has nothing more
    /// specific to say than its error type.
    pub fn default_code(&self) -> Option<&'static str> {
        match self {
            Self::AuthenticationFailed => Some("authentication_failed"),
            Self::NotAuthenticated => Some("not_authenticated"),
            Self::PermissionDenied => Some("permission_denied"),
            Self::NotFound => Some("not_found"),
            Self::MethodNotAllowed { .. } => Some("method_not_allowed"),
            Self::NotAcceptable => Some("not_acceptable"),
            Self::UnsupportedMediaType { .. } => Some("unsupported_media_type"),
            Self::ParseError => Some("parse_error"),
            Self::ProtectedObject => Some("protected_error"),
            Self::Throttled { .. } => Some("throttled"),
            Self::Validation => Some("invalid"),
            Self::Generic => None,
        }
    }

    /// Message used when the exception carries no detail of its own.
    pub fn default_detail(&self) -> String {
        match self {
            Self::AuthenticationFailed => "Incorrect authentication credentials.".to_string(),
            Self::NotAuthenticated => "Authentication credentials were not provided.".to_string(),
            Self::PermissionDenied => {
                "You do not have permission to perform this action.".to_string()
            }
            Self::NotFound => "Not found.".to_string(),
            Self::MethodNotAllowed { method } => format!("Method \"{}\" not allowed.", method),
            Self::NotAcceptable => "Could not satisfy the request Accept header.".to_string(),
            Self::UnsupportedMediaType { media_type } => {
                format!("Unsupported media type \"{}\" in request.", media_type)
            }
            Self::ParseError => "Malformed request.".to_string(),
            Self::ProtectedObject => "Requested operation cannot be completed because a related object is protected.".to_string(),
            Self::Throttled { wait: None } => "Request was throttled.".to_string(),
            Self::Throttled { wait: Some(seconds) } => format!(
                "Request was throttled. Expected available in {} second{}.",
                seconds,
                if *seconds == 1 { "" } else { "s" }
            ),
            Self::Validation => "Invalid input.".to_string(),
            Self::Generic => "A server error occurred.".to_string(),
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "AuthenticationFailed",
            Self::NotAuthenticated => "NotAuthenticated",
            Self::PermissionDenied => "PermissionDenied",
            Self::NotFound => "NotFound",
            Self::MethodNotAllowed { .. } => "MethodNotAllowed",
            Self::NotAcceptable => "NotAcceptable",
            Self::UnsupportedMediaType { .. } => "UnsupportedMediaType",
            Self::ParseError => "ParseError",
            Self::ProtectedObject => "ProtectedObject",
            Self::Throttled { .. } => "Throttled",
            Self::Validation => "Validation",
            Self::Generic => "Generic",
        }
    }
}

impl Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
