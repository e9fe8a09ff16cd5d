//! Mapping exceptions onto error types and defaults.

use crate::code::normalize_code;
use crate::error::ErrorType;
use crate::exception::{ApiException, Exception, ExceptionKind};

/// Message for every error that could not be classified.
///
/// Internal error messages may contain anything (SQL, file paths, secrets);
/// they are replaced by this text and only ever reach the reporter.
pub const GENERIC_DETAIL: &str = "Something went wrong.";

/// The type and defaults the flattener applies to every leaf of an exception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub error_type: ErrorType,
    /// Code for leaves that do not carry their own; already normalized.
    pub default_code: String,
    /// Message for an exception without a payload.
    pub default_detail: String,
    /// Field the whole exception is scoped to.
    pub default_attr: Option<String>,
    /// Set for unclassified errors: leaf messages, codes and paths are
    /// dropped in favour of the defaults.
    pub conceal: bool,
}

impl Classification {
    /// The classification of anything unrecognized.
    pub fn unclassified() -> Self {
        Self {
            error_type: ErrorType::ServerError,
            default_code: ErrorType::ServerError.as_str().to_string(),
            default_detail: GENERIC_DETAIL.to_string(),
            default_attr: None,
            conceal: true,
        }
    }
}

/// Error type implied by an exception category, if the category has one.
pub fn category_type(kind: &ExceptionKind) -> Option<ErrorType> {
    match kind {
        ExceptionKind::AuthenticationFailed
        | ExceptionKind::NotAuthenticated
        | ExceptionKind::PermissionDenied => Some(ErrorType::AuthenticationError),
        ExceptionKind::NotFound
        | ExceptionKind::MethodNotAllowed { .. }
        | ExceptionKind::NotAcceptable
        | ExceptionKind::UnsupportedMediaType { .. }
        | ExceptionKind::ParseError
        | ExceptionKind::ProtectedObject => Some(ErrorType::InvalidRequest),
        ExceptionKind::Throttled { .. } => Some(ErrorType::ThrottledError),
        ExceptionKind::Validation => Some(ErrorType::ValidationError),
        ExceptionKind::Generic => None,
    }
}

/// Classifies an exception.
///
/// Internal errors and API errors of no known category are unclassified.
/// For the rest, an explicit type on the exception beats the category's
/// type, and the exception's own code beats the category's default code;
/// codes left unresolved fall back to the type name.
///
/// # Example
///
/// ```rust
/// use error_envelope::{classify, ApiException, ErrorType, Exception};
///
/// let c = classify(&ApiException::permission_denied().into());
/// assert_eq!(c.error_type, ErrorType::AuthenticationError);
/// assert_eq!(c.default_code, "permission_denied");
///
/// let c = classify(&Exception::internal("db password is hunter2"));
/// assert_eq!(c.error_type, ErrorType::ServerError);
/// assert_eq!(c.default_detail, "Something went wrong.");
/// ```
pub fn classify(exception: &Exception) -> Classification {
    match exception {
        Exception::Api(api) => classify_api(api),
        Exception::Internal(_) => Classification::unclassified(),
    }
}

fn classify_api(api: &ApiException) -> Classification {
    let declared = api.error_type().filter(|ty| *ty != ErrorType::Multiple);
    let error_type = match declared.or_else(|| category_type(api.kind())) {
        Some(error_type) => error_type,
        None => return Classification::unclassified(),
    };

    let default_code = api
        .code()
        .and_then(normalize_code)
        .or_else(|| api.kind().default_code().and_then(normalize_code))
        .unwrap_or_else(|| error_type.as_str().to_string());

    Classification {
        error_type,
        default_code,
        default_detail: api.kind().default_detail(),
        default_attr: api.field().map(str::to_string),
        conceal: false,
    }
}
