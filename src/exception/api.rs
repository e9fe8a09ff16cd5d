//! Exceptions as seen by the normalization pipeline.

use std::error::Error as StdError;
use std::fmt::{self, Display};

use http::{Method, StatusCode};
use serde_json::Value;

use super::kind::ExceptionKind;
use super::tree::ErrorTree;
use crate::error::ErrorType;

/// An error raised deliberately by API code.
///
/// Everything beyond the [`ExceptionKind`] is optional; the classifier falls
/// back to the kind's defaults for whatever is missing.
///
/// # Example
///
/// ```rust
/// use error_envelope::{ApiException, ErrorTree};
/// use http::StatusCode;
///
/// let exc = ApiException::validation(ErrorTree::fields([
///     ("name", ErrorTree::coded("This field is required.", "required")),
/// ]));
///
/// assert_eq!(exc.status(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiException {
    kind: ExceptionKind,
    detail: Option<ErrorTree>,
    code: Option<String>,
    error_type: Option<ErrorType>,
    status: Option<StatusCode>,
    field: Option<String>,
    extra: Option<Value>,
}

impl ApiException {
    pub fn new(kind: ExceptionKind) -> Self {
        Self {
            kind,
            detail: None,
            code: None,
            error_type: None,
            status: None,
            field: None,
            extra: None,
        }
    }

    pub fn validation(detail: impl Into<ErrorTree>) -> Self {
        Self::new(ExceptionKind::Validation).with_detail(detail)
    }

    pub fn authentication_failed() -> Self {
        Self::new(ExceptionKind::AuthenticationFailed)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ExceptionKind::NotAuthenticated)
    }

    pub fn permission_denied() -> Self {
        Self::new(ExceptionKind::PermissionDenied)
    }

    pub fn not_found() -> Self {
        Self::new(ExceptionKind::NotFound)
    }

    pub fn method_not_allowed(method: Method) -> Self {
        Self::new(ExceptionKind::MethodNotAllowed { method })
    }

    pub fn not_acceptable() -> Self {
        Self::new(ExceptionKind::NotAcceptable)
    }

    pub fn unsupported_media_type(media_type: impl Into<String>) -> Self {
        Self::new(ExceptionKind::UnsupportedMediaType {
            media_type: media_type.into(),
        })
    }

    pub fn parse_error() -> Self {
        Self::new(ExceptionKind::ParseError)
    }

    pub fn protected_object() -> Self {
        Self::new(ExceptionKind::ProtectedObject)
    }

    pub fn throttled(wait: Option<u64>) -> Self {
        Self::new(ExceptionKind::Throttled { wait })
    }

    /// An API error with no specific category.
    pub fn generic() -> Self {
        Self::new(ExceptionKind::Generic)
    }

    /// Replaces the default message with a payload (a message or a tree).
    pub fn with_detail(mut self, detail: impl Into<ErrorTree>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the exception-level code, used where the payload names none.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Forces the reported error type regardless of the kind.
    ///
    /// [`ErrorType::Multiple`] is reserved for the aggregator and is ignored
    /// here.
    pub fn with_type(mut self, error_type: ErrorType) -> Self {
        self.error_type = Some(error_type);
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Scopes the exception to a field; nested paths start below it.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Attaches auxiliary data copied verbatim into the response.
    pub fn with_extra(mut self, extra: Value) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn kind(&self) -> &ExceptionKind {
        &self.kind
    }

    pub fn detail(&self) -> Option<&ErrorTree> {
        self.detail.as_ref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn error_type(&self) -> Option<ErrorType> {
        self.error_type
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn extra(&self) -> Option<&Value> {
        self.extra.as_ref()
    }

    /// Explicit status if set, otherwise the kind's default.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or_else(|| self.kind.default_status())
    }
}

impl Display for ApiException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail.as_ref().and_then(ErrorTree::first_message) {
            Some(message) => write!(f, "{}: {}", self.kind, message),
            None => write!(f, "{}: {}", self.kind, self.kind.default_detail()),
        }
    }
}

impl StdError for ApiException {}

/// Errors the hosting framework raises on its own, outside API code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    #[error("no route or object matches the request")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    /// Deleting or updating the object would orphan the listed dependants.
    #[error("object is protected by {0} dependant(s)")]
    Protected(usize),
}

impl From<FrameworkError> for ApiException {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::NotFound => ApiException::not_found(),
            FrameworkError::PermissionDenied => ApiException::permission_denied(),
            FrameworkError::Protected(_) => ApiException::protected_object(),
        }
    }
}

/// Anything that can reach the framework's error hook.
#[derive(Debug)]
pub enum Exception {
    /// A deliberate API error.
    Api(ApiException),
    /// Any other error; its message is never shown to clients.
    Internal(Box<dyn StdError + Send + Sync + 'static>),
}

impl Exception {
    /// Wraps an arbitrary error (or a plain message) as an internal error.
    pub fn internal(error: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        Exception::Internal(error.into())
    }

    pub fn as_api(&self) -> Option<&ApiException> {
        match self {
            Exception::Api(api) => Some(api),
            Exception::Internal(_) => None,
        }
    }

    pub fn is_api(&self) -> bool {
        matches!(self, Exception::Api(_))
    }

    /// HTTP status for this exception; 500 for internal errors.
    pub fn status(&self) -> StatusCode {
        match self {
            Exception::Api(api) => api.status(),
            Exception::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exception::Api(api) => Display::fmt(api, f),
            Exception::Internal(error) => Display::fmt(error, f),
        }
    }
}

impl From<ApiException> for Exception {
    fn from(api: ApiException) -> Self {
        Exception::Api(api)
    }
}

impl From<FrameworkError> for Exception {
    fn from(error: FrameworkError) -> Self {
        Exception::Api(error.into())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Exception>();
    assert_sync::<Exception>();
};
