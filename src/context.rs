//! Request metadata passed alongside an exception.
//!
//! The pipeline does not use the context to decide anything about the
//! envelope; it is forwarded to the reporter, used in log fields, and
//! supplies the locale for pipeline-authored messages.

use http::Method;

/// What the framework knows about the request that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub method: Option<Method>,
    pub path: Option<String>,
    /// Name of the view or handler that raised.
    pub view: Option<String>,
    pub request_id: Option<String>,
    /// Preferred locale, e.g. from `Accept-Language`.
    pub locale: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}
