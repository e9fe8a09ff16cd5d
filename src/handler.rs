//! The framework-facing entry point.
//!
//! [`ExceptionHandler::handle`] runs the whole pipeline for one exception:
//! the debug passthrough decision, reporting, classification, flattening and
//! aggregation. It never fails and never panics on behalf of user-supplied
//! reporters or parsers.

use std::error::Error as StdError;
use std::panic::{self, AssertUnwindSafe};

use crate::config::HandlerConfig;
use crate::context::RequestContext;
use http::StatusCode;

use crate::error::{ErrorRecord, ErrorRecords, ErrorResponse, ErrorType, MULTIPLE_DETAIL};
use crate::exception::{ApiException, Exception, FrameworkError};
use crate::pipeline::{aggregate_with_detail, classify, try_flatten, GENERIC_DETAIL};

/// What the framework should do with an exception.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Send this response.
    Respond(ErrorResponse),
    /// Let the framework's own error handling take over.
    Passthrough,
}

impl Outcome {
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            Outcome::Respond(response) => Some(response),
            Outcome::Passthrough => None,
        }
    }

    pub fn into_response(self) -> Option<ErrorResponse> {
        match self {
            Outcome::Respond(response) => Some(response),
            Outcome::Passthrough => None,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, Outcome::Passthrough)
    }
}

/// Normalizes exceptions into error envelopes.
///
/// The handler is immutable after construction and can be shared across
/// request threads behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use error_envelope::{
///     ApiException, ErrorTree, ExceptionHandler, HandlerConfig, NoopReporter, RequestContext,
/// };
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let handler = ExceptionHandler::new(
///     HandlerConfig::new()
///         .support_multiple_exceptions(true)
///         .with_reporter(Arc::new(NoopReporter)),
/// );
///
/// let exception = ApiException::validation(ErrorTree::fields([
///     ("email", ErrorTree::list([ErrorTree::coded("This field is required.", "required")])),
///     ("password", ErrorTree::list([ErrorTree::coded("This password is unsafe.", "unsafe_password")])),
/// ]))
/// .into();
///
/// let response = handler.normalize(&exception, &RequestContext::new());
/// assert_eq!(response.status.as_u16(), 400);
/// assert_eq!(response.body()["type"], json!("multiple"));
/// assert_eq!(response.body()["list"][1]["attr"], json!("password"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExceptionHandler {
    config: HandlerConfig,
}

impl ExceptionHandler {
    pub fn new(config: HandlerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Handles one exception raised while serving a request.
    ///
    /// Internal errors are passed through untouched when the framework runs
    /// in debug mode and normalization is not enabled in debug. Everything
    /// else is reported once and normalized.
    pub fn handle(&self, exception: &Exception, context: &RequestContext) -> Outcome {
        if self.config.debug()
            && !self.config.enabled_in_debug()
            && !is_api_level(exception)
        {
            tracing::debug!(
                path = context.path.as_deref(),
                "debug mode, passing internal error through"
            );
            return Outcome::Passthrough;
        }

        Outcome::Respond(self.normalize(exception, context))
    }

    /// Reports and normalizes an exception, ignoring the debug passthrough.
    pub fn normalize(&self, exception: &Exception, context: &RequestContext) -> ErrorResponse {
        self.report(exception, context);

        let parsed = match exception {
            Exception::Internal(error) => self.parse(error.as_ref()).map(Exception::Api),
            Exception::Api(_) => None,
        };
        let effective = parsed.as_ref().unwrap_or(exception);

        let locale = context.locale.as_deref();
        let localizer = self.config.localizer();

        let mut classification = classify(effective);
        classification.default_detail = localizer
            .localize(&classification.default_detail, locale)
            .into_owned();

        let flattened = try_flatten(
            effective,
            &classification,
            self.config.nested_key_separator(),
        );
        let (records, status) = match flattened {
            Ok(records) => (records, effective.status()),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    kind = effective.as_api().map(|api| api.kind().name()),
                    "malformed error payload"
                );
                let fallback = ErrorRecord::new(
                    ErrorType::ServerError,
                    localizer.localize(GENERIC_DETAIL, locale),
                );
                (
                    ErrorRecords::single(fallback),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
            }
        };
        let record_count = records.len();
        let envelope = aggregate_with_detail(
            records,
            self.config.supports_multiple_exceptions(),
            localizer.localize(MULTIPLE_DETAIL, locale),
        );

        tracing::debug!(
            status = status.as_u16(),
            error_type = %envelope.error_type(),
            code = envelope.code(),
            records = record_count,
            request_id = context.request_id.as_deref(),
            "normalized exception"
        );

        ErrorResponse::new(status, envelope)
    }

    fn report(&self, exception: &Exception, context: &RequestContext) {
        let reporter = self.config.reporter();
        match panic::catch_unwind(AssertUnwindSafe(|| reporter.report(exception, context))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "exception reporter failed"),
            Err(_) => tracing::warn!("exception reporter panicked"),
        }
    }

    /// Boxed API and framework errors are unwrapped first. Otherwise the
    /// first parser to recognize the error wins; a panicking parser counts
    /// as not recognizing it.
    fn parse(&self, error: &(dyn StdError + Send + Sync + 'static)) -> Option<ApiException> {
        let error: &(dyn StdError + 'static) = error;
        if let Some(api) = error.downcast_ref::<ApiException>() {
            return Some(api.clone());
        }
        if let Some(framework) = error.downcast_ref::<FrameworkError>() {
            return Some(framework.clone().into());
        }

        self.config.parsers().iter().find_map(|parser| {
            match panic::catch_unwind(AssertUnwindSafe(|| parser.parse(error))) {
                Ok(parsed) => parsed,
                Err(_) => {
                    tracing::warn!("exception parser panicked");
                    None
                }
            }
        })
    }
}

/// API and framework errors count as API-level even when boxed as internal
/// errors.
fn is_api_level(exception: &Exception) -> bool {
    match exception {
        Exception::Api(_) => true,
        Exception::Internal(error) => error.is::<ApiException>() || error.is::<FrameworkError>(),
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ExceptionHandler>();
    assert_sync::<ExceptionHandler>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::exception::ErrorTree;
    use crate::reporting::{NoopReporter, RecordingReporter, ReportError};
    use http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    fn quiet() -> HandlerConfig {
        HandlerConfig::new().with_reporter(Arc::new(NoopReporter))
    }

    #[test]
    fn test_passthrough_only_for_internal_errors_in_debug() {
        let handler = ExceptionHandler::new(quiet().with_debug(true));
        let ctx = RequestContext::new();

        assert!(handler
            .handle(&Exception::internal("boom"), &ctx)
            .is_passthrough());
        assert!(!handler
            .handle(&ApiException::not_found().into(), &ctx)
            .is_passthrough());
    }

    #[test]
    fn test_enable_in_debug_disables_passthrough() {
        let handler = ExceptionHandler::new(quiet().with_debug(true).enable_in_debug(true));
        let outcome = handler.handle(&Exception::internal("boom"), &RequestContext::new());

        let response = outcome.into_response().unwrap();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.envelope.code(), "server_error");
    }

    #[test]
    fn test_framework_errors_are_api_errors_even_in_debug() {
        let handler = ExceptionHandler::new(quiet().with_debug(true));
        let outcome = handler.handle(
            &Exception::internal(FrameworkError::Protected(2)),
            &RequestContext::new(),
        );

        let response = outcome.into_response().unwrap();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.envelope.code(), "protected_error");
        assert_eq!(response.envelope.error_type(), ErrorType::InvalidRequest);
    }

    #[test]
    fn test_boxed_api_exception_is_recovered() {
        let handler = ExceptionHandler::new(quiet());
        let boxed = Exception::internal(ApiException::permission_denied());
        let response = handler.normalize(&boxed, &RequestContext::new());
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.envelope.code(), "permission_denied");
    }

    #[test]
    fn test_reporter_sees_original_exception_once() {
        let recorder = Arc::new(RecordingReporter::new());
        let handler = ExceptionHandler::new(HandlerConfig::new().with_reporter(recorder.clone()));

        let response = handler.normalize(
            &Exception::internal("password=hunter2"),
            &RequestContext::new().with_path("/login"),
        );

        assert_eq!(recorder.len(), 1);
        assert_eq!(recorder.reports()[0].message, "password=hunter2");
        assert!(!response.body().to_string().contains("hunter2"));
    }

    #[test]
    fn test_failing_reporter_is_ignored() {
        let failing = |_: &Exception, _: &RequestContext| -> Result<(), ReportError> {
            Err(ReportError::Unavailable("offline".to_string()))
        };
        let handler = ExceptionHandler::new(HandlerConfig::new().with_reporter(Arc::new(failing)));
        let response = handler.normalize(&ApiException::not_found().into(), &RequestContext::new());
        assert_eq!(response.envelope.code(), "not_found");
    }

    #[test]
    fn test_panicking_parser_degrades_to_server_error() {
        let handler = ExceptionHandler::new(quiet().with_parser(Arc::new(
            |_: &(dyn StdError + 'static)| -> Option<ApiException> { panic!("parser bug") },
        )));
        let response = handler.normalize(&Exception::internal("boom"), &RequestContext::new());
        assert_eq!(response.envelope.detail(), "Something went wrong.");
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_localizer_applies_to_defaults_only() {
        let handler = ExceptionHandler::new(quiet().with_localizer(Arc::new(
            |message: &str, locale: Option<&str>| match (message, locale) {
                ("Not found.", Some("fr")) => Some("Introuvable.".to_string()),
                _ => None,
            },
        )));
        let ctx = RequestContext::new().with_locale("fr");

        let response = handler.normalize(&ApiException::not_found().into(), &ctx);
        assert_eq!(response.envelope.detail(), "Introuvable.");

        let response = handler.normalize(
            &ApiException::not_found().with_detail("Not found.").into(),
            &ctx,
        );
        assert_eq!(response.envelope.detail(), "Not found.");
    }

    #[test]
    fn test_separator_is_applied() {
        let handler = ExceptionHandler::new(quiet().with_nested_key_separator("."));
        let exception = ApiException::validation(ErrorTree::fields([(
            "parent",
            ErrorTree::fields([("child", "Required.")]),
        )]))
        .into();
        let response = handler.normalize(&exception, &RequestContext::new());
        assert_eq!(response.body()["attr"], json!("parent.child"));
    }
}
