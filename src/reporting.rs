//! Side-channel reporting of handled exceptions.
//!
//! A [`Reporter`] receives every exception the handler normalizes, unmodified,
//! together with the request context, so it can forward it to logs or an
//! error tracker. Reporting is best effort: the handler logs and discards
//! both returned errors and panics.

use std::error::Error as StdError;

use parking_lot::Mutex;

use crate::context::RequestContext;
use crate::exception::Exception;

/// Errors a reporter may return. They never reach the client.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The reporting backend is not reachable or not configured.
    #[error("reporter unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected or dropped the report.
    #[error("failed to deliver report")]
    Delivery(#[source] Box<dyn StdError + Send + Sync>),
}

/// Receives handled exceptions.
///
/// Closures with the matching signature are reporters too.
pub trait Reporter: Send + Sync {
    fn report(&self, exception: &Exception, context: &RequestContext) -> Result<(), ReportError>;
}

impl<F> Reporter for F
where
    F: Fn(&Exception, &RequestContext) -> Result<(), ReportError> + Send + Sync,
{
    fn report(&self, exception: &Exception, context: &RequestContext) -> Result<(), ReportError> {
        self(exception, context)
    }
}

/// Drops every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _exception: &Exception, _context: &RequestContext) -> Result<(), ReportError> {
        Ok(())
    }
}

/// Writes reports to `tracing`.
///
/// Internal errors are logged at `error` level with their full message;
/// API exceptions are expected outcomes and go to `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, exception: &Exception, context: &RequestContext) -> Result<(), ReportError> {
        let method = context.method.as_ref().map(|m| m.as_str());
        match exception {
            Exception::Internal(error) => tracing::error!(
                error = %error,
                method,
                path = context.path.as_deref(),
                view = context.view.as_deref(),
                request_id = context.request_id.as_deref(),
                "unhandled exception"
            ),
            Exception::Api(api) => tracing::debug!(
                kind = api.kind().name(),
                status = api.status().as_u16(),
                method,
                path = context.path.as_deref(),
                request_id = context.request_id.as_deref(),
                "api exception"
            ),
        }
        Ok(())
    }
}

/// One call captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The exception's display text, exactly as the reporter saw it.
    pub message: String,
    pub is_api: bool,
    pub context: RequestContext,
}

/// Keeps every report in memory.
///
/// Useful in tests and for surfacing recent failures on a debug page.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<Report>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the reports so far, oldest first.
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }

    pub fn clear(&self) {
        self.reports.lock().clear();
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, exception: &Exception, context: &RequestContext) -> Result<(), ReportError> {
        self.reports.lock().push(Report {
            message: exception.to_string(),
            is_api: exception.is_api(),
            context: context.clone(),
        });
        Ok(())
    }
}
