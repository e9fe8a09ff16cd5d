//! Explicit mapping of application errors onto API exceptions.

use std::error::Error as StdError;

use super::api::ApiException;

/// Turns an application error into an [`ApiException`].
///
/// Parsers run in registration order against internal errors; the first one
/// returning `Some` wins. An error no parser recognizes is reported as an
/// unclassified server error.
///
/// Closures with the matching signature are parsers too.
///
/// # Example
///
/// ```rust
/// use error_envelope::{ApiException, ExceptionParser};
/// use std::error::Error;
///
/// #[derive(Debug)]
/// struct QuotaExceeded;
///
/// impl std::fmt::Display for QuotaExceeded {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("quota exceeded")
///     }
/// }
///
/// impl Error for QuotaExceeded {}
///
/// let parser = |error: &(dyn Error + 'static)| {
///     error
///         .downcast_ref::<QuotaExceeded>()
///         .map(|_| ApiException::throttled(None).with_code("quota_exceeded"))
/// };
///
/// assert!(parser.parse(&QuotaExceeded).is_some());
/// ```
pub trait ExceptionParser: Send + Sync {
    fn parse(&self, error: &(dyn StdError + 'static)) -> Option<ApiException>;
}

impl<F> ExceptionParser for F
where
    F: Fn(&(dyn StdError + 'static)) -> Option<ApiException> + Send + Sync,
{
    fn parse(&self, error: &(dyn StdError + 'static)) -> Option<ApiException> {
        self(error)
    }
}
