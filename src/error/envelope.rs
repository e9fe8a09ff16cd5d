//! Response envelopes.
//!
//! An [`Envelope`] is what clients parse: either a single [`ErrorRecord`] or a
//! `multiple` wrapper around several of them. [`ErrorResponse`] pairs it with
//! the HTTP status the hosting framework should send.

use http::StatusCode;
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use super::error_type::ErrorType;
use super::record::{serialize_record_fields, ErrorRecord};

/// Detail of the `multiple` wrapper, before localization.
pub const MULTIPLE_DETAIL: &str = "Multiple exceptions occurred. Please check list for details.";

/// Several records reported together.
///
/// Only the aggregator builds this, and only from two or more records, so
/// `list` is never shorter than two.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipleErrors {
    detail: String,
    extra: Option<Value>,
    list: Vec<ErrorRecord>,
}

impl MultipleErrors {
    pub(crate) fn new(detail: String, extra: Option<Value>, list: Vec<ErrorRecord>) -> Self {
        debug_assert!(list.len() >= 2, "multiple envelope needs at least two records");
        Self {
            detail,
            extra,
            list,
        }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn extra(&self) -> Option<&Value> {
        self.extra.as_ref()
    }

    pub fn list(&self) -> &[ErrorRecord] {
        &self.list
    }
}

/// The body of an error response.
///
/// Both variants serialize to the same six-field object (`type`, `code`,
/// `detail`, `attr`, `extra`, `list`), so clients need one parser.
///
/// # Example
///
/// ```rust
/// use error_envelope::{Envelope, ErrorRecord, ErrorType};
/// use serde_json::json;
///
/// let envelope = Envelope::Single(
///     ErrorRecord::new(ErrorType::InvalidRequest, "Not found.").with_code("not_found"),
/// );
///
/// assert_eq!(envelope.to_json(), json!({
///     "type": "invalid_request",
///     "code": "not_found",
///     "detail": "Not found.",
///     "attr": null,
///     "extra": null,
///     "list": null,
/// }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// One record surfaced on its own.
    Single(ErrorRecord),
    /// Several records under a `type = code = "multiple"` wrapper.
    Multiple(MultipleErrors),
}

impl Envelope {
    pub fn error_type(&self) -> ErrorType {
        match self {
            Envelope::Single(record) => record.error_type(),
            Envelope::Multiple(_) => ErrorType::Multiple,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Envelope::Single(record) => record.code(),
            Envelope::Multiple(_) => ErrorType::Multiple.as_str(),
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Envelope::Single(record) => record.detail(),
            Envelope::Multiple(multiple) => multiple.detail(),
        }
    }

    /// Always `None` for the `multiple` wrapper.
    pub fn attr(&self) -> Option<&str> {
        match self {
            Envelope::Single(record) => record.attr(),
            Envelope::Multiple(_) => None,
        }
    }

    pub fn extra(&self) -> Option<&Value> {
        match self {
            Envelope::Single(record) => record.extra(),
            Envelope::Multiple(multiple) => multiple.extra(),
        }
    }

    /// The wrapped records; `Some` exactly when the type is `multiple`.
    pub fn list(&self) -> Option<&[ErrorRecord]> {
        match self {
            Envelope::Single(_) => None,
            Envelope::Multiple(multiple) => Some(multiple.list()),
        }
    }

    /// Renders the envelope as a JSON value.
    pub fn to_json(&self) -> Value {
        // Serializing owned strings and serde_json values into a Value cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Envelope::Single(record) => record.serialize(serializer),
            Envelope::Multiple(multiple) => serialize_record_fields(
                serializer,
                ErrorType::Multiple,
                ErrorType::Multiple.as_str(),
                &multiple.detail,
                None,
                multiple.extra.as_ref(),
                Some(multiple.list.as_slice()),
            ),
        }
    }
}

impl From<ErrorRecord> for Envelope {
    fn from(record: ErrorRecord) -> Self {
        Envelope::Single(record)
    }
}

/// A normalized error ready to be written by the hosting framework.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ErrorResponse {
    /// HTTP status derived from the handled exception.
    pub status: StatusCode,
    /// JSON body.
    pub envelope: Envelope,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, envelope: Envelope) -> Self {
        Self { status, envelope }
    }

    /// Renders the body as a JSON value.
    pub fn body(&self) -> Value {
        self.envelope.to_json()
    }
}
