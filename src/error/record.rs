//! Canonical error records.
//!
//! This module provides [`ErrorRecord`], the atomic unit of every error
//! response, and [`ErrorRecords`], a non-empty ordered collection of them.

use std::fmt::{self, Display};

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;
use stillwater::prelude::*;

use super::error_type::ErrorType;

/// A single normalized error.
///
/// Records are built once and never modified: fields are private, and the
/// `with_*` builders consume the record to produce the next one.
///
/// `type` and `code` are never empty. A record created without a code uses
/// the category name as its code.
///
/// # Example
///
/// ```rust
/// use error_envelope::{ErrorRecord, ErrorType};
///
/// let record = ErrorRecord::new(ErrorType::ValidationError, "This field is required.")
///     .with_code("required")
///     .with_attr(Some("name".to_string()));
///
/// assert_eq!(record.code(), "required");
/// assert_eq!(record.attr(), Some("name"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    error_type: ErrorType,
    code: String,
    detail: String,
    attr: Option<String>,
    extra: Option<Value>,
}

impl ErrorRecord {
    /// Creates a record whose code defaults to the category name.
    pub fn new(error_type: ErrorType, detail: impl Into<String>) -> Self {
        Self {
            error_type,
            code: error_type.as_str().to_string(),
            detail: detail.into(),
            attr: None,
            extra: None,
        }
    }

    /// Sets the code. An empty code leaves the current one in place.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        if !code.is_empty() {
            self.code = code;
        }
        self
    }

    /// Sets the offending attribute path.
    pub fn with_attr(mut self, attr: Option<String>) -> Self {
        self.attr = attr;
        self
    }

    /// Attaches caller-supplied auxiliary data.
    pub fn with_extra(mut self, extra: Option<Value>) -> Self {
        self.extra = extra;
        self
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn attr(&self) -> Option<&str> {
        self.attr.as_deref()
    }

    pub fn extra(&self) -> Option<&Value> {
        self.extra.as_ref()
    }
}

impl Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.error_type, self.code)?;
        if let Some(ref attr) = self.attr {
            write!(f, " at {}", attr)?;
        }
        write!(f, ": {}", self.detail)
    }
}

/// Writes the wire shape shared by plain records and `multiple` envelopes.
///
/// Every field is always present; absent values are `null`.
pub(crate) fn serialize_record_fields<S: Serializer>(
    serializer: S,
    error_type: ErrorType,
    code: &str,
    detail: &str,
    attr: Option<&str>,
    extra: Option<&Value>,
    list: Option<&[ErrorRecord]>,
) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("ErrorRecord", 6)?;
    state.serialize_field("type", &error_type)?;
    state.serialize_field("code", code)?;
    state.serialize_field("detail", detail)?;
    state.serialize_field("attr", &attr)?;
    state.serialize_field("extra", &extra)?;
    state.serialize_field("list", &list)?;
    state.end()
}

impl Serialize for ErrorRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_record_fields(
            serializer,
            self.error_type,
            &self.code,
            &self.detail,
            self.attr.as_deref(),
            self.extra.as_ref(),
            None,
        )
    }
}

/// A non-empty, ordered collection of error records.
///
/// Order is traversal order of the payload the records were flattened from.
/// Wrapping `NonEmptyVec` makes an empty result unrepresentable, so every
/// consumer can rely on [`ErrorRecords::first`].
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecords(NonEmptyVec<ErrorRecord>);

impl ErrorRecords {
    /// Creates a collection holding a single record.
    pub fn single(record: ErrorRecord) -> Self {
        Self(NonEmptyVec::singleton(record))
    }

    /// Creates a collection from a `Vec`, or `None` if the vec is empty.
    pub fn from_vec(records: Vec<ErrorRecord>) -> Option<Self> {
        NonEmptyVec::from_vec(records).map(Self)
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the records in order.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.0.iter()
    }

    /// Returns the first record in traversal order.
    pub fn first(&self) -> &ErrorRecord {
        self.0.head()
    }

    /// Converts this collection into a `Vec`.
    pub fn into_vec(self) -> Vec<ErrorRecord> {
        self.0.into_vec()
    }
}

impl Semigroup for ErrorRecords {
    fn combine(self, other: Self) -> Self {
        ErrorRecords(self.0.combine(other.0))
    }
}

impl Display for ErrorRecords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} error record(s):", self.len())?;
        for (i, record) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, record)?;
        }
        Ok(())
    }
}

impl IntoIterator for ErrorRecords {
    type Item = ErrorRecord;
    type IntoIter = std::vec::IntoIter<ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorRecord>();
    assert_sync::<ErrorRecord>();
    assert_send::<ErrorRecords>();
    assert_sync::<ErrorRecords>();
};
