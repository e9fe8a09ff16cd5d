//! Canonical error records and the envelopes that carry them.
//!
//! This module provides the output side of the pipeline: the fixed
//! [`ErrorType`] taxonomy, [`ErrorRecord`] and its non-empty collection
//! [`ErrorRecords`], and the [`Envelope`]/[`ErrorResponse`] pair handed back
//! to the hosting framework.

mod envelope;
mod error_type;
mod record;

pub use envelope::{Envelope, ErrorResponse, MultipleErrors, MULTIPLE_DETAIL};
pub use error_type::ErrorType;
pub use record::{ErrorRecord, ErrorRecords};
