//! The normalization pipeline.
//!
//! Three pure stages, run in order for every handled exception:
//!
//! 1. [`classify`] picks the [`ErrorType`](crate::ErrorType) and the defaults
//!    for an exception;
//! 2. [`flatten`] walks the exception's nested payload into an ordered,
//!    non-empty [`ErrorRecords`](crate::ErrorRecords);
//! 3. [`aggregate`] turns those records into the response
//!    [`Envelope`](crate::Envelope).
//!
//! None of the stages keeps state, performs I/O, or panics.

mod aggregate;
mod classify;
mod flatten;

pub use aggregate::{aggregate, aggregate_with_detail};
pub use classify::{category_type, classify, Classification, GENERIC_DETAIL};
pub use flatten::{fallback_record, flatten, try_flatten, EmptyPayload};
