//! Exceptions entering the pipeline.
//!
//! [`Exception`] is what the framework hook receives: either a deliberate
//! [`ApiException`] with an [`ExceptionKind`] and an optional nested
//! [`ErrorTree`] payload, or an arbitrary internal error. Internal errors can
//! be mapped onto API exceptions through registered [`ExceptionParser`]s.

mod api;
mod kind;
mod parser;
mod tree;

pub use api::{ApiException, Exception, FrameworkError};
pub use kind::ExceptionKind;
pub use parser::ExceptionParser;
pub use tree::{ErrorDetail, ErrorTree};
