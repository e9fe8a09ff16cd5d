//! # error-envelope
//!
//! Normalizes every error a web API raises into one predictable JSON
//! envelope, so that clients can handle failures without knowing where they
//! came from.
//!
//! ## Overview
//!
//! Every exception reaching the framework's error hook goes through four
//! stages:
//!
//! 1. **Dispatch**: internal errors may be passed through untouched in debug
//!    mode; everything else is reported once to a [`Reporter`].
//! 2. **Classification** ([`classify`]): the exception is mapped onto one of
//!    the fixed [`ErrorType`]s, with a default code and message.
//! 3. **Flattening** ([`flatten`]): nested payloads ([`ErrorTree`]) become a
//!    list of [`ErrorRecord`]s whose `attr` is the field path joined by a
//!    separator (`__` by default).
//! 4. **Aggregation** ([`aggregate`]): one record is returned as is; several
//!    are wrapped in a `multiple` envelope when enabled.
//!
//! Internal error messages never reach clients. They are replaced by
//! `"Something went wrong."` and only the reporter sees the original.
//!
//! ## Example
//!
//! ```rust
//! use error_envelope::{
//!     ApiException, ErrorTree, Exception, ExceptionHandler, HandlerConfig, RecordingReporter,
//!     RequestContext,
//! };
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let reporter = Arc::new(RecordingReporter::new());
//! let handler = ExceptionHandler::new(HandlerConfig::new().with_reporter(reporter.clone()));
//! let ctx = RequestContext::new().with_path("/hedgehogs");
//!
//! let exception: Exception = ApiException::validation(ErrorTree::fields([
//!     ("name", ErrorTree::coded("This field is required.", "required")),
//! ]))
//! .into();
//!
//! let response = handler.handle(&exception, &ctx).into_response().unwrap();
//! assert_eq!(response.status.as_u16(), 400);
//! assert_eq!(
//!     response.body(),
//!     json!({
//!         "type": "validation_error",
//!         "code": "required",
//!         "detail": "This field is required.",
//!         "attr": "name",
//!         "extra": null,
//!         "list": null,
//!     })
//! );
//!
//! let response = handler
//!     .handle(&Exception::internal("connection refused"), &ctx)
//!     .into_response()
//!     .unwrap();
//! assert_eq!(response.envelope.detail(), "Something went wrong.");
//! assert_eq!(reporter.len(), 2);
//! ```

pub mod code;
pub mod config;
pub mod context;
pub mod error;
pub mod exception;
pub mod handler;
pub mod i18n;
pub mod path;
pub mod pipeline;
pub mod registry;
pub mod reporting;

#[cfg(feature = "axum")]
mod axum_response;

pub use config::{ConfigError, ConfigErrors, HandlerConfig, HandlerSettings};
pub use context::RequestContext;
pub use error::{
    Envelope, ErrorRecord, ErrorRecords, ErrorResponse, ErrorType, MultipleErrors, MULTIPLE_DETAIL,
};
pub use exception::{
    ApiException, ErrorDetail, ErrorTree, Exception, ExceptionKind, ExceptionParser,
    FrameworkError,
};
pub use handler::{ExceptionHandler, Outcome};
pub use i18n::{IdentityLocalizer, Localizer};
pub use path::AttrPath;
pub use pipeline::{
    aggregate, aggregate_with_detail, classify, flatten, try_flatten, Classification,
    EmptyPayload, GENERIC_DETAIL,
};
pub use registry::{Registry, RegistryError};
pub use reporting::{LogReporter, NoopReporter, RecordingReporter, Report, ReportError, Reporter};
