//! Handler configuration.
//!
//! [`HandlerSettings`] is the serializable form, with the option names
//! hosting applications put in their settings files. Resolving it against a
//! [`Registry`] yields a [`HandlerConfig`], the typed form the
//! [`ExceptionHandler`](crate::ExceptionHandler) owns.

use std::fmt::{self, Display};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stillwater::prelude::*;
use stillwater::Validation;

use crate::exception::ExceptionParser;
use crate::i18n::{IdentityLocalizer, Localizer};
use crate::path::DEFAULT_SEPARATOR;
use crate::registry::{Registry, RegistryError, LOG_REPORTER};
use crate::reporting::{LogReporter, Reporter};

/// Settings as written in a configuration file.
///
/// Every key is optional. Unknown keys are rejected so that typos do not
/// silently fall back to defaults.
///
/// # Example
///
/// ```rust
/// use error_envelope::{HandlerSettings, Registry};
///
/// let settings = HandlerSettings::from_json_str(r#"{
///     "NESTED_KEY_SEPARATOR": ".",
///     "SUPPORT_MULTIPLE_EXCEPTIONS": true
/// }"#).unwrap();
///
/// let config = settings.resolve(&Registry::new()).into_result().unwrap();
/// assert_eq!(config.nested_key_separator(), ".");
/// assert!(config.supports_multiple_exceptions());
/// assert!(!config.enabled_in_debug());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields, default)]
pub struct HandlerSettings {
    /// Normalize internal errors even when the framework runs in debug mode.
    pub enable_in_debug: bool,
    /// Joins nested field names in `attr`.
    pub nested_key_separator: String,
    /// Report every flattened record instead of only the first.
    pub support_multiple_exceptions: bool,
    /// Registry name of the reporter.
    pub exception_reporting: String,
    /// Registry names of additional exception parsers, tried in order.
    pub extra_exception_parsers: Vec<String>,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            enable_in_debug: false,
            nested_key_separator: DEFAULT_SEPARATOR.to_string(),
            support_multiple_exceptions: false,
            exception_reporting: LOG_REPORTER.to_string(),
            extra_exception_parsers: Vec::new(),
        }
    }
}

impl HandlerSettings {
    /// Parses settings from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON, wrong value types, or
    /// unknown keys.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves names against `registry` and checks every value.
    ///
    /// All problems are reported together rather than one at a time.
    pub fn resolve(&self, registry: &Registry) -> Validation<HandlerConfig, ConfigErrors> {
        let mut errors = Vec::new();

        if self.nested_key_separator.is_empty() {
            errors.push(ConfigError::EmptySeparator);
        }

        let reporter = match registry.reporter(&self.exception_reporting) {
            Ok(reporter) => Some(reporter),
            Err(e) => {
                errors.push(e.into());
                None
            }
        };

        let mut parsers = Vec::with_capacity(self.extra_exception_parsers.len());
        for name in &self.extra_exception_parsers {
            match registry.parser(name) {
                Ok(parser) => parsers.push(parser),
                Err(e) => errors.push(e.into()),
            }
        }

        match (ConfigErrors::from_vec(errors), reporter) {
            (Some(errors), _) => Validation::Failure(errors),
            (None, Some(reporter)) => Validation::Success(HandlerConfig {
                debug: false,
                enable_in_debug: self.enable_in_debug,
                nested_key_separator: self.nested_key_separator.clone(),
                support_multiple_exceptions: self.support_multiple_exceptions,
                reporter,
                parsers,
                localizer: Arc::new(IdentityLocalizer),
            }),
            (None, None) => Validation::Failure(ConfigErrors::single(
                RegistryError::ReporterNotFound(self.exception_reporting.clone()).into(),
            )),
        }
    }
}

/// Resolved configuration.
///
/// Built from [`HandlerSettings::resolve`] or directly with the builder
/// methods. `debug` mirrors the hosting framework's debug mode and is not
/// part of the settings file.
#[derive(Clone)]
pub struct HandlerConfig {
    debug: bool,
    enable_in_debug: bool,
    nested_key_separator: String,
    support_multiple_exceptions: bool,
    reporter: Arc<dyn Reporter>,
    parsers: Vec<Arc<dyn ExceptionParser>>,
    localizer: Arc<dyn Localizer>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            debug: false,
            enable_in_debug: false,
            nested_key_separator: DEFAULT_SEPARATOR.to_string(),
            support_multiple_exceptions: false,
            reporter: Arc::new(LogReporter),
            parsers: Vec::new(),
            localizer: Arc::new(IdentityLocalizer),
        }
    }
}

impl HandlerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tells the handler whether the framework runs in debug mode.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn enable_in_debug(mut self, enabled: bool) -> Self {
        self.enable_in_debug = enabled;
        self
    }

    /// Sets the `attr` separator. An empty separator is ignored.
    pub fn with_nested_key_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if !separator.is_empty() {
            self.nested_key_separator = separator;
        }
        self
    }

    pub fn support_multiple_exceptions(mut self, enabled: bool) -> Self {
        self.support_multiple_exceptions = enabled;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Appends a parser; parsers run in the order they were added.
    pub fn with_parser(mut self, parser: Arc<dyn ExceptionParser>) -> Self {
        self.parsers.push(parser);
        self
    }

    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn enabled_in_debug(&self) -> bool {
        self.enable_in_debug
    }

    pub fn nested_key_separator(&self) -> &str {
        &self.nested_key_separator
    }

    pub fn supports_multiple_exceptions(&self) -> bool {
        self.support_multiple_exceptions
    }

    pub fn reporter(&self) -> &dyn Reporter {
        &*self.reporter
    }

    pub fn parsers(&self) -> &[Arc<dyn ExceptionParser>] {
        &self.parsers
    }

    pub fn localizer(&self) -> &dyn Localizer {
        &*self.localizer
    }
}

impl fmt::Debug for HandlerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerConfig")
            .field("debug", &self.debug)
            .field("enable_in_debug", &self.enable_in_debug)
            .field("nested_key_separator", &self.nested_key_separator)
            .field(
                "support_multiple_exceptions",
                &self.support_multiple_exceptions,
            )
            .field("parsers", &self.parsers.len())
            .finish_non_exhaustive()
    }
}

/// A single configuration problem.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("NESTED_KEY_SEPARATOR must not be empty")]
    EmptySeparator,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// A non-empty collection of configuration problems.
#[derive(Debug)]
pub struct ConfigErrors(NonEmptyVec<ConfigError>);

impl ConfigErrors {
    pub fn single(error: ConfigError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Returns `None` if `errors` is empty.
    pub fn from_vec(errors: Vec<ConfigError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> {
        self.0.iter()
    }

    pub fn first(&self) -> &ConfigError {
        self.0.head()
    }

    pub fn into_vec(self) -> Vec<ConfigError> {
        self.0.into_vec()
    }
}

impl Semigroup for ConfigErrors {
    fn combine(self, other: Self) -> Self {
        ConfigErrors(self.0.combine(other.0))
    }
}

impl Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::ApiException;
    use std::error::Error as StdError;

    #[test]
    fn test_default_settings() {
        let settings = HandlerSettings::default();
        assert!(!settings.enable_in_debug);
        assert_eq!(settings.nested_key_separator, "__");
        assert!(!settings.support_multiple_exceptions);
        assert_eq!(settings.exception_reporting, "log");
        assert!(settings.extra_exception_parsers.is_empty());
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let settings = HandlerSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, HandlerSettings::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = HandlerSettings::from_json_str(r#"{"NESTED_SEPARATOR": "."}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let err = HandlerSettings::from_json_str(r#"{"ENABLE_IN_DEBUG": "yes"}"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid settings"));
    }

    #[test]
    fn test_resolve_accumulates_every_error() {
        let settings = HandlerSettings {
            nested_key_separator: String::new(),
            exception_reporting: "sentry".to_string(),
            extra_exception_parsers: vec!["db".to_string(), "cache".to_string()],
            ..HandlerSettings::default()
        };

        let errors = settings
            .resolve(&Registry::new())
            .into_result()
            .err()
            .unwrap();
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors.first(), ConfigError::EmptySeparator));

        let display = errors.to_string();
        assert!(display.contains("4 error(s)"));
        assert!(display.contains("reporter 'sentry' not found"));
        assert!(display.contains("exception parser 'cache' not found"));
    }

    #[test]
    fn test_resolve_keeps_parser_order() {
        let registry = Registry::new();
        registry
            .register_parser(
                "first",
                Arc::new(|_: &(dyn StdError + 'static)| Some(ApiException::not_found())),
            )
            .unwrap();
        registry
            .register_parser(
                "second",
                Arc::new(|_: &(dyn StdError + 'static)| Some(ApiException::parse_error())),
            )
            .unwrap();

        let settings = HandlerSettings {
            extra_exception_parsers: vec!["second".to_string(), "first".to_string()],
            ..HandlerSettings::default()
        };
        let config = settings.resolve(&registry).into_result().unwrap();
        assert_eq!(config.parsers().len(), 2);

        let error = std::fmt::Error;
        let parsed = config.parsers()[0].parse(&error).unwrap();
        assert_eq!(parsed, ApiException::parse_error());
    }

    #[test]
    fn test_builder_ignores_empty_separator() {
        let config = HandlerConfig::new().with_nested_key_separator("");
        assert_eq!(config.nested_key_separator(), "__");
    }

    #[test]
    fn test_config_errors_combine() {
        let combined = ConfigErrors::single(ConfigError::EmptySeparator).combine(
            ConfigErrors::single(RegistryError::ParserNotFound("x".to_string()).into()),
        );
        assert_eq!(combined.len(), 2);
        assert!(!combined.is_empty());
    }
}
