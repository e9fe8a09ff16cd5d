//! Named reporters and exception parsers.
//!
//! Settings refer to reporters and parsers by name (`EXCEPTION_REPORTING`,
//! `EXTRA_EXCEPTION_PARSERS`). The [`Registry`] resolves those names to
//! implementations registered at startup.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::exception::ExceptionParser;
use crate::reporting::{LogReporter, NoopReporter, Reporter};

type ReporterMap = Arc<RwLock<HashMap<String, Arc<dyn Reporter>>>>;
type ParserMap = Arc<RwLock<HashMap<String, Arc<dyn ExceptionParser>>>>;

/// Name of the built-in reporter that drops every report.
pub const NOOP_REPORTER: &str = "noop";

/// Name of the built-in reporter that writes to `tracing`.
pub const LOG_REPORTER: &str = "log";

/// A thread-safe registry of named reporters and parsers.
///
/// Clones share the same storage, so a registry can be handed to several
/// configuration loaders and still see later registrations.
///
/// # Example
///
/// ```rust
/// use error_envelope::{Registry, RecordingReporter};
/// use std::sync::Arc;
///
/// let registry = Registry::new();
/// let recorder = Arc::new(RecordingReporter::new());
/// registry.register_reporter("memory", recorder.clone()).unwrap();
///
/// assert!(registry.reporter("memory").is_ok());
/// assert!(registry.reporter("log").is_ok());
/// assert!(registry.register_reporter("memory", recorder).is_err());
/// ```
#[derive(Clone)]
pub struct Registry {
    reporters: ReporterMap,
    parsers: ParserMap,
}

impl Registry {
    /// Creates a registry holding the built-in `noop` and `log` reporters.
    pub fn new() -> Self {
        let mut reporters: HashMap<String, Arc<dyn Reporter>> = HashMap::new();
        reporters.insert(NOOP_REPORTER.to_string(), Arc::new(NoopReporter));
        reporters.insert(LOG_REPORTER.to_string(), Arc::new(LogReporter));

        Self {
            reporters: Arc::new(RwLock::new(reporters)),
            parsers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a reporter under a name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateReporter` if the name is taken.
    pub fn register_reporter(
        &self,
        name: impl Into<String>,
        reporter: Arc<dyn Reporter>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut reporters = self.reporters.write();

        if reporters.contains_key(&name) {
            return Err(RegistryError::DuplicateReporter(name));
        }

        reporters.insert(name, reporter);
        Ok(())
    }

    /// Registers an exception parser under a name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateParser` if the name is taken.
    pub fn register_parser(
        &self,
        name: impl Into<String>,
        parser: Arc<dyn ExceptionParser>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut parsers = self.parsers.write();

        if parsers.contains_key(&name) {
            return Err(RegistryError::DuplicateParser(name));
        }

        parsers.insert(name, parser);
        Ok(())
    }

    /// Looks up a reporter.
    pub fn reporter(&self, name: &str) -> Result<Arc<dyn Reporter>, RegistryError> {
        self.reporters
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::ReporterNotFound(name.to_string()))
    }

    /// Looks up a parser.
    pub fn parser(&self, name: &str) -> Result<Arc<dyn ExceptionParser>, RegistryError> {
        self.parsers
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::ParserNotFound(name.to_string()))
    }

    /// Registered reporter names, sorted.
    pub fn reporter_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.reporters.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Registered parser names, sorted.
    pub fn parser_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.parsers.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("reporters", &self.reporter_names())
            .field("parsers", &self.parser_names())
            .finish()
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("reporter '{0}' already registered")]
    DuplicateReporter(String),

    #[error("exception parser '{0}' already registered")]
    DuplicateParser(String),

    #[error("reporter '{0}' not found")]
    ReporterNotFound(String),

    #[error("exception parser '{0}' not found")]
    ParserNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::ApiException;
    use std::error::Error as StdError;

    fn not_found_parser() -> Arc<dyn ExceptionParser> {
        Arc::new(|_: &(dyn StdError + 'static)| Some(ApiException::not_found()))
    }

    #[test]
    fn test_builtins_present() {
        let registry = Registry::new();
        assert_eq!(registry.reporter_names(), vec!["log", "noop"]);
        assert!(registry.parser_names().is_empty());
    }

    #[test]
    fn test_duplicate_reporter_fails() {
        let registry = Registry::new();
        let err = registry
            .register_reporter("log", Arc::new(NoopReporter))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateReporter("log".to_string()));
    }

    #[test]
    fn test_parser_roundtrip() {
        let registry = Registry::new();
        registry.register_parser("nf", not_found_parser()).unwrap();

        assert!(registry.parser("nf").is_ok());
        assert_eq!(
            registry.register_parser("nf", not_found_parser()).unwrap_err(),
            RegistryError::DuplicateParser("nf".to_string())
        );
    }

    #[test]
    fn test_missing_names() {
        let registry = Registry::new();
        assert_eq!(
            registry.reporter("sentry").err(),
            Some(RegistryError::ReporterNotFound("sentry".to_string()))
        );
        assert_eq!(
            registry.parser("db").err(),
            Some(RegistryError::ParserNotFound("db".to_string()))
        );
    }

    #[test]
    fn test_clones_share_storage() {
        let registry = Registry::new();
        let clone = registry.clone();
        registry.register_parser("nf", not_found_parser()).unwrap();
        assert!(clone.parser("nf").is_ok());
    }
}
