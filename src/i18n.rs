//! Translation hook for messages the pipeline writes itself.
//!
//! Only pipeline-authored text goes through a [`Localizer`]: kind defaults,
//! the generic server error message, and the `multiple` wrapper detail.
//! Messages supplied by API code are assumed to be translated already.

use std::borrow::Cow;

/// Looks up a translation of `message` for `locale`.
///
/// Closures returning `Option<String>` are localizers too; `None` keeps the
/// original message.
///
/// # Example
///
/// ```rust
/// use error_envelope::Localizer;
///
/// let french = |message: &str, locale: Option<&str>| match (message, locale) {
///     ("Not found.", Some("fr")) => Some("Introuvable.".to_string()),
///     _ => None,
/// };
///
/// assert_eq!(french.localize("Not found.", Some("fr")), "Introuvable.");
/// assert_eq!(french.localize("Not found.", None), "Not found.");
/// ```
pub trait Localizer: Send + Sync {
    fn localize<'a>(&self, message: &'a str, locale: Option<&str>) -> Cow<'a, str>;
}

/// Returns every message unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLocalizer;

impl Localizer for IdentityLocalizer {
    fn localize<'a>(&self, message: &'a str, _locale: Option<&str>) -> Cow<'a, str> {
        Cow::Borrowed(message)
    }
}

impl<F> Localizer for F
where
    F: Fn(&str, Option<&str>) -> Option<String> + Send + Sync,
{
    fn localize<'a>(&self, message: &'a str, locale: Option<&str>) -> Cow<'a, str> {
        match self(message, locale) {
            Some(translated) => Cow::Owned(translated),
            None => Cow::Borrowed(message),
        }
    }
}
