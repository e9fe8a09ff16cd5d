//! Normalization of machine-readable error codes.
//!
//! Codes arrive from many places: framework error kinds (`MethodNotAllowed`),
//! validator identifiers (`max-length`), or hand-written strings. Clients get
//! one shape regardless: lowercase `snake_case`.

use heck::ToSnakeCase;

/// Code emitted by validators that give no more specific reason.
pub const GENERIC_INVALID_CODE: &str = "invalid";

/// Replacement for [`GENERIC_INVALID_CODE`] in client-facing output.
pub const INVALID_INPUT_CODE: &str = "invalid_input";

/// Normalizes a raw code into `snake_case`.
///
/// Word boundaries are case changes and any non-alphanumeric run; letters
/// outside ASCII are kept. Returns `None` when nothing usable is left (empty
/// or punctuation-only input), letting the caller fall back to a less
/// specific code.
///
/// # Example
///
/// ```rust
/// use error_envelope::code::normalize_code;
///
/// assert_eq!(normalize_code("MethodNotAllowed").as_deref(), Some("method_not_allowed"));
/// assert_eq!(normalize_code("max-length").as_deref(), Some("max_length"));
/// assert_eq!(normalize_code("invalid").as_deref(), Some("invalid_input"));
/// assert_eq!(normalize_code("  "), None);
/// ```
pub fn normalize_code(raw: &str) -> Option<String> {
    let code = raw.to_snake_case();

    match code.as_str() {
        "" => None,
        GENERIC_INVALID_CODE => Some(INVALID_INPUT_CODE.to_string()),
        _ => Some(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_snake_case_is_unchanged() {
        assert_eq!(normalize_code("required").as_deref(), Some("required"));
        assert_eq!(
            normalize_code("unsafe_password").as_deref(),
            Some("unsafe_password")
        );
    }

    #[test]
    fn test_camel_and_pascal_case() {
        assert_eq!(normalize_code("notFound").as_deref(), Some("not_found"));
        assert_eq!(
            normalize_code("UnsupportedMediaType").as_deref(),
            Some("unsupported_media_type")
        );
    }

    #[test]
    fn test_acronyms() {
        assert_eq!(normalize_code("HTTPError").as_deref(), Some("http_error"));
    }

    #[test]
    fn test_separators_collapse() {
        assert_eq!(
            normalize_code("This field is required.").as_deref(),
            Some("this_field_is_required")
        );
        assert_eq!(normalize_code("--max--length--").as_deref(), Some("max_length"));
    }

    #[test]
    fn test_generic_invalid_becomes_invalid_input() {
        assert_eq!(normalize_code("invalid").as_deref(), Some("invalid_input"));
        assert_eq!(normalize_code("Invalid").as_deref(), Some("invalid_input"));
        assert_eq!(
            normalize_code("invalid_choice").as_deref(),
            Some("invalid_choice")
        );
    }

    #[test]
    fn test_non_ascii_letters_are_kept() {
        assert_eq!(
            normalize_code("échec_validation").as_deref(),
            Some("échec_validation")
        );
        assert_eq!(
            normalize_code("обязательное").as_deref(),
            Some("обязательное")
        );
        assert_eq!(normalize_code("ÉchecValidation").as_deref(), Some("échec_validation"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_code(""), None);
        assert_eq!(normalize_code("___"), None);
        assert_eq!(normalize_code("!!"), None);
    }
}
