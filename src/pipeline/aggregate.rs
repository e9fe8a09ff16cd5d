//! Choosing between a single record and a `multiple` envelope.

use crate::error::{Envelope, ErrorRecords, MultipleErrors, MULTIPLE_DETAIL};

/// Builds the envelope for a set of records.
///
/// One record is returned as is. With more than one, `multiple_enabled`
/// decides: when set, all records are wrapped in order; when not, only the
/// first record surfaces and the others are dropped.
///
/// # Example
///
/// ```rust
/// use error_envelope::{aggregate, ErrorRecord, ErrorRecords, ErrorType};
///
/// let records = ErrorRecords::from_vec(vec![
///     ErrorRecord::new(ErrorType::ValidationError, "a").with_attr(Some("email".into())),
///     ErrorRecord::new(ErrorType::ValidationError, "b").with_attr(Some("password".into())),
/// ])
/// .unwrap();
///
/// assert_eq!(aggregate(records.clone(), false).attr(), Some("email"));
/// assert_eq!(aggregate(records, true).list().map(|l| l.len()), Some(2));
/// ```
pub fn aggregate(records: ErrorRecords, multiple_enabled: bool) -> Envelope {
    aggregate_with_detail(records, multiple_enabled, MULTIPLE_DETAIL)
}

/// Like [`aggregate`], with the `multiple` wrapper's message supplied by the
/// caller (typically a localized [`MULTIPLE_DETAIL`]).
///
/// The wrapper carries the `extra` of the first record.
pub fn aggregate_with_detail(
    records: ErrorRecords,
    multiple_enabled: bool,
    detail: impl Into<String>,
) -> Envelope {
    if records.len() == 1 || !multiple_enabled {
        return Envelope::Single(records.first().clone());
    }

    let extra = records.first().extra().cloned();
    Envelope::Multiple(MultipleErrors::new(detail.into(), extra, records.into_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorRecord, ErrorType};
    use serde_json::json;

    fn record(attr: &str) -> ErrorRecord {
        ErrorRecord::new(ErrorType::ValidationError, "bad").with_attr(Some(attr.to_string()))
    }

    fn records(attrs: &[&str]) -> ErrorRecords {
        ErrorRecords::from_vec(attrs.iter().map(|a| record(a)).collect()).unwrap()
    }

    #[test]
    fn test_single_record_is_returned_unchanged() {
        for enabled in [false, true] {
            let envelope = aggregate(records(&["name"]), enabled);
            assert_eq!(envelope, Envelope::Single(record("name")));
        }
    }

    #[test]
    fn test_disabled_keeps_only_first() {
        let envelope = aggregate(records(&["email", "password", "age"]), false);
        assert_eq!(envelope, Envelope::Single(record("email")));
        assert!(envelope.list().is_none());
    }

    #[test]
    fn test_enabled_wraps_all_in_order() {
        let envelope = aggregate(records(&["email", "password"]), true);
        assert_eq!(envelope.error_type(), ErrorType::Multiple);
        assert_eq!(envelope.code(), "multiple");
        assert_eq!(envelope.attr(), None);
        assert_eq!(envelope.detail(), MULTIPLE_DETAIL);

        let attrs: Vec<_> = envelope
            .list()
            .unwrap()
            .iter()
            .map(|r| r.attr().unwrap())
            .collect();
        assert_eq!(attrs, vec!["email", "password"]);
    }

    #[test]
    fn test_wrapper_carries_first_extra() {
        let with_extra = ErrorRecords::from_vec(vec![
            record("a").with_extra(Some(json!({"id": 7}))),
            record("b").with_extra(Some(json!({"id": 7}))),
        ])
        .unwrap();

        let envelope = aggregate(with_extra, true);
        assert_eq!(envelope.extra(), Some(&json!({"id": 7})));
    }

    #[test]
    fn test_custom_detail() {
        let envelope = aggregate_with_detail(records(&["a", "b"]), true, "Plusieurs erreurs.");
        assert_eq!(envelope.detail(), "Plusieurs erreurs.");
    }
}
