//! Turning nested error payloads into an ordered list of records.

use serde_json::Value;

use super::classify::Classification;
use crate::code::normalize_code;
use crate::error::{ErrorRecord, ErrorRecords, ErrorType};
use crate::exception::{ErrorDetail, ErrorTree, Exception};
use crate::path::AttrPath;

/// Walks one exception's payload with fixed classification and separator.
struct Flattener<'a> {
    classification: &'a Classification,
    separator: &'a str,
    extra: Option<&'a Value>,
}

impl Flattener<'_> {
    /// Depth-first, in declaration order.
    fn walk(&self, tree: &ErrorTree, path: &AttrPath, records: &mut Vec<ErrorRecord>) {
        match tree {
            ErrorTree::Leaf(detail) => records.push(self.leaf(detail, path)),
            ErrorTree::List(entries) => {
                for entry in entries {
                    self.walk(entry, path, records);
                }
            }
            ErrorTree::Fields(fields) => {
                for (name, nested) in fields {
                    self.walk(nested, &path.push_field(name.as_str()), records);
                }
            }
            ErrorTree::Items(entries) => {
                for (index, entry) in entries.iter().enumerate() {
                    self.walk(entry, &path.push_index(index), records);
                }
            }
        }
    }

    fn leaf(&self, detail: &ErrorDetail, path: &AttrPath) -> ErrorRecord {
        let code = detail
            .code
            .as_deref()
            .and_then(normalize_code)
            .unwrap_or_else(|| self.classification.default_code.clone());
        let message = if detail.message.is_empty() {
            self.classification.default_detail.as_str()
        } else {
            detail.message.as_str()
        };

        ErrorRecord::new(self.classification.error_type, message)
            .with_code(code)
            .with_attr(path.join(self.separator))
            .with_extra(self.extra.cloned())
    }

    fn default_record(&self, path: &AttrPath) -> ErrorRecord {
        ErrorRecord::new(
            self.classification.error_type,
            self.classification.default_detail.as_str(),
        )
        .with_code(self.classification.default_code.as_str())
        .with_attr(path.join(self.separator))
        .with_extra(self.extra.cloned())
    }
}

/// Record used when an exception yields nothing usable.
pub fn fallback_record() -> ErrorRecord {
    let unclassified = Classification::unclassified();
    ErrorRecord::new(ErrorType::ServerError, unclassified.default_detail)
        .with_code(unclassified.default_code)
}

/// A payload that contained no leaves at all.
///
/// Nothing in it can be shown to the client, so the error is treated as an
/// internal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("error payload contains no messages")]
pub struct EmptyPayload;

/// Flattens an exception into its records.
///
/// `attr` paths start at the classification's `default_attr` and are joined
/// with `separator`. The result is never empty:
///
/// - a concealed classification yields exactly one record, built from the
///   defaults only;
/// - an exception without a payload yields one record with the defaults;
/// - a payload with no leaves at all is malformed and yields
///   [`fallback_record`]. Use [`try_flatten`] to tell this case apart.
///
/// # Example
///
/// ```rust
/// use error_envelope::{classify, flatten, ApiException, ErrorTree, Exception};
///
/// let exception: Exception = ApiException::validation(ErrorTree::fields([
///     ("parent", ErrorTree::fields([("child", "Required.")])),
/// ]))
/// .into();
/// let classification = classify(&exception);
///
/// let records = flatten(&exception, &classification, "__");
/// assert_eq!(records.first().attr(), Some("parent__child"));
///
/// let records = flatten(&exception, &classification, ".");
/// assert_eq!(records.first().attr(), Some("parent.child"));
/// ```
pub fn flatten(
    exception: &Exception,
    classification: &Classification,
    separator: &str,
) -> ErrorRecords {
    try_flatten(exception, classification, separator)
        .unwrap_or_else(|EmptyPayload| ErrorRecords::single(fallback_record()))
}

/// Like [`flatten`], but fails with [`EmptyPayload`] instead of substituting
/// the fallback record.
pub fn try_flatten(
    exception: &Exception,
    classification: &Classification,
    separator: &str,
) -> Result<ErrorRecords, EmptyPayload> {
    let api = exception.as_api();
    let flattener = Flattener {
        classification,
        separator,
        extra: api.and_then(|api| api.extra()),
    };
    let root = classification
        .default_attr
        .as_deref()
        .map(AttrPath::from_field)
        .unwrap_or_default();

    if classification.conceal {
        return Ok(ErrorRecords::single(
            flattener.default_record(&AttrPath::root()),
        ));
    }

    match api.and_then(|api| api.detail()) {
        None => Ok(ErrorRecords::single(flattener.default_record(&root))),
        Some(tree) => {
            let mut records = Vec::with_capacity(tree.leaf_count());
            flattener.walk(tree, &root, &mut records);
            ErrorRecords::from_vec(records).ok_or(EmptyPayload)
        }
    }
}
