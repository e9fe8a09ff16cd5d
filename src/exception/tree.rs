//! Nested error payloads.
//!
//! Validation failures arrive as trees: a message, a list of messages, a
//! mapping of field name to nested failures, or per-item failures of a
//! many-valued field. [`ErrorTree`] models all four shapes.

use indexmap::IndexMap;
use serde_json::Value;

/// A single message with an optional machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub message: String,
    pub code: Option<String>,
}

impl ErrorDetail {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// A possibly nested error payload.
///
/// # Example
///
/// ```rust
/// use error_envelope::{ErrorDetail, ErrorTree};
///
/// let tree = ErrorTree::fields([
///     ("email", ErrorTree::list([
///         ErrorDetail::new("This field is required.").with_code("required"),
///     ])),
///     ("password", ErrorTree::list([
///         ErrorDetail::new("This password is unsafe.").with_code("unsafe_password"),
///     ])),
/// ]);
///
/// assert_eq!(tree.leaf_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorTree {
    /// One message.
    Leaf(ErrorDetail),
    /// Several failures for the same location; adds no path segment.
    List(Vec<ErrorTree>),
    /// Failures keyed by field name, in declaration order.
    Fields(IndexMap<String, ErrorTree>),
    /// Failures of a many-valued field, one entry per input item; each entry
    /// adds its position as a path segment.
    Items(Vec<ErrorTree>),
}

impl ErrorTree {
    /// Creates a leaf from a bare message.
    pub fn message(message: impl Into<String>) -> Self {
        ErrorTree::Leaf(ErrorDetail::new(message))
    }

    /// Creates a leaf with a message and a code.
    pub fn coded(message: impl Into<String>, code: impl Into<String>) -> Self {
        ErrorTree::Leaf(ErrorDetail::new(message).with_code(code))
    }

    pub fn list<I, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ErrorTree>,
    {
        ErrorTree::List(entries.into_iter().map(Into::into).collect())
    }

    pub fn fields<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<ErrorTree>,
    {
        ErrorTree::Fields(
            entries
                .into_iter()
                .map(|(name, tree)| (name.into(), tree.into()))
                .collect(),
        )
    }

    pub fn items<I, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ErrorTree>,
    {
        ErrorTree::Items(entries.into_iter().map(Into::into).collect())
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            ErrorTree::Leaf(_) => 1,
            ErrorTree::List(entries) | ErrorTree::Items(entries) => {
                entries.iter().map(ErrorTree::leaf_count).sum()
            }
            ErrorTree::Fields(fields) => fields.values().map(ErrorTree::leaf_count).sum(),
        }
    }

    /// True if the tree holds no message at all.
    pub fn is_empty(&self) -> bool {
        self.leaf_count() == 0
    }

    /// First message in traversal order.
    pub fn first_message(&self) -> Option<&str> {
        match self {
            ErrorTree::Leaf(detail) => Some(detail.message.as_str()),
            ErrorTree::List(entries) | ErrorTree::Items(entries) => {
                entries.iter().find_map(ErrorTree::first_message)
            }
            ErrorTree::Fields(fields) => fields.values().find_map(ErrorTree::first_message),
        }
    }

    /// Builds a tree from JSON shaped like framework validation output.
    ///
    /// - strings, numbers and booleans become leaves;
    /// - an object whose keys are only `message` (a string) and optionally
    ///   `code` (a string) becomes a coded leaf;
    /// - any other object becomes [`ErrorTree::Fields`], keeping key order;
    /// - an array holding any nested object or array becomes
    ///   [`ErrorTree::Items`], so every element, leaves included, gets its
    ///   position in the path; any other array becomes [`ErrorTree::List`];
    /// - `null` becomes an empty list.
    ///
    /// A form with exactly the fields `message` and `code` is read as a leaf.
    ///
    /// # Example
    ///
    /// ```rust
    /// use error_envelope::ErrorTree;
    /// use serde_json::json;
    ///
    /// let tree = ErrorTree::from_value(&json!({
    ///     "name": ["This field is required."],
    ///     "age": [{"message": "A valid integer is required.", "code": "invalid"}],
    /// }));
    ///
    /// assert_eq!(tree.leaf_count(), 2);
    /// assert_eq!(tree.first_message(), Some("This field is required."));
    /// ```
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => ErrorTree::List(Vec::new()),
            Value::String(message) => ErrorTree::message(message.as_str()),
            Value::Bool(_) | Value::Number(_) => ErrorTree::message(value.to_string()),
            Value::Array(entries) => {
                let positional = entries.iter().any(is_nested);
                let children = entries.iter().map(ErrorTree::from_value).collect();
                if positional {
                    ErrorTree::Items(children)
                } else {
                    ErrorTree::List(children)
                }
            }
            Value::Object(map) => match leaf_from_object(value) {
                Some(detail) => ErrorTree::Leaf(detail),
                None => ErrorTree::Fields(
                    map.iter()
                        .map(|(key, nested)| (key.clone(), ErrorTree::from_value(nested)))
                        .collect(),
                ),
            },
        }
    }
}

/// Arrays and objects that are not `{"message", "code"}` leaves.
fn is_nested(value: &Value) -> bool {
    match value {
        Value::Array(_) => true,
        Value::Object(_) => leaf_from_object(value).is_none(),
        _ => false,
    }
}

fn leaf_from_object(value: &Value) -> Option<ErrorDetail> {
    let map = value.as_object()?;
    if map.keys().any(|key| key != "message" && key != "code") {
        return None;
    }

    let message = map.get("message")?.as_str()?;
    let detail = ErrorDetail::new(message);
    match map.get("code") {
        None | Some(Value::Null) => Some(detail),
        Some(Value::String(code)) => Some(detail.with_code(code.as_str())),
        Some(_) => None,
    }
}

impl From<ErrorDetail> for ErrorTree {
    fn from(detail: ErrorDetail) -> Self {
        ErrorTree::Leaf(detail)
    }
}

impl From<&str> for ErrorTree {
    fn from(message: &str) -> Self {
        ErrorTree::message(message)
    }
}

impl From<String> for ErrorTree {
    fn from(message: String) -> Self {
        ErrorTree::message(message)
    }
}

impl From<&Value> for ErrorTree {
    fn from(value: &Value) -> Self {
        ErrorTree::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaf_count_and_emptiness() {
        assert_eq!(ErrorTree::message("x").leaf_count(), 1);
        assert!(ErrorTree::List(Vec::new()).is_empty());
        assert!(ErrorTree::fields([("a", ErrorTree::List(Vec::new()))]).is_empty());
        assert!(!ErrorTree::items([ErrorTree::message("x")]).is_empty());
    }

    #[test]
    fn test_first_message_skips_empty_branches() {
        let tree = ErrorTree::fields([
            ("a", ErrorTree::List(Vec::new())),
            ("b", ErrorTree::list(["second"])),
        ]);
        assert_eq!(tree.first_message(), Some("second"));
    }

    #[test]
    fn test_from_value_string_and_scalars() {
        assert_eq!(ErrorTree::from_value(&json!("bad")), ErrorTree::message("bad"));
        assert_eq!(ErrorTree::from_value(&json!(42)), ErrorTree::message("42"));
        assert!(ErrorTree::from_value(&Value::Null).is_empty());
    }

    #[test]
    fn test_from_value_coded_leaf() {
        let tree = ErrorTree::from_value(&json!({"message": "Too short.", "code": "min_length"}));
        assert_eq!(tree, ErrorTree::coded("Too short.", "min_length"));

        let tree = ErrorTree::from_value(&json!({"message": "Too short."}));
        assert_eq!(tree, ErrorTree::message("Too short."));
    }

    #[test]
    fn test_from_value_object_with_other_keys_is_fields() {
        let tree = ErrorTree::from_value(&json!({"message": ["Required."], "title": "Bad."}));
        match tree {
            ErrorTree::Fields(fields) => {
                let keys: Vec<_> = fields.keys().cloned().collect();
                assert_eq!(keys, vec!["message".to_string(), "title".to_string()]);
            }
            other => panic!("expected fields, got {:?}", other),
        }
    }

    #[test]
    fn test_from_value_arrays() {
        assert!(matches!(
            ErrorTree::from_value(&json!(["a", "b"])),
            ErrorTree::List(_)
        ));
        assert!(matches!(
            ErrorTree::from_value(&json!([{"message": "a"}])),
            ErrorTree::List(_)
        ));
        assert!(matches!(
            ErrorTree::from_value(&json!([{"name": ["a"]}, {}])),
            ErrorTree::Items(_)
        ));
        assert!(matches!(
            ErrorTree::from_value(&json!([["a"], ["b"]])),
            ErrorTree::Items(_)
        ));
    }

    #[test]
    fn test_from_value_mixed_array_is_items() {
        let tree = ErrorTree::from_value(&json!([{"message": "a"}, {"name": ["x"]}]));
        assert_eq!(
            tree,
            ErrorTree::items([
                ErrorTree::message("a"),
                ErrorTree::fields([("name", ErrorTree::list(["x"]))]),
            ])
        );

        assert!(matches!(
            ErrorTree::from_value(&json!(["a", ["b"]])),
            ErrorTree::Items(_)
        ));
    }

    #[test]
    fn test_from_value_preserves_key_order() {
        let tree = ErrorTree::from_value(&json!({"zeta": "z", "alpha": "a", "mid": "m"}));
        match tree {
            ErrorTree::Fields(fields) => {
                let keys: Vec<_> = fields.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
            }
            other => panic!("expected fields, got {:?}", other),
        }
    }
}
