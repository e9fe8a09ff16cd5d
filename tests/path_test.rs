//! Integration tests for AttrPath.

use error_envelope::AttrPath;

#[test]
fn test_path_construction_and_join() {
    assert_eq!(AttrPath::root().to_string(), "");
    assert_eq!(AttrPath::root().join("__"), None);

    assert_eq!(
        AttrPath::root().push_field("name").join("__").as_deref(),
        Some("name")
    );

    let path = AttrPath::root()
        .push_field("orders")
        .push_index(3)
        .push_field("address")
        .push_field("city");
    assert_eq!(path.to_string(), "orders__3__address__city");
    assert_eq!(path.join("__").as_deref(), Some("orders__3__address__city"));
    assert_eq!(path.join(".").as_deref(), Some("orders.3.address.city"));
    assert_eq!(path.join("/").as_deref(), Some("orders/3/address/city"));
}

#[test]
fn test_index_segments_render_as_numbers() {
    let path = AttrPath::from_field("data").push_index(42).push_field("value");
    assert_eq!(path.join("__").as_deref(), Some("data__42__value"));
    assert_ne!(
        path,
        AttrPath::from_field("data").push_field("42").push_field("value")
    );
}

#[test]
fn test_non_field_keys_join_to_none() {
    assert_eq!(AttrPath::from_field("non_field_errors").join("__"), None);
    assert_eq!(AttrPath::from_field("__all__").join("."), None);

    // Only the whole path counts.
    assert_eq!(
        AttrPath::from_field("form")
            .push_field("non_field_errors")
            .join("__")
            .as_deref(),
        Some("form__non_field_errors")
    );
}

#[test]
fn test_separator_is_not_escaped() {
    let nested = AttrPath::from_field("parent").push_field("child");
    let flat = AttrPath::from_field("parent__child");

    assert_ne!(nested, flat);
    assert_eq!(nested.join("__"), flat.join("__"));
}

#[test]
fn test_paths_are_immutable() {
    let base = AttrPath::from_field("form");
    let email = base.push_field("email");
    let password = base.push_field("password");

    assert_eq!(base.join("__").as_deref(), Some("form"));
    assert_eq!(email.join("__").as_deref(), Some("form__email"));
    assert_eq!(password.join("__").as_deref(), Some("form__password"));
    assert_eq!(email, AttrPath::from_field("form").push_field("email"));
}
