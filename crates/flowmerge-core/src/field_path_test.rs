use super::{FieldPath, FieldPathSegment};

#[test]
fn root_renders_as_dollar() {
    let path = FieldPath::root();
    assert!(path.is_root());
    assert_eq!(path.to_string(), "$");
}

#[test]
fn builder_renders_keys_and_indexes() {
    let path = FieldPath::keys(&["spec", "podTemplate", "podSpec"])
        .key("containers")
        .index(1)
        .key("name");
    assert_eq!(path.to_string(), "$.spec.podTemplate.podSpec.containers[1].name");
    assert_eq!(path.segments()[4], FieldPathSegment::Index(1));
}

#[test]
fn paths_order_by_segments() {
    let left = FieldPath::keys(&["spec", "a"]);
    let right = FieldPath::keys(&["spec", "b"]);
    assert!(left < right);
}
