use super::{IssueSeverity, StructuredIssue};
use crate::FieldPath;

#[test]
fn issues_are_sorted_by_severity_then_path() {
    let mut issues = vec![
        StructuredIssue {
            kind: "configuration".to_string(),
            severity: IssueSeverity::Warning,
            field_path: FieldPath::keys(&["spec", "b"]),
            message: "second".to_string(),
            reference: None,
            object: None,
        },
        StructuredIssue::error(
            "configuration",
            FieldPath::keys(&["spec", "z"]),
            "first",
            "merge.duplicate_container",
        ),
        StructuredIssue::error(
            "configuration",
            FieldPath::keys(&["spec", "a"]),
            "first",
            "merge.duplicate_volume",
        ),
    ];

    StructuredIssue::sort_stable(&mut issues);

    assert_eq!(issues[0].field_path.to_string(), "$.spec.a");
    assert_eq!(issues[1].field_path.to_string(), "$.spec.z");
    assert_eq!(issues[2].severity, IssueSeverity::Warning);
}

#[test]
fn object_is_skipped_when_absent() {
    let issue = StructuredIssue::error("parse_error", FieldPath::root(), "bad", "yaml.parse_error");
    let encoded = serde_json::to_value(&issue).expect("serializable");
    assert!(encoded.get("object").is_none());

    let scoped = issue.with_object("ConfigMap/greeting-props");
    assert_eq!(scoped.object.as_deref(), Some("ConfigMap/greeting-props"));
}
