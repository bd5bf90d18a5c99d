use super::stable_json_bytes;
use serde_json::json;

#[test]
fn nested_keys_are_sorted() {
    let value = json!({"data": {"b.properties": "x=1", "a.properties": ""}, "kind": "ConfigMap"});
    let bytes = stable_json_bytes(&value);
    let text = String::from_utf8(bytes).expect("must be utf8 json");
    assert_eq!(
        text,
        r#"{"data":{"a.properties":"","b.properties":"x=1"},"kind":"ConfigMap"}"#
    );
}

#[test]
fn array_order_is_kept() {
    let value = json!({"items": [{"z": 1, "a": 2}, "b", "a"]});
    let text = String::from_utf8(stable_json_bytes(&value)).expect("must be utf8 json");
    assert_eq!(text, r#"{"items":[{"a":2,"z":1},"b","a"]}"#);
}
